//! Account flows: sign in, sign up, profile edits, account removal

use flexify_client::ApiError;
use flexify_core::{LoginRequest, ProfileUpdate, RegisterRequest, Role, Session};
use session_manager::Route;

use crate::context::SyncContext;
use crate::error::{Result, SyncError};

/// Sign-up form as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub age: String,
}

impl RegistrationForm {
    pub fn to_request(&self) -> Result<RegisterRequest> {
        let age = self
            .age
            .trim()
            .parse::<u32>()
            .map_err(|_| SyncError::Validation("Age must be a number".to_string()))?;
        Ok(RegisterRequest {
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            age,
        })
    }
}

/// Profile edit form. Blank fields are left unchanged on the server.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub age: String,
}

impl ProfileForm {
    /// Build the partial update. The username is only sent when it differs
    /// from `current_username`, and the age only when it is a number.
    pub fn to_update(&self, current_username: &str) -> Result<ProfileUpdate> {
        if self.password != self.confirm_password {
            return Err(SyncError::Validation("Passwords do not match".to_string()));
        }
        let non_blank = |value: &str| Some(value.to_string()).filter(|v| !v.trim().is_empty());

        Ok(ProfileUpdate {
            username: non_blank(&self.username).filter(|name| name != current_username),
            email: non_blank(&self.email),
            password: non_blank(&self.password),
            age: self.age.trim().parse::<u32>().ok(),
        })
    }
}

pub struct AccountService {
    ctx: SyncContext,
}

impl AccountService {
    pub fn new(ctx: SyncContext) -> Self {
        Self { ctx }
    }

    /// Exchange credentials for a token and start the session.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let result = self.try_login(email, password).await;
        match &result {
            Ok(_) => self.ctx.success("Logged in successfully!"),
            Err(e) => self.report("Login failed", e),
        }
        result
    }

    async fn try_login(&self, email: &str, password: &str) -> Result<Session> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(SyncError::Validation(
                "Please enter your email and password".to_string(),
            ));
        }
        let response = self
            .ctx
            .api
            .login(&LoginRequest {
                email: email.trim().to_string(),
                password: password.to_string(),
            })
            .await?;
        let session = self
            .ctx
            .session
            .login(
                &response.access_token,
                Role::from_stored(&response.role),
                &response.sub,
                response.username.as_deref(),
            )
            .await?;
        Ok(session)
    }

    /// Create an account. On success the caller should show the login screen.
    pub async fn register(&self, form: &RegistrationForm) -> Result<Route> {
        let result = self.try_register(form).await;
        match &result {
            Ok(_) => self
                .ctx
                .success_with("Registration successful", "You can now log in"),
            Err(e) => self.report("Registration failed", e),
        }
        result
    }

    async fn try_register(&self, form: &RegistrationForm) -> Result<Route> {
        let request = form.to_request()?;
        self.ctx.api.register(&request).await?;
        tracing::info!(username = %request.username, "account registered");
        Ok(Route::LOGIN)
    }

    /// Send the changed profile fields. Returns what was sent; nothing is sent
    /// when no field changed.
    pub async fn update_profile(&self, form: &ProfileForm) -> Result<ProfileUpdate> {
        let result = self.try_update_profile(form).await;
        match &result {
            Ok(update) if update.is_empty() => {}
            Ok(_) => self
                .ctx
                .success_with("Profile updated successfully", "Your changes have been saved"),
            Err(e) => self.report("Update failed", e),
        }
        result
    }

    async fn try_update_profile(&self, form: &ProfileForm) -> Result<ProfileUpdate> {
        let session = self.ctx.session.require_session()?;
        self.ctx.ensure_token().await?;
        let update = form.to_update(&session.display_name)?;
        if update.is_empty() {
            tracing::debug!("profile unchanged, nothing to send");
            return Ok(update);
        }

        self.ctx
            .api
            .update_user(&session.subject_id, &update)
            .await?;
        if let Some(username) = &update.username {
            // The server already holds the new name; a local write failure
            // only leaves the cached display name behind.
            if let Err(e) = self.ctx.session.set_display_name(username).await {
                tracing::warn!(error = %e, "failed to store updated display name");
            }
        }
        Ok(update)
    }

    /// Delete the signed-in account, then end the session.
    pub async fn delete_account(&self) -> Result<()> {
        let result = self.try_delete_account().await;
        match &result {
            Ok(()) => self.ctx.success("Account deleted"),
            Err(e) => self.report("Failed to delete account", e),
        }
        result
    }

    async fn try_delete_account(&self) -> Result<()> {
        let session = self.ctx.session.require_session()?;
        self.ctx.ensure_token().await?;
        self.ctx.api.delete_user(&session.subject_id).await?;
        self.ctx.session.logout().await?;
        Ok(())
    }

    pub async fn logout(&self) -> Result<()> {
        let result = self.ctx.session.logout().await.map_err(SyncError::from);
        match &result {
            Ok(()) => self.ctx.success("Logged out"),
            Err(e) => self.report("Logout failed", e),
        }
        result
    }

    fn report(&self, title: &str, error: &SyncError) {
        match error {
            SyncError::Api(ApiError::UnexpectedStatus(_)) => {
                self.ctx.failure("Unexpected status code", error)
            }
            SyncError::Api(
                ApiError::MissingCredentials
                | ApiError::Transport(_)
                | ApiError::Http { .. }
                | ApiError::Decode(_),
            )
            | SyncError::Validation(_)
            | SyncError::Session(_) => self.ctx.failure(title, error),
            _ => self.ctx.failure("Unexpected error", error),
        }
    }
}
