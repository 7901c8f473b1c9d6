//! Workout list synchronizer

use flexify_core::{filter_by_name, Workout, WorkoutPayload};

use crate::context::SyncContext;
use crate::epoch::ViewEpoch;
use crate::error::{Result, SyncError};

/// Which listing the screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkoutScope {
    /// `GET /workout/GetAllDashboard`
    #[default]
    Dashboard,
    /// `GET /workout/GetAll`
    Mine,
}

pub struct WorkoutSync {
    ctx: SyncContext,
    epoch: ViewEpoch,
    scope: WorkoutScope,
    workouts: Vec<Workout>,
    query: String,
    last_error: Option<String>,
}

impl WorkoutSync {
    pub fn new(ctx: SyncContext) -> Self {
        Self {
            ctx,
            epoch: ViewEpoch::new(),
            scope: WorkoutScope::default(),
            workouts: Vec::new(),
            query: String::new(),
            last_error: None,
        }
    }

    /// Handle for the screen to invalidate in-flight operations when it is left.
    pub fn epoch(&self) -> ViewEpoch {
        self.epoch.clone()
    }

    pub fn leave(&self) {
        self.epoch.advance();
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// The workouts whose name matches the current search query.
    pub fn filtered(&self) -> Vec<&Workout> {
        filter_by_name(&self.workouts, &self.query)
    }

    /// Replace the collection with the dashboard listing.
    pub async fn list(&mut self) -> Result<()> {
        self.scope = WorkoutScope::Dashboard;
        self.refresh().await
    }

    /// Replace the collection with the signed-in user's workouts.
    pub async fn list_mine(&mut self) -> Result<()> {
        self.scope = WorkoutScope::Mine;
        self.refresh().await
    }

    async fn refresh(&mut self) -> Result<()> {
        let result = self.fetch().await;
        self.ctx
            .settle(&mut self.last_error, "Error fetching data", result)
    }

    async fn fetch(&mut self) -> Result<()> {
        self.ctx.ensure_token().await?;
        let ticket = self.epoch.ticket();
        let workouts = match self.scope {
            WorkoutScope::Dashboard => self.ctx.api.list_workouts().await?,
            WorkoutScope::Mine => self.ctx.api.list_my_workouts().await?,
        };
        ticket.ensure_current()?;
        tracing::debug!(count = workouts.len(), scope = ?self.scope, "workouts listed");
        self.workouts = workouts;
        Ok(())
    }

    /// Create a workout, then re-list.
    pub async fn create(&mut self, name: &str) -> Result<()> {
        let result = self.try_create(name).await;
        let result = self
            .ctx
            .settle(&mut self.last_error, "Failed to create workout", result);
        if result.is_ok() {
            self.ctx.success("Workout added successfully");
            self.refresh_quietly().await;
        }
        result
    }

    async fn try_create(&mut self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(SyncError::Validation(
                "Please enter a workout title".to_string(),
            ));
        }
        self.ctx.ensure_token().await?;
        let ticket = self.epoch.ticket();
        self.ctx
            .api
            .create_workout(&WorkoutPayload {
                name: name.to_string(),
            })
            .await?;
        ticket.ensure_current()
    }

    /// Rename a workout. The local item is replaced once the server confirms.
    pub async fn update(&mut self, id: &str, name: &str) -> Result<()> {
        let result = self.try_update(id, name).await;
        let result = self
            .ctx
            .settle(&mut self.last_error, "Failed to update workout", result);
        if result.is_ok() {
            self.ctx.success("Workout updated successfully");
        }
        result
    }

    async fn try_update(&mut self, id: &str, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(SyncError::Validation(
                "Please enter a workout title".to_string(),
            ));
        }
        self.ctx.ensure_token().await?;
        let ticket = self.epoch.ticket();
        let updated = self
            .ctx
            .api
            .update_workout(
                id,
                &WorkoutPayload {
                    name: name.to_string(),
                },
            )
            .await?;
        ticket.ensure_current()?;

        if let Some(local) = self.workouts.iter_mut().find(|w| w.id == id) {
            match updated {
                Some(server) => *local = server,
                None => local.name = name.to_string(),
            }
        }
        Ok(())
    }

    /// Delete a workout, drop it locally, then re-list.
    pub async fn delete(&mut self, id: &str) -> Result<()> {
        let result = self.try_delete(id).await;
        let result = self
            .ctx
            .settle(&mut self.last_error, "Failed to delete workout", result);
        if result.is_ok() {
            self.ctx.success("Workout deleted successfully");
            self.refresh_quietly().await;
        }
        result
    }

    async fn try_delete(&mut self, id: &str) -> Result<()> {
        self.ctx.ensure_token().await?;
        let ticket = self.epoch.ticket();
        self.ctx.api.delete_workout(id).await?;
        ticket.ensure_current()?;
        self.workouts.retain(|w| w.id != id);
        Ok(())
    }

    /// Re-list after a write. A failure here is reported by `refresh` itself
    /// and does not undo the write.
    async fn refresh_quietly(&mut self) {
        if let Err(e) = self.refresh().await {
            tracing::debug!(error = %e, "re-list after write failed");
        }
    }
}
