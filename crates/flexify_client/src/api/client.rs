use std::sync::Arc;

use async_trait::async_trait;
use flexify_core::{
    Config, Exercise, ExercisePayload, ExerciseTemplate, LoginRequest, LoginResponse,
    ProfileUpdate, RegisterRequest, SetPayload, Workout, WorkoutPayload, WorkoutSet,
};
use log::info;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Proxy, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::Serialize;
use storage_manager::KeyValueStore;

use crate::auth::bearer::BearerAuthMiddleware;
use crate::client_trait::FlexifyApi;
use crate::endpoints::{self, with_id};
use crate::error::{ApiError, Result};
use crate::utils::http_utils::{decode_json, decode_optional, execute_request, expect_status};

const OK: &[StatusCode] = &[StatusCode::OK];
const CREATED: &[StatusCode] = &[StatusCode::CREATED];
const DELETED: &[StatusCode] = &[StatusCode::OK, StatusCode::NO_CONTENT];

/// REST client for the Flexify backend.
///
/// Every request passes through [`BearerAuthMiddleware`], which reads the
/// token from the same store the session manager writes to.
#[derive(Clone)]
pub struct FlexifyClient {
    http: Arc<ClientWithMiddleware>,
    base_url: String,
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for FlexifyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlexifyClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl FlexifyClient {
    pub fn new(config: &Config, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let client = Self::build_http_client(config)?;
        let http = ClientBuilder::new(client)
            .with(BearerAuthMiddleware::new(Arc::clone(&store)))
            .build();

        info!("Flexify client targeting {}", config.base_url());
        Ok(Self {
            http: Arc::new(http),
            base_url: config.base_url().to_string(),
            store,
        })
    }

    fn build_http_client(config: &Config) -> Result<Client> {
        let mut builder = Client::builder().default_headers(Self::get_default_headers());
        if config.no_proxy {
            builder = builder.no_proxy();
        } else {
            if !config.http_proxy.is_empty() {
                let proxy = Proxy::http(&config.http_proxy)
                    .map_err(|e| ApiError::Unexpected(format!("invalid HTTP proxy: {e}")))?;
                builder = builder.proxy(proxy);
            }
            if !config.https_proxy.is_empty() {
                let proxy = Proxy::https(&config.https_proxy)
                    .map_err(|e| ApiError::Unexpected(format!("invalid HTTPS proxy: {e}")))?;
                builder = builder.proxy(proxy);
            }
        }
        builder
            .build()
            .map_err(|e| ApiError::Unexpected(format!("Failed to build HTTP client: {e}")))
    }

    pub fn get_default_headers() -> HeaderMap {
        let mut header = HeaderMap::new();
        header.insert(ACCEPT, HeaderValue::from_static("application/json"));
        header.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        header
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&T>,
        accepted: &[StatusCode],
    ) -> Result<reqwest::Response> {
        let response = execute_request(&self.http, method, &self.url(path), body).await?;
        expect_status(response, accepted).await
    }

    async fn get_json<R: serde::de::DeserializeOwned>(&self, path: &str) -> Result<R> {
        let response = self.send::<()>(Method::GET, path, None, OK).await?;
        decode_json(response).await
    }
}

#[async_trait]
impl FlexifyApi for FlexifyClient {
    async fn has_token(&self) -> bool {
        BearerAuthMiddleware::current_token(self.store.as_ref())
            .await
            .is_some()
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        let response = self
            .send(Method::POST, endpoints::LOGIN, Some(request), CREATED)
            .await?;
        decode_json(response).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<()> {
        self.send(Method::POST, endpoints::REGISTER, Some(request), CREATED)
            .await?;
        Ok(())
    }

    async fn update_user(&self, subject_id: &str, update: &ProfileUpdate) -> Result<()> {
        let path = with_id(endpoints::USERS, subject_id);
        self.send(Method::PATCH, &path, Some(update), OK).await?;
        Ok(())
    }

    async fn delete_user(&self, subject_id: &str) -> Result<()> {
        let path = with_id(endpoints::USERS, subject_id);
        self.send::<()>(Method::DELETE, &path, None, DELETED).await?;
        Ok(())
    }

    async fn list_workouts(&self) -> Result<Vec<Workout>> {
        self.get_json(endpoints::GET_ALL_WORKOUTS).await
    }

    async fn list_my_workouts(&self) -> Result<Vec<Workout>> {
        self.get_json(endpoints::GET_USER_WORKOUTS).await
    }

    async fn create_workout(&self, payload: &WorkoutPayload) -> Result<()> {
        self.send(Method::POST, endpoints::ADD_WORKOUT, Some(payload), CREATED)
            .await?;
        Ok(())
    }

    async fn update_workout(&self, id: &str, payload: &WorkoutPayload) -> Result<Option<Workout>> {
        let path = with_id(endpoints::UPDATE_WORKOUT, id);
        let response = self.send(Method::PUT, &path, Some(payload), OK).await?;
        Ok(decode_optional(response).await)
    }

    async fn delete_workout(&self, id: &str) -> Result<()> {
        let path = with_id(endpoints::DELETE_WORKOUT, id);
        self.send::<()>(Method::DELETE, &path, None, OK).await?;
        Ok(())
    }

    async fn list_exercises(&self, workout_id: &str) -> Result<Vec<Exercise>> {
        self.get_json(&with_id(endpoints::GET_EXERCISES, workout_id))
            .await
    }

    async fn add_exercise(&self, workout_id: &str, payload: &ExercisePayload) -> Result<()> {
        let path = with_id(endpoints::ADD_EXERCISE, workout_id);
        self.send(Method::POST, &path, Some(payload), CREATED)
            .await?;
        Ok(())
    }

    async fn update_exercise(
        &self,
        id: &str,
        payload: &ExercisePayload,
    ) -> Result<Option<Exercise>> {
        let path = with_id(endpoints::UPDATE_EXERCISE, id);
        let response = self.send(Method::PUT, &path, Some(payload), OK).await?;
        Ok(decode_optional(response).await)
    }

    async fn delete_exercise(&self, id: &str) -> Result<()> {
        let path = with_id(endpoints::DELETE_EXERCISE, id);
        self.send::<()>(Method::DELETE, &path, None, DELETED).await?;
        Ok(())
    }

    async fn list_catalog(&self) -> Result<Vec<ExerciseTemplate>> {
        self.get_json(endpoints::GET_EXLIST).await
    }

    async fn list_sets(&self, exercise_id: &str) -> Result<Vec<WorkoutSet>> {
        self.get_json(&with_id(endpoints::GET_SET_BY_EXERCISE, exercise_id))
            .await
    }

    async fn create_set(&self, exercise_id: &str, payload: &SetPayload) -> Result<WorkoutSet> {
        let path = with_id(endpoints::ADD_SET, exercise_id);
        let response = self.send(Method::POST, &path, Some(payload), CREATED).await?;
        decode_json(response).await
    }

    async fn update_set(&self, id: &str, payload: &SetPayload) -> Result<WorkoutSet> {
        let path = with_id(endpoints::UPDATE_SET, id);
        let response = self.send(Method::PUT, &path, Some(payload), OK).await?;
        decode_json(response).await
    }

    async fn delete_set(&self, id: &str) -> Result<()> {
        let path = with_id(endpoints::REMOVE_SET, id);
        self.send::<()>(Method::DELETE, &path, None, DELETED).await?;
        Ok(())
    }
}
