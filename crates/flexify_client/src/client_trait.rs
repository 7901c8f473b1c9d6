use async_trait::async_trait;
use flexify_core::{
    Exercise, ExercisePayload, ExerciseTemplate, LoginRequest, LoginResponse, ProfileUpdate,
    RegisterRequest, SetPayload, Workout, WorkoutPayload, WorkoutSet,
};

use crate::error::Result;

/// Every backend operation the app performs.
///
/// Each method succeeds only on the status the backend documents for it;
/// any other 2xx is reported as [`crate::ApiError::UnexpectedStatus`].
#[async_trait]
pub trait FlexifyApi: Send + Sync {
    /// Whether a non-empty access token is currently stored.
    async fn has_token(&self) -> bool;

    // Account
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse>;
    async fn register(&self, request: &RegisterRequest) -> Result<()>;
    async fn update_user(&self, subject_id: &str, update: &ProfileUpdate) -> Result<()>;
    async fn delete_user(&self, subject_id: &str) -> Result<()>;

    // Workouts
    async fn list_workouts(&self) -> Result<Vec<Workout>>;
    async fn list_my_workouts(&self) -> Result<Vec<Workout>>;
    async fn create_workout(&self, payload: &WorkoutPayload) -> Result<()>;
    /// `None` when the server acknowledged the update without a workout body.
    async fn update_workout(&self, id: &str, payload: &WorkoutPayload) -> Result<Option<Workout>>;
    async fn delete_workout(&self, id: &str) -> Result<()>;

    // Exercises
    async fn list_exercises(&self, workout_id: &str) -> Result<Vec<Exercise>>;
    async fn add_exercise(&self, workout_id: &str, payload: &ExercisePayload) -> Result<()>;
    async fn update_exercise(&self, id: &str, payload: &ExercisePayload)
        -> Result<Option<Exercise>>;
    async fn delete_exercise(&self, id: &str) -> Result<()>;
    async fn list_catalog(&self) -> Result<Vec<ExerciseTemplate>>;

    // Sets
    async fn list_sets(&self, exercise_id: &str) -> Result<Vec<WorkoutSet>>;
    async fn create_set(&self, exercise_id: &str, payload: &SetPayload) -> Result<WorkoutSet>;
    async fn update_set(&self, id: &str, payload: &SetPayload) -> Result<WorkoutSet>;
    async fn delete_set(&self, id: &str) -> Result<()>;
}
