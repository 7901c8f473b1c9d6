//! Exercises of one workout

use flexify_core::{filter_by_name, Exercise, ExercisePayload, ExerciseTemplate};

use crate::context::SyncContext;
use crate::epoch::ViewEpoch;
use crate::error::{Result, SyncError};

pub struct ExerciseSync {
    ctx: SyncContext,
    epoch: ViewEpoch,
    workout_id: String,
    exercises: Vec<Exercise>,
    query: String,
    last_error: Option<String>,
}

impl ExerciseSync {
    pub fn new(ctx: SyncContext, workout_id: impl Into<String>) -> Self {
        Self {
            ctx,
            epoch: ViewEpoch::new(),
            workout_id: workout_id.into(),
            exercises: Vec::new(),
            query: String::new(),
            last_error: None,
        }
    }

    pub fn workout_id(&self) -> &str {
        &self.workout_id
    }

    pub fn epoch(&self) -> ViewEpoch {
        self.epoch.clone()
    }

    pub fn leave(&self) {
        self.epoch.advance();
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn filtered(&self) -> Vec<&Exercise> {
        filter_by_name(&self.exercises, &self.query)
    }

    /// Replace the collection with the workout's exercises.
    pub async fn list(&mut self) -> Result<()> {
        let result = self.fetch().await;
        self.ctx
            .settle(&mut self.last_error, "Error fetching data", result)
    }

    async fn fetch(&mut self) -> Result<()> {
        self.ctx.ensure_token().await?;
        let ticket = self.epoch.ticket();
        let exercises = self.ctx.api.list_exercises(&self.workout_id).await?;
        ticket.ensure_current()?;
        tracing::debug!(workout_id = %self.workout_id, count = exercises.len(), "exercises listed");
        self.exercises = exercises;
        Ok(())
    }

    /// Add every selected catalog entry to the workout, one request at a time,
    /// then re-list. Each failure is reported on its own; the first one is
    /// returned once all entries have been tried. Leaving the view stops the
    /// run at the next response with `SyncError::Stale`.
    pub async fn add_selected(&mut self, selection: &[ExerciseTemplate]) -> Result<usize> {
        if selection.is_empty() {
            return Ok(0);
        }
        if let Err(e) = self.ctx.ensure_token().await {
            return self
                .ctx
                .settle(&mut self.last_error, "Failed to add exercises", Err(e));
        }

        let ticket = self.epoch.ticket();
        let mut added = 0;
        let mut first_error: Option<SyncError> = None;
        for template in selection {
            let payload = template.payload();
            let result = self.ctx.api.add_exercise(&self.workout_id, &payload).await;
            if let Err(stale) = ticket.ensure_current() {
                tracing::debug!(added, requested = selection.len(), "exercise add abandoned");
                return Err(stale);
            }
            match result {
                Ok(()) => {
                    added += 1;
                    self.ctx.success("Exercises added successfully");
                }
                Err(e) => {
                    let error = SyncError::from(e);
                    self.ctx.failure("Failed to add exercises", &error);
                    first_error.get_or_insert(error);
                }
            }
        }
        tracing::info!(added, requested = selection.len(), "exercises added");

        if let Err(e) = self.list().await {
            tracing::debug!(error = %e, "re-list after add failed");
        }
        match first_error {
            Some(e) => {
                self.last_error = Some(e.user_message());
                Err(e)
            }
            None => Ok(added),
        }
    }

    /// Update an exercise and replace the local item once confirmed.
    pub async fn update(&mut self, id: &str, payload: &ExercisePayload) -> Result<()> {
        let result = self.try_update(id, payload).await;
        let result = self
            .ctx
            .settle(&mut self.last_error, "Failed to update exercise", result);
        if result.is_ok() {
            self.ctx.success("Exercise updated successfully");
        }
        result
    }

    async fn try_update(&mut self, id: &str, payload: &ExercisePayload) -> Result<()> {
        self.ctx.ensure_token().await?;
        let ticket = self.epoch.ticket();
        let updated = self.ctx.api.update_exercise(id, payload).await?;
        ticket.ensure_current()?;

        if let Some(local) = self.exercises.iter_mut().find(|e| e.id == id) {
            match updated {
                Some(server) => *local = server,
                None => {
                    local.name = payload.name.clone();
                    local.muscle_group = payload.muscle_group.clone();
                }
            }
        }
        Ok(())
    }

    /// Delete an exercise, drop it locally, then re-list.
    pub async fn delete(&mut self, id: &str) -> Result<()> {
        let result = self.try_delete(id).await;
        let result = self
            .ctx
            .settle(&mut self.last_error, "Failed to delete exercise", result);
        if result.is_ok() {
            self.ctx.success("Exercise deleted successfully");
            if let Err(e) = self.list().await {
                tracing::debug!(error = %e, "re-list after delete failed");
            }
        }
        result
    }

    async fn try_delete(&mut self, id: &str) -> Result<()> {
        self.ctx.ensure_token().await?;
        let ticket = self.epoch.ticket();
        self.ctx.api.delete_exercise(id).await?;
        ticket.ensure_current()?;
        self.exercises.retain(|e| e.id != id);
        Ok(())
    }
}
