//! Sets of one exercise
//!
//! The collection is kept sorted by serie index. Deleting renumbers the
//! remaining sets 1..N in their current order, regardless of what the server
//! holds. Saving writes every set concurrently and only replaces the local
//! collection when all writes succeeded.

use std::sync::Arc;

use flexify_client::ApiError;
use flexify_core::{SetPayload, WorkoutSet};
use futures::future::join_all;

use crate::context::SyncContext;
use crate::epoch::ViewEpoch;
use crate::error::{Result, SyncError};

/// Editable numeric column of a set row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetField {
    Reps,
    Kg,
}

/// A set whose write failed during a bulk save.
#[derive(Debug, Clone)]
pub struct FailedSet {
    /// Position in the collection at the time of the save.
    pub position: usize,
    pub id: Option<String>,
    pub serie_index: u32,
    pub error: ApiError,
}

/// Outcome of [`SetSync::save_all`].
#[derive(Debug, Clone, Default)]
pub struct SaveAllReport {
    /// Server copies of the sets that were written.
    pub saved: Vec<WorkoutSet>,
    pub failed: Vec<FailedSet>,
    /// The local collection was replaced with `saved`.
    pub applied: bool,
    /// Some writes may already be committed server-side; re-list before
    /// trusting the local collection.
    pub needs_reconcile: bool,
}

impl SaveAllReport {
    pub fn attempted(&self) -> usize {
        self.saved.len() + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn saved_ids(&self) -> Vec<&str> {
        self.saved.iter().filter_map(|s| s.id.as_deref()).collect()
    }
}

pub struct SetSync {
    ctx: SyncContext,
    epoch: ViewEpoch,
    exercise_id: String,
    sets: Vec<WorkoutSet>,
    last_error: Option<String>,
}

impl SetSync {
    pub fn new(ctx: SyncContext, exercise_id: impl Into<String>) -> Self {
        Self {
            ctx,
            epoch: ViewEpoch::new(),
            exercise_id: exercise_id.into(),
            sets: Vec::new(),
            last_error: None,
        }
    }

    pub fn exercise_id(&self) -> &str {
        &self.exercise_id
    }

    pub fn epoch(&self) -> ViewEpoch {
        self.epoch.clone()
    }

    pub fn leave(&self) {
        self.epoch.advance();
    }

    pub fn sets(&self) -> &[WorkoutSet] {
        &self.sets
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Replace the collection with the server's sets, sorted by serie.
    /// A failed fetch leaves the screen with no sets.
    pub async fn list(&mut self) -> Result<()> {
        let result = self.fetch().await;
        if matches!(&result, Err(e) if !e.is_stale()) {
            self.sets.clear();
        }
        self.ctx
            .settle(&mut self.last_error, "Failed to fetch data", result)
    }

    async fn fetch(&mut self) -> Result<()> {
        self.ctx.ensure_token().await?;
        let ticket = self.epoch.ticket();
        let mut sets = self.ctx.api.list_sets(&self.exercise_id).await?;
        ticket.ensure_current()?;
        sort_by_serie(&mut sets);
        self.sets = sets;
        Ok(())
    }

    /// Append an unsaved set after the highest serie. Returns its serie index.
    pub fn add_local(&mut self) -> u32 {
        let serie_index = next_serie(&self.sets);
        self.sets.push(WorkoutSet::unsaved(serie_index));
        sort_by_serie(&mut self.sets);
        serie_index
    }

    /// Persist a new set right away and append the server's copy.
    pub async fn create(&mut self, payload: &SetPayload) -> Result<WorkoutSet> {
        let result = self.try_create(payload).await;
        self.ctx
            .settle(&mut self.last_error, "Failed to add set", result)
    }

    async fn try_create(&mut self, payload: &SetPayload) -> Result<WorkoutSet> {
        self.ensure_exercise()?;
        self.ctx.ensure_token().await?;
        let ticket = self.epoch.ticket();
        let created = self.ctx.api.create_set(&self.exercise_id, payload).await?;
        ticket.ensure_current()?;
        self.sets.push(created.clone());
        sort_by_serie(&mut self.sets);
        Ok(created)
    }

    /// Write one persisted set and replace the local copy once confirmed.
    pub async fn update(&mut self, id: &str, payload: &SetPayload) -> Result<WorkoutSet> {
        let result = self.try_update(id, payload).await;
        self.ctx
            .settle(&mut self.last_error, "Failed to update set", result)
    }

    async fn try_update(&mut self, id: &str, payload: &SetPayload) -> Result<WorkoutSet> {
        self.ctx.ensure_token().await?;
        let ticket = self.epoch.ticket();
        let mut updated = self.ctx.api.update_set(id, payload).await?;
        ticket.ensure_current()?;
        if let Some(local) = self.sets.iter_mut().find(|s| s.id.as_deref() == Some(id)) {
            updated.completed = local.completed;
            *local = updated.clone();
        }
        sort_by_serie(&mut self.sets);
        Ok(updated)
    }

    /// Remove the set at `position` (0-based) and renumber the rest.
    ///
    /// A persisted set is deleted on the server first; if that fails the
    /// collection is left as it was.
    pub async fn delete(&mut self, position: usize) -> Result<()> {
        let result = self.try_delete(position).await;
        self.ctx
            .settle(&mut self.last_error, "Can't delete set", result)
    }

    async fn try_delete(&mut self, position: usize) -> Result<()> {
        let target = self.set_at(position)?;
        if let Some(id) = target.id.clone().filter(|id| !id.is_empty()) {
            self.ctx.ensure_token().await?;
            let ticket = self.epoch.ticket();
            self.ctx.api.delete_set(&id).await?;
            ticket.ensure_current()?;
            self.ctx.success("Set deleted successfully!");
        }
        remove_and_renumber(&mut self.sets, position);
        Ok(())
    }

    /// Set reps or kg from raw input. Text that is not a number counts as 0.
    pub fn set_field(&mut self, position: usize, field: SetField, raw: &str) -> Result<()> {
        let set = self.set_at_mut(position)?;
        match field {
            SetField::Reps => set.reps = parse_count(raw),
            SetField::Kg => set.weight_kg = parse_weight(raw),
        }
        Ok(())
    }

    /// Flip the client-only completed flag. Returns the new value.
    pub fn toggle_completed(&mut self, position: usize) -> Result<bool> {
        let set = self.set_at_mut(position)?;
        set.completed = !set.completed;
        Ok(set.completed)
    }

    /// Write every set concurrently: unsaved sets are created, saved ones
    /// updated.
    ///
    /// The local collection is replaced with the server copies only when every
    /// write succeeded. Otherwise nothing local changes and the error carries a
    /// report naming each failed set; writes that did succeed are not undone.
    pub async fn save_all(&mut self) -> Result<SaveAllReport> {
        let result = self.try_save_all().await;
        let result = self
            .ctx
            .settle(&mut self.last_error, "Failed to save sets", result);
        if result.is_ok() {
            self.ctx.success("Sets saved successfully");
        }
        result
    }

    async fn try_save_all(&mut self) -> Result<SaveAllReport> {
        self.ensure_exercise()?;
        self.ctx.ensure_token().await?;
        let ticket = self.epoch.ticket();

        let writes: Vec<_> = self
            .sets
            .iter()
            .cloned()
            .enumerate()
            .map(|(position, set)| {
                let api = Arc::clone(&self.ctx.api);
                let exercise_id = self.exercise_id.clone();
                async move {
                    let payload = set.payload();
                    let result = match set.id.as_deref().filter(|id| !id.is_empty()) {
                        Some(id) => api.update_set(id, &payload).await,
                        None => api.create_set(&exercise_id, &payload).await,
                    };
                    (position, set, result)
                }
            })
            .collect();

        let mut report = SaveAllReport::default();
        for (position, local, result) in join_all(writes).await {
            match result {
                Ok(mut saved) => {
                    saved.completed = local.completed;
                    report.saved.push(saved);
                }
                Err(error) => {
                    tracing::warn!(position, serie = local.serie_index, error = %error, "set write failed");
                    report.failed.push(FailedSet {
                        position,
                        id: local.id,
                        serie_index: local.serie_index,
                        error,
                    });
                }
            }
        }
        ticket.ensure_current()?;

        if !report.is_success() {
            report.needs_reconcile = !report.saved.is_empty();
            return Err(SyncError::PartialSave(report));
        }

        let mut saved = report.saved.clone();
        sort_by_serie(&mut saved);
        self.sets = saved;
        report.applied = true;
        tracing::info!(count = report.saved.len(), exercise_id = %self.exercise_id, "sets saved");
        Ok(report)
    }

    fn ensure_exercise(&self) -> Result<()> {
        if self.exercise_id.trim().is_empty() {
            Err(SyncError::Validation("No Exercise ID found".to_string()))
        } else {
            Ok(())
        }
    }

    fn set_at(&self, position: usize) -> Result<&WorkoutSet> {
        self.sets
            .get(position)
            .ok_or_else(|| SyncError::Validation(format!("No set at position {}", position + 1)))
    }

    fn set_at_mut(&mut self, position: usize) -> Result<&mut WorkoutSet> {
        self.sets
            .get_mut(position)
            .ok_or_else(|| SyncError::Validation(format!("No set at position {}", position + 1)))
    }
}

/// Serie index for a new set: one past the highest, or 1 when empty.
pub fn next_serie(sets: &[WorkoutSet]) -> u32 {
    sets.iter().map(|s| s.serie_index).max().map_or(1, |max| max + 1)
}

/// Stable sort by serie index.
pub fn sort_by_serie(sets: &mut [WorkoutSet]) {
    sets.sort_by_key(|s| s.serie_index);
}

/// Drop the set at `position` and relabel the rest 1..N in their current order.
pub fn remove_and_renumber(sets: &mut Vec<WorkoutSet>, position: usize) {
    if position < sets.len() {
        sets.remove(position);
    }
    for (i, set) in sets.iter_mut().enumerate() {
        set.serie_index = i as u32 + 1;
    }
}

/// Leading digits of `raw`, or 0.
fn parse_count(raw: &str) -> u32 {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Leading decimal number of `raw`, or 0.
fn parse_weight(raw: &str) -> f64 {
    let mut seen_dot = false;
    let number: String = raw
        .trim()
        .chars()
        .take_while(|c| {
            if *c == '.' && !seen_dot {
                seen_dot = true;
                true
            } else {
                c.is_ascii_digit()
            }
        })
        .collect();
    number
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite())
        .unwrap_or(0.0)
}
