//! The exercise catalog and the picker's multi-selection

use flexify_core::{filter_by_name, ExerciseTemplate};

use crate::context::SyncContext;
use crate::epoch::ViewEpoch;
use crate::error::Result;

pub struct CatalogSync {
    ctx: SyncContext,
    epoch: ViewEpoch,
    templates: Vec<ExerciseTemplate>,
    selection: Vec<ExerciseTemplate>,
    query: String,
    last_error: Option<String>,
}

impl CatalogSync {
    pub fn new(ctx: SyncContext) -> Self {
        Self {
            ctx,
            epoch: ViewEpoch::new(),
            templates: Vec::new(),
            selection: Vec::new(),
            query: String::new(),
            last_error: None,
        }
    }

    pub fn epoch(&self) -> ViewEpoch {
        self.epoch.clone()
    }

    /// Close the picker: pending responses are dropped and the search resets.
    pub fn leave(&mut self) {
        self.epoch.advance();
        self.query.clear();
    }

    pub fn templates(&self) -> &[ExerciseTemplate] {
        &self.templates
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub async fn list(&mut self) -> Result<()> {
        let result = self.fetch().await;
        self.ctx
            .settle(&mut self.last_error, "Error fetching data", result)
    }

    async fn fetch(&mut self) -> Result<()> {
        self.ctx.ensure_token().await?;
        let ticket = self.epoch.ticket();
        let templates = self.ctx.api.list_catalog().await?;
        ticket.ensure_current()?;
        self.templates = templates;
        Ok(())
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn filtered(&self) -> Vec<&ExerciseTemplate> {
        filter_by_name(&self.templates, &self.query)
    }

    /// Select `template`, or unselect it if it already is (matched by id).
    pub fn toggle_select(&mut self, template: &ExerciseTemplate) {
        if let Some(index) = self.selection.iter().position(|t| t.id == template.id) {
            self.selection.remove(index);
        } else {
            self.selection.push(template.clone());
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.iter().any(|t| t.id == id)
    }

    /// Selected entries in the order they were picked.
    pub fn selection(&self) -> &[ExerciseTemplate] {
        &self.selection
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Hand the selection over, leaving it empty.
    pub fn take_selection(&mut self) -> Vec<ExerciseTemplate> {
        std::mem::take(&mut self.selection)
    }
}
