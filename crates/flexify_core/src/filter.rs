//! Client-side search over list views.
//!
//! Filtering only ever produces a view; the collection it reads from is
//! never touched.

use crate::models::{Exercise, Workout};

/// Anything a list view can search by name.
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for Workout {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Exercise {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Case-insensitive substring match. An empty query matches everything.
pub fn matches_query(name: &str, query: &str) -> bool {
    query.is_empty() || name.to_lowercase().contains(&query.to_lowercase())
}

pub fn filter_by_name<'a, T: Named>(items: &'a [T], query: &str) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| matches_query(item.name(), query))
        .collect()
}
