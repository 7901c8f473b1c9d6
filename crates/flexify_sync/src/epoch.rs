//! View generations
//!
//! A screen bumps its epoch when it is left or reloaded. Operations take a
//! ticket before awaiting the network and apply their result only if the
//! ticket is still current afterwards.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::{Result, SyncError};

#[derive(Debug, Clone, Default)]
pub struct ViewEpoch {
    generation: Arc<AtomicU64>,
}

#[derive(Debug, Clone)]
pub struct EpochTicket {
    generation: Arc<AtomicU64>,
    issued: u64,
}

impl ViewEpoch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticket(&self) -> EpochTicket {
        EpochTicket {
            generation: Arc::clone(&self.generation),
            issued: self.generation.load(Ordering::Acquire),
        }
    }

    /// Invalidate every outstanding ticket.
    pub fn advance(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn current(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}

impl EpochTicket {
    pub fn is_current(&self) -> bool {
        self.generation.load(Ordering::Acquire) == self.issued
    }

    /// `Err(Stale)` once the view this ticket was issued for is gone.
    pub fn ensure_current(&self) -> Result<()> {
        if self.is_current() {
            Ok(())
        } else {
            tracing::debug!(issued = self.issued, "dropping stale response");
            Err(SyncError::Stale)
        }
    }
}
