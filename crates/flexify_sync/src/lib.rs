//! flexify_sync - keeps screen-local collections in step with the backend
//!
//! Each synchronizer owns one collection (workouts, exercises of a workout,
//! the exercise catalog, sets of an exercise) and reconciles it by refetching
//! rather than patching. Failures are turned into notifications and kept as
//! the synchronizer's last error; they are also returned so callers can react.
//!
//! - `context` - the injected API client, session and notifier
//! - `epoch` - view generations used to drop responses for screens left behind
//! - `account` - login, registration, profile edits, account deletion
//! - `stopwatch` - the workout timer shown on the exercise screen

pub mod account;
pub mod catalog;
pub mod context;
pub mod epoch;
pub mod error;
pub mod exercises;
pub mod notify;
pub mod sets;
pub mod stopwatch;
pub mod workouts;

pub use account::{AccountService, ProfileForm, RegistrationForm};
pub use catalog::CatalogSync;
pub use context::SyncContext;
pub use epoch::{EpochTicket, ViewEpoch};
pub use error::{Result, SyncError};
pub use exercises::ExerciseSync;
pub use notify::{Level, Notification, Notifier, RecordingNotifier, TracingNotifier};
pub use sets::{FailedSet, SaveAllReport, SetField, SetSync};
pub use stopwatch::Stopwatch;
pub use workouts::WorkoutSync;
