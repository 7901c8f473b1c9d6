//! Domain models mirrored from the Flexify REST backend.

mod account;
mod de;
mod session;
mod set;
mod workout;

pub use account::{LoginRequest, LoginResponse, ProfileUpdate, RegisterRequest};
pub use session::{Role, Session};
pub use set::{SetPayload, WorkoutSet};
pub use workout::{Exercise, ExercisePayload, ExerciseTemplate, UserRef, Workout, WorkoutPayload};
