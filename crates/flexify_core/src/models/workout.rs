use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::de;

/// Read-only projection of the owning user embedded in a workout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRef {
    #[serde(default, deserialize_with = "de::id")]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub roles: BTreeSet<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Workout {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    pub name: String,
    /// Some write endpoints answer without the owner relation loaded.
    #[serde(default)]
    pub owner: UserRef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkoutPayload {
    pub name: String,
}

/// An exercise attached to a workout. Catalog entries share the same shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Exercise {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "muscle", default)]
    pub muscle_group: String,
}

pub type ExerciseTemplate = Exercise;

impl Exercise {
    pub fn payload(&self) -> ExercisePayload {
        ExercisePayload {
            name: self.name.clone(),
            muscle_group: self.muscle_group.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExercisePayload {
    pub name: String,
    #[serde(rename = "muscle")]
    pub muscle_group: String,
}
