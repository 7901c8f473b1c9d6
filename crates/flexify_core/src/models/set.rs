use serde::{Deserialize, Serialize};

use super::de;

/// One set of an exercise.
///
/// `id` is absent until the set has been persisted. `completed` only lives on
/// the client and is never sent to or read from the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutSet {
    #[serde(
        default,
        deserialize_with = "de::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(rename = "serie", default = "first_serie", deserialize_with = "de::serie_index")]
    pub serie_index: u32,
    #[serde(default, deserialize_with = "de::count_or_zero")]
    pub reps: u32,
    #[serde(rename = "kg", default, deserialize_with = "de::weight_or_zero")]
    pub weight_kg: f64,
    #[serde(skip)]
    pub completed: bool,
}

fn first_serie() -> u32 {
    1
}

impl WorkoutSet {
    /// A fresh, unsaved set at the given position.
    pub fn unsaved(serie_index: u32) -> Self {
        Self {
            id: None,
            serie_index: serie_index.max(1),
            reps: 0,
            weight_kg: 0.0,
            completed: false,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.as_deref().is_some_and(|id| !id.is_empty())
    }

    pub fn payload(&self) -> SetPayload {
        SetPayload {
            serie_index: self.serie_index,
            weight_kg: self.weight_kg,
            reps: self.reps,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetPayload {
    #[serde(rename = "serie")]
    pub serie_index: u32,
    #[serde(rename = "kg")]
    pub weight_kg: f64,
    pub reps: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nulls_fall_back_to_defaults() {
        let set: WorkoutSet = serde_json::from_value(serde_json::json!({
            "id": 12, "serie": null, "reps": null, "kg": null
        }))
        .unwrap();

        assert_eq!(set.id.as_deref(), Some("12"));
        assert_eq!(set.serie_index, 1);
        assert_eq!(set.reps, 0);
        assert_eq!(set.weight_kg, 0.0);
        assert!(!set.completed);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let set: WorkoutSet = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(set, WorkoutSet::unsaved(1));
        assert!(!set.is_persisted());
    }

    #[test]
    fn completed_flag_never_reaches_the_wire() {
        let mut set = WorkoutSet::unsaved(2);
        set.completed = true;
        let body = serde_json::to_value(&set).unwrap();
        assert!(body.get("completed").is_none());
        assert!(body.get("id").is_none());
        assert_eq!(body["serie"], 2);
    }

    #[test]
    fn payload_uses_wire_names() {
        let mut set = WorkoutSet::unsaved(3);
        set.reps = 8;
        set.weight_kg = 62.5;
        let body = serde_json::to_value(set.payload()).unwrap();
        assert_eq!(body, serde_json::json!({"serie": 3, "kg": 62.5, "reps": 8}));
    }
}
