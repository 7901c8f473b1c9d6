//! Backend routes. Path segments keep the backend's spelling (`exercices`,
//! `exlist`) because that is what the server mounts.

pub const LOGIN: &str = "/auth/login";

pub const REGISTER: &str = "/users";
pub const USERS: &str = "/users";

pub const ADD_WORKOUT: &str = "/workout/CreateWorkout";
pub const GET_ALL_WORKOUTS: &str = "/workout/GetAllDashboard";
pub const GET_USER_WORKOUTS: &str = "/workout/GetAll";
pub const DELETE_WORKOUT: &str = "/workout/RemoveWorkout";
pub const UPDATE_WORKOUT: &str = "/workout/UpdateWorkout";

pub const GET_EXERCISES: &str = "/exercices/GetAll";
pub const ADD_EXERCISE: &str = "/exercices/addExercise";
pub const DELETE_EXERCISE: &str = "/exercices/DeleteExercise";
pub const UPDATE_EXERCISE: &str = "/exercises/UpdateExercise";

pub const GET_EXLIST: &str = "/exlist/GetAll";

pub const ADD_SET: &str = "/sets/AddSets";
pub const GET_SET_BY_EXERCISE: &str = "/sets/GetByExerciseId";
pub const UPDATE_SET: &str = "/sets/UpdateSet";
pub const REMOVE_SET: &str = "/sets/RemoveSet";

/// `base/id` with the id percent-encoded as a single path segment.
pub fn with_id(base: &str, id: &str) -> String {
    format!("{base}/{}", urlencoding::encode(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_id_appends_segment() {
        assert_eq!(with_id(UPDATE_SET, "42"), "/sets/UpdateSet/42");
        assert_eq!(
            with_id(GET_EXERCISES, "6f1c-aa"),
            "/exercices/GetAll/6f1c-aa"
        );
    }

    #[test]
    fn with_id_escapes_separators() {
        assert_eq!(with_id(USERS, "a/b c"), "/users/a%2Fb%20c");
    }
}
