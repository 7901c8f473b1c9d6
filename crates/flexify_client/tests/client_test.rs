//! HTTP contract tests for FlexifyClient


use flexify_client::{ApiError, FlexifyApi};
use flexify_core::storage_keys::ACCESS_TOKEN_KEY;
use flexify_core::{LoginRequest, ProfileUpdate, SetPayload, WorkoutPayload};
use storage_manager::KeyValueStore;
use test_utils::{client_with_token, MockResponseBuilder};
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_bearer_token_attached_from_store() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/workout/GetAllDashboard"))
        .and(header("authorization", "Bearer jwt-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            MockResponseBuilder::workout(1, "Leg Day"),
            MockResponseBuilder::workout(2, "Arm Day"),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, _store) = client_with_token(&mock_server.uri(), Some("jwt-123")).await;
    let workouts = client.list_workouts().await.unwrap();

    assert_eq!(workouts.len(), 2);
    assert_eq!(workouts[0].id, "1");
    assert_eq!(workouts[1].name, "Arm Day");
    assert_eq!(workouts[0].owner.username, "sam");
}

#[tokio::test]
async fn test_token_read_on_every_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/exlist/GetAll"))
        .and(header("authorization", "Bearer second"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/exlist/GetAll"))
        .and(header("authorization", "Bearer first"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, store) = client_with_token(&mock_server.uri(), Some("first")).await;
    client.list_catalog().await.unwrap();

    store.set(ACCESS_TOKEN_KEY, "second").await.unwrap();
    client.list_catalog().await.unwrap();
}

#[tokio::test]
async fn test_request_without_token_has_no_authorization_header() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/workout/GetAllDashboard"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/workout/GetAllDashboard"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(MockResponseBuilder::error(401, "Unauthorized")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, _store) = client_with_token(&mock_server.uri(), None).await;
    assert!(!client.has_token().await);

    let error = client.list_workouts().await.unwrap_err();
    assert!(error.is_unauthorized());
    assert_eq!(error.user_message(), "Unauthorized");
}

#[tokio::test]
async fn test_login_posts_credentials_and_expects_created() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(serde_json::json!({
            "email": "sam@example.com",
            "password": "hunter2"
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(MockResponseBuilder::login_success("jwt")),
        )
        .mount(&mock_server)
        .await;

    let (client, _store) = client_with_token(&mock_server.uri(), None).await;
    let response = client
        .login(&LoginRequest {
            email: "sam@example.com".into(),
            password: "hunter2".into(),
        })
        .await
        .unwrap();

    assert_eq!(response.access_token, "jwt");
    assert_eq!(response.sub, "9");
    assert_eq!(response.username.as_deref(), Some("sam"));
}

#[tokio::test]
async fn test_other_success_status_is_unexpected() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(MockResponseBuilder::login_success("jwt")),
        )
        .mount(&mock_server)
        .await;

    let (client, _store) = client_with_token(&mock_server.uri(), None).await;
    let error = client
        .login(&LoginRequest {
            email: "sam@example.com".into(),
            password: "hunter2".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(error, ApiError::UnexpectedStatus(200));
    assert_eq!(error.user_message(), "Status code: 200");
}

#[tokio::test]
async fn test_validation_messages_are_joined() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/users/9"))
        .and(body_json(serde_json::json!({ "email": "not-an-email" })))
        .respond_with(ResponseTemplate::new(400).set_body_json(
            MockResponseBuilder::validation_error(&["email must be an email"]),
        ))
        .mount(&mock_server)
        .await;

    let (client, _store) = client_with_token(&mock_server.uri(), Some("jwt")).await;
    let update = ProfileUpdate {
        email: Some("not-an-email".into()),
        ..Default::default()
    };
    let error = client.update_user("9", &update).await.unwrap_err();

    assert_eq!(
        error,
        ApiError::Http {
            status: 400,
            message: Some("email must be an email".into())
        }
    );
}

#[tokio::test]
async fn test_error_without_body_uses_fallback() {
    let mock_server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/workout/RemoveWorkout/4"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let (client, _store) = client_with_token(&mock_server.uri(), Some("jwt")).await;
    let error = client.delete_workout("4").await.unwrap_err();

    assert_eq!(error.status(), Some(500));
    assert_eq!(error.user_message(), "Something went wrong");
}

#[tokio::test]
async fn test_transport_error_when_server_unreachable() {
    let (client, _store) = client_with_token("http://127.0.0.1:1", Some("jwt")).await;
    let error = client.list_workouts().await.unwrap_err();

    assert!(matches!(error, ApiError::Transport(_)), "got {error:?}");
    assert_eq!(error.user_message(), "Network error, please try again");
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sets/GetByExerciseId/3"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let (client, _store) = client_with_token(&mock_server.uri(), Some("jwt")).await;
    let error = client.list_sets("3").await.unwrap_err();
    assert!(matches!(error, ApiError::Decode(_)), "got {error:?}");
}

#[tokio::test]
async fn test_set_endpoints() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sets/AddSets/3"))
        .and(body_json(serde_json::json!({ "serie": 1, "kg": 40.0, "reps": 10 })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(MockResponseBuilder::set(11, 1, 10, 40.0)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/sets/UpdateSet/11"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(MockResponseBuilder::set(11, 1, 12, 42.5)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/sets/RemoveSet/11"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, _store) = client_with_token(&mock_server.uri(), Some("jwt")).await;
    let payload = SetPayload {
        serie_index: 1,
        weight_kg: 40.0,
        reps: 10,
    };
    let created = client.create_set("3", &payload).await.unwrap();
    assert_eq!(created.id.as_deref(), Some("11"));

    let updated = client
        .update_set(
            "11",
            &SetPayload {
                reps: 12,
                weight_kg: 42.5,
                ..payload
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.reps, 12);

    client.delete_set("11").await.unwrap();
}

#[tokio::test]
async fn test_workout_delete_accepts_only_ok() {
    let mock_server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/workout/RemoveWorkout/4"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let (client, _store) = client_with_token(&mock_server.uri(), Some("jwt")).await;
    assert_eq!(
        client.delete_workout("4").await.unwrap_err(),
        ApiError::UnexpectedStatus(204)
    );
}

#[tokio::test]
async fn test_update_workout_without_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/workout/UpdateWorkout/4"))
        .and(body_json(serde_json::json!({ "name": "Push" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "affected": 1
        })))
        .mount(&mock_server)
        .await;

    let (client, _store) = client_with_token(&mock_server.uri(), Some("jwt")).await;
    let updated = client
        .update_workout(
            "4",
            &WorkoutPayload {
                name: "Push".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated, None);
}

#[tokio::test]
async fn test_exercise_routes_keep_backend_spelling() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/exercices/GetAll/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            MockResponseBuilder::exercise(5, "Squat", "quads")
        ])))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/exercices/addExercise/4"))
        .and(body_json(serde_json::json!({ "name": "Lunge", "muscle": "glutes" })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, _store) = client_with_token(&mock_server.uri(), Some("jwt")).await;
    let exercises = client.list_exercises("4").await.unwrap();
    assert_eq!(exercises[0].muscle_group, "quads");

    client
        .add_exercise(
            "4",
            &flexify_core::ExercisePayload {
                name: "Lunge".into(),
                muscle_group: "glutes".into(),
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_token_from_file_store_survives_restart() {
    use std::sync::Arc;

    use flexify_client::{Config, FlexifyClient};
    use storage_manager::FileKeyValueStore;

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/workout/GetAll"))
        .and(header("authorization", "Bearer persisted"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            MockResponseBuilder::workout(3, "Cardio")
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let temp_dir = tempfile::tempdir().expect("tempdir");
    let storage_path = temp_dir.path().join("storage.json");
    FileKeyValueStore::new(&storage_path)
        .set(ACCESS_TOKEN_KEY, "persisted")
        .await
        .unwrap();

    let mut config = Config::with_api_base(mock_server.uri());
    config.no_proxy = true;
    let client = FlexifyClient::new(&config, Arc::new(FileKeyValueStore::new(&storage_path)))
        .expect("client");

    assert!(client.has_token().await);
    let workouts = client.list_my_workouts().await.unwrap();
    assert_eq!(workouts[0].name, "Cardio");
}
