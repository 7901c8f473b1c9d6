//! In-memory backend used by the synchronizer tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use flexify_client::{ApiError, FlexifyApi, Result};
use flexify_core::storage_keys::ACCESS_TOKEN_KEY;
use flexify_core::{
    Exercise, ExercisePayload, ExerciseTemplate, LoginRequest, LoginResponse, ProfileUpdate,
    RegisterRequest, Role, SetPayload, Workout, WorkoutPayload, WorkoutSet,
};
use flexify_sync::{RecordingNotifier, SyncContext};
use session_manager::SessionManager;
use storage_manager::{KeyValueStore, MemoryKeyValueStore, StorageError};
use tokio::sync::Notify;

/// Backend double. Collections are served as stored; failures are injected
/// per call key (`"list_workouts"`, `"create_set:2"`, `"delete_set:b"`, ...).
pub struct FakeApi {
    store: Arc<dyn KeyValueStore>,
    pub workouts: Mutex<Vec<Workout>>,
    pub exercises: Mutex<Vec<Exercise>>,
    pub catalog: Mutex<Vec<ExerciseTemplate>>,
    pub sets: Mutex<Vec<WorkoutSet>>,
    pub login_response: Mutex<Option<LoginResponse>>,
    calls: Mutex<Vec<String>>,
    failures: Mutex<HashMap<String, ApiError>>,
    gate: Mutex<Option<Arc<Notify>>>,
    add_gate: Mutex<Option<Arc<Notify>>>,
    next_id: AtomicU64,
}

impl FakeApi {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            workouts: Mutex::new(Vec::new()),
            exercises: Mutex::new(Vec::new()),
            catalog: Mutex::new(Vec::new()),
            sets: Mutex::new(Vec::new()),
            login_response: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
            gate: Mutex::new(None),
            add_gate: Mutex::new(None),
            next_id: AtomicU64::new(100),
        }
    }

    pub fn fail(&self, key: &str, error: ApiError) {
        self.failures.lock().unwrap().insert(key.to_string(), error);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, prefix: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(prefix))
            .collect()
    }

    /// Make every list call wait until the returned handle is notified.
    pub fn hold_lists(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    /// Make every exercise add wait until the returned handle is notified.
    pub fn hold_adds(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.add_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    fn record(&self, key: String) -> Result<()> {
        self.calls.lock().unwrap().push(key.clone());
        let failures = self.failures.lock().unwrap();
        let method = key.split(':').next().unwrap_or_default();
        match failures.get(&key).or_else(|| failures.get(method)) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    async fn wait_gate(&self) {
        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }

    async fn wait_add_gate(&self) {
        let gate = self.add_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }

    fn fresh_id(&self) -> String {
        self.next_id.fetch_add(1, Ordering::SeqCst).to_string()
    }
}

#[async_trait]
impl FlexifyApi for FakeApi {
    async fn has_token(&self) -> bool {
        matches!(self.store.get(ACCESS_TOKEN_KEY).await, Ok(Some(t)) if !t.is_empty())
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        self.record(format!("login:{}", request.email))?;
        self.login_response
            .lock()
            .unwrap()
            .clone()
            .ok_or(ApiError::Http {
                status: 401,
                message: Some("Invalid credentials".into()),
            })
    }

    async fn register(&self, request: &RegisterRequest) -> Result<()> {
        self.record(format!("register:{}", request.email))
    }

    async fn update_user(&self, subject_id: &str, _update: &ProfileUpdate) -> Result<()> {
        self.record(format!("update_user:{subject_id}"))
    }

    async fn delete_user(&self, subject_id: &str) -> Result<()> {
        self.record(format!("delete_user:{subject_id}"))
    }

    async fn list_workouts(&self) -> Result<Vec<Workout>> {
        self.record("list_workouts".into())?;
        self.wait_gate().await;
        Ok(self.workouts.lock().unwrap().clone())
    }

    async fn list_my_workouts(&self) -> Result<Vec<Workout>> {
        self.record("list_my_workouts".into())?;
        self.wait_gate().await;
        Ok(self.workouts.lock().unwrap().clone())
    }

    async fn create_workout(&self, payload: &WorkoutPayload) -> Result<()> {
        self.record(format!("create_workout:{}", payload.name))?;
        let workout = workout(&self.fresh_id(), &payload.name);
        self.workouts.lock().unwrap().push(workout);
        Ok(())
    }

    async fn update_workout(&self, id: &str, payload: &WorkoutPayload) -> Result<Option<Workout>> {
        self.record(format!("update_workout:{id}"))?;
        let mut workouts = self.workouts.lock().unwrap();
        Ok(workouts.iter_mut().find(|w| w.id == id).map(|w| {
            w.name = payload.name.clone();
            w.clone()
        }))
    }

    async fn delete_workout(&self, id: &str) -> Result<()> {
        self.record(format!("delete_workout:{id}"))?;
        self.workouts.lock().unwrap().retain(|w| w.id != id);
        Ok(())
    }

    async fn list_exercises(&self, workout_id: &str) -> Result<Vec<Exercise>> {
        self.record(format!("list_exercises:{workout_id}"))?;
        self.wait_gate().await;
        Ok(self.exercises.lock().unwrap().clone())
    }

    async fn add_exercise(&self, workout_id: &str, payload: &ExercisePayload) -> Result<()> {
        self.record(format!("add_exercise:{}", payload.name))?;
        self.wait_add_gate().await;
        let _ = workout_id;
        let exercise = Exercise {
            id: self.fresh_id(),
            name: payload.name.clone(),
            muscle_group: payload.muscle_group.clone(),
        };
        self.exercises.lock().unwrap().push(exercise);
        Ok(())
    }

    async fn update_exercise(
        &self,
        id: &str,
        payload: &ExercisePayload,
    ) -> Result<Option<Exercise>> {
        self.record(format!("update_exercise:{id}"))?;
        let mut exercises = self.exercises.lock().unwrap();
        Ok(exercises.iter_mut().find(|e| e.id == id).map(|e| {
            e.name = payload.name.clone();
            e.muscle_group = payload.muscle_group.clone();
            e.clone()
        }))
    }

    async fn delete_exercise(&self, id: &str) -> Result<()> {
        self.record(format!("delete_exercise:{id}"))?;
        self.exercises.lock().unwrap().retain(|e| e.id != id);
        Ok(())
    }

    async fn list_catalog(&self) -> Result<Vec<ExerciseTemplate>> {
        self.record("list_catalog".into())?;
        self.wait_gate().await;
        Ok(self.catalog.lock().unwrap().clone())
    }

    async fn list_sets(&self, exercise_id: &str) -> Result<Vec<WorkoutSet>> {
        self.record(format!("list_sets:{exercise_id}"))?;
        self.wait_gate().await;
        Ok(self.sets.lock().unwrap().clone())
    }

    async fn create_set(&self, _exercise_id: &str, payload: &SetPayload) -> Result<WorkoutSet> {
        self.record(format!("create_set:{}", payload.serie_index))?;
        let created = set(&self.fresh_id(), payload.serie_index, payload.reps, payload.weight_kg);
        self.sets.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_set(&self, id: &str, payload: &SetPayload) -> Result<WorkoutSet> {
        self.record(format!("update_set:{id}"))?;
        Ok(set(id, payload.serie_index, payload.reps, payload.weight_kg))
    }

    async fn delete_set(&self, id: &str) -> Result<()> {
        self.record(format!("delete_set:{id}"))?;
        self.sets
            .lock()
            .unwrap()
            .retain(|s| s.id.as_deref() != Some(id));
        Ok(())
    }
}

pub fn workout(id: &str, name: &str) -> Workout {
    Workout {
        id: id.to_string(),
        name: name.to_string(),
        owner: Default::default(),
    }
}

pub fn exercise(id: &str, name: &str, muscle: &str) -> Exercise {
    Exercise {
        id: id.to_string(),
        name: name.to_string(),
        muscle_group: muscle.to_string(),
    }
}

pub fn set(id: &str, serie_index: u32, reps: u32, weight_kg: f64) -> WorkoutSet {
    WorkoutSet {
        id: Some(id.to_string()),
        serie_index,
        reps,
        weight_kg,
        completed: false,
    }
}

/// Memory store that refuses writes to one key once it is pinned.
#[derive(Default)]
pub struct PinnedKeyStore {
    inner: MemoryKeyValueStore,
    pinned: Mutex<Option<String>>,
}

impl PinnedKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pin(&self, key: &str) {
        *self.pinned.lock().unwrap() = Some(key.to_string());
    }
}

#[async_trait]
impl KeyValueStore for PinnedKeyStore {
    async fn get(&self, key: &str) -> storage_manager::Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> storage_manager::Result<()> {
        if self.pinned.lock().unwrap().as_deref() == Some(key) {
            return Err(StorageError::IoError(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )));
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> storage_manager::Result<()> {
        self.inner.remove(key).await
    }
}

pub struct Fixture {
    pub ctx: SyncContext,
    pub api: Arc<FakeApi>,
    pub notifier: Arc<RecordingNotifier>,
    pub session: Arc<SessionManager>,
    pub store: Arc<MemoryKeyValueStore>,
}

/// A restored client with nobody signed in.
pub async fn signed_out() -> Fixture {
    let store = Arc::new(MemoryKeyValueStore::new());
    let api = Arc::new(FakeApi::new(store.clone()));
    let session = Arc::new(SessionManager::new(store.clone()));
    session.restore().await;
    let notifier = Arc::new(RecordingNotifier::new());
    let ctx = SyncContext::new(api.clone(), session.clone(), notifier.clone());
    Fixture {
        ctx,
        api,
        notifier,
        session,
        store,
    }
}

/// A client with user `9` ("sam") signed in.
pub async fn signed_in() -> Fixture {
    let fixture = signed_out().await;
    fixture
        .session
        .login("jwt", Role::User, "9", Some("sam"))
        .await
        .unwrap();
    fixture
}
