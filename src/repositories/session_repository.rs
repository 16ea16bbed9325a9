use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{GenerationProgress, McqRecord},
    services::{generation_orchestrator::ProgressReporter, mcq_store::McqStore},
};

#[derive(Debug, Default)]
pub struct SessionState {
    pub store: McqStore,
    /// Output of the most recent generation run, kept for export.
    pub last_run: Vec<McqRecord>,
}

/// One user's interactive lifetime: the question store and live progress.
#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub state: RwLock<SessionState>,
    progress: Arc<Mutex<GenerationProgress>>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            state: RwLock::new(SessionState::default()),
            progress: Arc::new(Mutex::new(GenerationProgress::default())),
        }
    }

    pub fn progress(&self) -> GenerationProgress {
        lock(&self.progress).clone()
    }

    /// Marks a run as started, refusing if one is already in flight.
    pub fn begin_generation(&self, total_chunks: usize) -> AppResult<SessionProgressReporter> {
        let mut progress = lock(&self.progress);
        if progress.running {
            return Err(AppError::Conflict(format!(
                "A generation run is already in progress for session {}",
                self.id
            )));
        }
        *progress = GenerationProgress::start(total_chunks);

        Ok(SessionProgressReporter {
            progress: Arc::clone(&self.progress),
        })
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

fn lock(progress: &Mutex<GenerationProgress>) -> MutexGuard<'_, GenerationProgress> {
    progress.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Writes progress into the owning session; finishing the run happens on drop
/// so an aborted request never leaves the session stuck as running.
pub struct SessionProgressReporter {
    progress: Arc<Mutex<GenerationProgress>>,
}

impl SessionProgressReporter {
    pub fn warnings(&self) -> Vec<String> {
        lock(&self.progress).warnings.clone()
    }
}

impl ProgressReporter for SessionProgressReporter {
    fn progress(&self, completed: usize, total: usize) {
        lock(&self.progress).advance(completed, total);
    }

    fn warn(&self, message: String) {
        lock(&self.progress).warnings.push(message);
    }
}

impl Drop for SessionProgressReporter {
    fn drop(&mut self) {
        lock(&self.progress).finish();
    }
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self) -> AppResult<Arc<Session>>;
    async fn find(&self, id: &Uuid) -> AppResult<Option<Arc<Session>>>;
    async fn delete(&self, id: &Uuid) -> AppResult<bool>;
    async fn count(&self) -> AppResult<usize>;
}

#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<Uuid, Arc<Session>>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self) -> AppResult<Arc<Session>> {
        let session = Arc::new(Session::new());
        self.sessions
            .write()
            .await
            .insert(session.id, Arc::clone(&session));
        Ok(session)
    }

    async fn find(&self, id: &Uuid) -> AppResult<Option<Arc<Session>>> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn delete(&self, id: &Uuid) -> AppResult<bool> {
        Ok(self.sessions.write().await.remove(id).is_some())
    }

    async fn count(&self) -> AppResult<usize> {
        Ok(self.sessions.read().await.len())
    }
}
