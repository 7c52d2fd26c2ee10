#![allow(dead_code)]

//! Shared fixtures for the integration tests: an in-process mock storage
//! and helpers for building app state and credentials.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use coursegen_server::auth::jwt::generate_access_token;
use coursegen_server::config::AppConfig;
use coursegen_server::db::memory::InMemoryRepository;
use coursegen_server::db::repository::JobRepository;
use coursegen_server::db::AppState;
use coursegen_server::error::StorageError;
use coursegen_server::job::models::{
    Audience, Job, JobMetadata, JobStatus, Language, Level, Tone, TrainingContext,
};
use coursegen_server::storage::ObjectStorage;

pub const TEST_SECRET: &str = "integration-test-secret";

/// In-memory storage double. Can be told to start rejecting uploads after
/// a set number of successes, or to reject every download.
pub struct MockStorage {
    files: Mutex<HashMap<String, Vec<u8>>>,
    uploads: AtomicUsize,
    fail_uploads_after: Option<usize>,
    fail_downloads: bool,
}

impl MockStorage {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
            uploads: AtomicUsize::new(0),
            fail_uploads_after: None,
            fail_downloads: false,
        }
    }

    /// Accept the first `n` uploads, reject the rest.
    pub fn failing_uploads_after(n: usize) -> Self {
        Self {
            fail_uploads_after: Some(n),
            ..Self::new()
        }
    }

    pub fn with_failing_downloads() -> Self {
        Self {
            fail_downloads: true,
            ..Self::new()
        }
    }

    pub async fn stored_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.files.lock().await.keys().cloned().collect();
        paths.sort();
        paths
    }
}

#[async_trait]
impl ObjectStorage for MockStorage {
    async fn upload_file(&self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        let seen = self.uploads.fetch_add(1, Ordering::SeqCst);
        if let Some(limit) = self.fail_uploads_after {
            if seen >= limit {
                return Err(StorageError::Rejected {
                    status: 503,
                    body: "storage unavailable".to_string(),
                });
            }
        }
        self.files
            .lock()
            .await
            .insert(path.to_string(), data.to_vec());
        Ok(())
    }

    async fn download_file(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        if self.fail_downloads {
            return Err(StorageError::Request("connection refused".to_string()));
        }
        self.files
            .lock()
            .await
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::Rejected {
                status: 404,
                body: format!("no object at {path}"),
            })
    }

    async fn delete_file(&self, path: &str) -> Result<(), StorageError> {
        self.files.lock().await.remove(path);
        Ok(())
    }

    async fn create_signed_url(
        &self,
        path: &str,
        _expires_in_secs: u64,
    ) -> Result<String, StorageError> {
        Ok(format!("https://storage.test/sign/{path}?token=stub"))
    }
}

pub fn test_metadata() -> JobMetadata {
    JobMetadata {
        language: Language::En,
        subject: "Negotiation".to_string(),
        context: TrainingContext::Corporate,
        level: Level::Intermediate,
        audience: Audience::Managers,
        duration: "2h".to_string(),
        tone: Tone::Professional,
    }
}

/// App state wired to the in-memory repository and the given storage,
/// with the background generation worker running.
pub fn test_state(storage: Arc<dyn ObjectStorage>) -> AppState {
    AppState::new_with_repository_and_storage(
        Arc::new(InMemoryRepository::new()),
        storage,
        AppConfig::for_tests(TEST_SECRET),
    )
}

pub fn bearer(owner_id: Uuid) -> (&'static str, String) {
    let token = generate_access_token(owner_id, TEST_SECRET).unwrap();
    ("Authorization", format!("Bearer {token}"))
}

/// Poll until the job reaches `status` or the deadline passes.
pub async fn wait_for_status(
    repository: &Arc<dyn JobRepository>,
    job_id: Uuid,
    status: JobStatus,
) -> Job {
    for _ in 0..500 {
        if let Some(job) = repository.get_job(job_id).await.unwrap() {
            if job.status == status {
                return job;
            }
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("job {job_id} never reached {status}");
}
