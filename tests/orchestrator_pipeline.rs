//! End-to-end pipeline tests driving `process_job` against the in-memory
//! repository and mock storage.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use common::{test_metadata, MockStorage};
use coursegen_server::config::DOWNLOAD_TTL_HOURS;
use coursegen_server::db::memory::InMemoryRepository;
use coursegen_server::db::repository::JobRepository;
use coursegen_server::error::{RepositoryError, StorageError};
use coursegen_server::job::models::{Job, JobStatus};
use coursegen_server::material::models::MaterialType;
use coursegen_server::orchestrator::process_job;
use coursegen_server::storage::ObjectStorage;

fn pipeline_fixture(
    storage: Arc<dyn ObjectStorage>,
) -> (Arc<dyn JobRepository>, Arc<dyn ObjectStorage>) {
    let repository: Arc<dyn JobRepository> = Arc::new(InMemoryRepository::new());
    (repository, storage)
}

async fn insert_sample_job(repository: &Arc<dyn JobRepository>) -> Job {
    let job = Job::new(Uuid::new_v4(), test_metadata());
    repository.insert_job(&job).await.unwrap();
    job
}

#[tokio::test]
async fn test_happy_path_produces_seven_materials() {
    let storage = Arc::new(MockStorage::new());
    let (repository, storage_dyn) = pipeline_fixture(storage.clone());
    let job = insert_sample_job(&repository).await;

    process_job(job.id, &repository, &storage_dyn, DOWNLOAD_TTL_HOURS)
        .await
        .unwrap();

    let finished = repository.get_job(job.id).await.unwrap().unwrap();
    assert_eq!(finished.status, JobStatus::Completed);
    assert_eq!(finished.progress_percent, 100);
    assert!(finished.completed_at.is_some());
    assert!(finished.error.is_none());

    let materials = repository.list_materials_for_job(job.id).await.unwrap();
    assert_eq!(materials.len(), 7);
    let steps: Vec<i16> = materials.iter().map(|m| m.step_number).collect();
    assert_eq!(steps, [1, 2, 3, 4, 5, 6, 7]);

    let foundation = &materials[0];
    assert_eq!(foundation.material_type, MaterialType::Foundation);
    assert!(foundation.content.as_deref().unwrap().contains("Negotiation"));
    assert!(foundation.download_url.is_some());

    // One blob per material, all under the same attempt prefix.
    let paths = storage.stored_paths().await;
    assert_eq!(paths.len(), 7);
    assert!(paths.iter().all(|p| p.starts_with(&format!("jobs/{}/", job.id))));
}

#[tokio::test]
async fn test_storage_failure_at_step_four_fails_fast() {
    // Three uploads succeed, the fourth (Participant Guide) is rejected.
    let (repository, storage) = pipeline_fixture(Arc::new(MockStorage::failing_uploads_after(3)));
    let job = insert_sample_job(&repository).await;

    process_job(job.id, &repository, &storage, DOWNLOAD_TTL_HOURS)
        .await
        .unwrap();

    let failed = repository.get_job(job.id).await.unwrap().unwrap();
    assert_eq!(failed.status, JobStatus::Failed);
    assert_eq!(failed.progress_percent, 43);
    let error = failed.error.unwrap();
    assert!(error.contains("Participant Guide"), "error was: {error}");
    assert!(failed.completed_at.is_none());

    // Only the materials that finished before the failure exist.
    let materials = repository.list_materials_for_job(job.id).await.unwrap();
    assert_eq!(materials.len(), 3);
    assert_eq!(materials.last().unwrap().step_number, 3);
}

#[tokio::test]
async fn test_duplicate_run_is_skipped() {
    let (repository, storage) = pipeline_fixture(Arc::new(MockStorage::new()));
    let job = insert_sample_job(&repository).await;

    process_job(job.id, &repository, &storage, DOWNLOAD_TTL_HOURS)
        .await
        .unwrap();
    // Second run finds the job no longer pending and does nothing.
    process_job(job.id, &repository, &storage, DOWNLOAD_TTL_HOURS)
        .await
        .unwrap();

    let materials = repository.list_materials_for_job(job.id).await.unwrap();
    assert_eq!(materials.len(), 7);
}

#[tokio::test]
async fn test_retry_after_failure_completes() {
    let (repository, _) = pipeline_fixture(Arc::new(MockStorage::new()));
    let job = insert_sample_job(&repository).await;

    let flaky: Arc<dyn ObjectStorage> = Arc::new(MockStorage::failing_uploads_after(1));
    process_job(job.id, &repository, &flaky, DOWNLOAD_TTL_HOURS)
        .await
        .unwrap();
    assert_eq!(
        repository.get_job(job.id).await.unwrap().unwrap().status,
        JobStatus::Failed
    );

    assert!(repository.reset_for_retry(job.id).await.unwrap());
    let reset = repository.get_job(job.id).await.unwrap().unwrap();
    assert_eq!(reset.status, JobStatus::Pending);
    assert_eq!(reset.progress_percent, 0);
    assert!(reset.error.is_none());
    assert_eq!(reset.metadata.subject, "Negotiation");

    let healthy: Arc<dyn ObjectStorage> = Arc::new(MockStorage::new());
    process_job(job.id, &repository, &healthy, DOWNLOAD_TTL_HOURS)
        .await
        .unwrap();
    let finished = repository.get_job(job.id).await.unwrap().unwrap();
    assert_eq!(finished.status, JobStatus::Completed);
}

/// Repository wrapper recording every progress value written.
struct RecordingRepository {
    inner: InMemoryRepository,
    progress: Mutex<Vec<i16>>,
}

#[async_trait]
impl JobRepository for RecordingRepository {
    async fn insert_job(&self, job: &Job) -> Result<(), RepositoryError> {
        self.inner.insert_job(job).await
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<Job>, RepositoryError> {
        self.inner.get_job(id).await
    }

    async fn list_jobs_for_owner(&self, owner_id: Uuid) -> Result<Vec<Job>, RepositoryError> {
        self.inner.list_jobs_for_owner(owner_id).await
    }

    async fn claim_for_processing(&self, id: Uuid) -> Result<bool, RepositoryError> {
        self.inner.claim_for_processing(id).await
    }

    async fn update_step(
        &self,
        id: Uuid,
        step: i16,
        step_name: &str,
        message: &str,
    ) -> Result<(), RepositoryError> {
        self.inner.update_step(id, step, step_name, message).await
    }

    async fn update_progress(&self, id: Uuid, progress_percent: i16) -> Result<(), RepositoryError> {
        self.progress.lock().await.push(progress_percent);
        self.inner.update_progress(id, progress_percent).await
    }

    async fn mark_completed(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.inner.mark_completed(id).await
    }

    async fn mark_failed(&self, id: Uuid, message: &str) -> Result<(), RepositoryError> {
        self.inner.mark_failed(id, message).await
    }

    async fn reset_for_retry(&self, id: Uuid) -> Result<bool, RepositoryError> {
        self.inner.reset_for_retry(id).await
    }

    async fn insert_material(
        &self,
        material: &coursegen_server::material::models::Material,
    ) -> Result<(), RepositoryError> {
        self.inner.insert_material(material).await
    }

    async fn get_material(
        &self,
        id: Uuid,
    ) -> Result<Option<coursegen_server::material::models::Material>, RepositoryError> {
        self.inner.get_material(id).await
    }

    async fn list_materials_for_job(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<coursegen_server::material::models::Material>, RepositoryError> {
        self.inner.list_materials_for_job(job_id).await
    }

    async fn delete_materials_for_job(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<coursegen_server::material::models::Material>, RepositoryError> {
        self.inner.delete_materials_for_job(job_id).await
    }
}

#[tokio::test]
async fn test_progress_is_strictly_increasing() {
    let recording = Arc::new(RecordingRepository {
        inner: InMemoryRepository::new(),
        progress: Mutex::new(Vec::new()),
    });
    let repository: Arc<dyn JobRepository> = recording.clone();
    let storage: Arc<dyn ObjectStorage> = Arc::new(MockStorage::new());
    let job = insert_sample_job(&repository).await;

    process_job(job.id, &repository, &storage, DOWNLOAD_TTL_HOURS)
        .await
        .unwrap();

    let observed = recording.progress.lock().await.clone();
    assert_eq!(observed, [14, 29, 43, 57, 71, 86, 100]);
    assert!(observed.windows(2).all(|w| w[0] < w[1]));
}

/// Storage that cancels the job after its second upload, exercising the
/// between-step cancellation check.
struct CancellingStorage {
    inner: MockStorage,
    repository: Arc<dyn JobRepository>,
    job_id: Uuid,
    cancel_after: usize,
    uploads: Mutex<usize>,
}

#[async_trait]
impl ObjectStorage for CancellingStorage {
    async fn upload_file(&self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        self.inner.upload_file(path, data).await?;
        let mut uploads = self.uploads.lock().await;
        *uploads += 1;
        if *uploads == self.cancel_after {
            self.repository
                .mark_failed(self.job_id, "cancelled by user")
                .await
                .unwrap();
        }
        Ok(())
    }

    async fn download_file(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        self.inner.download_file(path).await
    }

    async fn delete_file(&self, path: &str) -> Result<(), StorageError> {
        self.inner.delete_file(path).await
    }

    async fn create_signed_url(
        &self,
        path: &str,
        expires_in_secs: u64,
    ) -> Result<String, StorageError> {
        self.inner.create_signed_url(path, expires_in_secs).await
    }
}

#[tokio::test]
async fn test_cancellation_stops_pipeline_between_steps() {
    let repository: Arc<dyn JobRepository> = Arc::new(InMemoryRepository::new());
    let job = insert_sample_job(&repository).await;

    let storage: Arc<dyn ObjectStorage> = Arc::new(CancellingStorage {
        inner: MockStorage::new(),
        repository: repository.clone(),
        job_id: job.id,
        cancel_after: 2,
        uploads: Mutex::new(0),
    });

    process_job(job.id, &repository, &storage, DOWNLOAD_TTL_HOURS)
        .await
        .unwrap();

    // The step in flight when the cancel landed still finished; nothing
    // after it ran and the cancel reason survived.
    let cancelled = repository.get_job(job.id).await.unwrap().unwrap();
    assert_eq!(cancelled.status, JobStatus::Failed);
    assert_eq!(cancelled.status_message, "cancelled by user");
    assert!(cancelled.completed_at.is_none());

    let materials = repository.list_materials_for_job(job.id).await.unwrap();
    assert_eq!(materials.len(), 2);
}
