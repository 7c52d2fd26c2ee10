//! Repository seam for jobs and materials.
//!
//! The orchestrator and the HTTP handlers only see this trait; Postgres
//! backs it in production and an in-memory implementation backs tests and
//! local runs.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::job::models::Job;
use crate::material::models::Material;

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn insert_job(&self, job: &Job) -> Result<(), RepositoryError>;

    async fn get_job(&self, id: Uuid) -> Result<Option<Job>, RepositoryError>;

    /// Jobs for one owner, newest first.
    async fn list_jobs_for_owner(&self, owner_id: Uuid) -> Result<Vec<Job>, RepositoryError>;

    /// Atomic `pending -> processing` claim. Returns false when the job is
    /// not pending (already claimed, finished, or missing), which is how
    /// concurrent duplicate runs of the same job are prevented.
    async fn claim_for_processing(&self, id: Uuid) -> Result<bool, RepositoryError>;

    /// Record the step the orchestrator is about to run.
    async fn update_step(
        &self,
        id: Uuid,
        step: i16,
        step_name: &str,
        message: &str,
    ) -> Result<(), RepositoryError>;

    /// Record progress after a successful step. Progress only ever grows
    /// while a job is processing.
    async fn update_progress(&self, id: Uuid, progress_percent: i16) -> Result<(), RepositoryError>;

    async fn mark_completed(&self, id: Uuid) -> Result<(), RepositoryError>;

    /// Terminal failure; progress keeps its last successful value.
    async fn mark_failed(&self, id: Uuid, message: &str) -> Result<(), RepositoryError>;

    /// Atomic `failed -> pending` reset for retry: clears error, progress,
    /// step fields and completion time while preserving metadata. Returns
    /// false when the job was not failed.
    async fn reset_for_retry(&self, id: Uuid) -> Result<bool, RepositoryError>;

    async fn insert_material(&self, material: &Material) -> Result<(), RepositoryError>;

    async fn get_material(&self, id: Uuid) -> Result<Option<Material>, RepositoryError>;

    /// Materials of one job ordered by step number.
    async fn list_materials_for_job(&self, job_id: Uuid)
        -> Result<Vec<Material>, RepositoryError>;

    /// Remove a job's materials (retry invalidation); returns the removed
    /// rows so the caller can clean up their blobs.
    async fn delete_materials_for_job(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<Material>, RepositoryError>;
}
