//! In-memory repository used by tests and storage-less local runs.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::repository::JobRepository;
use crate::error::RepositoryError;
use crate::job::models::{Job, JobStatus};
use crate::material::models::Material;

#[derive(Default)]
pub struct InMemoryRepository {
    jobs: RwLock<HashMap<Uuid, Job>>,
    materials: RwLock<HashMap<Uuid, Material>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobRepository for InMemoryRepository {
    async fn insert_job(&self, job: &Job) -> Result<(), RepositoryError> {
        self.jobs.write().await.insert(job.id, job.clone());
        Ok(())
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<Job>, RepositoryError> {
        Ok(self.jobs.read().await.get(&id).cloned())
    }

    async fn list_jobs_for_owner(&self, owner_id: Uuid) -> Result<Vec<Job>, RepositoryError> {
        let mut jobs: Vec<Job> = self
            .jobs
            .read()
            .await
            .values()
            .filter(|j| j.owner_id == owner_id)
            .cloned()
            .collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(jobs)
    }

    async fn claim_for_processing(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut jobs = self.jobs.write().await;
        match jobs.get_mut(&id) {
            Some(job) if job.status == JobStatus::Pending => {
                job.status = JobStatus::Processing;
                job.progress_percent = 0;
                job.current_step = Some(1);
                job.step_name = None;
                job.status_message = "starting".to_string();
                job.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn update_step(
        &self,
        id: Uuid,
        step: i16,
        step_name: &str,
        message: &str,
    ) -> Result<(), RepositoryError> {
        let mut jobs = self.jobs.write().await;
        if let Some(job) = jobs.get_mut(&id) {
            job.current_step = Some(step);
            job.step_name = Some(step_name.to_string());
            job.status_message = message.to_string();
            job.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn update_progress(
        &self,
        id: Uuid,
        progress_percent: i16,
    ) -> Result<(), RepositoryError> {
        let mut jobs = self.jobs.write().await;
        if let Some(job) = jobs.get_mut(&id) {
            job.progress_percent = progress_percent;
            job.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn mark_completed(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut jobs = self.jobs.write().await;
        if let Some(job) = jobs.get_mut(&id) {
            let now = Utc::now();
            job.status = JobStatus::Completed;
            job.progress_percent = 100;
            job.status_message = "completed".to_string();
            job.completed_at = Some(now);
            job.updated_at = now;
        }
        Ok(())
    }

    async fn mark_failed(&self, id: Uuid, message: &str) -> Result<(), RepositoryError> {
        let mut jobs = self.jobs.write().await;
        if let Some(job) = jobs.get_mut(&id) {
            job.status = JobStatus::Failed;
            job.status_message = message.to_string();
            job.error = Some(message.to_string());
            job.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn reset_for_retry(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut jobs = self.jobs.write().await;
        match jobs.get_mut(&id) {
            Some(job) if job.status == JobStatus::Failed => {
                job.status = JobStatus::Pending;
                job.progress_percent = 0;
                job.status_message = "queued".to_string();
                job.error = None;
                job.current_step = None;
                job.step_name = None;
                job.completed_at = None;
                job.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn insert_material(&self, material: &Material) -> Result<(), RepositoryError> {
        self.materials
            .write()
            .await
            .insert(material.id, material.clone());
        Ok(())
    }

    async fn get_material(&self, id: Uuid) -> Result<Option<Material>, RepositoryError> {
        Ok(self.materials.read().await.get(&id).cloned())
    }

    async fn list_materials_for_job(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<Material>, RepositoryError> {
        let mut materials: Vec<Material> = self
            .materials
            .read()
            .await
            .values()
            .filter(|m| m.job_id == job_id)
            .cloned()
            .collect();
        materials.sort_by_key(|m| m.step_number);
        Ok(materials)
    }

    async fn delete_materials_for_job(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<Material>, RepositoryError> {
        let mut materials = self.materials.write().await;
        let ids: Vec<Uuid> = materials
            .values()
            .filter(|m| m.job_id == job_id)
            .map(|m| m.id)
            .collect();
        let mut removed = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(material) = materials.remove(&id) {
                removed.push(material);
            }
        }
        removed.sort_by_key(|m| m.step_number);
        Ok(removed)
    }
}
