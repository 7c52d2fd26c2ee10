//! Postgres-backed repository.
//!
//! Uses the runtime sqlx query API so the crate builds without a live
//! database; the schema is ensured at startup.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::repository::JobRepository;
use crate::error::RepositoryError;
use crate::job::models::{Job, JobMetadata, JobStatus};
use crate::material::models::{Material, MaterialFormat, MaterialType};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS jobs (
    id UUID PRIMARY KEY,
    owner_id UUID NOT NULL,
    status TEXT NOT NULL,
    progress_percent SMALLINT NOT NULL DEFAULT 0,
    status_message TEXT NOT NULL DEFAULT '',
    error TEXT,
    current_step SMALLINT,
    total_steps SMALLINT NOT NULL DEFAULT 7,
    step_name TEXT,
    metadata JSONB NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL,
    completed_at TIMESTAMPTZ
);
CREATE INDEX IF NOT EXISTS jobs_owner_idx ON jobs (owner_id, created_at DESC);
CREATE TABLE IF NOT EXISTS materials (
    id UUID PRIMARY KEY,
    job_id UUID NOT NULL REFERENCES jobs (id) ON DELETE CASCADE,
    material_type TEXT NOT NULL,
    name TEXT NOT NULL,
    content TEXT,
    format TEXT NOT NULL,
    step_number SMALLINT NOT NULL,
    storage_path TEXT NOT NULL,
    download_url TEXT,
    download_expiry TIMESTAMPTZ NOT NULL,
    created_at TIMESTAMPTZ NOT NULL
);
CREATE INDEX IF NOT EXISTS materials_job_idx ON materials (job_id, step_number);
"#;

pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the tables if they do not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        for statement in SCHEMA.split(';').filter(|s| !s.trim().is_empty()) {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct JobRow {
    id: Uuid,
    owner_id: Uuid,
    status: String,
    progress_percent: i16,
    status_message: String,
    error: Option<String>,
    current_step: Option<i16>,
    total_steps: i16,
    step_name: Option<String>,
    metadata: Json<JobMetadata>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl TryFrom<JobRow> for Job {
    type Error = RepositoryError;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<JobStatus>()
            .map_err(RepositoryError::Serialization)?;
        Ok(Job {
            id: row.id,
            owner_id: row.owner_id,
            status,
            progress_percent: row.progress_percent,
            status_message: row.status_message,
            error: row.error,
            current_step: row.current_step,
            total_steps: row.total_steps,
            step_name: row.step_name,
            metadata: row.metadata.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
            completed_at: row.completed_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct MaterialRow {
    id: Uuid,
    job_id: Uuid,
    material_type: String,
    name: String,
    content: Option<String>,
    format: String,
    step_number: i16,
    storage_path: String,
    download_url: Option<String>,
    download_expiry: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl TryFrom<MaterialRow> for Material {
    type Error = RepositoryError;

    fn try_from(row: MaterialRow) -> Result<Self, Self::Error> {
        Ok(Material {
            id: row.id,
            job_id: row.job_id,
            material_type: row
                .material_type
                .parse::<MaterialType>()
                .map_err(RepositoryError::Serialization)?,
            name: row.name,
            content: row.content,
            format: row
                .format
                .parse::<MaterialFormat>()
                .map_err(RepositoryError::Serialization)?,
            step_number: row.step_number,
            storage_path: row.storage_path,
            download_url: row.download_url,
            download_expiry: row.download_expiry,
            created_at: row.created_at,
        })
    }
}

const SELECT_JOB: &str = "SELECT id, owner_id, status, progress_percent, status_message, error, \
     current_step, total_steps, step_name, metadata, created_at, updated_at, completed_at \
     FROM jobs";

const SELECT_MATERIAL: &str = "SELECT id, job_id, material_type, name, content, format, \
     step_number, storage_path, download_url, download_expiry, created_at FROM materials";

#[async_trait]
impl JobRepository for PgRepository {
    async fn insert_job(&self, job: &Job) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO jobs (id, owner_id, status, progress_percent, status_message, error, \
             current_step, total_steps, step_name, metadata, created_at, updated_at, completed_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
        )
        .bind(job.id)
        .bind(job.owner_id)
        .bind(job.status.as_str())
        .bind(job.progress_percent)
        .bind(&job.status_message)
        .bind(job.error.as_deref())
        .bind(job.current_step)
        .bind(job.total_steps)
        .bind(job.step_name.as_deref())
        .bind(Json(job.metadata.clone()))
        .bind(job.created_at)
        .bind(job.updated_at)
        .bind(job.completed_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<Job>, RepositoryError> {
        let row = sqlx::query_as::<_, JobRow>(&format!("{SELECT_JOB} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Job::try_from).transpose()
    }

    async fn list_jobs_for_owner(&self, owner_id: Uuid) -> Result<Vec<Job>, RepositoryError> {
        let rows = sqlx::query_as::<_, JobRow>(&format!(
            "{SELECT_JOB} WHERE owner_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Job::try_from).collect()
    }

    async fn claim_for_processing(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "UPDATE jobs SET status = 'processing', progress_percent = 0, current_step = 1, \
             step_name = NULL, status_message = 'starting', updated_at = now() \
             WHERE id = $1 AND status = 'pending'",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn update_step(
        &self,
        id: Uuid,
        step: i16,
        step_name: &str,
        message: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "UPDATE jobs SET current_step = $2, step_name = $3, status_message = $4, \
             updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(step)
        .bind(step_name)
        .bind(message)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_progress(
        &self,
        id: Uuid,
        progress_percent: i16,
    ) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE jobs SET progress_percent = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(progress_percent)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn mark_completed(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query(
            "UPDATE jobs SET status = 'completed', progress_percent = 100, \
             status_message = 'completed', completed_at = now(), updated_at = now() \
             WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn mark_failed(&self, id: Uuid, message: &str) -> Result<(), RepositoryError> {
        sqlx::query(
            "UPDATE jobs SET status = 'failed', status_message = $2, error = $2, \
             updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(message)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn reset_for_retry(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "UPDATE jobs SET status = 'pending', progress_percent = 0, status_message = 'queued', \
             error = NULL, current_step = NULL, step_name = NULL, completed_at = NULL, \
             updated_at = now() WHERE id = $1 AND status = 'failed'",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn insert_material(&self, material: &Material) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO materials (id, job_id, material_type, name, content, format, \
             step_number, storage_path, download_url, download_expiry, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(material.id)
        .bind(material.job_id)
        .bind(material.material_type.as_str())
        .bind(&material.name)
        .bind(material.content.as_deref())
        .bind(material.format.as_str())
        .bind(material.step_number)
        .bind(&material.storage_path)
        .bind(material.download_url.as_deref())
        .bind(material.download_expiry)
        .bind(material.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_material(&self, id: Uuid) -> Result<Option<Material>, RepositoryError> {
        let row = sqlx::query_as::<_, MaterialRow>(&format!("{SELECT_MATERIAL} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Material::try_from).transpose()
    }

    async fn list_materials_for_job(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<Material>, RepositoryError> {
        let rows = sqlx::query_as::<_, MaterialRow>(&format!(
            "{SELECT_MATERIAL} WHERE job_id = $1 ORDER BY step_number"
        ))
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Material::try_from).collect()
    }

    async fn delete_materials_for_job(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<Material>, RepositoryError> {
        let rows = sqlx::query_as::<_, MaterialRow>(
            "DELETE FROM materials WHERE job_id = $1 RETURNING id, job_id, material_type, name, \
             content, format, step_number, storage_path, download_url, download_expiry, created_at",
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Material::try_from).collect()
    }
}
