//! AppState and the repository implementations behind it.
//!
//! - `repository` - the trait the rest of the crate programs against
//! - `postgres` - production implementation
//! - `memory` - in-memory implementation for tests and local runs

pub mod memory;
pub mod postgres;
pub mod repository;

use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::config::{AppConfig, SupabaseConfig};
use crate::error::ApiError;
use crate::storage::{ObjectStorage, SupabaseStorage};
use repository::JobRepository;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn JobRepository>,
    pub storage: Arc<dyn ObjectStorage>,
    pub config: AppConfig,
    job_sender: mpsc::Sender<Uuid>,
}

impl AppState {
    /// Production wiring: Postgres repository + Supabase storage.
    pub async fn new_with_config(
        config: AppConfig,
        supabase_config: SupabaseConfig,
    ) -> anyhow::Result<Self> {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(50)
            .min_connections(5)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .idle_timeout(std::time::Duration::from_secs(900))
            .connect(&config.database_url)
            .await?;

        let repository = postgres::PgRepository::new(pool);
        repository.ensure_schema().await?;

        let http_client = reqwest::Client::builder()
            .pool_idle_timeout(std::time::Duration::from_secs(900))
            .user_agent("coursegen-server/0.4")
            .build()?;

        let storage = Arc::new(SupabaseStorage::new(supabase_config, http_client));

        Ok(Self::new_with_repository_and_storage(
            Arc::new(repository),
            storage,
            config,
        ))
    }

    /// Explicit wiring; used by tests with the in-memory repository and a
    /// mock storage.
    pub fn new_with_repository_and_storage(
        repository: Arc<dyn JobRepository>,
        storage: Arc<dyn ObjectStorage>,
        config: AppConfig,
    ) -> Self {
        let (job_sender, receiver) = mpsc::channel(100);

        // Background worker consuming the generation queue.
        let worker_repository = repository.clone();
        let worker_storage = storage.clone();
        let ttl_hours = config.download_ttl_hours;
        tokio::spawn(async move {
            crate::orchestrator::start_generation_worker(
                receiver,
                worker_repository,
                worker_storage,
                ttl_hours,
            )
            .await;
        });

        Self {
            repository,
            storage,
            config,
            job_sender,
        }
    }

    /// Hand a job to the generation worker. Creation returns immediately;
    /// progress is observed by polling the job.
    pub async fn enqueue_job(&self, job_id: Uuid) -> Result<(), ApiError> {
        self.job_sender
            .send(job_id)
            .await
            .map_err(|_| ApiError::Internal("generation queue is not accepting work".to_string()))
    }
}
