//! Job orchestrator - drives the fixed seven-step generation sequence.
//!
//! Jobs are handed to a background worker over an mpsc channel; the worker
//! spawns one pipeline task per job, so distinct jobs run concurrently
//! while the steps inside a job stay strictly sequential. Sequential steps
//! keep the progress bar monotonic and make fail-fast semantics trivial;
//! with a fixed count of seven small documents there is nothing to win by
//! parallelizing inside a job.

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::assembler;
use crate::db::repository::JobRepository;
use crate::error::ApiError;
use crate::job::models::{Job, JobStatus, TOTAL_STEPS};
use crate::material::models::{Material, MaterialFormat, MaterialType};
use crate::storage::ObjectStorage;
use crate::template;

/// One entry of the fixed generation sequence.
pub struct MaterialSpec {
    pub material_type: MaterialType,
    pub step: i16,
    pub name: &'static str,
    pub format: MaterialFormat,
}

/// The seven materials every job produces, in processing order. Later
/// materials build on the framing the earlier ones establish, so the
/// order is part of the contract.
pub const MATERIAL_SPECS: [MaterialSpec; 7] = [
    MaterialSpec {
        material_type: MaterialType::Foundation,
        step: 1,
        name: "Course Foundation & Agenda",
        format: MaterialFormat::Docx,
    },
    MaterialSpec {
        material_type: MaterialType::Slides,
        step: 2,
        name: "Slide Deck",
        format: MaterialFormat::Pptx,
    },
    MaterialSpec {
        material_type: MaterialType::Facilitator,
        step: 3,
        name: "Facilitator Guide",
        format: MaterialFormat::Docx,
    },
    MaterialSpec {
        material_type: MaterialType::Participant,
        step: 4,
        name: "Participant Guide",
        format: MaterialFormat::Docx,
    },
    MaterialSpec {
        material_type: MaterialType::Activities,
        step: 5,
        name: "Group Activities",
        format: MaterialFormat::Docx,
    },
    MaterialSpec {
        material_type: MaterialType::Evaluation,
        step: 6,
        name: "Course Evaluation",
        format: MaterialFormat::Docx,
    },
    MaterialSpec {
        material_type: MaterialType::Resources,
        step: 7,
        name: "Further Resources",
        format: MaterialFormat::Docx,
    },
];

/// Progress after `step` of the seven steps succeeded.
pub fn progress_for_step(step: i16) -> i16 {
    ((f64::from(step as i32) * 100.0) / f64::from(TOTAL_STEPS as i32)).round() as i16
}

/// Consume the generation queue. One pipeline task is spawned per job id
/// received; the worker itself never blocks on a running job.
pub async fn start_generation_worker(
    mut receiver: mpsc::Receiver<Uuid>,
    repository: Arc<dyn JobRepository>,
    storage: Arc<dyn ObjectStorage>,
    ttl_hours: i64,
) {
    log::info!("generation worker started");

    while let Some(job_id) = receiver.recv().await {
        let repository = repository.clone();
        let storage = storage.clone();
        tokio::spawn(async move {
            if let Err(e) = process_job(job_id, &repository, &storage, ttl_hours).await {
                log::error!("job {job_id} pipeline error: {e}");
            }
        });
    }

    log::info!("generation worker stopped");
}

/// Run the full generation pipeline for one job.
///
/// Failures inside a step are recorded on the job and abort the remaining
/// steps; this function only returns `Err` for repository-level problems
/// that prevent even that bookkeeping.
pub async fn process_job(
    job_id: Uuid,
    repository: &Arc<dyn JobRepository>,
    storage: &Arc<dyn ObjectStorage>,
    ttl_hours: i64,
) -> Result<(), ApiError> {
    if !repository.claim_for_processing(job_id).await? {
        log::warn!("job {job_id} is not pending, skipping duplicate run");
        return Ok(());
    }

    let Some(job) = repository.get_job(job_id).await? else {
        log::error!("job {job_id} vanished after claim");
        return Ok(());
    };

    // Namespaces storage paths per attempt so retries never collide.
    let attempt = Utc::now().timestamp_millis();
    log::info!(
        "job {job_id}: generating materials for '{}' (attempt {attempt})",
        job.metadata.subject
    );

    for spec in &MATERIAL_SPECS {
        // Cancellation is cooperative: checked between steps, never mid-step.
        match repository.get_job(job_id).await? {
            Some(current) if current.status == JobStatus::Processing => {}
            _ => {
                log::info!("job {job_id} left processing state, stopping at step {}", spec.step);
                return Ok(());
            }
        }

        repository
            .update_step(
                job_id,
                spec.step,
                spec.name,
                &format!("generating {}", spec.name),
            )
            .await?;

        match generate_material(&job, spec, attempt, storage, ttl_hours).await {
            Ok(material) => {
                repository.insert_material(&material).await?;
                repository
                    .update_progress(job_id, progress_for_step(spec.step))
                    .await?;
                log::debug!(
                    "job {job_id}: step {}/{TOTAL_STEPS} done ({})",
                    spec.step,
                    spec.name
                );
            }
            Err(e) => {
                let message = format!("failed to generate {}: {e}", spec.name);
                log::error!("job {job_id}: {message}");
                repository.mark_failed(job_id, &message).await?;
                return Ok(());
            }
        }
    }

    repository.mark_completed(job_id).await?;
    log::info!("job {job_id} completed");
    Ok(())
}

/// One step: template -> assemble -> upload -> sign.
async fn generate_material(
    job: &Job,
    spec: &MaterialSpec,
    attempt: i64,
    storage: &Arc<dyn ObjectStorage>,
    ttl_hours: i64,
) -> Result<Material, ApiError> {
    let document = template::generate_content(spec.material_type, &job.metadata);
    let blob = assembler::assemble(&document, spec.format)?;

    let path = format!(
        "jobs/{}/{attempt}/{}.{}",
        job.id,
        spec.material_type,
        spec.format.extension()
    );
    storage.upload_file(&path, &blob).await?;

    let ttl_secs = (ttl_hours * 3600).max(0) as u64;
    let download_url = match storage.create_signed_url(&path, ttl_secs).await {
        Ok(url) => Some(url),
        // A missing signed URL is not fatal: the gateway can still stream
        // the blob itself.
        Err(e) => {
            log::warn!("job {}: could not sign {path}: {e}", job.id);
            None
        }
    };

    Ok(Material::new(
        job.id,
        spec.material_type,
        spec.name.to_string(),
        Some(assembler::flatten_text(&document)),
        spec.format,
        spec.step,
        path,
        download_url,
        ttl_hours,
    ))
}
