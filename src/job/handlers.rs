use actix_web::{
    web::{self, Json, Path},
    HttpRequest, HttpResponse,
};
use log::{debug, error, info};
use uuid::Uuid;

use crate::auth::authenticate;
use crate::db::AppState;
use crate::error::{ApiError, ErrorResponse};
use crate::job::models::{CreateJobRequest, Job, JobStatus};

/// Fixed message recorded when a user cancels a job.
pub const CANCELLED_MESSAGE: &str = "cancelled by user";

/// Fetch a job and enforce that it belongs to the caller. Ownership
/// failures are indistinguishable from missing jobs on purpose.
async fn owned_job(data: &AppState, job_id: Uuid, owner_id: Uuid) -> Result<Job, ApiError> {
    let job = data
        .repository
        .get_job(job_id)
        .await?
        .filter(|job| job.owner_id == owner_id)
        .ok_or_else(|| ApiError::NotFound(format!("job '{job_id}' not found")))?;
    Ok(job)
}

#[utoipa::path(
    context_path = "/api",
    tag = "Job Service",
    post,
    path = "/jobs",
    request_body = CreateJobRequest,
    responses(
        (status = 201, description = "Job created and queued", body = Job),
        (status = 400, description = "Invalid generation parameters", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse)
    )
)]
pub async fn create_job(
    req: HttpRequest,
    body: Json<CreateJobRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let owner_id = authenticate(&req, &data.config.jwt_secret)?;
    info!("Executing create_job handler for owner {owner_id}");

    let metadata = body.into_inner().metadata;
    metadata.validate().map_err(ApiError::Validation)?;

    let job = Job::new(owner_id, metadata);
    data.repository.insert_job(&job).await?;
    data.enqueue_job(job.id).await?;

    info!("Job {} queued for generation", job.id);
    Ok(HttpResponse::Created().json(job))
}

#[utoipa::path(
    context_path = "/api",
    tag = "Job Service",
    get,
    path = "/jobs",
    responses(
        (status = 200, description = "Jobs owned by the caller", body = [Job]),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse)
    )
)]
pub async fn get_all_jobs(
    req: HttpRequest,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let owner_id = authenticate(&req, &data.config.jwt_secret)?;
    debug!("Listing jobs for owner {owner_id}");

    let jobs = data.repository.list_jobs_for_owner(owner_id).await?;
    Ok(HttpResponse::Ok().json(jobs))
}

#[utoipa::path(
    context_path = "/api",
    tag = "Job Service",
    get,
    path = "/jobs/{id}",
    params(("id" = Uuid, Path, description = "Job id")),
    responses(
        (status = 200, description = "Job found", body = Job),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 404, description = "Job not found", body = ErrorResponse)
    )
)]
pub async fn get_job_by_id(
    req: HttpRequest,
    path: Path<Uuid>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let owner_id = authenticate(&req, &data.config.jwt_secret)?;
    let job = owned_job(&data, path.into_inner(), owner_id).await?;
    Ok(HttpResponse::Ok().json(job))
}

#[utoipa::path(
    context_path = "/api",
    tag = "Job Service",
    post,
    path = "/jobs/{id}/retry",
    params(("id" = Uuid, Path, description = "Job id")),
    responses(
        (status = 200, description = "Job reset to pending and re-queued", body = Job),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 404, description = "Job not found", body = ErrorResponse),
        (status = 409, description = "Job is not in a failed state", body = ErrorResponse)
    )
)]
pub async fn retry_job(
    req: HttpRequest,
    path: Path<Uuid>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let owner_id = authenticate(&req, &data.config.jwt_secret)?;
    let job_id = path.into_inner();
    info!("Executing retry_job handler for job {job_id}");

    owned_job(&data, job_id, owner_id).await?;

    if !data.repository.reset_for_retry(job_id).await? {
        return Err(ApiError::NotReady(format!(
            "job '{job_id}' is not failed and cannot be retried"
        )));
    }

    // Old materials are invalid after a reset; drop them and make a
    // best-effort pass at their blobs.
    let removed = data.repository.delete_materials_for_job(job_id).await?;
    for material in &removed {
        if let Err(e) = data.storage.delete_file(&material.storage_path).await {
            error!(
                "could not delete stale blob {}: {e}",
                material.storage_path
            );
        }
    }
    debug!("Removed {} stale materials for job {job_id}", removed.len());

    data.enqueue_job(job_id).await?;

    let job = owned_job(&data, job_id, owner_id).await?;
    Ok(HttpResponse::Ok().json(job))
}

#[utoipa::path(
    context_path = "/api",
    tag = "Job Service",
    post,
    path = "/jobs/{id}/cancel",
    params(("id" = Uuid, Path, description = "Job id")),
    responses(
        (status = 200, description = "Job cancelled (idempotent)", body = Job),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 404, description = "Job not found", body = ErrorResponse),
        (status = 409, description = "Completed jobs cannot be cancelled", body = ErrorResponse)
    )
)]
pub async fn cancel_job(
    req: HttpRequest,
    path: Path<Uuid>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let owner_id = authenticate(&req, &data.config.jwt_secret)?;
    let job_id = path.into_inner();
    info!("Executing cancel_job handler for job {job_id}");

    let job = owned_job(&data, job_id, owner_id).await?;
    match job.status {
        JobStatus::Completed => Err(ApiError::NotReady(format!(
            "job '{job_id}' is already completed"
        ))),
        // Repeated cancels are a no-op.
        JobStatus::Failed => Ok(HttpResponse::Ok().json(job)),
        JobStatus::Pending | JobStatus::Processing => {
            data.repository.mark_failed(job_id, CANCELLED_MESSAGE).await?;
            let job = owned_job(&data, job_id, owner_id).await?;
            Ok(HttpResponse::Ok().json(job))
        }
    }
}
