use actix_web::{
    web::{self, Path},
    HttpRequest, HttpResponse,
};
use log::debug;
use uuid::Uuid;

use crate::auth::authenticate;
use crate::db::AppState;
use crate::error::{ApiError, ErrorResponse};
use crate::material::models::Material;

#[utoipa::path(
    context_path = "/api",
    tag = "Material Service",
    get,
    path = "/jobs/{id}/materials",
    params(("id" = Uuid, Path, description = "Parent job id")),
    responses(
        (status = 200, description = "Materials of the job, ordered by step", body = [Material]),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 404, description = "Job not found", body = ErrorResponse)
    )
)]
pub async fn get_materials_for_job(
    req: HttpRequest,
    path: Path<Uuid>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let owner_id = authenticate(&req, &data.config.jwt_secret)?;
    let job_id = path.into_inner();
    debug!("Listing materials for job {job_id}");

    let job = data
        .repository
        .get_job(job_id)
        .await?
        .filter(|job| job.owner_id == owner_id)
        .ok_or_else(|| ApiError::NotFound(format!("job '{job_id}' not found")))?;

    let materials = data.repository.list_materials_for_job(job.id).await?;
    Ok(HttpResponse::Ok().json(materials))
}

#[utoipa::path(
    context_path = "/api",
    tag = "Material Service",
    get,
    path = "/materials/{id}",
    params(("id" = Uuid, Path, description = "Material id")),
    responses(
        (status = 200, description = "Material found", body = Material),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 404, description = "Material not found", body = ErrorResponse)
    )
)]
pub async fn get_material_by_id(
    req: HttpRequest,
    path: Path<Uuid>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let owner_id = authenticate(&req, &data.config.jwt_secret)?;
    let material_id = path.into_inner();

    let material: Material = data
        .repository
        .get_material(material_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("material '{material_id}' not found")))?;

    // Ownership goes through the parent job.
    let owned = data
        .repository
        .get_job(material.job_id)
        .await?
        .is_some_and(|job| job.owner_id == owner_id);
    if !owned {
        return Err(ApiError::NotFound(format!(
            "material '{material_id}' not found"
        )));
    }

    Ok(HttpResponse::Ok().json(material))
}
