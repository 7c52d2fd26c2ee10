//! Download gateway - authorizes and serves stored materials.
//!
//! Every check failure maps to a distinct error so callers can tell an
//! expired link from a missing material or an unfinished job. Expiry is
//! enforced against the Material's stored `download_expiry`, regardless
//! of whether the storage-native signed URL would still work.

use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use log::{error, info, warn};
use sanitize_filename::sanitize;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::auth::authenticate;
use crate::db::AppState;
use crate::error::{ApiError, ErrorResponse};
use crate::job::models::JobStatus;

#[derive(Debug, Deserialize, IntoParams)]
pub struct DownloadQuery {
    pub job_id: Uuid,
    pub material_id: Uuid,
}

/// Build the `Content-Disposition` filename: allowlisted characters only,
/// whitespace collapsed, format extension appended.
fn download_filename(name: &str, extension: &str) -> String {
    let collapsed = name.split_whitespace().collect::<Vec<_>>().join(" ");
    let allowlisted: String = collapsed
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_' | '&'))
        .collect();
    let base = sanitize(allowlisted.trim());
    let base = if base.is_empty() {
        "material".to_string()
    } else {
        base
    };
    format!("{base}.{extension}")
}

#[utoipa::path(
    context_path = "/api",
    tag = "Download Gateway",
    get,
    path = "/download",
    params(DownloadQuery),
    responses(
        (status = 200, description = "Material bytes with format content-type"),
        (status = 307, description = "Redirect to a still-valid signed URL (storage fetch fallback)"),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 404, description = "Job or material not found", body = ErrorResponse),
        (status = 409, description = "Job is not completed yet", body = ErrorResponse),
        (status = 410, description = "Download link expired", body = ErrorResponse)
    )
)]
pub async fn download_material(
    req: HttpRequest,
    query: web::Query<DownloadQuery>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let owner_id = authenticate(&req, &data.config.jwt_secret)?;
    let DownloadQuery {
        job_id,
        material_id,
    } = query.into_inner();
    info!("Executing download_material handler for material {material_id}");

    let job = data
        .repository
        .get_job(job_id)
        .await?
        .filter(|job| job.owner_id == owner_id)
        .ok_or_else(|| ApiError::NotFound(format!("job '{job_id}' not found")))?;

    if job.status != JobStatus::Completed {
        return Err(ApiError::NotReady(format!(
            "job '{job_id}' is {}; materials are downloadable once it is completed",
            job.status
        )));
    }

    let material = data
        .repository
        .get_material(material_id)
        .await?
        .filter(|m| m.job_id == job.id)
        .ok_or_else(|| ApiError::NotFound(format!("material '{material_id}' not found")))?;

    if Utc::now() >= material.download_expiry {
        return Err(ApiError::Expired(format!(
            "download link for '{}' expired at {}",
            material.name,
            material.download_expiry.to_rfc3339()
        )));
    }

    match data.storage.download_file(&material.storage_path).await {
        Ok(bytes) => {
            let filename = download_filename(&material.name, material.format.extension());
            Ok(HttpResponse::Ok()
                .content_type(material.format.content_type())
                .append_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{filename}\""),
                ))
                .body(bytes))
        }
        // Soft degradation: a dead primary fetch falls back to the signed
        // URL issued at generation time when one exists.
        Err(e) => match material.download_url {
            Some(url) => {
                warn!(
                    "primary fetch of {} failed ({e}), redirecting to signed URL",
                    material.storage_path
                );
                Ok(HttpResponse::TemporaryRedirect()
                    .append_header(("Location", url))
                    .finish())
            }
            None => {
                error!("primary fetch of {} failed: {e}", material.storage_path);
                Err(ApiError::Storage(e))
            }
        },
    }
}
