//! HTTP-level tests for the job lifecycle endpoints, run against an
//! in-process service with the in-memory repository and mock storage.

mod common;

use std::sync::Arc;

use actix_web::{test, web, App};
use uuid::Uuid;

use common::{bearer, test_metadata, test_state, wait_for_status, MockStorage};
use coursegen_server::configure_api;
use coursegen_server::job::models::{Job, JobStatus};
use coursegen_server::storage::ObjectStorage;

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .service(web::scope("/api").configure(configure_api)),
        )
        .await
    };
}

fn create_body() -> serde_json::Value {
    serde_json::json!({ "metadata": test_metadata() })
}

#[actix_web::test]
async fn test_create_job_runs_to_completion() {
    let state = test_state(Arc::new(MockStorage::new()));
    let app = app!(state);
    let owner = Uuid::new_v4();

    let req = test::TestRequest::post()
        .uri("/api/jobs")
        .insert_header(bearer(owner))
        .set_json(create_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let created: Job = test::read_body_json(resp).await;
    assert_eq!(created.owner_id, owner);
    assert_eq!(created.status, JobStatus::Pending);
    assert_eq!(created.status_message, "queued");

    // The worker picks the job off the queue and drives it to completed.
    let finished = wait_for_status(&state.repository, created.id, JobStatus::Completed).await;
    assert_eq!(finished.progress_percent, 100);

    let req = test::TestRequest::get()
        .uri(&format!("/api/jobs/{}/materials", created.id))
        .insert_header(bearer(owner))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let materials: Vec<serde_json::Value> = test::read_body_json(resp).await;
    assert_eq!(materials.len(), 7);
}

#[actix_web::test]
async fn test_create_job_rejects_empty_subject() {
    let state = test_state(Arc::new(MockStorage::new()));
    let app = app!(state);

    let mut body = create_body();
    body["metadata"]["subject"] = serde_json::json!("   ");
    let req = test::TestRequest::post()
        .uri("/api/jobs")
        .insert_header(bearer(Uuid::new_v4()))
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_missing_and_malformed_tokens_are_unauthorized() {
    let state = test_state(Arc::new(MockStorage::new()));
    let app = app!(state);

    let req = test::TestRequest::get().uri("/api/jobs").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::get()
        .uri("/api/jobs")
        .insert_header(("Authorization", "Bearer not.a.token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_jobs_are_invisible_to_other_owners() {
    let state = test_state(Arc::new(MockStorage::new()));
    let app = app!(state);
    let owner = Uuid::new_v4();

    let req = test::TestRequest::post()
        .uri("/api/jobs")
        .insert_header(bearer(owner))
        .set_json(create_body())
        .to_request();
    let created: Job = test::read_body_json(test::call_service(&app, req).await).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/jobs/{}", created.id))
        .insert_header(bearer(Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let req = test::TestRequest::get()
        .uri("/api/jobs")
        .insert_header(bearer(Uuid::new_v4()))
        .to_request();
    let jobs: Vec<Job> = test::read_body_json(test::call_service(&app, req).await).await;
    assert!(jobs.is_empty());
}

/// POST a job as `owner` and wait for it to reach the given terminal state.
macro_rules! create_and_finish {
    ($app:expr, $state:expr, $owner:expr, $terminal:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/jobs")
            .insert_header(bearer($owner))
            .set_json(create_body())
            .to_request();
        let created: Job = test::read_body_json(test::call_service($app, req).await).await;
        wait_for_status(&$state.repository, created.id, $terminal).await
    }};
}

#[actix_web::test]
async fn test_cancel_semantics() {
    // Storage that fails every upload makes jobs land in failed quickly.
    let failing: Arc<dyn ObjectStorage> = Arc::new(MockStorage::failing_uploads_after(0));
    let failing_state = test_state(failing);
    let failing_app = app!(failing_state);
    let owner = Uuid::new_v4();

    // Cancelling an already-failed job is a no-op that returns the job.
    let failed = create_and_finish!(&failing_app, failing_state, owner, JobStatus::Failed);
    let req = test::TestRequest::post()
        .uri(&format!("/api/jobs/{}/cancel", failed.id))
        .insert_header(bearer(owner))
        .to_request();
    let resp = test::call_service(&failing_app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Job = test::read_body_json(resp).await;
    assert_eq!(body.status, JobStatus::Failed);

    // Cancelling a completed job is a conflict.
    let state = test_state(Arc::new(MockStorage::new()));
    let app = app!(state);
    let completed = create_and_finish!(&app, state, owner, JobStatus::Completed);
    let req = test::TestRequest::post()
        .uri(&format!("/api/jobs/{}/cancel", completed.id))
        .insert_header(bearer(owner))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);
}

#[actix_web::test]
async fn test_retry_requires_failed_state_then_regenerates() {
    let failing: Arc<dyn ObjectStorage> = Arc::new(MockStorage::failing_uploads_after(2));
    let state = test_state(failing);
    let app = app!(state);
    let owner = Uuid::new_v4();

    let failed = create_and_finish!(&app, state, owner, JobStatus::Failed);
    assert_eq!(failed.progress_percent, 29);

    // Retrying resets the job and re-queues it. The mock keeps rejecting
    // uploads, so the retry fails again at step one.
    let req = test::TestRequest::post()
        .uri(&format!("/api/jobs/{}/retry", failed.id))
        .insert_header(bearer(owner))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let failed_again = wait_for_status(&state.repository, failed.id, JobStatus::Failed).await;
    assert!(failed_again.error.is_some());
    // Stale materials from the first attempt were dropped.
    let materials = state
        .repository
        .list_materials_for_job(failed.id)
        .await
        .unwrap();
    assert!(materials.is_empty());

    // A completed job cannot be retried.
    let ok_state = test_state(Arc::new(MockStorage::new()));
    let ok_app = app!(ok_state);
    let completed = create_and_finish!(&ok_app, ok_state, owner, JobStatus::Completed);
    let req = test::TestRequest::post()
        .uri(&format!("/api/jobs/{}/retry", completed.id))
        .insert_header(bearer(owner))
        .to_request();
    let resp = test::call_service(&ok_app, req).await;
    assert_eq!(resp.status(), 409);
}
