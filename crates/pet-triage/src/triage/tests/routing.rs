use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::triage::router::{session_handler, triage_router};
use crate::triage::service::TriageService;

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("json body")))
        .expect("request builds")
}

#[tokio::test]
async fn start_route_creates_sessions() {
    let (service, _, _) = build_service();
    let router = triage_router(Arc::new(service));

    let response = router
        .oneshot(post_json(
            "/api/v1/triage/sessions",
            json!({ "id": 42, "name": "Mochi", "species": "cat" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["step"]["phase"], "screening");
    assert_eq!(payload["step"]["step"], "chief_complaint");
    assert_eq!(payload["pending_prompt"]["prompt"]["key"], "chief_complaint");
}

#[tokio::test]
async fn action_route_applies_owner_input() {
    let (service, _, _) = build_service();
    let service = Arc::new(service);
    let id = service.start(mochi()).expect("session starts").session_id;
    let router = triage_router(service);

    let response = router
        .oneshot(post_json(
            &format!("/api/v1/triage/sessions/{id}/actions"),
            json!({
                "kind": "screening",
                "event": { "type": "enter_complaint", "text": "coughing at night" }
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["screening"]["chief_complaint"], "coughing at night");
}

#[tokio::test]
async fn blocked_actions_return_conflict() {
    let (service, _, _) = build_service();
    let service = Arc::new(service);
    let id = service.start(mochi()).expect("session starts").session_id;
    let router = triage_router(service);

    let response = router
        .oneshot(post_json(
            &format!("/api/v1/triage/sessions/{id}/actions"),
            json!({ "kind": "screening", "event": { "type": "submit_complaint" } }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("chief complaint"));
}

#[tokio::test]
async fn session_handler_returns_not_found_for_unknown_ids() {
    let (service, _, _) = build_service();
    let response = session_handler::<MemorySessions, MemoryNotifier>(
        State(Arc::new(service)),
        Path("triage-unknown".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn session_handler_returns_internal_error_when_store_is_down() {
    let service = Arc::new(TriageService::with_clock(
        Arc::new(UnavailableRepository),
        Arc::new(MemoryNotifier::default()),
        clock(),
    ));
    let response = session_handler::<UnavailableRepository, MemoryNotifier>(
        State(service),
        Path("triage-000001".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn species_catalog_includes_the_species_group() {
    let (service, _, _) = build_service();
    let router = triage_router(Arc::new(service));

    let response = router
        .oneshot(
            Request::get("/api/v1/triage/catalog/species/rabbit")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let groups = payload["additional_symptoms"]
        .as_array()
        .expect("groups listed");
    assert_eq!(groups.len(), 2);
    assert_eq!(payload["concerns"].as_array().map(Vec::len), Some(9));
}
