use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use super::catalog::CatalogView;
use super::domain::{SessionId, Subject};
use super::repository::{SessionRepository, TriageNotifier};
use super::service::TriageService;
use super::session::TriageAction;
use crate::error::AppError;

/// Router builder exposing the triage conversation over HTTP.
pub fn triage_router<R, N>(service: Arc<TriageService<R, N>>) -> Router
where
    R: SessionRepository + 'static,
    N: TriageNotifier + 'static,
{
    Router::new()
        .route("/api/v1/triage/sessions", post(start_handler::<R, N>))
        .route(
            "/api/v1/triage/sessions/:session_id",
            get(session_handler::<R, N>),
        )
        .route(
            "/api/v1/triage/sessions/:session_id/actions",
            post(action_handler::<R, N>),
        )
        .route("/api/v1/triage/catalog", get(catalog_handler))
        .route(
            "/api/v1/triage/catalog/species/:species",
            get(species_catalog_handler),
        )
        .with_state(service)
}

pub(crate) async fn start_handler<R, N>(
    State(service): State<Arc<TriageService<R, N>>>,
    Json(subject): Json<Subject>,
) -> Response
where
    R: SessionRepository + 'static,
    N: TriageNotifier + 'static,
{
    match service.start(subject) {
        Ok(view) => (StatusCode::CREATED, Json(view)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn session_handler<R, N>(
    State(service): State<Arc<TriageService<R, N>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
    N: TriageNotifier + 'static,
{
    match service.get(&SessionId(session_id)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn action_handler<R, N>(
    State(service): State<Arc<TriageService<R, N>>>,
    Path(session_id): Path<String>,
    Json(action): Json<TriageAction>,
) -> Response
where
    R: SessionRepository + 'static,
    N: TriageNotifier + 'static,
{
    match service.dispatch(&SessionId(session_id), action) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn catalog_handler() -> Json<CatalogView> {
    Json(CatalogView::for_species(""))
}

pub(crate) async fn species_catalog_handler(Path(species): Path<String>) -> Json<CatalogView> {
    Json(CatalogView::for_species(&species))
}
