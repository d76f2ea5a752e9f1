use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use super::container::Container;
use super::controller::{
    DeleteSnapshotController, InsertSnapshotController, SnapshotAllController,
    UpdateSnapshotController, WinloseController,
};
use super::cors::cors;
use super::error::ApiError;

pub const WINLOSE_PATH: &str = "/api/v1/ext/winloseEsByMonthMulti";
pub const SNAPSHOT_ALL_PATH: &str = "/api/v1/ext/snapshotAll";
pub const INSERT_SNAPSHOT_PATH: &str = "/api/v1/ext/insertSnapshot";
pub const UPDATE_SNAPSHOT_PATH: &str = "/api/v1/ext/updateSnapshot";
pub const DELETE_SNAPSHOT_PATH: &str = "/api/v1/ext/deleteSnapshot";

/// Route table, in the order endpoints are logged at startup.
pub const ROUTES: &[(&str, &str)] = &[
    ("POST", WINLOSE_PATH),
    ("GET", SNAPSHOT_ALL_PATH),
    ("POST", INSERT_SNAPSHOT_PATH),
    ("POST", UPDATE_SNAPSHOT_PATH),
    ("POST", DELETE_SNAPSHOT_PATH),
];

type AppState = State<Arc<Container>>;

pub fn build_router(container: Arc<Container>) -> axum::Router {
    axum::Router::new()
        .route(WINLOSE_PATH, post(winlose).fallback(method_not_allowed))
        .route(SNAPSHOT_ALL_PATH, get(snapshot_all).fallback(method_not_allowed))
        .route(INSERT_SNAPSHOT_PATH, post(insert_snapshot).fallback(method_not_allowed))
        .route(UPDATE_SNAPSHOT_PATH, post(update_snapshot).fallback(method_not_allowed))
        .route(DELETE_SNAPSHOT_PATH, post(delete_snapshot).fallback(method_not_allowed))
        .layer(middleware::from_fn(cors))
        .layer(TraceLayer::new_for_http())
        .with_state(container)
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn winlose(State(container): AppState, body: Bytes) -> Response {
    WinloseController::new(&container)
        .lookup(&body)
        .await
        .into_response()
}

async fn snapshot_all(State(container): AppState) -> Response {
    SnapshotAllController::new(&container)
        .list()
        .await
        .into_response()
}

async fn insert_snapshot(State(container): AppState, body: Bytes) -> Response {
    InsertSnapshotController::new(&container)
        .insert(&body)
        .await
        .into_response()
}

async fn update_snapshot(State(container): AppState, body: Bytes) -> Response {
    UpdateSnapshotController::new(&container)
        .update(&body)
        .await
        .into_response()
}

async fn delete_snapshot(State(container): AppState, body: Bytes) -> Response {
    DeleteSnapshotController::new(&container)
        .delete(&body)
        .await
        .into_response()
}
