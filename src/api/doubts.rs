use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};

use super::Desk;
use crate::models::Doubt;

#[utoipa::path(
    get,
    path = "/api/doubts",
    responses((status = 200, description = "All doubts", body = Vec<Doubt>))
)]
pub async fn list_doubts(State(desk): State<Desk>) -> Json<Vec<Doubt>> {
    Json(desk.lock().state().doubts.clone())
}

#[utoipa::path(
    put,
    path = "/api/doubts",
    request_body = Doubt,
    responses((status = 200, description = "Doubt saved", body = Doubt))
)]
pub async fn save_doubt(State(desk): State<Desk>, Json(doubt): Json<Doubt>) -> Json<Doubt> {
    desk.lock().save_doubt(doubt.clone());
    Json(doubt)
}

#[utoipa::path(
    delete,
    path = "/api/doubts/{id}",
    params(("id" = String, Path, description = "Doubt id")),
    responses(
        (status = 204, description = "Doubt and its linked task deleted"),
        (status = 404, description = "Unknown doubt")
    )
)]
pub async fn delete_doubt(State(desk): State<Desk>, Path(id): Path<String>) -> StatusCode {
    if desk.lock().delete_doubt(&id) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

pub fn get_doubts_scope() -> Router<Desk> {
    Router::new()
        .route("/doubts", get(list_doubts).put(save_doubt))
        .route("/doubts/{id}", delete(delete_doubt))
}
