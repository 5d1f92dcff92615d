use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};

use super::Desk;
use crate::models::WorkItem;

#[utoipa::path(
    get,
    path = "/api/work-items",
    responses((status = 200, description = "The whole work pool", body = Vec<WorkItem>))
)]
pub async fn list_work_items(State(desk): State<Desk>) -> Json<Vec<WorkItem>> {
    Json(desk.lock().state().work_items.clone())
}

#[utoipa::path(
    put,
    path = "/api/work-items",
    request_body = WorkItem,
    responses((status = 200, description = "Work item saved", body = WorkItem))
)]
pub async fn save_work_item(State(desk): State<Desk>, Json(item): Json<WorkItem>) -> Json<WorkItem> {
    desk.lock().save_work_item(item.clone());
    Json(item)
}

#[utoipa::path(
    delete,
    path = "/api/work-items/{id}",
    params(("id" = String, Path, description = "Work item id")),
    responses(
        (status = 204, description = "Work item deleted"),
        (status = 404, description = "Unknown work item")
    )
)]
pub async fn delete_work_item(State(desk): State<Desk>, Path(id): Path<String>) -> StatusCode {
    if desk.lock().delete_work_item(&id) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

pub fn get_work_pool_scope() -> Router<Desk> {
    Router::new()
        .route("/work-items", get(list_work_items).put(save_work_item))
        .route("/work-items/{id}", delete(delete_work_item))
}
