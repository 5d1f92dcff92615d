use axum::{Json, Router, extract::State, http::StatusCode, routing::get};

use super::Desk;
use crate::models::ChapterProgress;

#[utoipa::path(
    get,
    path = "/api/chapter-progress",
    responses((status = 200, description = "All recorded chapter progress", body = Vec<ChapterProgress>))
)]
pub async fn list_chapter_progress(State(desk): State<Desk>) -> Json<Vec<ChapterProgress>> {
    Json(desk.lock().state().chapter_progress.clone())
}

#[utoipa::path(
    put,
    path = "/api/chapter-progress",
    request_body = ChapterProgress,
    responses((status = 204, description = "Progress saved, or removed when it has no entries"))
)]
pub async fn save_chapter_progress(
    State(desk): State<Desk>,
    Json(progress): Json<ChapterProgress>,
) -> StatusCode {
    desk.lock().save_chapter_progress(progress);
    StatusCode::NO_CONTENT
}

pub fn get_syllabus_scope() -> Router<Desk> {
    Router::new().route(
        "/chapter-progress",
        get(list_chapter_progress).put(save_chapter_progress),
    )
}
