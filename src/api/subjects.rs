use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};

use super::Desk;
use crate::models::{StudentSubjects, SubjectData};

#[utoipa::path(
    get,
    path = "/api/subjects",
    responses((status = 200, description = "Subjects of every student", body = Vec<StudentSubjects>))
)]
pub async fn list_subjects(State(desk): State<Desk>) -> Json<Vec<StudentSubjects>> {
    Json(desk.lock().state().subjects.values().cloned().collect())
}

#[utoipa::path(
    put,
    path = "/api/subjects/{student_id}",
    params(("student_id" = String, Path, description = "Student id")),
    request_body = Vec<SubjectData>,
    responses((status = 200, description = "Subjects replaced", body = StudentSubjects))
)]
pub async fn save_subjects(
    State(desk): State<Desk>,
    Path(student_id): Path<String>,
    Json(subjects): Json<Vec<SubjectData>>,
) -> Json<StudentSubjects> {
    desk.lock().save_subjects(&student_id, subjects.clone());
    Json(StudentSubjects {
        student_id,
        subjects,
    })
}

pub fn get_subjects_scope() -> Router<Desk> {
    Router::new()
        .route("/subjects", get(list_subjects))
        .route("/subjects/{student_id}", put(save_subjects))
}
