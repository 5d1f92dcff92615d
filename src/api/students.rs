use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};

use serde::Deserialize;
use utoipa::ToSchema;

use super::Desk;
use crate::{
    controller::Controller,
    filter::{DirectoryView, FilterField},
    models::Student,
    store::SqliteStore,
};

fn visible(controller: &Controller<SqliteStore>) -> Vec<Student> {
    controller
        .state()
        .visible_students()
        .into_iter()
        .cloned()
        .collect()
}

#[utoipa::path(
    get,
    path = "/api/students",
    responses((status = 200, description = "All students, archived included", body = Vec<Student>))
)]
pub async fn list_students(State(desk): State<Desk>) -> Json<Vec<Student>> {
    Json(desk.lock().state().students.clone())
}

#[utoipa::path(
    get,
    path = "/api/students/directory",
    responses((status = 200, description = "Students matching the current directory view", body = Vec<Student>))
)]
pub async fn directory(State(desk): State<Desk>) -> Json<Vec<Student>> {
    Json(visible(&desk.lock()))
}

#[utoipa::path(
    put,
    path = "/api/students/directory",
    request_body = DirectoryView,
    responses((status = 200, description = "Students matching the new view", body = Vec<Student>))
)]
pub async fn set_directory(
    State(desk): State<Desk>,
    Json(view): Json<DirectoryView>,
) -> Json<Vec<Student>> {
    let mut controller = desk.lock();
    controller.state_mut().directory = view;
    Json(visible(&controller))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FilterEdit {
    pub field: FilterField,
    /// Empty clears this filter
    #[serde(default)]
    pub value: String,
}

#[utoipa::path(
    put,
    path = "/api/students/directory/filter",
    request_body = FilterEdit,
    responses((status = 200, description = "Students matching the edited view", body = Vec<Student>))
)]
pub async fn set_directory_filter(
    State(desk): State<Desk>,
    Json(edit): Json<FilterEdit>,
) -> Json<Vec<Student>> {
    let mut controller = desk.lock();
    controller.state_mut().directory.set_filter(edit.field, edit.value);
    Json(visible(&controller))
}

#[utoipa::path(
    post,
    path = "/api/students/directory/clear",
    responses((status = 200, description = "Filters and search cleared, archived toggle kept", body = Vec<Student>))
)]
pub async fn clear_directory_filters(State(desk): State<Desk>) -> Json<Vec<Student>> {
    let mut controller = desk.lock();
    controller.state_mut().directory.clear_filters();
    Json(visible(&controller))
}

#[utoipa::path(
    post,
    path = "/api/students/directory/toggle-archived",
    responses((status = 200, description = "Switched between active and archived students", body = Vec<Student>))
)]
pub async fn toggle_archived_view(State(desk): State<Desk>) -> Json<Vec<Student>> {
    let mut controller = desk.lock();
    controller.state_mut().directory.toggle_archived();
    Json(visible(&controller))
}

#[utoipa::path(
    put,
    path = "/api/students",
    request_body = Student,
    responses((status = 200, description = "Student saved", body = Student))
)]
pub async fn save_student(State(desk): State<Desk>, Json(student): Json<Student>) -> Json<Student> {
    desk.lock().save_student(student.clone());
    Json(student)
}

#[utoipa::path(
    post,
    path = "/api/students/{id}/archive",
    params(("id" = String, Path, description = "Student id")),
    responses(
        (status = 200, description = "Archive flag toggled", body = Student),
        (status = 404, description = "Unknown student")
    )
)]
pub async fn archive_student(State(desk): State<Desk>, Path(id): Path<String>) -> impl IntoResponse {
    let mut controller = desk.lock();
    if !controller.archive_student(&id) {
        return StatusCode::NOT_FOUND.into_response();
    }
    match controller.state().student(&id) {
        Some(student) => Json(student.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = String, Path, description = "Student id")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 404, description = "Unknown student")
    )
)]
pub async fn delete_student(State(desk): State<Desk>, Path(id): Path<String>) -> StatusCode {
    if desk.lock().delete_student(&id) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

pub fn get_students_scope() -> Router<Desk> {
    Router::new()
        .route("/students", get(list_students).put(save_student))
        .route("/students/directory", get(directory).put(set_directory))
        .route("/students/directory/filter", put(set_directory_filter))
        .route("/students/directory/clear", post(clear_directory_filters))
        .route("/students/directory/toggle-archived", post(toggle_archived_view))
        .route("/students/{id}/archive", post(archive_student))
        .route("/students/{id}", delete(delete_student))
}

#[cfg(test)]
mod tests {
    use axum::http::Method;
    use serde_json::json;

    use super::*;
    use crate::api::tests::{call, json, test_desk};

    fn student(id: &str, board: &str) -> serde_json::Value {
        json!({"id": id, "name": format!("Student {id}"), "board": board, "grade": 10, "batch": "Morning"})
    }

    #[tokio::test]
    async fn test_directory_filters() {
        let desk = test_desk().await;
        for (id, board) in [("1", "CBSE"), ("2", "ICSE"), ("3", "CBSE")] {
            let (status, _) = call(&desk, Method::PUT, "/api/students", Some(student(id, board))).await;
            assert_eq!(status, StatusCode::OK);
        }
        let (status, _) = call(&desk, Method::POST, "/api/students/3/archive", None).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = call(
            &desk,
            Method::PUT,
            "/api/students/directory",
            Some(json!({"board": "CBSE"})),
        )
        .await;
        let found: Vec<Student> = json(&body);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "1");

        let (_, body) = call(&desk, Method::GET, "/api/students/directory", None).await;
        assert_eq!(json::<Vec<Student>>(&body).len(), 1);

        let (_, body) = call(&desk, Method::GET, "/api/students", None).await;
        assert_eq!(json::<Vec<Student>>(&body).len(), 3);
    }

    #[tokio::test]
    async fn test_directory_filter_edits() {
        let desk = test_desk().await;
        for (id, board) in [("1", "CBSE"), ("2", "ICSE"), ("3", "CBSE")] {
            call(&desk, Method::PUT, "/api/students", Some(student(id, board))).await;
        }
        call(&desk, Method::POST, "/api/students/3/archive", None).await;

        let (status, body) = call(
            &desk,
            Method::PUT,
            "/api/students/directory/filter",
            Some(json!({"field": "board", "value": "CBSE"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<String> = json::<Vec<Student>>(&body).into_iter().map(|s| s.id).collect();
        assert_eq!(ids, ["1"]);

        let (_, body) = call(&desk, Method::POST, "/api/students/directory/toggle-archived", None).await;
        let ids: Vec<String> = json::<Vec<Student>>(&body).into_iter().map(|s| s.id).collect();
        assert_eq!(ids, ["3"]);

        // archived view survives clearing
        let (_, body) = call(&desk, Method::POST, "/api/students/directory/clear", None).await;
        assert_eq!(json::<Vec<Student>>(&body).len(), 1);
        call(&desk, Method::POST, "/api/students/directory/toggle-archived", None).await;
        let (_, body) = call(&desk, Method::GET, "/api/students/directory", None).await;
        assert_eq!(json::<Vec<Student>>(&body).len(), 2);
    }

    #[tokio::test]
    async fn test_archive_and_delete_unknown() {
        let desk = test_desk().await;
        let (status, _) = call(&desk, Method::POST, "/api/students/nobody/archive", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        call(&desk, Method::PUT, "/api/students", Some(student("1", "CBSE"))).await;
        let (status, body) = call(&desk, Method::POST, "/api/students/1/archive", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json::<Student>(&body).is_archived);

        let (status, _) = call(&desk, Method::DELETE, "/api/students/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = call(&desk, Method::DELETE, "/api/students/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
