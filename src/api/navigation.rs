use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde::Serialize;
use utoipa::ToSchema;

use super::Desk;
use crate::{
    filter::DirectoryView,
    models::Student,
    state::{AppState, Page, StudentForm},
};

/// Page, form and drawer selection plus the directory view.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    pub page: Page,
    /// Header title of the current page
    pub title: String,
    pub editing: Option<StudentForm>,
    /// Student open in the detail drawer
    pub viewing: Option<Student>,
    pub directory: DirectoryView,
}

impl From<&AppState> for Navigation {
    fn from(state: &AppState) -> Self {
        Self {
            page: state.page,
            title: state.page.title().to_string(),
            editing: state.editing.clone(),
            viewing: state.viewing.clone(),
            directory: state.directory.clone(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/navigation",
    responses((status = 200, description = "Current selection state", body = Navigation))
)]
pub async fn get_navigation(State(desk): State<Desk>) -> Json<Navigation> {
    Json(desk.lock().state().into())
}

#[utoipa::path(
    put,
    path = "/api/navigation/page",
    request_body = Page,
    responses((status = 200, description = "Switched page", body = Navigation))
)]
pub async fn navigate(State(desk): State<Desk>, Json(page): Json<Page>) -> Json<Navigation> {
    let mut controller = desk.lock();
    controller.state_mut().navigate(page);
    Json(controller.state().into())
}

#[utoipa::path(
    post,
    path = "/api/navigation/form",
    responses((status = 200, description = "Empty student form opened", body = Navigation))
)]
pub async fn open_new_student_form(State(desk): State<Desk>) -> Json<Navigation> {
    let mut controller = desk.lock();
    controller.state_mut().open_new_student_form();
    Json(controller.state().into())
}

#[utoipa::path(
    post,
    path = "/api/navigation/form/{id}",
    params(("id" = String, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student form opened on the student, drawer closed", body = Navigation),
        (status = 404, description = "Unknown student")
    )
)]
pub async fn edit_student(State(desk): State<Desk>, Path(id): Path<String>) -> impl IntoResponse {
    let mut controller = desk.lock();
    let Some(student) = controller.state().student(&id).cloned() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    controller.state_mut().edit_student(student);
    Json(Navigation::from(controller.state())).into_response()
}

#[utoipa::path(
    delete,
    path = "/api/navigation/form",
    responses((status = 200, description = "Student form closed", body = Navigation))
)]
pub async fn cancel_edit(State(desk): State<Desk>) -> Json<Navigation> {
    let mut controller = desk.lock();
    controller.state_mut().cancel_edit();
    Json(controller.state().into())
}

#[utoipa::path(
    put,
    path = "/api/navigation/drawer/{id}",
    params(("id" = String, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student opened in the drawer", body = Navigation),
        (status = 404, description = "Unknown student")
    )
)]
pub async fn view_student(State(desk): State<Desk>, Path(id): Path<String>) -> impl IntoResponse {
    let mut controller = desk.lock();
    let Some(student) = controller.state().student(&id).cloned() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    controller.state_mut().view_student(student);
    Json(Navigation::from(controller.state())).into_response()
}

#[utoipa::path(
    delete,
    path = "/api/navigation/drawer",
    responses((status = 200, description = "Drawer closed", body = Navigation))
)]
pub async fn close_student(State(desk): State<Desk>) -> Json<Navigation> {
    let mut controller = desk.lock();
    controller.state_mut().close_student();
    Json(controller.state().into())
}

pub fn get_navigation_scope() -> Router<Desk> {
    Router::new()
        .route("/navigation", get(get_navigation))
        .route("/navigation/page", put(navigate))
        .route("/navigation/form", post(open_new_student_form).delete(cancel_edit))
        .route("/navigation/form/{id}", post(edit_student))
        .route("/navigation/drawer", delete(close_student))
        .route("/navigation/drawer/{id}", put(view_student))
}

#[cfg(test)]
mod tests {
    use axum::http::Method;
    use serde_json::{Value, json};

    use super::*;
    use crate::api::tests::{call, json, test_desk};

    #[tokio::test]
    async fn test_page_and_form_flow() {
        let desk = test_desk().await;
        let (status, body) = call(&desk, Method::GET, "/api/navigation", None).await;
        assert_eq!(status, StatusCode::OK);
        let nav: Value = json(&body);
        assert_eq!(nav["page"], "students");
        assert_eq!(nav["title"], "Student Directory");
        assert!(nav["editing"].is_null());

        let (_, body) = call(&desk, Method::PUT, "/api/navigation/page", Some(json!("work-pool"))).await;
        assert_eq!(json::<Value>(&body)["title"], "Work Pool");

        let (_, body) = call(&desk, Method::POST, "/api/navigation/form", None).await;
        assert_eq!(json::<Value>(&body)["editing"]["mode"], "new");

        // saving closes the form and opens the drawer
        let student = json!({"id": "s1", "name": "Asha Rao", "board": "CBSE", "grade": 10, "batch": "Morning"});
        call(&desk, Method::PUT, "/api/students", Some(student)).await;
        let (_, body) = call(&desk, Method::GET, "/api/navigation", None).await;
        let nav: Value = json(&body);
        assert!(nav["editing"].is_null());
        assert_eq!(nav["viewing"]["id"], "s1");

        let (_, body) = call(&desk, Method::POST, "/api/navigation/form/s1", None).await;
        let nav: Value = json(&body);
        assert_eq!(nav["editing"]["mode"], "edit");
        assert_eq!(nav["editing"]["student"]["name"], "Asha Rao");
        assert!(nav["viewing"].is_null());

        let (_, body) = call(&desk, Method::DELETE, "/api/navigation/form", None).await;
        assert!(json::<Value>(&body)["editing"].is_null());
    }

    #[tokio::test]
    async fn test_drawer_open_and_close() {
        let desk = test_desk().await;
        let (status, _) = call(&desk, Method::PUT, "/api/navigation/drawer/ghost", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = call(&desk, Method::POST, "/api/navigation/form/ghost", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let student = json!({"id": "s1", "name": "Asha Rao", "board": "CBSE", "grade": 10, "batch": "Morning"});
        call(&desk, Method::PUT, "/api/students", Some(student)).await;
        call(&desk, Method::DELETE, "/api/navigation/drawer", None).await;

        let (status, body) = call(&desk, Method::PUT, "/api/navigation/drawer/s1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json::<Value>(&body)["viewing"]["id"], "s1");

        let (_, body) = call(&desk, Method::DELETE, "/api/navigation/drawer", None).await;
        assert!(json::<Value>(&body)["viewing"].is_null());
    }
}
