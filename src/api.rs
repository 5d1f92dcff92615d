pub mod doubts;
pub mod navigation;
pub mod students;
pub mod subjects;
pub mod syllabus;
pub mod work_pool;

use std::{future::Future, sync::Arc};

use axum::{Json, Router, extract::State, routing::get};
use parking_lot::Mutex;
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use crate::{controller::Controller, store::SqliteStore};

/// The controller shared by every handler. Handlers never hold the lock across an await.
pub type Desk = Arc<Mutex<Controller<SqliteStore>>>;

#[derive(OpenApi)]
#[openapi(
    info(title = "tutor-desk", description = "Students, syllabus progress, work pool and doubts"),
    paths(
        sync_status,
        students::list_students,
        students::directory,
        students::set_directory,
        students::set_directory_filter,
        students::clear_directory_filters,
        students::toggle_archived_view,
        students::save_student,
        students::archive_student,
        students::delete_student,
        subjects::list_subjects,
        subjects::save_subjects,
        syllabus::list_chapter_progress,
        syllabus::save_chapter_progress,
        work_pool::list_work_items,
        work_pool::save_work_item,
        work_pool::delete_work_item,
        doubts::list_doubts,
        doubts::save_doubt,
        doubts::delete_doubt,
        navigation::get_navigation,
        navigation::navigate,
        navigation::open_new_student_form,
        navigation::edit_student,
        navigation::cancel_edit,
        navigation::view_student,
        navigation::close_student,
    )
)]
pub struct ApiDoc;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatus {
    /// Store writes that failed since start. Local state kept the change.
    pub failed_writes: usize,
}

#[utoipa::path(
    get,
    path = "/api/sync-status",
    responses((status = 200, description = "Persistence health", body = SyncStatus))
)]
pub async fn sync_status(State(desk): State<Desk>) -> Json<SyncStatus> {
    let failed_writes = desk.lock().writer().failures();
    Json(SyncStatus { failed_writes })
}

pub fn router(desk: Desk) -> Router {
    let api = Router::new()
        .route("/sync-status", get(sync_status))
        .merge(students::get_students_scope())
        .merge(subjects::get_subjects_scope())
        .merge(syllabus::get_syllabus_scope())
        .merge(work_pool::get_work_pool_scope())
        .merge(doubts::get_doubts_scope())
        .merge(navigation::get_navigation_scope());
    Router::new()
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(desk)
}

/// Serve until `shutdown` resolves, then wait for the store writes still in
/// flight. The wait happens whether or not serving failed.
pub async fn serve(
    listener: TcpListener,
    desk: Desk,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let served = axum::serve(listener, router(desk.clone()))
        .with_graceful_shutdown(shutdown)
        .await;
    let pending = desk.lock().flush();
    pending.await;
    info!(
        "Stopped, {} writes failed during this run",
        desk.lock().writer().failures()
    );
    Ok(served?)
}

#[cfg(test)]
pub(crate) mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode},
    };
    use serde::de::DeserializeOwned;
    use tower::ServiceExt;

    use super::*;
    use crate::{
        models::Student,
        store::{Collection, DocumentStore},
    };

    pub(crate) async fn test_desk() -> Desk {
        let store = Arc::new(SqliteStore::memory().await.unwrap());
        Arc::new(Mutex::new(Controller::load(store).await))
    }

    pub(crate) async fn call(
        desk: &Desk,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, Vec<u8>) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                request = request.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&value).unwrap())
            }
            None => Body::empty(),
        };
        let response = router(desk.clone())
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    pub(crate) fn json<T: DeserializeOwned>(bytes: &[u8]) -> T {
        serde_json::from_slice(bytes).unwrap()
    }

    #[tokio::test]
    async fn test_sync_status_and_openapi() {
        let desk = test_desk().await;
        let (status, body) = call(&desk, Method::GET, "/api/sync-status", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json::<serde_json::Value>(&body)["failedWrites"], 0);

        let (status, body) = call(&desk, Method::GET, "/api-docs/openapi.json", None).await;
        assert_eq!(status, StatusCode::OK);
        let doc: serde_json::Value = json(&body);
        assert!(doc["paths"]["/api/doubts/{id}"].is_object());
    }

    #[tokio::test]
    async fn test_serve_waits_for_pending_writes() {
        let store = Arc::new(SqliteStore::memory().await.unwrap());
        let desk: Desk = Arc::new(Mutex::new(Controller::load(store.clone()).await));
        desk.lock()
            .save_student(Student::new("s1", "Asha Rao", "CBSE", 10, "Morning"));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        serve(listener, desk.clone(), async {}).await.unwrap();

        assert_eq!(store.get_all(Collection::Students).await.unwrap().len(), 1);
        assert_eq!(desk.lock().writer().failures(), 0);
    }
}
