use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/reports/members", get(handlers::member_page))
        .route("/reports/members/export", get(handlers::member_export))
        .route("/api/reports/members", get(handlers::member_json))
        .route("/reports/courses", get(handlers::course_page))
        .route("/reports/courses/export", get(handlers::course_export))
        .route("/api/reports/courses", get(handlers::course_json))
        .route("/reports/subjects", get(handlers::subject_page))
        .route("/reports/subjects/export", get(handlers::subject_export))
        .route("/api/reports/subjects", get(handlers::subject_json))
        .with_state(state)
}
