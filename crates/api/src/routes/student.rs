use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/student", post(handlers::student::create_student))
        .route("/student/:id", get(handlers::student::get_student))
        .route("/student/:id/promote", post(handlers::student::promote_student))
        .route(
            "/student/:id/gradesheets",
            get(handlers::student::get_grade_sheets),
        )
}
