use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/enrollment", post(handlers::enrollment::bulk_enroll))
        .route("/enrollment/assign", put(handlers::enrollment::assign_faculty))
        .route("/enrollment/status", put(handlers::enrollment::change_status))
        .route("/enrollment/:id", get(handlers::enrollment::get_enrollment))
        .route("/enrollment/:id/drop", put(handlers::enrollment::drop_enrollment))
}
