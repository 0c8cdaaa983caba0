use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/complaint", post(handlers::complaint::raise_complaint))
        .route("/complaint/:id", get(handlers::complaint::get_complaint))
        .route(
            "/complaint/:id/resolve",
            put(handlers::complaint::resolve_complaint),
        )
}
