use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/willingness", post(handlers::willingness::submit_willingness))
        .route("/willingness/:id", get(handlers::willingness::get_willingness))
        .route(
            "/willingness/:id/review",
            put(handlers::willingness::review_willingness),
        )
}
