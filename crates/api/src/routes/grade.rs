use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/grade", post(handlers::grade::submit_grade))
        .route("/grade/enrollment/:id", get(handlers::grade::get_grade))
}
