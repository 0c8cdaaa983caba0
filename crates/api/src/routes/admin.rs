use axum::{Router, routing::post};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/admin/reconcile-occupancy",
        post(handlers::admin::reconcile_occupancy),
    )
}
