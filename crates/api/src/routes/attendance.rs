use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/attendance", post(handlers::attendance::mark_attendance))
        .route(
            "/attendance/enrollment/:id",
            get(handlers::attendance::attendance_summary),
        )
        .route("/attendance/shortage", post(handlers::attendance::flag_shortage))
}
