use axum::{
    Router,
    routing::{get, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/academiccalendar", put(handlers::calendar::upsert_calendar))
        .route(
            "/academiccalendar/:year/:semester",
            get(handlers::calendar::get_calendar),
        )
}
