use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/roomallotment", post(handlers::allotment::allot_room))
        .route("/roomallotment/auto", post(handlers::allotment::auto_allocate))
        .route("/roomallotment/:id", get(handlers::allotment::get_allotment))
        .route(
            "/roomallotment/:id/vacate",
            put(handlers::allotment::vacate_allotment),
        )
}
