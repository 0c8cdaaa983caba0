use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/hostel", post(handlers::hostel::create_hostel))
        .route("/hostel/:id", get(handlers::hostel::get_hostel))
        .route("/hostel/:id/status", put(handlers::hostel::update_hostel_status))
        .route("/room", post(handlers::hostel::create_room))
        .route("/room/:id", get(handlers::hostel::get_room))
        .route("/room/:id/assets", put(handlers::hostel::update_room_assets))
        .route("/warden", post(handlers::hostel::assign_warden))
        .route(
            "/warden/hostel/:hostel_id",
            get(handlers::hostel::get_hostel_warden),
        )
}
