use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/faculty", post(handlers::academic::create_faculty))
        .route("/faculty/:id", get(handlers::academic::get_faculty))
        .route("/course", post(handlers::academic::create_course))
        .route("/course/:id", get(handlers::academic::get_course))
        .route("/courseOffering", post(handlers::academic::create_offering))
        .route("/courseOffering/:id", get(handlers::academic::get_offering))
        .route(
            "/courseOffering/:id/enrollments",
            get(handlers::academic::offering_enrollments),
        )
}
