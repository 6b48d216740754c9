use axum::{
    routing::{get, post},
    Router,
};

use crate::app::AppState;

pub mod route;
pub mod schema;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(route::home_page))
        .route("/waitlist", post(route::join_waitlist))
}
