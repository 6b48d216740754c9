use axum::Router;

use super::AppState;

mod health;
mod waitlist;

pub fn router() -> Router<AppState> {
    health::router().merge(waitlist::router())
}
