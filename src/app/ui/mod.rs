use axum::Router;

use super::AppState;

mod asset;
mod home;
pub mod not_found;

pub fn router() -> Router<AppState> {
    home::router().merge(asset::router())
}
