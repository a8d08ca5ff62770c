pub mod admin;
pub mod assets;
pub mod home;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// The full site: public pages, admin dashboard and embedded assets
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(home::router())
        .merge(admin::router())
        .route("/assets/{*path}", get(assets::serve))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
