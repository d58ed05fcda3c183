use axum::{
    routing::{get, post, put},
    Router,
};

pub mod analysis;
pub mod proposals;
pub mod reports;
pub mod snapshot;
pub mod system;

pub fn router() -> Router {
    Router::new()
        .route("/snapshot", put(snapshot::load_snapshot))
        .route("/analysis/run", post(analysis::run))
        .route("/proposals", get(proposals::list))
        .route("/proposals/:id/approve", post(proposals::approve))
        .route("/proposals/:id/reject", post(proposals::reject))
        .route(
            "/proposals/:id/mark-in-transit",
            post(proposals::mark_in_transit),
        )
        .route(
            "/proposals/:id/mark-received",
            post(proposals::mark_received),
        )
        .route("/reports/transfers", get(reports::transfer_history))
        .route("/reports/shop-performance", get(reports::shop_performance))
        .route("/reports/balancing-trend", get(reports::balancing_trend))
}
