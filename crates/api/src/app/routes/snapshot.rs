use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn load_snapshot(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::SnapshotRequest>,
) -> axum::response::Response {
    let snapshot = match body.into_snapshot() {
        Ok(s) => s,
        Err(e) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string())
        }
    };

    let response = dto::SnapshotLoadedResponse {
        shops: snapshot.shops.len(),
        articles: snapshot.articles.len(),
        entries: snapshot.entries.len(),
    };
    services.snapshots.load(snapshot);

    tracing::info!(
        shops = response.shops,
        articles = response.articles,
        entries = response.entries,
        "snapshot loaded"
    );

    (StatusCode::OK, Json(response)).into_response()
}
