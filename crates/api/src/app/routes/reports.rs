use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use restock_infra::{ProposalStore, SnapshotStore};
use restock_reports::{
    balancing_trend as trend_points, filter_history, shop_performance as shop_rates,
    HistoryFilter, PeriodFilter, TransferRecord,
};
use restock_transfers::TransferStatus;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn transfer_history(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::TransferHistoryQuery>,
) -> axum::response::Response {
    let period = match query.period.as_deref() {
        None => PeriodFilter::default(),
        Some(raw) => match raw.parse::<PeriodFilter>() {
            Ok(p) => p,
            Err(e) => {
                return errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "invalid_period",
                    e.to_string(),
                )
            }
        },
    };
    let status = match query.status.as_deref() {
        None => None,
        Some(raw) => match raw.parse::<TransferStatus>() {
            Ok(s) => Some(s),
            Err(e) => {
                return errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "invalid_status",
                    e.to_string(),
                )
            }
        },
    };
    let filter = HistoryFilter {
        period,
        status,
        category: query.category,
    };

    let records: Vec<TransferRecord> = services
        .proposals
        .list()
        .iter()
        .map(TransferRecord::from)
        .collect();

    (
        StatusCode::OK,
        Json(filter_history(&records, &filter, Utc::now())),
    )
        .into_response()
}

/// Per-shop rupture/overstock/normal rates for the current snapshot.
pub async fn shop_performance(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let snapshot = match services.snapshots.fetch_snapshot().await {
        Ok(s) => s,
        Err(e) => {
            return errors::json_error(StatusCode::BAD_GATEWAY, "snapshot_unavailable", e.to_string())
        }
    };
    let classified = snapshot.classify();

    (StatusCode::OK, Json(shop_rates(&classified.statuses))).into_response()
}

pub async fn balancing_trend(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let history = services
        .run_history
        .read()
        .unwrap_or_else(|e| e.into_inner());

    (StatusCode::OK, Json(trend_points(&history))).into_response()
}
