use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use restock_infra::{AnalysisError, ProposalStoreError, SnapshotStoreError};

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn proposal_error_to_response(err: ProposalStoreError) -> axum::response::Response {
    match err {
        ProposalStoreError::NotFound { .. } => {
            json_error(StatusCode::NOT_FOUND, "not_found", err.to_string())
        }
        ProposalStoreError::Transition(e) => {
            json_error(StatusCode::CONFLICT, "invalid_transition", e.to_string())
        }
    }
}

pub fn analysis_error_to_response(err: AnalysisError) -> axum::response::Response {
    match err {
        AnalysisError::Fetch(SnapshotStoreError::Unavailable(msg)) => {
            json_error(StatusCode::BAD_GATEWAY, "snapshot_unavailable", msg)
        }
        AnalysisError::Fetch(SnapshotStoreError::Query(msg)) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "snapshot_query_failed",
            msg,
        ),
    }
}
