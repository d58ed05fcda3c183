use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use restock_core::ProposalId;
use restock_infra::ProposalStore;
use restock_transfers::{TransferCommand, TransferStatus};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn list(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ProposalListQuery>,
) -> axum::response::Response {
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

    let mut proposals = services.proposals.list();
    if let Some(status) = status {
        proposals.retain(|p| p.status == status);
    }

    (StatusCode::OK, Json(proposals)).into_response()
}

pub async fn approve(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    transition(&services, &id, TransferCommand::Approve)
}

pub async fn reject(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    transition(&services, &id, TransferCommand::Reject)
}

pub async fn mark_in_transit(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    transition(&services, &id, TransferCommand::MarkInTransit)
}

pub async fn mark_received(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    transition(&services, &id, TransferCommand::MarkReceived)
}

fn transition(
    services: &AppServices,
    raw_id: &str,
    command: TransferCommand,
) -> axum::response::Response {
    let id: ProposalId = match raw_id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid proposal id")
        }
    };

    match services.proposals.transition(id, command, Utc::now()) {
        Ok(proposal) => {
            tracing::info!(
                proposal_id = %id,
                command = %command,
                status = %proposal.status,
                "proposal transitioned"
            );
            (StatusCode::OK, Json(proposal)).into_response()
        }
        Err(e) => errors::proposal_error_to_response(e),
    }
}
