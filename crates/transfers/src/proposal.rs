use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use restock_core::{ArticleId, Entity, ProposalId, ShopId};

/// Transfer proposal status lifecycle.
///
/// Happy path is linear (`proposed → validated → in_transit → received`);
/// rejection is allowed from `proposed` and `validated`. `received` and
/// `rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferStatus {
    Proposed,
    Validated,
    InTransit,
    Received,
    Rejected,
}

impl TransferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Proposed => "proposed",
            TransferStatus::Validated => "validated",
            TransferStatus::InTransit => "in_transit",
            TransferStatus::Received => "received",
            TransferStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TransferStatus::Received | TransferStatus::Rejected)
    }
}

impl core::fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for TransferStatus {
    type Err = restock_core::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "proposed" => Ok(TransferStatus::Proposed),
            "validated" => Ok(TransferStatus::Validated),
            "in_transit" => Ok(TransferStatus::InTransit),
            "received" => Ok(TransferStatus::Received),
            "rejected" => Ok(TransferStatus::Rejected),
            other => Err(restock_core::DomainError::validation(format!(
                "unknown transfer status '{other}'"
            ))),
        }
    }
}

/// Lifecycle command against a proposal.
///
/// Transitions are explicit user actions, never automatic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferCommand {
    /// `proposed → validated`
    Approve,
    /// `proposed | validated → rejected`
    Reject,
    /// `validated → in_transit`
    MarkInTransit,
    /// `in_transit → received`
    MarkReceived,
}

impl TransferCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferCommand::Approve => "approve",
            TransferCommand::Reject => "reject",
            TransferCommand::MarkInTransit => "mark_in_transit",
            TransferCommand::MarkReceived => "mark_received",
        }
    }
}

impl core::fmt::Display for TransferCommand {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// The command is not permitted from the proposal's current status.
    #[error("proposal {proposal_id}: cannot {requested} from status '{current}'")]
    InvalidTransition {
        proposal_id: ProposalId,
        current: TransferStatus,
        requested: TransferCommand,
    },
}

/// A suggested inter-shop transfer for one article.
///
/// Created by the transfer matcher with status `proposed`; thereafter only
/// the status (and `updated_at`) change; proposals are never deleted.
/// Shop/article display names are carried on the proposal because reports
/// and the UI render them without re-joining the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferProposal {
    pub id: ProposalId,
    pub article_id: ArticleId,
    pub article_label: String,
    pub category: String,
    pub source_shop_id: ShopId,
    pub source_shop_name: String,
    pub destination_shop_id: ShopId,
    pub destination_shop_name: String,
    /// Units to move; always > 0.
    pub quantity: i64,
    /// Human-readable summary of the imbalance that produced the proposal.
    pub reason: String,
    pub status: TransferStatus,
    pub proposed_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TransferProposal {
    /// Decide the status a command would move this proposal to.
    ///
    /// Pure: no mutation, no side effects. Disallowed (status, command)
    /// combinations fail with [`TransferError::InvalidTransition`] naming the
    /// current and requested states.
    pub fn handle(&self, command: TransferCommand) -> Result<TransferStatus, TransferError> {
        let next = match (self.status, command) {
            (TransferStatus::Proposed, TransferCommand::Approve) => TransferStatus::Validated,
            (TransferStatus::Proposed, TransferCommand::Reject) => TransferStatus::Rejected,
            (TransferStatus::Validated, TransferCommand::Reject) => TransferStatus::Rejected,
            (TransferStatus::Validated, TransferCommand::MarkInTransit) => {
                TransferStatus::InTransit
            }
            (TransferStatus::InTransit, TransferCommand::MarkReceived) => TransferStatus::Received,
            (current, requested) => {
                return Err(TransferError::InvalidTransition {
                    proposal_id: self.id,
                    current,
                    requested,
                })
            }
        };
        Ok(next)
    }

    /// Move to a status previously decided by [`TransferProposal::handle`].
    pub fn apply(&mut self, status: TransferStatus, at: DateTime<Utc>) {
        self.status = status;
        self.updated_at = at;
    }
}

impl Entity for TransferProposal {
    type Id = ProposalId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proposal(status: TransferStatus) -> TransferProposal {
        let now = Utc::now();
        TransferProposal {
            id: ProposalId::new(),
            article_id: ArticleId::new(),
            article_label: "Blue cotton t-shirt".to_string(),
            category: "Tops".to_string(),
            source_shop_id: ShopId::new(),
            source_shop_name: "Paris".to_string(),
            destination_shop_id: ShopId::new(),
            destination_shop_name: "Marseille".to_string(),
            quantity: 20,
            reason: "overstock at Paris, shortage at Marseille".to_string(),
            status,
            proposed_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn happy_path_proposed_to_received() {
        let mut p = proposal(TransferStatus::Proposed);

        for (command, expected) in [
            (TransferCommand::Approve, TransferStatus::Validated),
            (TransferCommand::MarkInTransit, TransferStatus::InTransit),
            (TransferCommand::MarkReceived, TransferStatus::Received),
        ] {
            let next = p.handle(command).unwrap();
            assert_eq!(next, expected);
            p.apply(next, Utc::now());
        }

        assert!(p.status.is_terminal());
    }

    #[test]
    fn reject_is_allowed_from_proposed_and_validated() {
        let p = proposal(TransferStatus::Proposed);
        assert_eq!(p.handle(TransferCommand::Reject).unwrap(), TransferStatus::Rejected);

        let p = proposal(TransferStatus::Validated);
        assert_eq!(p.handle(TransferCommand::Reject).unwrap(), TransferStatus::Rejected);
    }

    #[test]
    fn approve_then_reject_still_permitted() {
        let mut p = proposal(TransferStatus::Proposed);
        let next = p.handle(TransferCommand::Approve).unwrap();
        p.apply(next, Utc::now());

        // Reject is allowed from validated.
        assert_eq!(p.handle(TransferCommand::Reject).unwrap(), TransferStatus::Rejected);

        // But a second approve is not.
        let err = p.handle(TransferCommand::Approve).unwrap_err();
        match err {
            TransferError::InvalidTransition {
                current, requested, ..
            } => {
                assert_eq!(current, TransferStatus::Validated);
                assert_eq!(requested, TransferCommand::Approve);
            }
        }
    }

    #[test]
    fn terminal_states_permit_nothing() {
        for terminal in [TransferStatus::Received, TransferStatus::Rejected] {
            let p = proposal(terminal);
            for command in [
                TransferCommand::Approve,
                TransferCommand::Reject,
                TransferCommand::MarkInTransit,
                TransferCommand::MarkReceived,
            ] {
                let err = p.handle(command).unwrap_err();
                match err {
                    TransferError::InvalidTransition { current, .. } => {
                        assert_eq!(current, terminal);
                    }
                }
            }
        }
    }

    #[test]
    fn transition_table_is_exactly_the_documented_one() {
        let allowed = [
            (TransferStatus::Proposed, TransferCommand::Approve),
            (TransferStatus::Proposed, TransferCommand::Reject),
            (TransferStatus::Validated, TransferCommand::Reject),
            (TransferStatus::Validated, TransferCommand::MarkInTransit),
            (TransferStatus::InTransit, TransferCommand::MarkReceived),
        ];

        for status in [
            TransferStatus::Proposed,
            TransferStatus::Validated,
            TransferStatus::InTransit,
            TransferStatus::Received,
            TransferStatus::Rejected,
        ] {
            for command in [
                TransferCommand::Approve,
                TransferCommand::Reject,
                TransferCommand::MarkInTransit,
                TransferCommand::MarkReceived,
            ] {
                let result = proposal(status).handle(command);
                if allowed.contains(&(status, command)) {
                    assert!(result.is_ok(), "expected {status} + {command} to be allowed");
                } else {
                    assert!(result.is_err(), "expected {status} + {command} to fail");
                }
            }
        }
    }

    #[test]
    fn handle_does_not_mutate() {
        let p = proposal(TransferStatus::Proposed);
        let before = p.clone();
        let _ = p.handle(TransferCommand::Approve);
        let _ = p.handle(TransferCommand::MarkReceived);
        assert_eq!(p, before);
    }

    #[test]
    fn apply_advances_updated_at() {
        let mut p = proposal(TransferStatus::Proposed);
        let proposed_at = p.proposed_at;
        let later = proposed_at + chrono::Duration::seconds(5);

        p.apply(TransferStatus::Validated, later);
        assert_eq!(p.status, TransferStatus::Validated);
        assert_eq!(p.updated_at, later);
        assert_eq!(p.proposed_at, proposed_at);
    }
}
