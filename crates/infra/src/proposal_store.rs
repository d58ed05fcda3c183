use chrono::{DateTime, Utc};
use restock_core::ProposalId;
use restock_transfers::{TransferCommand, TransferError, TransferProposal};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProposalStoreError {
    #[error("proposal not found: {id}")]
    NotFound { id: ProposalId },

    #[error(transparent)]
    Transition(#[from] TransferError),
}

/// Persistence for transfer proposals.
///
/// `transition` is the only mutation after insert: it decides and applies a
/// lifecycle command atomically, so two racing commands on the same proposal
/// are serialized and the loser sees the state the winner left behind.
pub trait ProposalStore: Send + Sync {
    fn insert(&self, proposal: TransferProposal);

    fn get(&self, id: ProposalId) -> Option<TransferProposal>;

    /// All proposals, ordered by (proposed_at, id) so listings are stable.
    fn list(&self) -> Vec<TransferProposal>;

    fn transition(
        &self,
        id: ProposalId,
        command: TransferCommand,
        at: DateTime<Utc>,
    ) -> Result<TransferProposal, ProposalStoreError>;
}

impl<S: ProposalStore + ?Sized> ProposalStore for Arc<S> {
    fn insert(&self, proposal: TransferProposal) {
        (**self).insert(proposal)
    }

    fn get(&self, id: ProposalId) -> Option<TransferProposal> {
        (**self).get(id)
    }

    fn list(&self) -> Vec<TransferProposal> {
        (**self).list()
    }

    fn transition(
        &self,
        id: ProposalId,
        command: TransferCommand,
        at: DateTime<Utc>,
    ) -> Result<TransferProposal, ProposalStoreError> {
        (**self).transition(id, command, at)
    }
}

#[derive(Default)]
pub struct InMemoryProposalStore {
    inner: RwLock<HashMap<ProposalId, TransferProposal>>,
}

impl InMemoryProposalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProposalStore for InMemoryProposalStore {
    fn insert(&self, proposal: TransferProposal) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        guard.insert(proposal.id, proposal);
    }

    fn get(&self, id: ProposalId) -> Option<TransferProposal> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        guard.get(&id).cloned()
    }

    fn list(&self) -> Vec<TransferProposal> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let mut proposals: Vec<_> = guard.values().cloned().collect();
        proposals.sort_by(|a, b| {
            a.proposed_at
                .cmp(&b.proposed_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        proposals
    }

    fn transition(
        &self,
        id: ProposalId,
        command: TransferCommand,
        at: DateTime<Utc>,
    ) -> Result<TransferProposal, ProposalStoreError> {
        // Decide and apply under the write lock: the check against the
        // current status and the status change are one atomic step.
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let proposal = guard
            .get_mut(&id)
            .ok_or(ProposalStoreError::NotFound { id })?;
        let next = proposal.handle(command)?;
        proposal.apply(next, at);
        Ok(proposal.clone())
    }
}
