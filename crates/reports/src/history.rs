use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

use restock_core::{DomainError, ProposalId};
use restock_transfers::{TransferProposal, TransferStatus};

/// One row of the transfer-history report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub id: ProposalId,
    /// When the transfer last moved through its lifecycle.
    pub date: DateTime<Utc>,
    pub article_label: String,
    pub category: String,
    pub source_shop: String,
    pub destination_shop: String,
    pub quantity: i64,
    pub status: TransferStatus,
}

impl From<&TransferProposal> for TransferRecord {
    fn from(proposal: &TransferProposal) -> Self {
        Self {
            id: proposal.id,
            date: proposal.updated_at,
            article_label: proposal.article_label.clone(),
            category: proposal.category.clone(),
            source_shop: proposal.source_shop_name.clone(),
            destination_shop: proposal.destination_shop_name.clone(),
            quantity: proposal.quantity,
            status: proposal.status,
        }
    }
}

/// Time window predicate for history filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodFilter {
    #[default]
    All,
    LastMonth,
    LastThreeMonths,
}

impl PeriodFilter {
    /// Oldest date admitted by this period, relative to `now`.
    fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let months = match self {
            PeriodFilter::All => return None,
            PeriodFilter::LastMonth => 1,
            PeriodFilter::LastThreeMonths => 3,
        };
        // Calendar-month subtraction; saturate at the epoch floor if it
        // somehow underflows.
        Some(
            now.checked_sub_months(Months::new(months))
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
        )
    }
}

impl core::str::FromStr for PeriodFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(PeriodFilter::All),
            "last_month" => Ok(PeriodFilter::LastMonth),
            "last_3_months" => Ok(PeriodFilter::LastThreeMonths),
            other => Err(DomainError::validation(format!(
                "unknown period filter '{other}'"
            ))),
        }
    }
}

/// Combined history filter; predicates AND together, `All`/`None` disables
/// a predicate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryFilter {
    pub period: PeriodFilter,
    pub status: Option<TransferStatus>,
    pub category: Option<String>,
}

/// Apply a [`HistoryFilter`] to transfer records.
pub fn filter_history(
    records: &[TransferRecord],
    filter: &HistoryFilter,
    now: DateTime<Utc>,
) -> Vec<TransferRecord> {
    let cutoff = filter.period.cutoff(now);

    records
        .iter()
        .filter(|record| cutoff.is_none_or(|cutoff| record.date >= cutoff))
        .filter(|record| filter.status.is_none_or(|status| record.status == status))
        .filter(|record| {
            filter
                .category
                .as_deref()
                .is_none_or(|category| record.category == category)
        })
        .cloned()
        .collect()
}
