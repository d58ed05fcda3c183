//! Transfer-proposal domain module.
//!
//! A proposal suggests moving excess inventory from an overstocked shop to an
//! understocked shop for the same article. Its status is governed by a small
//! state machine: decisions (`handle`) are pure and separate from state
//! mutation (`apply`), so invalid transitions surface as typed errors instead
//! of silent no-ops.

pub mod proposal;

pub use proposal::{TransferCommand, TransferError, TransferProposal, TransferStatus};
