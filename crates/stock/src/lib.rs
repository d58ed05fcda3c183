//! Stock domain module: per-shop stock rows, the stock classifier and the
//! immutable analysis snapshot.
//!
//! Business rules here are purely deterministic domain logic (no IO, no HTTP,
//! no storage).

pub mod entry;
pub mod snapshot;
pub mod status;

pub use entry::StockEntry;
pub use snapshot::{ClassifiedStock, StockSnapshot};
pub use status::{classify, StockLevel, StockStatus};
