//! Catalog domain module: shops and articles.
//!
//! Shops and articles are owned by the external store; this crate models them
//! as read-only snapshot records consumed by the analysis core.

pub mod article;
pub mod shop;

pub use article::{Article, UNCATEGORIZED};
pub use shop::Shop;
