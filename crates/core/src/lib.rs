//! Core data model for Showcase
//!
//! This crate provides:
//! - Fetch state published by the query runtime (`FetchState`, `FetchError`)
//! - Request generations for latest-wins result application
//! - Locators, catalog queries and pagination math
//! - Catalog and sales-lead record types (with embedded lead fixtures)

pub mod catalog;
pub mod error;
pub mod generation;
pub mod lead;
pub mod locator;
pub mod pagination;
pub mod state;

// Re-exports
pub use catalog::{CatalogQuery, Product, ProductPage};
pub use error::FetchError;
pub use generation::{Generation, RequestSequence};
pub use lead::{ChatMessage, Lead, LeadBook, LeadChatHistory, LeadStatus};
pub use locator::Locator;
pub use pagination::{total_pages, Pagination};
pub use state::{FetchState, Phase};

/// Result type for operations that resolve into fetch state
pub type Result<T> = std::result::Result<T, FetchError>;
