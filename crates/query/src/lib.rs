//! Data loading runtime for Showcase views
//!
//! This crate provides:
//! - `Debounced`: quiet-period debouncing of a changing value
//! - `FetchHandle`: latest-wins fetch state with teardown safety
//! - `Transport`: the network seam, with a reqwest implementation
//! - Catalog views composing the two (search, pagination, detail)

pub mod catalog;
pub mod debounce;
pub mod fetch;
pub mod transport;

pub use catalog::{CatalogBrowser, CatalogConfig, ProductDetail};
pub use debounce::Debounced;
pub use fetch::{settled, FetchHandle, TeardownHandle};
pub use transport::{fetch_json, HttpTransport, Transport};
