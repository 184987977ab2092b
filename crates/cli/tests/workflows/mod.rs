//! Workflow integration tests
//!
//! Each test runs the real binary inside its own sandbox directory.

pub mod auth_offline;
pub mod config_lifecycle;
pub mod leads;
