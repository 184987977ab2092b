//! Library half of the `showcase` CLI: configuration, logging and
//! formatting shared by the commands and the integration tests.

pub mod logging;
pub mod system_config;
pub mod util;
