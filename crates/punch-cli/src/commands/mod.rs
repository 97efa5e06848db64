//! CLI command implementations.

pub mod edit;
pub mod log;
pub mod session;
pub mod status;
mod util;
