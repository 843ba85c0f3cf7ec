//! Ambient helpers shared by every crate in the workspace: logging setup,
//! runtime directory checks and the health payload.

pub mod types;
pub mod utils;
pub mod env;
