mod classifier;
mod db;
pub mod logging;
mod server;
mod validation;

pub use server::Server;

// CONSTANTS
// =================================================================================================

/// Component identifier for structured logging and tracing.
pub const COMPONENT: &str = "paysim";
