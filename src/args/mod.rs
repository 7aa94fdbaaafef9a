//! Command-line argument parsing and handling.

pub mod definition;
pub mod run;
pub mod utils;

// Re-export commonly used items
pub use definition::Args;
pub use run::{RunError, RunOptions, RunOutcome, execute, process_args};
pub use utils::determine_log_level;
