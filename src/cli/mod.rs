//! CLI command handlers.
//!
//! Testable command handlers invoked by main.rs, one per subcommand.

mod dump;
mod extract;

pub use dump::{run_dump, run_encode, DumpFormat};
pub use extract::run_extract;
