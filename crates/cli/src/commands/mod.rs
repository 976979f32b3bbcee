//! Command handlers for the askdocs CLI.

mod serve;
mod sync;

pub use serve::ServeCommand;
pub use sync::SyncCommand;
