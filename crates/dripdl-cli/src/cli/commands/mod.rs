//! CLI command handlers, one file per command.

mod fetch;
mod labels;
mod list;
mod login;

pub use fetch::run_fetch;
pub use labels::run_labels;
pub use list::run_list;
