//! CLI command handlers, one per file.

mod classify;
mod completions;
mod run;
mod show_config;
mod validate;

pub use classify::run_classify;
pub use completions::{run_completions, run_man};
pub use run::run_workflow;
pub use show_config::run_show_config;
pub use validate::run_validate;
