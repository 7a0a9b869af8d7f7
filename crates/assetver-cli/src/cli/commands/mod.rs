//! CLI command handlers. Each command is in its own file.

mod completions;
mod explain;
mod render;
mod rewrite;
mod show_config;

pub use completions::{run_completions, run_man};
pub use explain::run_explain;
#[cfg(test)]
pub(crate) use explain::describe_url;
pub use render::run_render;
pub use rewrite::run_rewrite;
pub use show_config::run_config;
