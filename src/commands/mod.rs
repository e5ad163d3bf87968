// src/commands/mod.rs
mod commit;
mod config;
mod generate;
mod model;
mod status;
mod version;

pub use commit::cmd_commit;
pub use config::cmd_config;
pub use generate::{run_generate, GenerateOptions};
pub use model::cmd_model;
pub use status::cmd_status;
pub use version::cmd_version;
