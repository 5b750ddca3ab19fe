//! Configuration loading and validation.
//!
//! Settings come from a TOML file; the CLI overlays its own flags on
//! top. Validation happens at startup, before any remote call, so that
//! required values (the default Jira user, the label filter) fail fast.

mod error;
mod settings;
mod user_map;

pub use error::ConfigError;
pub use settings::{GithubSettings, MigrationConfig};
pub use user_map::load_user_map;
