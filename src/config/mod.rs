pub mod toml_config;

pub use toml_config::MailConfig;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, ThemeAction};
