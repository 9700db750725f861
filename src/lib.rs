pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::StdinCredentials, CliConfig, Command};

pub use config::toml_config::BojConfig;
pub use core::{
    client::HttpJudgeClient,
    session::LocalSessionStore,
    tool::{BojTool, SubmitOptions},
};
pub use utils::error::{BojError, Result};
