use std::path::PathBuf;

pub const APP_DIR: &str = "boj-tool";

/// `$XDG_CONFIG_HOME/boj-tool/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// `$XDG_DATA_HOME/boj-tool/session.json`
pub fn default_session_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR).join("session.json"))
}
