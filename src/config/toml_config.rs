use crate::domain::model::CodeOpen;
use crate::utils::error::{BojError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.acmicpc.net";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BojConfig {
    pub judge: JudgeConfig,
    pub submit: SubmitConfig,
    pub poll: PollConfig,
    pub languages: LanguagesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgeConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: Option<String>,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 30,
            user_agent: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitConfig {
    pub code_open: CodeOpen,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    pub interval_ms: u64,
    pub timeout_seconds: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            timeout_seconds: 300,
        }
    }
}

/// 各語言的編譯器與版本偏好，沿用舊版設定檔的區段名稱
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguagesConfig {
    #[serde(rename = "C++", alias = "cpp")]
    pub cpp: Option<LanguagePreference>,
    #[serde(rename = "C", alias = "c")]
    pub c: Option<LanguagePreference>,
    #[serde(rename = "Python", alias = "python")]
    pub python: Option<LanguagePreference>,
    #[serde(rename = "Java", alias = "java")]
    pub java: Option<LanguagePreference>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguagePreference {
    pub compiler: Option<String>,
    pub version: Option<String>,
}

impl LanguagePreference {
    pub fn compiler_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.compiler.as_deref().unwrap_or(default)
    }

    pub fn version_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.version.as_deref().unwrap_or(default)
    }
}

impl BojConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 指定路徑必須存在；預設路徑不存在時使用預設值
    pub fn load(explicit: Option<&Path>, default_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::debug!("Loading config from {}", path.display());
            return Self::from_file(path).map_err(|e| match e {
                BojError::IoError(io) => BojError::ConfigError {
                    message: format!("Cannot read config file '{}': {}", path.display(), io),
                },
                other => other,
            });
        }

        match default_path {
            Some(path) if path.is_file() => {
                tracing::debug!("Config file found at {}", path.display());
                Self::from_file(path)
            }
            _ => {
                tracing::debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BojError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BOJ_BASE_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BojError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.judge.timeout_seconds)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll.interval_ms)
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll.timeout_seconds)
    }

    pub fn user_agent(&self) -> String {
        self.judge
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("boj-tool/{}", env!("CARGO_PKG_VERSION")))
    }
}

impl Validate for BojConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("judge.base_url", &self.judge.base_url)?;
        validation::validate_positive_number("judge.timeout_seconds", self.judge.timeout_seconds, 1)?;
        validation::validate_positive_number("poll.interval_ms", self.poll.interval_ms, 1)?;
        validation::validate_positive_number("poll.timeout_seconds", self.poll.timeout_seconds, 1)?;
        Ok(())
    }
}
