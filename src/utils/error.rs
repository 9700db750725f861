use thiserror::Error;

#[derive(Error, Debug)]
pub enum BojError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Authentication failed: {message}")]
    AuthenticationError { message: String },

    #[error("Session expired or not logged in")]
    SessionExpired,

    #[error("Unexpected page content at {page}: {message}")]
    ScrapeError { page: String, message: String },

    #[error("Unsupported language setting for {language}: {reason}")]
    UnsupportedLanguage { language: String, reason: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Judging of problem {problem_id} did not finish within {elapsed_secs}s")]
    JudgeTimeout { problem_id: u32, elapsed_secs: u64 },
}

/// 錯誤分類，用於日誌與退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Authentication,
    Parsing,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BojError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BojError::HttpError(_) | BojError::JudgeTimeout { .. } => ErrorCategory::Network,
            BojError::ConfigError { .. }
            | BojError::ConfigValidationError { .. }
            | BojError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            BojError::AuthenticationError { .. } | BojError::SessionExpired => {
                ErrorCategory::Authentication
            }
            BojError::ScrapeError { .. } | BojError::SerializationError(_) => {
                ErrorCategory::Parsing
            }
            BojError::UnsupportedLanguage { .. } | BojError::ValidationError { .. } => {
                ErrorCategory::Input
            }
            BojError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 網路與評測逾時通常重試即可
            BojError::HttpError(_) | BojError::JudgeTimeout { .. } => ErrorSeverity::Medium,
            BojError::SessionExpired => ErrorSeverity::Medium,
            BojError::IoError(_) | BojError::SerializationError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            BojError::HttpError(_) => "Check your network connection and that the judge site is reachable",
            BojError::IoError(_) => "Check file permissions and available disk space",
            BojError::SerializationError(_) => {
                "The saved session file is corrupted; run `boj logout` and then `boj login`"
            }
            BojError::ConfigError { .. }
            | BojError::ConfigValidationError { .. }
            | BojError::InvalidConfigValueError { .. } => {
                "Fix the configuration file (see `--config`) and try again"
            }
            BojError::AuthenticationError { .. } => "Check your username and password",
            BojError::SessionExpired => "Run `boj login` to sign in again",
            BojError::ScrapeError { .. } => {
                "Check the problem number or user name; the page may not exist"
            }
            BojError::UnsupportedLanguage { .. } => {
                "Fix the [languages] section of the config file or pass --language-code"
            }
            BojError::ValidationError { .. } => "Check the command arguments",
            BojError::JudgeTimeout { .. } => {
                "Check the status page later or raise poll.timeout_seconds"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BojError::HttpError(e) if e.is_timeout() => {
                "The judge site did not respond in time".to_string()
            }
            BojError::HttpError(e) if e.is_connect() => {
                "Could not connect to the judge site".to_string()
            }
            BojError::HttpError(e) => match e.status() {
                Some(status) => format!("The judge site answered with HTTP {}", status),
                None => "Request to the judge site failed".to_string(),
            },
            BojError::SessionExpired => "You are not logged in".to_string(),
            other => other.to_string(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub(crate) fn scrape(page: impl Into<String>, message: impl Into<String>) -> Self {
        BojError::ScrapeError {
            page: page.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BojError>;
