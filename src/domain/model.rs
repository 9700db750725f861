use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"*".repeat(self.password.chars().count()))
            .finish()
    }
}

/// 已保存的登入狀態（cookie jar 快照）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCookies {
    pub base_url: String,
    pub cookies: Vec<(String, String)>,
    pub saved_at: DateTime<Utc>,
}

impl SessionCookies {
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

/// 原始碼公開設定，對應提交表單的 `code_open`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum CodeOpen {
    #[default]
    Open,
    Close,
    #[cfg_attr(feature = "cli", value(name = "onlyaccepted"))]
    OnlyAccepted,
}

impl CodeOpen {
    pub fn as_form_value(self) -> &'static str {
        match self {
            CodeOpen::Open => "open",
            CodeOpen::Close => "close",
            CodeOpen::OnlyAccepted => "onlyaccepted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub problem_id: u32,
    pub source: String,
    pub language_code: u32,
    pub code_open: CodeOpen,
    pub csrf_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub problem_id: u32,
    pub language_code: u32,
    pub username: String,
    pub source_bytes: usize,
}

/// 評測結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Waiting,
    Preparing,
    /// 評測中，保留進度文字（例如 " (35%)"）
    Judging(String),
    /// 部分分數，保留原始數字
    Partial(String),
    Accepted,
    PresentationError,
    WrongAnswer,
    TimeLimitExceeded,
    MemoryLimitExceeded,
    OutputLimitExceeded,
    RuntimeError,
    CompileError,
    Unknown(String),
}

/// status 頁面第一列（最新一筆提交）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgeStatus {
    pub solution_id: Option<u64>,
    pub verdict: Verdict,
    pub raw_text: String,
    pub memory_kb: String,
    pub time_ms: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatField {
    Rank,
    Solved,
    Submissions,
    AcceptedCount,
    PresentationErrorCount,
    WrongAnswerCount,
    TimeLimitCount,
    CompileErrorCount,
    MemoryLimitCount,
    OutputLimitCount,
    RuntimeErrorCount,
    Organization,
    FirstPlace,
    SecondPlace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatEntry {
    pub field: StatField,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    pub username: String,
    pub entries: Vec<StatEntry>,
}

impl UserStats {
    pub fn get(&self, field: StatField) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.field == field)
            .map(|entry| entry.value.as_str())
    }
}
