use crate::domain::model::Credentials;
use crate::domain::ports::CredentialsProvider;
use crate::utils::error::{BojError, Result};
use std::io::{BufRead, IsTerminal, Write};

pub const USERNAME_ENV: &str = "BOJ_USERNAME";
pub const PASSWORD_ENV: &str = "BOJ_PASSWORD";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    Username,
    Password,
}

impl CredentialField {
    pub fn env_var(self) -> &'static str {
        match self {
            CredentialField::Username => USERNAME_ENV,
            CredentialField::Password => PASSWORD_ENV,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CredentialField::Username => "Username: ",
            CredentialField::Password => "Password: ",
        }
    }
}

/// 環境變數優先，空值視同未設定並改為詢問；帳號或密碼為空則拒絕
pub fn resolve_credentials<L, P>(lookup: L, mut prompt: P) -> Result<Credentials>
where
    L: Fn(&str) -> Option<String>,
    P: FnMut(CredentialField) -> Result<String>,
{
    let mut read = |field: CredentialField| match lookup(field.env_var()) {
        Some(value) if !value.is_empty() => {
            tracing::debug!("Using {} from environment", field.env_var());
            Ok(value)
        }
        _ => prompt(field),
    };

    let username = read(CredentialField::Username)?;
    let password = read(CredentialField::Password)?;

    if username.trim().is_empty() || password.is_empty() {
        return Err(BojError::AuthenticationError {
            message: "username and password must not be empty".to_string(),
        });
    }

    Ok(Credentials {
        username: username.trim().to_string(),
        password,
    })
}

/// 從環境變數或標準輸入取得帳號密碼
#[derive(Debug, Clone, Default)]
pub struct StdinCredentials;

impl StdinCredentials {
    pub fn new() -> Self {
        Self
    }

    fn read_line(label: &str) -> Result<String> {
        let mut stderr = std::io::stderr();
        write!(stderr, "{}", label)?;
        stderr.flush()?;

        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn prompt(field: CredentialField) -> Result<String> {
        match field {
            // 終端機輸入密碼時不回顯；管線輸入照常逐行讀取
            CredentialField::Password if std::io::stdin().is_terminal() => {
                Ok(rpassword::prompt_password(field.label())?)
            }
            _ => Self::read_line(field.label()),
        }
    }
}

impl CredentialsProvider for StdinCredentials {
    fn credentials(&self) -> Result<Credentials> {
        resolve_credentials(|var| std::env::var(var).ok(), Self::prompt)
    }
}
