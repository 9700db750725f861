use crate::config::toml_config::BojConfig;
use crate::core::language::language_code_for;
use crate::core::poller::StatusPoller;
use crate::core::{CredentialsProvider, JudgeClient, SessionStore};
use crate::domain::model::{
    CodeOpen, JudgeStatus, SubmissionReceipt, SubmissionRequest, UserStats,
};
use crate::utils::error::{BojError, Result};
use crate::utils::validation::{validate_problem_number, validate_source_file};
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct SubmitOptions {
    pub language_code: Option<u32>,
    pub code_open: Option<CodeOpen>,
}

/// 串起登入、提交、輪詢與統計的流程
pub struct BojTool<C, S, P>
where
    C: JudgeClient,
    S: SessionStore,
    P: CredentialsProvider,
{
    client: C,
    store: S,
    prompt: P,
    config: BojConfig,
}

impl<C, S, P> BojTool<C, S, P>
where
    C: JudgeClient,
    S: SessionStore,
    P: CredentialsProvider,
{
    pub fn new(client: C, store: S, prompt: P, config: BojConfig) -> Self {
        Self {
            client,
            store,
            prompt,
            config,
        }
    }

    /// 要求帳號密碼並登入，成功後保存 cookie
    pub async fn login(&self) -> Result<String> {
        let credentials = self.prompt.credentials()?;
        self.client.sign_in(&credentials).await?;

        match self.client.current_username().await? {
            Some(username) => {
                self.store.save(&self.client.session_cookies()).await?;
                tracing::info!("Logged in as {}", username);
                Ok(username)
            }
            None => {
                tracing::error!("Login failed");
                if self.store.clear().await? {
                    tracing::debug!("Removed stale session");
                }
                Err(BojError::AuthenticationError {
                    message: format!("could not sign in as '{}'", credentials.username),
                })
            }
        }
    }

    pub async fn logout(&self) -> Result<bool> {
        self.store.clear().await
    }

    /// 載入已保存的登入狀態，沒有時先登入；回傳目前的使用者名稱
    pub async fn ensure_session(&self) -> Result<String> {
        match self.store.load().await? {
            Some(session) if !session.is_empty() => {
                self.client.restore_session(&session);
                tracing::debug!("Getting username from HTML...");
                let username = self
                    .client
                    .current_username()
                    .await?
                    .ok_or(BojError::SessionExpired)?;
                tracing::debug!("Username is {}", username);
                Ok(username)
            }
            _ => {
                tracing::warn!("No saved session. Logging in...");
                self.login().await
            }
        }
    }

    pub async fn submit(
        &self,
        problem_id: u32,
        path: &Path,
        options: &SubmitOptions,
    ) -> Result<SubmissionReceipt> {
        validate_problem_number(problem_id)?;
        validate_source_file(path)?;

        let username = self.ensure_session().await?;
        tracing::debug!(
            "Problem number is {}, filename is {}",
            problem_id,
            path.display()
        );

        let language_code = match options.language_code {
            Some(code) => code,
            None => language_code_for(path, &self.config.languages)?,
        };
        let source = tokio::fs::read_to_string(path).await?;
        let csrf_key = self.client.csrf_key(problem_id).await?;

        let request = SubmissionRequest {
            problem_id,
            source,
            language_code,
            code_open: options.code_open.unwrap_or(self.config.submit.code_open),
            csrf_key,
        };
        self.client.submit(&request).await?;

        Ok(SubmissionReceipt {
            problem_id,
            language_code,
            username,
            source_bytes: request.source.len(),
        })
    }

    pub async fn wait_for_verdict<F>(
        &self,
        receipt: &SubmissionReceipt,
        on_update: F,
    ) -> Result<JudgeStatus>
    where
        F: FnMut(&JudgeStatus),
    {
        let poller = StatusPoller::new(self.config.poll_interval(), self.config.poll_timeout());
        poller
            .wait_for_verdict(&self.client, receipt.problem_id, &receipt.username, on_update)
            .await
    }

    /// 未指定使用者時顯示目前登入者的統計
    pub async fn stats(&self, user: Option<&str>) -> Result<UserStats> {
        let current = self.ensure_session().await?;
        let username = user.unwrap_or(current.as_str());
        self.client.user_stats(username).await
    }
}
