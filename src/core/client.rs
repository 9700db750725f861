use crate::config::toml_config::BojConfig;
use crate::core::{html, JudgeClient};
use crate::domain::model::{
    Credentials, JudgeStatus, SessionCookies, SubmissionRequest, UserStats,
};
use crate::utils::error::{BojError, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::Client;
use std::sync::Arc;
use url::Url;

/// 透過 HTML 頁面與 BOJ 互動的客戶端，所有請求共用同一個 cookie jar
pub struct HttpJudgeClient {
    base_url: Url,
    client: Client,
    jar: Arc<Jar>,
}

impl HttpJudgeClient {
    pub fn new(config: &BojConfig) -> Result<Self> {
        let base_url = Url::parse(&config.judge.base_url).map_err(|e| {
            BojError::InvalidConfigValueError {
                field: "judge.base_url".to_string(),
                value: config.judge.base_url.clone(),
                reason: format!("Invalid URL format: {}", e),
            }
        })?;

        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .user_agent(config.user_agent())
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            base_url,
            client,
            jar,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// 在 base_url 的路徑後逐段加上 segments；每段都會被編碼，不會跳出前綴
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BojError::ConfigError {
                message: format!("Cannot build URLs under '{}'", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_html(&self, url: Url) -> Result<String> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        tracing::debug!("Response status: {}", response.status());
        Ok(response.text().await?)
    }
}

#[async_trait]
impl JudgeClient for HttpJudgeClient {
    async fn sign_in(&self, credentials: &Credentials) -> Result<()> {
        tracing::info!("Authenticating...");
        tracing::debug!("Credentials: {:?}", credentials);

        let form = [
            ("login_user_id", credentials.username.as_str()),
            ("login_password", credentials.password.as_str()),
            ("auto_login", "on"),
        ];
        let response = self
            .client
            .post(self.endpoint(&["signin"])?)
            .form(&form)
            .send()
            .await?
            .error_for_status()?;

        tracing::debug!("Sign-in response status: {}", response.status());
        Ok(())
    }

    async fn current_username(&self) -> Result<Option<String>> {
        let page = self.get_html(self.base_url.clone()).await?;
        Ok(html::extract_username(&page))
    }

    async fn csrf_key(&self, problem_id: u32) -> Result<String> {
        let url = self.endpoint(&["submit", problem_id.to_string().as_str()])?;
        let page = self.get_html(url.clone()).await?;
        html::extract_csrf_key(&page).ok_or_else(|| {
            BojError::scrape(
                url.as_str(),
                format!("no csrf_key on the submit page of problem {}", problem_id),
            )
        })
    }

    async fn submit(&self, request: &SubmissionRequest) -> Result<()> {
        let problem_id = request.problem_id.to_string();
        let url = self.endpoint(&["submit", problem_id.as_str()])?;
        let language = request.language_code.to_string();

        let form = [
            ("problem_id", problem_id.as_str()),
            ("source", request.source.as_str()),
            ("language", language.as_str()),
            ("code_open", request.code_open.as_form_value()),
            ("csrf_key", request.csrf_key.as_str()),
        ];

        tracing::info!(
            "Submitting {} bytes to problem {} (language {})",
            request.source.len(),
            request.problem_id,
            request.language_code
        );
        self.client
            .post(url)
            .form(&form)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn latest_status(&self, problem_id: u32, username: &str) -> Result<JudgeStatus> {
        let mut url = self.endpoint(&["status"])?;
        url.query_pairs_mut()
            .append_pair("from_mine", "1")
            .append_pair("problem_id", &problem_id.to_string())
            .append_pair("user_id", username);

        let page = self.get_html(url.clone()).await?;
        html::extract_latest_status(&page)
            .ok_or_else(|| BojError::scrape(url.as_str(), "no submission found"))
    }

    async fn user_stats(&self, username: &str) -> Result<UserStats> {
        // "." 與 ".." 會被 URL 正規化吃掉，只剩 /user
        if matches!(username, "" | "." | "..") {
            return Err(BojError::ValidationError {
                message: format!("'{}' is not a valid username", username),
            });
        }
        let url = self.endpoint(&["user", username])?;
        let page = self.get_html(url.clone()).await?;
        html::extract_user_stats(&page, username).ok_or_else(|| {
            BojError::scrape(url.as_str(), format!("no statistics for user '{}'", username))
        })
    }

    fn session_cookies(&self) -> SessionCookies {
        // Jar 只提供 Cookie 標頭格式："a=1; b=2"
        let cookies = self
            .jar
            .cookies(&self.base_url)
            .and_then(|header| header.to_str().ok().map(str::to_string))
            .map(|header| {
                header
                    .split("; ")
                    .filter_map(|pair| pair.split_once('='))
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect()
            })
            .unwrap_or_default();

        SessionCookies {
            base_url: self.base_url.to_string(),
            cookies,
            saved_at: Utc::now(),
        }
    }

    fn restore_session(&self, session: &SessionCookies) {
        if session.base_url != self.base_url.as_str() {
            tracing::warn!(
                "Session was saved for {}, but the judge URL is {}",
                session.base_url,
                self.base_url
            );
        }

        for (name, value) in &session.cookies {
            self.jar
                .add_cookie_str(&format!("{}={}; Path=/", name, value), &self.base_url);
        }
        tracing::debug!("Restored {} cookies", session.cookies.len());
    }
}
