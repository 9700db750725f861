use crate::domain::model::{
    Credentials, JudgeStatus, SessionCookies, SubmissionRequest, UserStats,
};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait SessionStore: Send + Sync {
    fn load(&self) -> impl std::future::Future<Output = Result<Option<SessionCookies>>> + Send;
    fn save(
        &self,
        cookies: &SessionCookies,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// 回傳是否真的刪除了已保存的狀態
    fn clear(&self) -> impl std::future::Future<Output = Result<bool>> + Send;
}

pub trait CredentialsProvider: Send + Sync {
    fn credentials(&self) -> Result<Credentials>;
}

/// 與評測網站互動的介面
#[async_trait]
pub trait JudgeClient: Send + Sync {
    async fn sign_in(&self, credentials: &Credentials) -> Result<()>;

    /// 目前登入的使用者名稱，未登入時為 `None`
    async fn current_username(&self) -> Result<Option<String>>;

    async fn csrf_key(&self, problem_id: u32) -> Result<String>;
    async fn submit(&self, request: &SubmissionRequest) -> Result<()>;
    async fn latest_status(&self, problem_id: u32, username: &str) -> Result<JudgeStatus>;
    async fn user_stats(&self, username: &str) -> Result<UserStats>;

    fn session_cookies(&self) -> SessionCookies;
    fn restore_session(&self, cookies: &SessionCookies);
}
