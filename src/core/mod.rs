pub mod client;
pub mod html;
pub mod language;
pub mod poller;
pub mod session;
pub mod tool;
pub mod verdict;

pub use crate::domain::model::{JudgeStatus, SessionCookies, Verdict};
pub use crate::domain::ports::{CredentialsProvider, JudgeClient, SessionStore};
pub use crate::utils::error::Result;
