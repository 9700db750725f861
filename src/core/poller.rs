use crate::core::JudgeClient;
use crate::domain::model::JudgeStatus;
use crate::utils::error::{BojError, Result};
use std::time::{Duration, Instant};

/// 反覆讀取 status 頁面，直到評測結束或逾時
#[derive(Debug, Clone)]
pub struct StatusPoller {
    interval: Duration,
    timeout: Duration,
}

impl StatusPoller {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    /// 每次讀到狀態都會呼叫 `on_update`，回傳最終結果
    pub async fn wait_for_verdict<C, F>(
        &self,
        client: &C,
        problem_id: u32,
        username: &str,
        mut on_update: F,
    ) -> Result<JudgeStatus>
    where
        C: JudgeClient + ?Sized,
        F: FnMut(&JudgeStatus),
    {
        let started = Instant::now();
        let mut polls = 0u32;

        loop {
            let status = client.latest_status(problem_id, username).await?;
            polls += 1;
            tracing::debug!(
                "Poll #{} for problem {}: {:?}",
                polls,
                problem_id,
                status.verdict
            );
            on_update(&status);

            if status.verdict.is_finished() {
                tracing::info!(
                    "Judging finished after {} polls ({:?})",
                    polls,
                    started.elapsed()
                );
                return Ok(status);
            }

            if started.elapsed() >= self.timeout {
                return Err(BojError::JudgeTimeout {
                    problem_id,
                    elapsed_secs: started.elapsed().as_secs(),
                });
            }

            tokio::time::sleep(self.interval).await;
        }
    }
}
