use anyhow::Result;
use boj_tool::core::{CredentialsProvider, SessionStore};
use boj_tool::domain::model::{Credentials, SessionCookies, StatField, Verdict};
use boj_tool::{BojConfig, BojError, BojTool, HttpJudgeClient, LocalSessionStore, SubmitOptions};
use chrono::Utc;
use httpmock::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const LOGGED_IN_PAGE: &str = r#"<html><body>
<ul class="loginbar"><li><a href="/user/alice" class="username">alice</a></li></ul>
</body></html>"#;

const LOGGED_OUT_PAGE: &str = r#"<html><body>
<ul class="loginbar"><li><a href="/login">로그인</a></li></ul>
</body></html>"#;

struct FixedCredentials;

impl CredentialsProvider for FixedCredentials {
    fn credentials(&self) -> boj_tool::Result<Credentials> {
        Ok(Credentials {
            username: "alice".to_string(),
            password: "secret".to_string(),
        })
    }
}

/// 已有登入狀態時不應該要求輸入帳密
struct NoPrompt;

impl CredentialsProvider for NoPrompt {
    fn credentials(&self) -> boj_tool::Result<Credentials> {
        Err(BojError::AuthenticationError {
            message: "prompt should not be used".to_string(),
        })
    }
}

fn config_for(server: &MockServer) -> BojConfig {
    let mut config = BojConfig::default();
    config.judge.base_url = server.base_url();
    config.poll.interval_ms = 10;
    config.poll.timeout_seconds = 5;
    config
}

async fn saved_session(server: &MockServer, dir: &Path) -> Result<LocalSessionStore> {
    let store = LocalSessionStore::new(dir.join("session.json"));
    store
        .save(&SessionCookies {
            base_url: format!("{}/", server.base_url()),
            cookies: vec![("OnlineJudge".to_string(), "abc123".to_string())],
            saved_at: Utc::now(),
        })
        .await?;
    Ok(store)
}

#[tokio::test]
async fn test_login_persists_cookies() -> Result<()> {
    let server = MockServer::start_async().await;
    let temp_dir = TempDir::new()?;

    let signin_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/signin")
                .body_contains("login_user_id=alice")
                .body_contains("login_password=secret")
                .body_contains("auto_login=on");
            then.status(200)
                .header("Set-Cookie", "OnlineJudge=abc123; Path=/")
                .body("<html></html>");
        })
        .await;

    let home_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/")
                .header("cookie", "OnlineJudge=abc123");
            then.status(200).body(LOGGED_IN_PAGE);
        })
        .await;

    let config = config_for(&server);
    let store = LocalSessionStore::new(temp_dir.path().join("session.json"));
    let tool = BojTool::new(
        HttpJudgeClient::new(&config)?,
        store.clone(),
        FixedCredentials,
        config,
    );

    let username = tool.login().await?;
    assert_eq!(username, "alice");
    signin_mock.assert_async().await;
    home_mock.assert_async().await;

    let saved = store.load().await?.expect("session should be saved");
    assert_eq!(
        saved.cookies,
        vec![("OnlineJudge".to_string(), "abc123".to_string())]
    );

    assert!(tool.logout().await?);
    assert!(store.load().await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_failed_login_leaves_no_session() -> Result<()> {
    let server = MockServer::start_async().await;
    let temp_dir = TempDir::new()?;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/signin");
            then.status(200).body("<html></html>");
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(200).body(LOGGED_OUT_PAGE);
        })
        .await;

    let config = config_for(&server);
    let store = LocalSessionStore::new(temp_dir.path().join("session.json"));
    let tool = BojTool::new(
        HttpJudgeClient::new(&config)?,
        store.clone(),
        FixedCredentials,
        config,
    );

    let err = tool.login().await.unwrap_err();
    assert!(matches!(err, BojError::AuthenticationError { .. }));
    assert!(store.load().await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_submit_and_poll_verdict() -> Result<()> {
    let server = MockServer::start_async().await;
    let temp_dir = TempDir::new()?;
    let store = saved_session(&server, temp_dir.path()).await?;

    let source_path = temp_dir.path().join("main.py");
    tokio::fs::write(&source_path, "a, b = map(int, input().split())\nprint(a + b)\n").await?;

    let home_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/")
                .header("cookie", "OnlineJudge=abc123");
            then.status(200).body(LOGGED_IN_PAGE);
        })
        .await;

    let form_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/submit/1000");
            then.status(200).body(
                r#"<form method="post" action="/submit/1000">
                    <input type="hidden" name="csrf_key" value="key123">
                </form>"#,
            );
        })
        .await;

    let submit_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/submit/1000")
                .body_contains("problem_id=1000")
                .body_contains("language=28")
                .body_contains("code_open=open")
                .body_contains("csrf_key=key123")
                .body_contains("source=");
            then.status(200).body("<html></html>");
        })
        .await;

    let status_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/status")
                .query_param("from_mine", "1")
                .query_param("problem_id", "1000")
                .query_param("user_id", "alice");
            then.status(200).body(
                r#"<table id="status-table"><tbody>
                <tr id="solution-9001">
                    <td>9001</td><td>alice</td><td>1000</td>
                    <td class="result"><span class="result-text result-ac"><span class="result-ac">맞았습니다!!</span></span></td>
                    <td class="memory">2020</td><td class="time">0</td>
                </tr>
                </tbody></table>"#,
            );
        })
        .await;

    let config = config_for(&server);
    let tool = BojTool::new(HttpJudgeClient::new(&config)?, store, NoPrompt, config);

    let receipt = tool
        .submit(1000, &source_path, &SubmitOptions::default())
        .await?;
    assert_eq!(receipt.username, "alice");
    assert_eq!(receipt.language_code, 28);

    let mut updates = 0;
    let status = tool.wait_for_verdict(&receipt, |_| updates += 1).await?;
    assert_eq!(status.verdict, Verdict::Accepted);
    assert_eq!(status.solution_id, Some(9001));
    assert_eq!(status.summary(), "AC (2020KB, 0ms)");
    assert_eq!(updates, 1);

    home_mock.assert_async().await;
    form_mock.assert_async().await;
    submit_mock.assert_async().await;
    status_mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_submit_to_missing_problem() -> Result<()> {
    let server = MockServer::start_async().await;
    let temp_dir = TempDir::new()?;
    let store = saved_session(&server, temp_dir.path()).await?;

    let source_path = temp_dir.path().join("main.cpp");
    tokio::fs::write(&source_path, "int main() { return 0; }\n").await?;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(200).body(LOGGED_IN_PAGE);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/submit/99999");
            then.status(200).body("<html><body>문제가 존재하지 않습니다</body></html>");
        })
        .await;
    let submit_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/submit/99999");
            then.status(200);
        })
        .await;

    let config = config_for(&server);
    let tool = BojTool::new(HttpJudgeClient::new(&config)?, store, NoPrompt, config);

    let err = tool
        .submit(99999, &source_path, &SubmitOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, BojError::ScrapeError { .. }));
    assert_eq!(submit_mock.hits_async().await, 0);
    Ok(())
}

#[tokio::test]
async fn test_expired_session_is_reported() -> Result<()> {
    let server = MockServer::start_async().await;
    let temp_dir = TempDir::new()?;
    let store = saved_session(&server, temp_dir.path()).await?;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(200).body(LOGGED_OUT_PAGE);
        })
        .await;

    let config = config_for(&server);
    let tool = BojTool::new(HttpJudgeClient::new(&config)?, store, NoPrompt, config);

    let err = tool.stats(None).await.unwrap_err();
    assert!(matches!(err, BojError::SessionExpired));
    assert_eq!(err.exit_code(), 2);
    Ok(())
}

#[tokio::test]
async fn test_stats_for_other_user() -> Result<()> {
    let server = MockServer::start_async().await;
    let temp_dir = TempDir::new()?;
    let store = saved_session(&server, temp_dir.path()).await?;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(200).body(LOGGED_IN_PAGE);
        })
        .await;
    let user_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/user/bob");
            then.status(200).body(
                "<table id=\"statics\"><tbody>\
                 <tr><th>랭킹</th><td>77</td></tr>\
                 <tr><th>푼 문제</th><td>1024</td></tr>\
                 <tr><th>대회 우승</th><td>\n\tContest A\n\tContest B\n</td></tr>\
                 </tbody></table>",
            );
        })
        .await;

    let config = config_for(&server);
    let tool = BojTool::new(HttpJudgeClient::new(&config)?, store, NoPrompt, config);

    let stats = tool.stats(Some("bob")).await?;
    assert_eq!(stats.username, "bob");
    assert_eq!(stats.get(StatField::Rank), Some("77"));
    assert_eq!(stats.get(StatField::Solved), Some("1024"));
    assert_eq!(stats.get(StatField::FirstPlace), Some("Contest A, Contest B"));
    user_mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_server_error_on_status_page() -> Result<()> {
    let server = MockServer::start_async().await;
    let temp_dir = TempDir::new()?;
    let store = saved_session(&server, temp_dir.path()).await?;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/status");
            then.status(500);
        })
        .await;

    let config = config_for(&server);
    let tool = BojTool::new(HttpJudgeClient::new(&config)?, store, NoPrompt, config);

    let receipt = boj_tool::domain::model::SubmissionReceipt {
        problem_id: 1000,
        language_code: 28,
        username: "alice".to_string(),
        source_bytes: 1,
    };
    let err = tool.wait_for_verdict(&receipt, |_| {}).await.unwrap_err();
    assert!(matches!(err, BojError::HttpError(_)));
    assert!(err.user_friendly_message().contains("500"));
    Ok(())
}
