use crate::core::SessionStore;
use crate::domain::model::SessionCookies;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// 以 JSON 檔保存登入 cookie
#[derive(Debug, Clone)]
pub struct LocalSessionStore {
    path: PathBuf,
}

impl LocalSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for LocalSessionStore {
    async fn load(&self) -> Result<Option<SessionCookies>> {
        let data = match tokio::fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No session file at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let cookies: SessionCookies = serde_json::from_slice(&data)?;
        tracing::info!("Loaded session from {}", self.path.display());
        Ok(Some(cookies))
    }

    async fn save(&self, cookies: &SessionCookies) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tracing::debug!("Saving session to {}...", self.path.display());
        let data = serde_json::to_vec_pretty(cookies)?;

        // cookie 等同密碼，建立時就只允許擁有者讀寫
        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(&self.path).await?;
        file.write_all(&data).await?;
        file.flush().await?;

        // 既有檔案不受 mode() 影響，需另外收緊權限
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .await?;
        }

        tracing::info!("Saved session to {}", self.path.display());
        Ok(())
    }

    async fn clear(&self) -> Result<bool> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                tracing::info!("Removed session file {}", self.path.display());
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::BojError;
    use chrono::Utc;
    use tempfile::TempDir;

    fn sample() -> SessionCookies {
        SessionCookies {
            base_url: "https://www.acmicpc.net".to_string(),
            cookies: vec![("OnlineJudge".to_string(), "abc123".to_string())],
            saved_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalSessionStore::new(temp_dir.path().join("nested/dir/session.json"));

        assert!(store.load().await.unwrap().is_none());

        let cookies = sample();
        store.save(&cookies).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(cookies));

        assert!(store.clear().await.unwrap());
        assert!(!store.clear().await.unwrap());
        assert!(store.load().await.unwrap().is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_session_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let store = LocalSessionStore::new(temp_dir.path().join("session.json"));
        store.save(&sample()).await.unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_existing_session_file_is_tightened() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        std::fs::write(&path, b"{}").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let store = LocalSessionStore::new(path);
        let cookies = sample();
        store.save(&cookies).await.unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.load().await.unwrap(), Some(cookies));
    }

    #[tokio::test]
    async fn test_corrupted_session_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        std::fs::write(&path, b"not json").unwrap();

        let store = LocalSessionStore::new(path);
        assert!(matches!(
            store.load().await,
            Err(BojError::SerializationError(_))
        ));
    }
}
