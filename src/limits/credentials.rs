//! Credential file reading.

use super::types::AuthStore;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Where the reporter gets provider credentials from.
pub trait CredentialSource: Send + Sync {
    /// Loads the current credentials. A source with nothing to offer returns
    /// an empty store; only unreadable or malformed data is an error.
    fn load(&self) -> Result<AuthStore>;
}

/// Reads the host's `auth.json`, fresh on every call.
#[derive(Debug, Clone)]
pub struct FileCredentialSource {
    path: PathBuf,
}

impl FileCredentialSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialSource for FileCredentialSource {
    fn load(&self) -> Result<AuthStore> {
        if !self.path.exists() {
            tracing::debug!("No credentials file at {}", self.path.display());
            return Ok(AuthStore::default());
        }

        let content = std::fs::read_to_string(&self.path).with_context(|| {
            format!("Failed to read credentials: {}", self.path.display())
        })?;
        let store: AuthStore = serde_json::from_str(&content).with_context(|| {
            format!("Failed to parse credentials: {}", self.path.display())
        })?;

        tracing::debug!(
            "Loaded {} credential entries from {}",
            store.0.len(),
            self.path.display()
        );
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let source = FileCredentialSource::new(temp_dir.path().join("auth.json"));

        let store = source.load().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_malformed_json_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("auth.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = FileCredentialSource::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("Failed to parse credentials"));
    }

    #[test]
    fn test_non_object_json_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("auth.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        assert!(FileCredentialSource::new(&path).load().is_err());
    }

    #[test]
    fn test_reads_entries() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("auth.json");
        std::fs::write(
            &path,
            r#"{"github-copilot": {"type": "oauth", "refresh": "ghu_x"}}"#,
        )
        .unwrap();

        let source = FileCredentialSource::new(&path);
        assert_eq!(source.path(), path.as_path());
        let store = source.load().unwrap();
        assert_eq!(
            store.get("github-copilot").and_then(|e| e.refresh.as_deref()),
            Some("ghu_x")
        );
    }

    #[test]
    fn test_directory_in_place_of_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("auth.json");
        std::fs::create_dir(&path).unwrap();

        let err = FileCredentialSource::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("Failed to read credentials"));
    }
}
