//! File-based storage implementation

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::application::errors::StoreError;
use crate::domain::entities::FullState;
use crate::domain::traits::BindingStore;

/// JSON file-based binding store.
///
/// The whole state is rewritten on every save: write to a temp file in
/// the same directory, then rename over the target, so a crash mid-write
/// never leaves a partially written file. Whole-file rewrite is fine at
/// this scale (tens of anchors, single-digit bindings each).
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "bindings.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl BindingStore for JsonFileStore {
    async fn load(&self) -> Result<FullState, StoreError> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(FullState::new()),
            Err(e) => return Err(StoreError::Io(e)),
        };

        serde_json::from_str(&data)
            .map_err(|e| StoreError::Corrupt(format!("parse {}: {}", self.path.display(), e)))
    }

    async fn save(&self, state: &FullState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(state)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::debug!("Persisted bindings to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Binding, ButtonStyle};

    fn sample_state() -> FullState {
        let mut state = FullState::new();
        state
            .entry("s1".to_string())
            .or_default()
            .entry("a1".to_string())
            .or_default()
            .extend([
                Binding::new("s1", "a1", "t1", "r1").with_style(ButtonStyle::Red),
                Binding::new("s1", "a1", "t2", "r2").with_label("\u{2B50}"),
            ]);
        state
            .entry("s2".to_string())
            .or_default()
            .entry("a2".to_string())
            .or_default()
            .push(Binding::new("s2", "a2", "t1", "r3"));
        state
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("bindings.json"));
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_load_round_trip_is_stable() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("bindings.json"));

        let state = sample_state();
        store.save(&state).await.unwrap();
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, state);

        // Reloading what was just loaded and saved again yields the
        // identical mapping.
        store.save(&loaded).await.unwrap();
        assert_eq!(store.load().await.unwrap(), state);
    }

    #[tokio::test]
    async fn corrupt_file_reports_corrupt() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bindings.json");
        tokio::fs::write(&path, "{not json at all").await.unwrap();

        let store = JsonFileStore::new(path);
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }

    #[tokio::test]
    async fn interrupted_save_leaves_prior_state_intact() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bindings.json");
        let store = JsonFileStore::new(path.clone());

        let state = sample_state();
        store.save(&state).await.unwrap();

        // A later save that dies before the rename leaves only a stray
        // temp file; the target still holds the complete prior state.
        tokio::fs::write(store.temp_path(), "partial garbage")
            .await
            .unwrap();
        assert_eq!(store.load().await.unwrap(), state);
    }

    #[tokio::test]
    async fn save_creates_parent_directories() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/deeper/bindings.json"));
        let state = sample_state();
        store.save(&state).await.unwrap();
        assert_eq!(store.load().await.unwrap(), state);
    }
}
