use crate::domain::ports::SettingsStore;
use crate::utils::error::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Key/value settings kept as a small JSON file under `base_path`.
#[derive(Debug, Clone)]
pub struct LocalSettingsStore {
    base_path: String,
}

impl LocalSettingsStore {
    pub const FILE_NAME: &'static str = "settings.json";

    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    fn file_path(&self) -> PathBuf {
        Path::new(&self.base_path).join(Self::FILE_NAME)
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>> {
        let path = self.file_path();
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(serde_json::from_slice(&data)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl SettingsStore for LocalSettingsStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self.read_all().await?;
        Ok(items.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.read_all().await?;
        items.insert(key.to_string(), value.to_string());

        let full_path = self.file_path();
        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, serde_json::to_vec_pretty(&items)?).await?;
        tracing::debug!("💾 Saved setting '{}' = '{}'", key, value);
        Ok(())
    }
}
