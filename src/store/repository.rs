use super::*;
use std::path::PathBuf;
use tokio::sync::Mutex;

/// Whole-document persistence of the statistics dataset.
///
/// Loading never fails: an unreadable or corrupt source yields an empty
/// dataset so a duel can always finish. A corrupt file is moved aside
/// first, so the next save cannot overwrite it. Saving reports errors and leaves
/// the decision to swallow them to the caller.
#[async_trait::async_trait]
pub trait Repository: Send + Sync {
    async fn load(&self) -> Dataset;
    async fn save(&self, dataset: &Dataset) -> anyhow::Result<()>;
}

/// JSON file on local disk.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
    fn staging(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
    /// Sibling of the data file named after the moment it was set aside.
    fn quarantine(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| crate::DATA_FILE.to_string());
        let stamp = chrono::Utc::now().timestamp_millis();
        self.path.with_file_name(format!("{}.corrupt-{}", name, stamp))
    }
    async fn set_aside(&self) {
        let backup = self.quarantine();
        match tokio::fs::rename(&self.path, &backup).await {
            Ok(()) => log::warn!("[store] moved {} to {}", self.path.display(), backup.display()),
            Err(e) => log::error!("[store] failed to move {} aside: {}", self.path.display(), e),
        }
    }
}

#[async_trait::async_trait]
impl Repository for JsonFile {
    async fn load(&self) -> Dataset {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => match Dataset::try_from(text.as_str()) {
                Ok(dataset) => dataset,
                Err(e) => {
                    log::warn!("[store] {} is malformed, starting empty: {}", self.path.display(), e);
                    self.set_aside().await;
                    Dataset::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("[store] {} not found, starting empty", self.path.display());
                Dataset::default()
            }
            Err(e) => {
                log::error!("[store] failed to read {}: {}", self.path.display(), e);
                Dataset::default()
            }
        }
    }
    async fn save(&self, dataset: &Dataset) -> anyhow::Result<()> {
        let bytes = dataset.to_json()?;
        let staging = self.staging();
        tokio::fs::write(&staging, bytes).await?;
        tokio::fs::rename(&staging, &self.path).await?;
        log::debug!("[store] wrote {}", self.path.display());
        Ok(())
    }
}

/// Process-local dataset, lost on exit.
#[derive(Debug, Default)]
pub struct Memory(Mutex<Dataset>);

#[async_trait::async_trait]
impl Repository for Memory {
    async fn load(&self) -> Dataset {
        self.0.lock().await.clone()
    }
    async fn save(&self, dataset: &Dataset) -> anyhow::Result<()> {
        *self.0.lock().await = dataset.clone();
        Ok(())
    }
}
