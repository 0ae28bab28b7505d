use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::app::ports::LeadStorePort;
use crate::domain::LeadPayload;
use crate::error::Result;

/// Pending leads as one JSON file per submission id under `dir`.
///
/// Writes go through a temp file and a rename, and every lead has its own
/// file, so concurrent writers never clobber each other.
pub struct FileLeadStore {
    dir: PathBuf,
}

impl FileLeadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, submission_id: Uuid) -> PathBuf {
        self.dir.join(format!("{}.json", submission_id))
    }
}

#[async_trait]
impl LeadStorePort for FileLeadStore {
    async fn save(&self, payload: &LeadPayload) -> Result<()> {
        fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(payload.submission_id());
        let tmp = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(payload)?;
        fs::write(&tmp, bytes).await?;
        fs::rename(&tmp, &path).await?;

        debug!(submission_id = %payload.submission_id(), path = %path.display(), "Stored pending lead");
        Ok(())
    }

    async fn load(&self, submission_id: Uuid) -> Result<Option<LeadPayload>> {
        match fs::read(self.path_for(submission_id)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> Result<Vec<LeadPayload>> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut leads = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let bytes = fs::read(&path).await?;
            match serde_json::from_slice::<LeadPayload>(&bytes) {
                Ok(lead) => leads.push(lead),
                Err(e) => warn!(path = %path.display(), "Skipping unreadable pending lead: {}", e),
            }
        }

        leads.sort_by_key(|lead| lead.submitted_at());
        Ok(leads)
    }

    async fn remove(&self, submission_id: Uuid) -> Result<bool> {
        match fs::remove_file(self.path_for(submission_id)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
