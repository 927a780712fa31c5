//! Metadata file persistence.

use crate::{Metadata, SnapshotError, SnapshotResult};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// The metadata file of one project.
///
/// The whole document is read into memory, changed, and written back in
/// one piece. There is no locking; one invocation owns the file at a time.
#[derive(Debug, Clone)]
pub struct MetadataStore {
    path: PathBuf,
}

impl MetadataStore {
    /// Create a store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the metadata, returning `None` if the file does not exist.
    pub async fn load(&self) -> SnapshotResult<Option<Metadata>> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => {
                let metadata: Metadata = serde_json::from_str(&content)?;
                info!("Loaded json data from {}", self.file_name());
                debug!(snapshots = metadata.snapshots.len(), "Metadata contents");
                Ok(Some(metadata))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SnapshotError::Io(e)),
        }
    }

    /// Load the metadata, failing if the file does not exist.
    pub async fn load_existing(&self) -> SnapshotResult<Metadata> {
        self.load()
            .await?
            .ok_or_else(|| SnapshotError::MetadataNotFound(self.path.clone()))
    }

    /// Load the metadata or start from an empty document.
    pub async fn load_or_default(&self) -> SnapshotResult<Metadata> {
        match self.load().await? {
            Some(metadata) => Ok(metadata),
            None => {
                info!("{} does not exist yet. Creating..", self.file_name());
                Ok(Metadata::default())
            }
        }
    }

    /// Write the whole document.
    ///
    /// Output is pretty-printed with one-space indentation and sorted keys.
    pub async fn save(&self, metadata: &Metadata) -> SnapshotResult<()> {
        info!("Writing updated data to {}", self.file_name());
        let content = to_sorted_json(metadata)?;

        // Write atomically (write to temp file, then rename)
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, &content).await?;
        fs::rename(&temp_path, &self.path).await?;

        Ok(())
    }

    fn file_name(&self) -> String {
        ofstate_util::path::basename(&self.path)
    }
}

/// Serialize with keys in sorted order so diffs of the file stay stable.
fn to_sorted_json<T: Serialize>(value: &T) -> SnapshotResult<String> {
    // serde_json's default Map is a BTreeMap, which orders keys.
    let value = serde_json::to_value(value)?;

    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    out.push(b'\n');

    String::from_utf8(out).map_err(|e| {
        SnapshotError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}
