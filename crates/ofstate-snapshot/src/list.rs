//! Read-only reporting over the metadata file.

use crate::{Metadata, Snapshot, SnapshotError, SnapshotResult, StateManager, VersionControl};
use tracing::{debug, info};

/// One line per snapshot, with the description when there is one.
pub fn summary_lines(metadata: &Metadata) -> Vec<String> {
    let mut lines = vec!["Available snapshots:".to_string()];
    for snapshot in &metadata.snapshots {
        if snapshot.description.is_empty() {
            lines.push(format!("  {}", snapshot.name));
        } else {
            lines.push(format!("  {}: {}", snapshot.name, snapshot.description));
        }
    }
    lines.push("Get more information by specifying desired snapshot with -n <name>.".to_string());
    lines
}

/// Full record of one snapshot.
pub fn detail_lines(snapshot: &Snapshot, core_label: &str) -> Vec<String> {
    let mut lines = vec![format!("Detailed info for snapshot {}:", snapshot.name)];
    if !snapshot.description.is_empty() {
        lines.push(format!("Description: {}", snapshot.description));
    }
    lines.push(format!("Date: {}", snapshot.date.format("%Y-%m-%dT%H:%M:%S%.f")));
    lines.push(format!("{}:", core_label));
    lines.push(format!("  path: {}", snapshot.core.path));
    lines.push(format!("  SHA: {}", snapshot.core.sha));
    lines.push("Addons:".to_string());
    for addon in &snapshot.addons {
        lines.push(format!("  name: {}", addon.name));
        lines.push(format!("  SHA: {}", addon.sha));
    }
    lines
}

impl<V: VersionControl> StateManager<V> {
    /// List all snapshots, or describe `name` in detail when given.
    pub async fn list(&self, name: Option<&str>) -> SnapshotResult<Vec<String>> {
        debug!("In subcommand list.");
        let metadata = self.store().load_existing().await?;

        match name {
            None => Ok(summary_lines(&metadata)),
            Some(name) => {
                let snapshot = metadata
                    .find(name)
                    .ok_or_else(|| SnapshotError::SnapshotNotFound(name.to_string()))?;
                info!("Selecting snapshot {}", name);
                Ok(detail_lines(snapshot, &self.layout().core_label))
            }
        }
    }
}
