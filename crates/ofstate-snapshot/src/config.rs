//! Project layout configuration.
//!
//! The defaults describe an openFrameworks project. A project may override
//! any of them with a `.ofstate.json` file next to its `config.make`.

use crate::{SnapshotError, SnapshotResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Name of the optional per-project override file.
pub const LAYOUT_FILE: &str = ".ofstate.json";

/// File names and tokens that describe a project tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Metadata store, relative to the project directory.
    pub metadata_file: String,

    /// Build configuration holding the framework root.
    pub build_config_file: String,

    /// Key in the build configuration whose value is the framework root.
    pub framework_root_key: String,

    /// Line-oriented list of addon directory names.
    pub addon_manifest_file: String,

    /// Addons directory inside the framework checkout.
    pub addons_dir: String,

    /// Ignore rules inside the addons directory listing bundled addons.
    pub ignore_file: String,

    /// Name prefix shared by the framework's bundled addons.
    pub official_addon_prefix: String,

    /// Label used for the framework in archive file names.
    pub core_label: String,

    /// Suffix appended to the project name for the archive directory.
    pub archive_dir_suffix: String,

    /// Snapshot name used when none is given. Always overwritable.
    pub default_snapshot: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            metadata_file: "metadata.json".to_string(),
            build_config_file: "config.make".to_string(),
            framework_root_key: "OF_ROOT".to_string(),
            addon_manifest_file: "addons.make".to_string(),
            addons_dir: "addons".to_string(),
            ignore_file: ".gitignore".to_string(),
            official_addon_prefix: "ofx".to_string(),
            core_label: "OF".to_string(),
            archive_dir_suffix: "_archive".to_string(),
            default_snapshot: "latest".to_string(),
        }
    }
}

impl LayoutConfig {
    /// Load the layout for a project, applying `.ofstate.json` if present.
    pub async fn load(project_dir: &Path) -> SnapshotResult<Self> {
        let path = project_dir.join(LAYOUT_FILE);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                debug!(path = %path.display(), "Loading layout overrides");
                serde_json::from_str(&content).map_err(|e| SnapshotError::InvalidConfig {
                    path,
                    message: e.to_string(),
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(SnapshotError::Io(e)),
        }
    }

    /// Whether `name` is the implicitly overwritable default snapshot.
    pub fn is_default_snapshot(&self, name: &str) -> bool {
        name == self.default_snapshot
    }
}
