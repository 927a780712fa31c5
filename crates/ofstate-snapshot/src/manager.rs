//! The per-project entry point for snapshot operations.

use crate::{LayoutConfig, MetadataStore, SnapshotError, SnapshotResult, VersionControl};
use ofstate_util::path;
use std::path::{Path, PathBuf};

/// Records, checks out, archives and lists snapshots of one project.
///
/// All paths are derived from the project directory held here; the
/// process working directory is never consulted or changed.
pub struct StateManager<V> {
    project_dir: PathBuf,
    layout: LayoutConfig,
    store: MetadataStore,
    vcs: V,
}

impl<V: VersionControl> StateManager<V> {
    /// Open a project directory, loading its layout overrides if any.
    pub async fn open(project_dir: impl AsRef<Path>, vcs: V) -> SnapshotResult<Self> {
        let project_dir = project_dir.as_ref();
        let project_dir = match tokio::fs::canonicalize(project_dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SnapshotError::ProjectNotFound(project_dir.to_path_buf()));
            }
            Err(e) => return Err(SnapshotError::Io(e)),
        };
        let layout = LayoutConfig::load(&project_dir).await?;
        Ok(Self::with_layout(project_dir, layout, vcs))
    }

    /// Create a manager with an explicit layout. No filesystem access.
    pub fn with_layout(project_dir: impl Into<PathBuf>, layout: LayoutConfig, vcs: V) -> Self {
        let project_dir = project_dir.into();
        let store = MetadataStore::new(project_dir.join(&layout.metadata_file));
        Self {
            project_dir,
            layout,
            store,
            vcs,
        }
    }

    /// The project directory.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Project name, used to prefix archive files.
    pub fn project_name(&self) -> String {
        path::basename(&self.project_dir)
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn store(&self) -> &MetadataStore {
        &self.store
    }

    pub fn vcs(&self) -> &V {
        &self.vcs
    }

    /// Framework checkout for a path as written in the build configuration.
    pub(crate) fn framework_dir(&self, core_path: &str) -> PathBuf {
        path::resolve(&self.project_dir, Path::new(core_path))
    }

    /// Addons directory inside a framework checkout.
    pub(crate) fn addons_dir(&self, framework_dir: &Path) -> PathBuf {
        framework_dir.join(&self.layout.addons_dir)
    }
}
