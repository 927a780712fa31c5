//! Exporting a snapshot as one compressed bundle per repository.

use crate::{Revision, Snapshot, SnapshotError, SnapshotResult, StateManager, VersionControl};
use flate2::write::GzEncoder;
use flate2::Compression;
use ofstate_util::path::basename;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// What happened to one archive file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveStatus {
    /// The file was written by this run.
    Created,
    /// A file of the same name already existed and was left alone.
    Skipped,
}

/// One bundle produced (or found) for a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedFile {
    /// Framework label or addon name.
    pub repository: String,
    pub path: PathBuf,
    pub status: ArchiveStatus,
}

/// Result of archiving a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveReport {
    pub snapshot: String,
    /// Directory holding the bundles.
    pub directory: PathBuf,
    /// Description text file, written when the snapshot has a description.
    pub description_file: Option<PathBuf>,
    /// Framework first, then addons in recorded order.
    pub files: Vec<ArchivedFile>,
}

impl ArchiveReport {
    /// Number of bundles written by this run.
    pub fn created(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.status == ArchiveStatus::Created)
            .count()
    }
}

impl<V: VersionControl> StateManager<V> {
    /// Archive snapshot `name`, recording it first if it does not exist yet.
    pub async fn archive(&self, name: &str) -> SnapshotResult<ArchiveReport> {
        debug!("In subcommand archive.");
        let snapshot = self.ensure_snapshot(name).await?;
        self.archive_snapshot(&snapshot).await
    }

    /// Find snapshot `name`, recording it with an empty description when the
    /// metadata file or the entry is missing. Records at most once.
    async fn ensure_snapshot(&self, name: &str) -> SnapshotResult<Snapshot> {
        match self.store().load().await? {
            Some(metadata) => {
                if let Some(snapshot) = metadata.find(name) {
                    info!("Selecting snapshot {}", name);
                    return Ok(snapshot.clone());
                }
                info!("Entry {} does not exist yet. Creating...", name);
            }
            None => {
                info!(
                    "Metadata file {} does not exist yet. Creating...",
                    self.layout().metadata_file
                );
            }
        }

        self.record(name, "", false)
            .await
            .inspect_err(|_| error!("Creation of snapshot {} failed.", name))
    }

    /// Write the bundles for an existing snapshot into the archive directory.
    pub async fn archive_snapshot(&self, snapshot: &Snapshot) -> SnapshotResult<ArchiveReport> {
        let project = self.project_name();
        let directory = self
            .project_dir()
            .join(format!("{}{}", project, self.layout().archive_dir_suffix));
        create_archive_dir(&directory).await?;

        let prefix = format!("{}_{}", project, snapshot.name);
        let mut report = ArchiveReport {
            snapshot: snapshot.name.clone(),
            directory: directory.clone(),
            description_file: None,
            files: Vec::new(),
        };

        if !snapshot.description.is_empty() {
            info!("Writing description file");
            let path = directory.join(format!("{}_description.txt", prefix));
            tokio::fs::write(&path, &snapshot.description).await?;
            report.description_file = Some(path);
        }

        let core_label = &self.layout().core_label;
        let framework_dir = self.framework_dir(&snapshot.core.path);
        let file_name = format!(
            "{}_{}_{}.tar.gz",
            prefix,
            core_label,
            snapshot.core.sha.short()
        );
        let core = self
            .archive_repository(
                core_label,
                &framework_dir,
                &snapshot.core.sha,
                &directory.join(file_name),
            )
            .await?;
        report.files.push(core);

        let addons_dir = self.addons_dir(&framework_dir);
        for addon in &snapshot.addons {
            info!("Archiving addon {}", addon.name);
            let file_name = format!(
                "{}_{}_{}.tar.gz",
                prefix,
                basename(Path::new(&addon.name)),
                addon.sha.short()
            );
            report.files.push(
                self.archive_repository(
                    &addon.name,
                    &addons_dir.join(&addon.name),
                    &addon.sha,
                    &directory.join(file_name),
                )
                .await?,
            );
        }

        info!(
            "Archived snapshot {} ({} created, {} skipped)",
            snapshot.name,
            report.created(),
            report.files.len() - report.created()
        );
        Ok(report)
    }

    async fn archive_repository(
        &self,
        name: &str,
        source: &Path,
        revision: &Revision,
        destination: &Path,
    ) -> SnapshotResult<ArchivedFile> {
        let file_name = basename(destination);
        let archived = |status| ArchivedFile {
            repository: name.to_string(),
            path: destination.to_path_buf(),
            status,
        };

        if tokio::fs::try_exists(destination).await? {
            info!("{} already exists. Skipping ...", file_name);
            return Ok(archived(ArchiveStatus::Skipped));
        }

        if !tokio::fs::try_exists(source).await? {
            return Err(SnapshotError::MissingDirectory {
                name: name.to_string(),
                path: source.to_path_buf(),
            });
        }

        let result = match revision {
            Revision::Commit(sha) => {
                info!("Archiving {}", file_name);
                self.vcs()
                    .export_tree(source, sha, &basename(source), destination)
                    .await
                    .map_err(|e| SnapshotError::archive_failed(name, e.to_string()))
            }
            Revision::NonGit => {
                info!("{} is not a git repo. Packing as tar.gz file.", name);
                let source = source.to_path_buf();
                let target = destination.to_path_buf();
                tokio::task::spawn_blocking(move || pack_directory(&source, &target))
                    .await
                    .map_err(|e| SnapshotError::archive_failed(name, e.to_string()))?
                    .map_err(|e| SnapshotError::archive_failed(name, e.to_string()))
            }
        };

        if let Err(e) = result {
            // A partial bundle would be skipped as complete on the next run.
            let _ = tokio::fs::remove_file(destination).await;
            return Err(e);
        }
        Ok(archived(ArchiveStatus::Created))
    }
}

async fn create_archive_dir(directory: &Path) -> SnapshotResult<()> {
    match tokio::fs::create_dir(directory).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            debug!(
                "Directory {} already exists. Continuing.",
                directory.display()
            );
            Ok(())
        }
        Err(e) => {
            error!("Could not create directory: {}: {}", directory.display(), e);
            Err(SnapshotError::Io(e))
        }
    }
}

/// Pack a plain directory into a gzipped tarball, rooted at its basename.
fn pack_directory(source: &Path, destination: &Path) -> std::io::Result<()> {
    let file = std::fs::File::create(destination)?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder.follow_symlinks(false);
    builder.append_dir_all(basename(source), source)?;
    builder.into_inner()?.finish()?;
    Ok(())
}
