//! Recording the current state of a project into a snapshot.

use crate::project::{read_addon_manifest, read_framework_root, read_official_addons};
use crate::validate::{validate, RepoState};
use crate::{
    AddonEntry, CoreEntry, Revision, Snapshot, SnapshotResult, StateManager, VersionControl,
};
use tracing::{debug, error, info};

impl<V: VersionControl> StateManager<V> {
    /// Capture the commits of the framework and every requested addon and
    /// store them as snapshot `name`.
    ///
    /// An existing snapshot of the same name is only replaced when `update`
    /// is set or `name` is the default snapshot. The metadata file is only
    /// written once the whole snapshot has been assembled.
    pub async fn record(
        &self,
        name: &str,
        description: &str,
        update: bool,
    ) -> SnapshotResult<Snapshot> {
        debug!("In subcommand record.");
        let layout = self.layout();
        let project_dir = self.project_dir();

        let requested = read_addon_manifest(project_dir, layout).await?;
        let core_path = read_framework_root(project_dir, layout).await?;

        let framework_dir = self.framework_dir(&core_path);
        info!("Processing {} at {}", layout.core_label, core_path);
        validate(self.vcs(), &layout.core_label, &framework_dir, true)
            .await
            .inspect_err(|_| {
                error!(
                    "{} git repo could not be validated successfully.",
                    layout.core_label
                )
            })?;

        debug!("Recording commit SHA");
        let core_sha = self.vcs().current_commit(&framework_dir).await?;
        debug!("{} commit SHA: {}", layout.core_label, core_sha);
        let core = CoreEntry {
            path: core_path,
            sha: Revision::Commit(core_sha),
        };

        info!("Processing addons");
        let addons_dir = self.addons_dir(&framework_dir);
        let official = read_official_addons(&addons_dir, layout).await?;

        let mut addons: Vec<AddonEntry> = Vec::new();
        for addon in requested {
            if official.contains(&addon) {
                debug!("Skipping official addon {}", addon);
                continue;
            }
            if addons.iter().any(|entry| entry.name == addon) {
                debug!("Skipping duplicate addon {}", addon);
                continue;
            }

            info!("Processing addon {}", addon);
            let addon_dir = addons_dir.join(&addon);
            let state = validate(self.vcs(), &addon, &addon_dir, false)
                .await
                .inspect_err(|_| {
                    error!("{} git repo could not be validated successfully.", addon)
                })?;

            let sha = match state {
                RepoState::Clean => Revision::Commit(self.vcs().current_commit(&addon_dir).await?),
                RepoState::NonGit => Revision::NonGit,
            };
            addons.push(AddonEntry { name: addon, sha });
        }

        info!("Storing metadata");
        let snapshot = Snapshot::new(name, description, core, addons);

        let mut metadata = self.store().load_or_default().await?;
        let overwrite = update || layout.is_default_snapshot(name);
        metadata.insert(snapshot.clone(), overwrite)?;
        self.store().save(&metadata).await?;

        info!("Recorded snapshot {}", name);
        Ok(snapshot)
    }
}
