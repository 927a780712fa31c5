//! Restoring repositories to the commits recorded in a snapshot.

use crate::validate::validate;
use crate::{SnapshotError, SnapshotResult, StateManager, VersionControl};
use std::path::Path;
use tracing::{debug, error, info, warn};

/// A repository switched during checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchedRepo {
    /// Framework label or addon name.
    pub name: String,
    /// Branch name if one pointed at the commit, otherwise the commit hash.
    pub refname: String,
}

/// Result of checking out a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReport {
    pub snapshot: String,
    /// Framework first, then git addons in recorded order.
    pub switched: Vec<SwitchedRepo>,
    /// Addons recorded without version control, left untouched.
    pub skipped: Vec<String>,
}

impl<V: VersionControl> StateManager<V> {
    /// Switch the framework and every git addon to snapshot `name`.
    ///
    /// All repositories are validated before any of them is touched. A
    /// failure while switching leaves already switched repositories as they
    /// are; there is no rollback.
    pub async fn checkout(&self, name: &str) -> SnapshotResult<CheckoutReport> {
        debug!("In subcommand checkout.");
        let metadata = self.store().load_existing().await?;
        let snapshot = metadata
            .find(name)
            .ok_or_else(|| SnapshotError::SnapshotNotFound(name.to_string()))?;
        info!("Selecting snapshot {}", name);

        let core_label = &self.layout().core_label;
        let framework_dir = self.framework_dir(&snapshot.core.path);
        let addons_dir = self.addons_dir(&framework_dir);

        info!("Making sure repos are clean: {}", core_label);
        validate(self.vcs(), core_label, &framework_dir, true)
            .await
            .inspect_err(|_| {
                error!("{} git repo could not be validated successfully.", core_label)
            })?;

        info!("Making sure repos are clean: addons");
        let skipped: Vec<String> = snapshot
            .non_git_addons()
            .into_iter()
            .map(str::to_string)
            .collect();
        for addon in snapshot.addons.iter().filter(|addon| addon.sha.is_git()) {
            info!("Processing addon {}", addon.name);
            validate(self.vcs(), &addon.name, &addons_dir.join(&addon.name), true)
                .await
                .inspect_err(|_| {
                    error!("{} git repo could not be validated successfully.", addon.name)
                })?;
        }

        let mut switched = Vec::new();

        info!("Checking out {} of {}", snapshot.core.sha, snapshot.core.path);
        let refname = self
            .switch_repository(core_label, &framework_dir, snapshot.core.sha.as_str())
            .await?;
        switched.push(SwitchedRepo {
            name: core_label.clone(),
            refname,
        });

        info!("Checking out addons");
        for addon in &snapshot.addons {
            let Some(sha) = addon.sha.commit() else {
                continue;
            };
            info!("Checking out {} of {}", sha, addon.name);
            let refname = self
                .switch_repository(&addon.name, &addons_dir.join(&addon.name), sha)
                .await?;
            switched.push(SwitchedRepo {
                name: addon.name.clone(),
                refname,
            });
        }

        info!("Finished checking out snapshot {}", snapshot.name);
        if !skipped.is_empty() {
            warn!(
                "The following addons not under git control were found. Correct code state cannot be guaranteed!"
            );
            for name in &skipped {
                warn!("{}", name);
            }
        }

        Ok(CheckoutReport {
            snapshot: snapshot.name.clone(),
            switched,
            skipped,
        })
    }

    /// Check out `sha` in `dir`, preferring a branch that points at it.
    async fn switch_repository(
        &self,
        name: &str,
        dir: &Path,
        sha: &str,
    ) -> SnapshotResult<String> {
        let refname = self.named_ref(dir, sha).await?;
        self.vcs()
            .switch_to(dir, &refname)
            .await
            .map_err(|e| SnapshotError::SwitchFailed {
                name: name.to_string(),
                message: e.to_string(),
            })?;
        Ok(refname)
    }

    /// A branch name pointing at `sha`, or `sha` itself when none does.
    ///
    /// With several candidates the most recently authored branch wins.
    async fn named_ref(&self, dir: &Path, sha: &str) -> SnapshotResult<String> {
        let branches = self.vcs().branches_at(dir, sha).await?;
        match branches.last() {
            Some(branch) => {
                debug!("Found branch {} pointing at {}", branch, sha);
                Ok(branch.clone())
            }
            None => Ok(sha.to_string()),
        }
    }
}
