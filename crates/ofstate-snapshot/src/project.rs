//! Reading the project's input files.
//!
//! - the addon manifest (`addons.make`): one addon directory per line
//! - the build configuration (`config.make`): `OF_ROOT = <path>`
//! - the framework's addon ignore rules (`addons/.gitignore`): bundled
//!   addons appear as `!ofx...` exceptions

use crate::{LayoutConfig, SnapshotError, SnapshotResult};
use std::path::Path;
use tracing::{debug, info};

/// Addon names listed in a manifest, in order.
///
/// Blank lines and `#` comments are skipped. A trailing `/` is dropped.
pub fn parse_addon_manifest(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.trim_end_matches('/').to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Value of `key = value` in a make-style configuration, ignoring comments.
pub fn parse_framework_root(content: &str, key: &str) -> Option<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .find(|(k, _)| k.trim() == key)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Addons bundled with the framework, taken from `!<prefix>...` ignore exceptions.
pub fn parse_official_addons(content: &str, prefix: &str) -> Vec<String> {
    let marker = format!("!{prefix}");
    content
        .lines()
        .filter(|line| line.starts_with(&marker))
        .map(|line| line[1..].trim().trim_end_matches('/').to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Read the addon manifest. A missing manifest means no addons.
pub async fn read_addon_manifest(
    project_dir: &Path,
    layout: &LayoutConfig,
) -> SnapshotResult<Vec<String>> {
    let path = project_dir.join(&layout.addon_manifest_file);
    let addons = match tokio::fs::read_to_string(&path).await {
        Ok(content) => parse_addon_manifest(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No {} file found.", layout.addon_manifest_file);
            Vec::new()
        }
        Err(e) => return Err(SnapshotError::Io(e)),
    };

    if addons.is_empty() {
        info!("No addons found.");
    }
    Ok(addons)
}

/// Read the framework root path from the build configuration.
pub async fn read_framework_root(
    project_dir: &Path,
    layout: &LayoutConfig,
) -> SnapshotResult<String> {
    let path = project_dir.join(&layout.build_config_file);
    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(SnapshotError::ConfigNotFound(path));
        }
        Err(e) => return Err(SnapshotError::Io(e)),
    };

    parse_framework_root(&content, &layout.framework_root_key).ok_or_else(|| {
        SnapshotError::FrameworkRootNotFound {
            file: layout.build_config_file.clone(),
            project: project_dir.to_path_buf(),
        }
    })
}

/// Read the addons bundled with the framework from its addons directory.
pub async fn read_official_addons(
    addons_dir: &Path,
    layout: &LayoutConfig,
) -> SnapshotResult<Vec<String>> {
    let path = addons_dir.join(&layout.ignore_file);
    match tokio::fs::read_to_string(&path).await {
        Ok(content) => Ok(parse_official_addons(
            &content,
            &layout.official_addon_prefix,
        )),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No {} in {}", layout.ignore_file, addons_dir.display());
            Ok(Vec::new())
        }
        Err(e) => Err(SnapshotError::Io(e)),
    }
}
