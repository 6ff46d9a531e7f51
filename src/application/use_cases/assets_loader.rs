use crate::assets_file::{AssetsFileDependenciesSnapshot, AssetsFileTarget};
use crate::ports::outbound::AssetsFileReader;
use crate::shared::error::DependencyError;
use crate::shared::Result;
use std::path::Path;
use std::sync::Arc;

/// Reads and parses an assets file. Unlike the snapshot's own update
/// methods, failures are reported to the caller.
pub(super) fn load_assets<R: AssetsFileReader + ?Sized>(
    reader: &R,
    path: &Path,
) -> Result<Arc<AssetsFileDependenciesSnapshot>> {
    let json = reader.read_assets_file(path)?;
    let snapshot = AssetsFileDependenciesSnapshot::empty().update_from_json(&json, path)?;
    Ok(snapshot)
}

/// Resolves `--target`. With `None`, a single-target file yields that
/// target and a multi-target file yields `None`.
pub(super) fn select_target<'a>(
    assets: &'a AssetsFileDependenciesSnapshot,
    target: Option<&str>,
) -> Result<Option<&'a Arc<AssetsFileTarget>>> {
    match target {
        None => Ok(assets.try_get_target(None)),
        Some(name) => assets
            .try_get_target(Some(name))
            .map(Some)
            .ok_or_else(|| unknown_target(assets, name).into()),
    }
}

/// Like [`select_target`], but a multi-target file without `--target`
/// is an error.
pub(super) fn require_target<'a>(
    assets: &'a AssetsFileDependenciesSnapshot,
    target: Option<&str>,
) -> Result<&'a Arc<AssetsFileTarget>> {
    select_target(assets, target)?.ok_or_else(|| {
        let count = assets.data_by_target().len();
        DependencyError::Validation {
            message: format!(
                "the assets file has {} targets; choose one with --target ({})",
                count,
                available_targets(assets)
            ),
        }
        .into()
    })
}

fn unknown_target(assets: &AssetsFileDependenciesSnapshot, requested: &str) -> DependencyError {
    DependencyError::UnknownTarget {
        target: requested.to_string(),
        available: available_targets(assets),
    }
}

fn available_targets(assets: &AssetsFileDependenciesSnapshot) -> String {
    let names = assets
        .data_by_target()
        .values()
        .map(|t| t.target_framework().short_name())
        .collect::<Vec<_>>();
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}
