use std::path::{Path, PathBuf};

const METADATA_FILE: &str = ".nupkg.metadata";

/// Finds an extracted package in the user package folder, then in each
/// fallback folder, using NuGet's `{id}/{version}` lower-case layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallbackPackagePathResolver {
    folders: Vec<PathBuf>,
}

impl FallbackPackagePathResolver {
    /// `folders[0]` is the user folder; the rest are fallbacks.
    pub fn new(folders: Vec<PathBuf>) -> Self {
        Self { folders }
    }

    pub fn folders(&self) -> &[PathBuf] {
        &self.folders
    }

    pub fn try_resolve(&self, package_id: &str, version: &str) -> Option<PathBuf> {
        let id = package_id.to_ascii_lowercase();
        let version = normalize_version(version);
        self.folders
            .iter()
            .map(|root| root.join(&id).join(&version))
            .find(|dir| is_extracted_package(dir, &id, &version))
    }
}

/// Lower-cases and drops SemVer build metadata, as the folder layout does.
fn normalize_version(version: &str) -> String {
    version
        .split('+')
        .next()
        .unwrap_or(version)
        .to_ascii_lowercase()
}

fn is_extracted_package(dir: &Path, id: &str, version: &str) -> bool {
    dir.join(METADATA_FILE).is_file()
        || dir
            .join(format!("{}.{}.nupkg.sha512", id, version))
            .is_file()
}
