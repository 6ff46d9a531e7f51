use std::path::PathBuf;

/// What to look up in an assets file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetsQuery {
    /// Every target and its library counts
    Targets,
    /// Libraries that depend on `name`
    Dependents { name: String },
    /// Direct dependencies of `name`, optionally pinned to a version
    Dependencies {
        name: String,
        version: Option<String>,
    },
    /// Restore log messages, optionally only those for one target
    Diagnostics,
    /// Extracted folder of a package
    PackagePath { name: String, version: String },
}

/// Request DTO for the read-only assets file queries
#[derive(Debug, Clone)]
pub struct AssetsQueryRequest {
    pub assets_path: PathBuf,
    pub target: Option<String>,
    pub query: AssetsQuery,
}

impl AssetsQueryRequest {
    pub fn new(assets_path: PathBuf, target: Option<String>, query: AssetsQuery) -> Self {
        Self {
            assets_path,
            target,
            query,
        }
    }
}
