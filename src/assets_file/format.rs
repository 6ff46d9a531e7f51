//! Serde view of `project.assets.json`. Only the sections the snapshot reads
//! are modelled; everything else is ignored.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawAssetsFile {
    #[serde(default)]
    pub version: Option<u32>,
    /// Target name → `"Name/Version"` → library.
    #[serde(default)]
    pub targets: BTreeMap<String, BTreeMap<String, RawTargetLibrary>>,
    #[serde(default)]
    pub libraries: BTreeMap<String, RawLibrary>,
    #[serde(default)]
    pub project_file_dependency_groups: BTreeMap<String, Vec<String>>,
    /// Kept as a map so the file order survives; the first folder is the
    /// user package folder.
    #[serde(default)]
    pub package_folders: Map<String, Value>,
    #[serde(default)]
    pub project: Option<RawProject>,
    #[serde(default)]
    pub logs: Vec<RawLogMessage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawTargetLibrary {
    #[serde(rename = "type", default)]
    pub library_type: Option<String>,
    #[serde(default)]
    pub framework: Option<String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub compile: Map<String, Value>,
    #[serde(default)]
    pub framework_assemblies: Vec<String>,
    #[serde(default)]
    pub content_files: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawLibrary {
    #[serde(rename = "type", default)]
    pub library_type: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub msbuild_project: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawProject {
    #[serde(default)]
    pub restore: Option<RawRestore>,
    #[serde(default)]
    pub frameworks: BTreeMap<String, RawProjectFramework>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawRestore {
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub project_path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawProjectFramework {
    #[serde(default)]
    pub target_alias: Option<String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, RawProjectDependency>,
    #[serde(default)]
    pub framework_references: BTreeMap<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawProjectDependency {
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub auto_referenced: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawLogMessage {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub warning_level: Option<u8>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub library_id: Option<String>,
    #[serde(default)]
    pub target_graphs: Vec<String>,
}

/// Placeholder NuGet writes for an empty lib folder.
pub(crate) const EMPTY_FOLDER_PLACEHOLDER: &str = "_._";

/// Splits a `"Name/Version"` library key.
pub(crate) fn split_library_key(key: &str) -> Option<(&str, &str)> {
    let (name, version) = key.split_once('/')?;
    if name.is_empty() {
        return None;
    }
    Some((name, version))
}

/// Splits a project file dependency such as `"Newtonsoft.Json >= 13.0.1"`.
pub(crate) fn split_dependency_group_entry(entry: &str) -> (&str, Option<&str>) {
    match entry.trim().split_once(' ') {
        Some((name, range)) => {
            let range = range.trim();
            (name, (!range.is_empty()).then_some(range))
        }
        None => (entry.trim(), None),
    }
}
