//! Views over the raw assets file, for the read-only query commands

use crate::assets_file::{AssetsFileLogMessage, AssetsFileTarget, AssetsFileTargetLibrary};
use serde::Serialize;
use std::path::PathBuf;

/// Every target in an assets file
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetListView {
    pub project_name: Option<String>,
    pub targets: Vec<TargetSummaryView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetSummaryView {
    /// Name as written in the assets file
    pub name: String,
    pub short_name: String,
    pub full_name: String,
    pub package_count: usize,
    pub project_count: usize,
    pub diagnostic_count: usize,
}

impl TargetSummaryView {
    pub fn from_target(target: &AssetsFileTarget) -> Self {
        let libraries = target.libraries();
        Self {
            name: target.name().to_string(),
            short_name: target.target_framework().short_name().to_string(),
            full_name: target.target_framework().full_name().to_string(),
            package_count: libraries.iter().filter(|l| l.is_package()).count(),
            project_count: libraries.iter().filter(|l| l.is_project()).count(),
            diagnostic_count: target.logs().len(),
        }
    }
}

/// Which direction a [`LibraryListView`] walks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LibraryRelation {
    Dependents,
    Dependencies,
}

/// Dependents or dependencies of one library in one target
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryListView {
    pub target: String,
    pub library: String,
    pub relation: LibraryRelation,
    pub libraries: Vec<LibraryView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryView {
    pub name: String,
    pub version: String,
    #[serde(rename = "type")]
    pub library_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl From<&AssetsFileTargetLibrary> for LibraryView {
    fn from(library: &AssetsFileTargetLibrary) -> Self {
        Self {
            name: library.name.to_string(),
            version: library.version.to_string(),
            library_type: library.library_type.to_string(),
            path: library.path.as_deref().map(str::to_string),
        }
    }
}

/// Restore diagnostics, for the whole file or one target
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub messages: Vec<DiagnosticView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticView {
    pub code: String,
    pub level: String,
    pub warning_level: u8,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub target_graphs: Vec<String>,
}

impl From<&AssetsFileLogMessage> for DiagnosticView {
    fn from(message: &AssetsFileLogMessage) -> Self {
        Self {
            code: message.code.clone(),
            level: message.level.to_string(),
            warning_level: message.warning_level.value(),
            message: message.message.clone(),
            library_id: message.library_id.clone(),
            target_graphs: message.target_graphs.clone(),
        }
    }
}

/// Where a package was found on disk, if anywhere
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagePathView {
    pub name: String,
    pub version: String,
    pub path: Option<PathBuf>,
    /// Folders that were searched, user folder first
    pub searched: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets_file::{LogLevel, WarningLevel};

    #[test]
    fn test_diagnostic_view_from_log_message() {
        let message = AssetsFileLogMessage {
            code: "NU1101".to_string(),
            level: LogLevel::Error,
            warning_level: WarningLevel::SEVERE,
            message: "Unable to find package Missing".to_string(),
            library_id: Some("Missing".to_string()),
            target_graphs: vec!["net6.0".to_string()],
        };
        let view = DiagnosticView::from(&message);
        assert_eq!(view.code, "NU1101");
        assert_eq!(view.level, "Error");
        assert_eq!(view.warning_level, 0);
        assert_eq!(view.library_id.as_deref(), Some("Missing"));
    }

    #[test]
    fn test_library_view_serializes_type_field() {
        let view = LibraryView {
            name: "A".to_string(),
            version: "1.0.0".to_string(),
            library_type: "package".to_string(),
            path: None,
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["type"], "package");
        assert!(json.get("path").is_none());
    }
}
