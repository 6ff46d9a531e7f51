use crate::ports::outbound::AssetsFileReader;
use crate::shared::error::DependencyError;
use crate::shared::security::{check_readable_file, MAX_FILE_SIZE};
use crate::shared::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// File name NuGet restore writes under the intermediate output folder.
pub const ASSETS_FILE_NAME: &str = "project.assets.json";

/// Intermediate output folder, relative to the project directory.
const OBJ_DIR: &str = "obj";

/// FileSystemReader adapter for reading assets files from the file system
///
/// This adapter implements the AssetsFileReader port with the shared
/// symlink and size checks applied before every read.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetsFileReader for FileSystemReader {
    fn read_assets_file(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(DependencyError::AssetsFileNotFound {
                path: path.to_path_buf(),
                suggestion: "Run `dotnet restore` for the project, or pass the file with --assets."
                    .to_string(),
            }
            .into());
        }

        check_readable_file(path, "assets file", MAX_FILE_SIZE)?;

        let content = fs::read_to_string(path).map_err(|e| DependencyError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;
        Ok(content)
    }
}

/// Maps what the user pointed at to the assets file to read.
///
/// - a directory: `<dir>/obj/project.assets.json`, or `<dir>/project.assets.json`
///   when the directory is itself an `obj` folder
/// - a project file (`*.csproj`, `*.fsproj`, ...): the assets file next to it
/// - anything else is taken as the assets file
pub fn resolve_assets_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        let is_obj = path
            .file_name()
            .is_some_and(|name| name.eq_ignore_ascii_case(OBJ_DIR));
        return if is_obj {
            path.join(ASSETS_FILE_NAME)
        } else {
            path.join(OBJ_DIR).join(ASSETS_FILE_NAME)
        };
    }
    if is_project_file(path) {
        return assets_path_for_project(path);
    }
    path.to_path_buf()
}

/// `obj/project.assets.json` next to a project file.
pub fn assets_path_for_project(project_file: &Path) -> PathBuf {
    project_file
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(OBJ_DIR)
        .join(ASSETS_FILE_NAME)
}

fn is_project_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.len() > 4 && ext.to_ascii_lowercase().ends_with("proj"))
}
