use crate::shared::Result;
use std::path::Path;

/// AssetsFileReader port for reading `project.assets.json` contents
///
/// This port abstracts the file system operations needed to read
/// the NuGet assets file written by restore.
pub trait AssetsFileReader {
    /// Reads the assets file at the specified path
    ///
    /// # Arguments
    /// * `path` - Path to `project.assets.json`
    ///
    /// # Returns
    /// The raw JSON content of the assets file
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist
    /// - The file fails the security checks (symlink, size)
    /// - The file cannot be read due to permissions or I/O errors
    fn read_assets_file(&self, path: &Path) -> Result<String>;
}
