use crate::application::read_models::{
    DependencyTreeView, DiagnosticsView, LibraryListView, PackagePathView, TargetListView,
};
use crate::shared::Result;

/// TreeFormatter port for rendering query results
///
/// This port abstracts the output format (coloured text, JSON, ...).
/// Each method renders one read model.
pub trait TreeFormatter {
    /// Formats the filtered dependency tree
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format_tree(&self, view: &DependencyTreeView) -> Result<String>;

    /// Formats the list of targets in an assets file
    fn format_targets(&self, view: &TargetListView) -> Result<String>;

    /// Formats the dependents or dependencies of one library
    fn format_libraries(&self, view: &LibraryListView) -> Result<String>;

    /// Formats restore diagnostics
    fn format_diagnostics(&self, view: &DiagnosticsView) -> Result<String>;

    /// Formats a resolved package folder
    fn format_package_path(&self, view: &PackagePathView) -> Result<String>;
}
