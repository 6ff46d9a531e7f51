//! Reader for NuGet's `project.assets.json` lock file.

mod format;
pub mod library;
pub mod log_message;
pub mod package_path_resolver;
pub mod snapshot;
mod string_pool;
pub mod target;

pub use library::{AssetsFileLibraryType, AssetsFileTargetLibrary, AssetsFileTargetLibraryDependency};
pub use log_message::{AssetsFileLogMessage, LogLevel, WarningLevel};
pub use package_path_resolver::FallbackPackagePathResolver;
pub use snapshot::AssetsFileDependenciesSnapshot;
pub use target::{AssetsFileTarget, DeclaredDependency, ProjectFileDependency};
