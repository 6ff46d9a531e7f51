use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between a clean tree,
/// a tree with unresolved dependencies, and outright failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - every dependency resolved (or the check was not requested)
    Success = 0,
    /// `--fail-on-unresolved` was given and the tree has unresolved nodes
    UnresolvedDependencies = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (missing assets file, I/O error, unknown target, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::UnresolvedDependencies => write!(f, "Unresolved Dependencies (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors raised by the dependency pipeline and its adapters.
///
/// Transient assets-file problems are deliberately absent: the snapshot reader
/// swallows them and keeps the previous snapshot.
#[derive(Debug, Error)]
pub enum DependencyError {
    #[error("project.assets.json not found: {path}\n\n💡 Hint: {suggestion}")]
    AssetsFileNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse assets file: {path}\nDetails: {details}\n\n💡 Hint: Run a NuGet restore and try again")]
    AssetsFileParseError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },

    #[error("Target '{target}' not found in assets file\nAvailable targets: {available}")]
    UnknownTarget { target: String, available: String },

    #[error("Library '{name}' not found in target '{target}'")]
    UnknownLibrary { name: String, target: String },

    /// Validation error for builders and user input
    #[error("Validation error: {message}")]
    Validation { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::UnresolvedDependencies.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(
            format!("{}", ExitCode::UnresolvedDependencies),
            "Unresolved Dependencies (1)"
        );
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (3)"
        );
    }

    #[test]
    fn test_assets_file_not_found_display() {
        let error = DependencyError::AssetsFileNotFound {
            path: PathBuf::from("/src/App/obj/project.assets.json"),
            suggestion: "Run dotnet restore".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("project.assets.json not found"));
        assert!(display.contains("/src/App/obj/project.assets.json"));
        assert!(display.contains("💡 Hint:"));
        assert!(display.contains("Run dotnet restore"));
    }

    #[test]
    fn test_assets_file_parse_error_display() {
        let error = DependencyError::AssetsFileParseError {
            path: PathBuf::from("/obj/project.assets.json"),
            details: "expected value at line 1".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to parse assets file"));
        assert!(display.contains("expected value at line 1"));
    }

    #[test]
    fn test_unknown_target_display() {
        let error = DependencyError::UnknownTarget {
            target: "net48".to_string(),
            available: "net6.0, netstandard2.0".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("'net48'"));
        assert!(display.contains("net6.0, netstandard2.0"));
    }

    #[test]
    fn test_security_error_display() {
        let error = DependencyError::SecurityError {
            path: PathBuf::from("/test/symlink"),
            reason: "Symbolic links are not allowed".to_string(),
            hint: "Use a regular file instead".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Security violation"));
        assert!(display.contains("Use a regular file instead"));
    }
}
