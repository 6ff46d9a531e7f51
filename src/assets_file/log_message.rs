use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Severity of a restore diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum LogLevel {
    Debug,
    Verbose,
    Information,
    Minimal,
    Warning,
    Error,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "verbose" => Ok(LogLevel::Verbose),
            "information" => Ok(LogLevel::Information),
            "minimal" => Ok(LogLevel::Minimal),
            "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// NuGet warning level, 0 (most severe) to 3.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct WarningLevel(u8);

impl WarningLevel {
    pub const SEVERE: WarningLevel = WarningLevel(0);
    pub const IMPORTANT: WarningLevel = WarningLevel(1);
    pub const DEFAULT: WarningLevel = WarningLevel(2);
    pub const MINIMAL: WarningLevel = WarningLevel(3);

    /// Values past 3 are clamped.
    pub fn new(level: u8) -> Self {
        WarningLevel(level.min(3))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// One entry of the assets file `logs` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetsFileLogMessage {
    pub code: String,
    pub level: LogLevel,
    pub warning_level: WarningLevel,
    pub message: String,
    pub library_id: Option<String>,
    pub target_graphs: Vec<String>,
}

impl AssetsFileLogMessage {
    /// Messages without target graphs apply to every target.
    pub fn applies_to(&self, target_name: &str) -> bool {
        self.target_graphs.is_empty()
            || self
                .target_graphs
                .iter()
                .any(|g| g.eq_ignore_ascii_case(target_name))
    }

    /// Whether this message marks `library_name` as failed to restore.
    pub fn is_error_for(&self, library_name: &str) -> bool {
        self.level == LogLevel::Error
            && self
                .library_id
                .as_deref()
                .is_some_and(|id| id.eq_ignore_ascii_case(library_name))
    }
}
