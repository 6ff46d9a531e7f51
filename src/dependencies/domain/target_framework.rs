use super::ignore_case;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

const ANY_SHORT_NAME: &str = "any";

/// A framework a project builds for, e.g. `net6.0` / `.NETCoreApp,Version=v6.0`.
///
/// Equality, hashing and ordering use the full name, ignoring ASCII case.
#[derive(Debug, Clone, Serialize)]
pub struct TargetFramework {
    short_name: String,
    full_name: String,
}

impl TargetFramework {
    pub fn new(short_name: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            short_name: short_name.into(),
            full_name: full_name.into(),
        }
    }

    /// Builds a framework whose short and full names are the same string.
    /// Assets files keyed by alias (`net6.0`) produce these.
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            short_name: name.clone(),
            full_name: name,
        }
    }

    /// Derives the short folder name from a full framework name such as
    /// `.NETCoreApp,Version=v6.0`. Names that do not parse are kept as-is.
    pub fn from_full_name(full_name: impl Into<String>) -> Self {
        let full_name = full_name.into();
        let short_name = short_name_of(&full_name).unwrap_or_else(|| full_name.clone());
        Self {
            short_name,
            full_name,
        }
    }

    /// Placeholder used before the project's frameworks are known.
    pub fn any() -> Self {
        Self::from_name(ANY_SHORT_NAME)
    }

    pub fn is_any(&self) -> bool {
        self.full_name.eq_ignore_ascii_case(ANY_SHORT_NAME)
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }
}

impl PartialEq for TargetFramework {
    fn eq(&self, other: &Self) -> bool {
        self.full_name.eq_ignore_ascii_case(&other.full_name)
    }
}

impl Eq for TargetFramework {}

impl Hash for TargetFramework {
    fn hash<H: Hasher>(&self, state: &mut H) {
        ignore_case::hash(&self.full_name, state);
    }
}

impl PartialOrd for TargetFramework {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TargetFramework {
    fn cmp(&self, other: &Self) -> Ordering {
        ignore_case::cmp(&self.full_name, &other.full_name)
    }
}

impl fmt::Display for TargetFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name)
    }
}

fn short_name_of(full_name: &str) -> Option<String> {
    let mut parts = full_name.split(',');
    let identifier = parts.next()?.trim();
    let version = parts
        .find_map(|p| p.trim().strip_prefix("Version="))?
        .trim_start_matches(['v', 'V']);
    let major: u32 = version.split('.').next()?.parse().ok()?;

    let short = match identifier.to_ascii_lowercase().as_str() {
        ".netcoreapp" if major >= 5 => format!("net{}", version),
        ".netcoreapp" => format!("netcoreapp{}", version),
        ".netstandard" => format!("netstandard{}", version),
        ".netframework" => format!("net{}", version.replace('.', "")),
        _ => return None,
    };
    Some(short)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equality_uses_full_name_ignoring_case() {
        let a = TargetFramework::new("net6.0", ".NETCoreApp,Version=v6.0");
        let b = TargetFramework::new("NET6.0", ".netcoreapp,version=v6.0");
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_any() {
        assert!(TargetFramework::any().is_any());
        assert!(!TargetFramework::from_name("net48").is_any());
    }

    #[test]
    fn test_from_full_name() {
        let cases = [
            (".NETCoreApp,Version=v6.0", "net6.0"),
            (".NETCoreApp,Version=v3.1", "netcoreapp3.1"),
            (".NETStandard,Version=v2.0", "netstandard2.0"),
            (".NETFramework,Version=v4.7.2", "net472"),
            ("net8.0", "net8.0"),
        ];
        for (full, short) in cases {
            assert_eq!(TargetFramework::from_full_name(full).short_name(), short);
        }
    }

    #[test]
    fn test_display_is_short_name() {
        let tf = TargetFramework::new("netstandard2.0", ".NETStandard,Version=v2.0");
        assert_eq!(tf.to_string(), "netstandard2.0");
    }
}
