use super::format::{split_library_key, RawLibrary, RawTargetLibrary, EMPTY_FOLDER_PLACEHOLDER};
use super::string_pool::intern;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetsFileLibraryType {
    Package,
    Project,
    Unknown,
}

impl AssetsFileLibraryType {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("package") => AssetsFileLibraryType::Package,
            Some(v) if v.eq_ignore_ascii_case("project") => AssetsFileLibraryType::Project,
            _ => AssetsFileLibraryType::Unknown,
        }
    }
}

impl fmt::Display for AssetsFileLibraryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssetsFileLibraryType::Package => "package",
            AssetsFileLibraryType::Project => "project",
            AssetsFileLibraryType::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// A dependency edge as written in the target section: name plus the
/// requested version range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetsFileTargetLibraryDependency {
    pub name: Arc<str>,
    pub version_range: Arc<str>,
}

/// One library of one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetsFileTargetLibrary {
    pub name: Arc<str>,
    pub version: Arc<str>,
    pub library_type: AssetsFileLibraryType,
    pub dependencies: Vec<AssetsFileTargetLibraryDependency>,
    pub compile_time_assemblies: Vec<Arc<str>>,
    pub framework_assemblies: Vec<Arc<str>>,
    pub content_files: Vec<Arc<str>>,
    /// From the `libraries` section: package folder path or project path.
    pub path: Option<Arc<str>>,
    pub msbuild_project: Option<Arc<str>>,
    /// Framework a referenced project was built for.
    pub framework: Option<Arc<str>>,
}

impl AssetsFileTargetLibrary {
    pub(crate) fn from_raw(key: &str, raw: &RawTargetLibrary, library: Option<&RawLibrary>) -> Option<Self> {
        let (name, version) = split_library_key(key)?;
        let library_type = AssetsFileLibraryType::parse(
            raw.library_type
                .as_deref()
                .or_else(|| library.and_then(|l| l.library_type.as_deref())),
        );

        let dependencies = raw
            .dependencies
            .iter()
            .map(|(name, range)| AssetsFileTargetLibraryDependency {
                name: intern(name),
                version_range: intern(range),
            })
            .collect();

        let compile_time_assemblies = raw
            .compile
            .keys()
            .filter(|path| !is_placeholder(path))
            .map(|path| intern(path))
            .collect();

        Some(Self {
            name: intern(name),
            version: intern(version),
            library_type,
            dependencies,
            compile_time_assemblies,
            framework_assemblies: raw.framework_assemblies.iter().map(|a| intern(a)).collect(),
            content_files: raw.content_files.keys().map(|f| intern(f)).collect(),
            path: library.and_then(|l| l.path.as_deref()).map(intern),
            msbuild_project: library.and_then(|l| l.msbuild_project.as_deref()).map(intern),
            framework: raw.framework.as_deref().map(intern),
        })
    }

    /// `"Name/Version"`, the key used by the assets file.
    pub fn key(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }

    pub fn is_package(&self) -> bool {
        self.library_type == AssetsFileLibraryType::Package
    }

    pub fn is_project(&self) -> bool {
        self.library_type == AssetsFileLibraryType::Project
    }
}

fn is_placeholder(path: &str) -> bool {
    path.rsplit('/').next() == Some(EMPTY_FOLDER_PLACEHOLDER)
}
