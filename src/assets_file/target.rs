use super::library::AssetsFileTargetLibrary;
use super::log_message::AssetsFileLogMessage;
use crate::dependencies::domain::TargetFramework;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// A direct reference of the project, from `projectFileDependencyGroups`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFileDependency {
    pub name: Arc<str>,
    pub version_range: Option<Arc<str>>,
}

/// A dependency declared under `project.frameworks.<tfm>.dependencies`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredDependency {
    pub name: Arc<str>,
    pub version_range: Option<Arc<str>>,
    /// Added by the SDK rather than written in the project file.
    pub auto_referenced: bool,
}

type DependencyKey = (String, Option<String>);
type LibraryList = Arc<[Arc<AssetsFileTargetLibrary>]>;

/// All libraries restored for one target, with lazily built lookup caches.
#[derive(Debug)]
pub struct AssetsFileTarget {
    name: Arc<str>,
    target_framework: TargetFramework,
    libraries: Vec<Arc<AssetsFileTargetLibrary>>,
    library_by_name: HashMap<String, Arc<AssetsFileTargetLibrary>>,
    project_file_dependencies: Vec<ProjectFileDependency>,
    declared_dependencies: Vec<DeclaredDependency>,
    framework_references: Vec<Arc<str>>,
    logs: Vec<Arc<AssetsFileLogMessage>>,
    dependents: OnceLock<HashMap<String, Vec<Arc<AssetsFileTargetLibrary>>>>,
    dependencies_by_version: DashMap<DependencyKey, Option<LibraryList>>,
}

pub(crate) struct TargetParts {
    pub name: Arc<str>,
    pub target_framework: TargetFramework,
    pub libraries: Vec<AssetsFileTargetLibrary>,
    pub project_file_dependencies: Vec<ProjectFileDependency>,
    pub declared_dependencies: Vec<DeclaredDependency>,
    pub framework_references: Vec<Arc<str>>,
    pub logs: Vec<Arc<AssetsFileLogMessage>>,
}

impl AssetsFileTarget {
    pub(crate) fn new(parts: TargetParts) -> Self {
        let mut libraries: Vec<Arc<AssetsFileTargetLibrary>> =
            parts.libraries.into_iter().map(Arc::new).collect();
        libraries.sort_by(|a, b| {
            a.name
                .to_ascii_lowercase()
                .cmp(&b.name.to_ascii_lowercase())
        });
        let library_by_name = libraries
            .iter()
            .map(|l| (l.name.to_ascii_lowercase(), Arc::clone(l)))
            .collect();

        Self {
            name: parts.name,
            target_framework: parts.target_framework,
            libraries,
            library_by_name,
            project_file_dependencies: parts.project_file_dependencies,
            declared_dependencies: parts.declared_dependencies,
            framework_references: parts.framework_references,
            logs: parts.logs,
            dependents: OnceLock::new(),
            dependencies_by_version: DashMap::new(),
        }
    }

    /// Target key as written in the assets file.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target_framework(&self) -> &TargetFramework {
        &self.target_framework
    }

    /// Libraries ordered by name.
    pub fn libraries(&self) -> &[Arc<AssetsFileTargetLibrary>] {
        &self.libraries
    }

    pub fn project_file_dependencies(&self) -> &[ProjectFileDependency] {
        &self.project_file_dependencies
    }

    pub fn declared_dependencies(&self) -> &[DeclaredDependency] {
        &self.declared_dependencies
    }

    pub fn framework_references(&self) -> &[Arc<str>] {
        &self.framework_references
    }

    /// Diagnostics that apply to this target.
    pub fn logs(&self) -> &[Arc<AssetsFileLogMessage>] {
        &self.logs
    }

    pub fn try_get_library(&self, name: &str) -> Option<&Arc<AssetsFileTargetLibrary>> {
        self.library_by_name.get(&name.to_ascii_lowercase())
    }

    /// A package library, optionally pinned to `version`.
    pub fn try_get_package(
        &self,
        name: &str,
        version: Option<&str>,
    ) -> Option<&Arc<AssetsFileTargetLibrary>> {
        self.try_get_library(name)
            .filter(|l| l.is_package() && version_matches(l, version))
    }

    pub fn try_get_project(&self, name: &str) -> Option<&Arc<AssetsFileTargetLibrary>> {
        self.try_get_library(name).filter(|l| l.is_project())
    }

    /// Libraries that list `name` as a dependency.
    ///
    /// Every library, and every name some library depends on, has an entry
    /// (possibly empty). Names the target never mentions return `None`.
    pub fn try_get_dependents(&self, name: &str) -> Option<&[Arc<AssetsFileTargetLibrary>]> {
        self.dependents
            .get_or_init(|| self.build_dependents_index())
            .get(&name.to_ascii_lowercase())
            .map(Vec::as_slice)
    }

    fn build_dependents_index(&self) -> HashMap<String, Vec<Arc<AssetsFileTargetLibrary>>> {
        let mut index: HashMap<String, Vec<Arc<AssetsFileTargetLibrary>>> = HashMap::new();
        for library in &self.libraries {
            index.entry(library.name.to_ascii_lowercase()).or_default();
            for dependency in &library.dependencies {
                index
                    .entry(dependency.name.to_ascii_lowercase())
                    .or_default()
                    .push(Arc::clone(library));
            }
        }
        index
    }

    /// Resolved dependencies of a library, optionally pinned to `version`.
    ///
    /// Dependencies the target lists without a library entry are left out;
    /// restore writes such edges for packages it never downloaded.
    pub fn try_get_dependencies(&self, name: &str, version: Option<&str>) -> Option<LibraryList> {
        let key = (
            name.to_ascii_lowercase(),
            version.map(str::to_ascii_lowercase),
        );
        if let Some(cached) = self.dependencies_by_version.get(&key) {
            return cached.value().clone();
        }

        let resolved = self
            .try_get_library(name)
            .filter(|l| version_matches(l, version))
            .map(|library| {
                library
                    .dependencies
                    .iter()
                    .filter_map(|d| self.try_get_library(&d.name))
                    .cloned()
                    .collect::<LibraryList>()
            });
        self.dependencies_by_version
            .entry(key)
            .or_insert(resolved)
            .value()
            .clone()
    }
}

fn version_matches(library: &AssetsFileTargetLibrary, version: Option<&str>) -> bool {
    version.map_or(true, |v| library.version.eq_ignore_ascii_case(v))
}
