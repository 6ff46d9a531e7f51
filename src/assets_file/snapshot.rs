use super::format::{split_dependency_group_entry, RawAssetsFile, RawLogMessage, RawProjectFramework};
use super::library::AssetsFileTargetLibrary;
use super::log_message::{AssetsFileLogMessage, LogLevel, WarningLevel};
use super::package_path_resolver::FallbackPackagePathResolver;
use super::string_pool::intern;
use super::target::{AssetsFileTarget, DeclaredDependency, ProjectFileDependency, TargetParts};
use crate::dependencies::domain::TargetFramework;
use crate::shared::error::DependencyError;
use crate::shared::security::{check_readable_file, MAX_FILE_SIZE};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Immutable, queryable view of one `project.assets.json`.
///
/// Updates never fail: a file that cannot be read or parsed (restore still
/// running, file locked) leaves the current snapshot in place.
#[derive(Debug, Default)]
pub struct AssetsFileDependenciesSnapshot {
    data_by_target: BTreeMap<String, Arc<AssetsFileTarget>>,
    project_name: Option<String>,
    project_path: Option<PathBuf>,
    logs: Vec<Arc<AssetsFileLogMessage>>,
    package_path_resolver: FallbackPackagePathResolver,
}

impl AssetsFileDependenciesSnapshot {
    pub fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Re-reads the assets file at `path`. Returns `self` on any failure.
    pub fn update_from_assets_file(self: &Arc<Self>, path: &Path) -> Arc<Self> {
        let result = check_readable_file(path, "assets file", MAX_FILE_SIZE)
            .and_then(|_| {
                fs::read_to_string(path).map_err(|e| DependencyError::FileReadError {
                    path: path.to_path_buf(),
                    details: e.to_string(),
                })
            })
            .and_then(|json| self.update_from_json(&json, path));
        self.keep_on_failure(result, path)
    }

    fn keep_on_failure(
        self: &Arc<Self>,
        result: Result<Arc<Self>, DependencyError>,
        path: &Path,
    ) -> Arc<Self> {
        result.unwrap_or_else(|e| {
            tracing::debug!(path = %path.display(), error = %e, "assets file unusable, keeping snapshot");
            Arc::clone(self)
        })
    }

    /// Parses `json` into a new snapshot, reusing this snapshot's log
    /// messages where they are unchanged at the same position.
    pub fn update_from_json(
        self: &Arc<Self>,
        json: &str,
        source: &Path,
    ) -> Result<Arc<Self>, DependencyError> {
        let raw: RawAssetsFile =
            serde_json::from_str(json).map_err(|e| DependencyError::AssetsFileParseError {
                path: source.to_path_buf(),
                details: e.to_string(),
            })?;
        Ok(Arc::new(Self::from_raw(raw, &self.logs)))
    }

    fn from_raw(raw: RawAssetsFile, previous_logs: &[Arc<AssetsFileLogMessage>]) -> Self {
        let logs: Vec<Arc<AssetsFileLogMessage>> = raw
            .logs
            .iter()
            .enumerate()
            .map(|(index, raw_log)| {
                let message = log_from_raw(raw_log);
                match previous_logs.get(index) {
                    Some(previous) if **previous == message => Arc::clone(previous),
                    _ => Arc::new(message),
                }
            })
            .collect();

        let frameworks = raw.project.as_ref().map(|p| &p.frameworks);
        let mut data_by_target = BTreeMap::new();
        for (name, raw_libraries) in &raw.targets {
            // Runtime-specific graphs ("net6.0/win-x64") repeat the base target.
            if name.contains('/') {
                continue;
            }
            let target_framework = TargetFramework::from_full_name(name.as_str());

            let libraries = raw_libraries
                .iter()
                .filter_map(|(key, library)| {
                    AssetsFileTargetLibrary::from_raw(key, library, raw.libraries.get(key))
                })
                .collect();

            let project_file_dependencies = raw
                .project_file_dependency_groups
                .iter()
                .filter(|(group, _)| names_target(group, name, &target_framework))
                .flat_map(|(_, entries)| entries.iter())
                .map(|entry| {
                    let (dependency, range) = split_dependency_group_entry(entry);
                    ProjectFileDependency {
                        name: intern(dependency),
                        version_range: range.map(intern),
                    }
                })
                .collect();

            let framework = frameworks.and_then(|all| find_framework(all, name, &target_framework));
            let declared_dependencies = framework
                .map(|f| {
                    f.dependencies
                        .iter()
                        .map(|(dependency, declared)| DeclaredDependency {
                            name: intern(dependency),
                            version_range: declared.version.as_deref().map(intern),
                            auto_referenced: declared.auto_referenced,
                        })
                        .collect()
                })
                .unwrap_or_default();
            let framework_references = framework
                .map(|f| f.framework_references.keys().map(|r| intern(r)).collect())
                .unwrap_or_default();

            let target_logs = logs
                .iter()
                .filter(|m| m.applies_to(name) || m.applies_to(target_framework.short_name()))
                .cloned()
                .collect();

            let target = AssetsFileTarget::new(TargetParts {
                name: intern(name),
                target_framework,
                libraries,
                project_file_dependencies,
                declared_dependencies,
                framework_references,
                logs: target_logs,
            });
            data_by_target.insert(name.clone(), Arc::new(target));
        }

        let restore = raw.project.as_ref().and_then(|p| p.restore.as_ref());
        let package_folders = raw.package_folders.keys().map(PathBuf::from).collect();

        Self {
            data_by_target,
            project_name: restore.and_then(|r| r.project_name.clone()),
            project_path: restore.and_then(|r| r.project_path.as_deref()).map(PathBuf::from),
            logs,
            package_path_resolver: FallbackPackagePathResolver::new(package_folders),
        }
    }

    /// Targets keyed by their name in the assets file.
    pub fn data_by_target(&self) -> &BTreeMap<String, Arc<AssetsFileTarget>> {
        &self.data_by_target
    }

    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    pub fn project_path(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }

    pub fn logs(&self) -> &[Arc<AssetsFileLogMessage>] {
        &self.logs
    }

    pub fn package_folders(&self) -> &[PathBuf] {
        self.package_path_resolver.folders()
    }

    /// Finds a target by assets-file name, short name or full framework name.
    /// With `None`, succeeds only when the file has exactly one target.
    pub fn try_get_target(&self, target: Option<&str>) -> Option<&Arc<AssetsFileTarget>> {
        match target {
            None if self.data_by_target.len() == 1 => self.data_by_target.values().next(),
            None => None,
            Some(requested) => self.data_by_target.values().find(|t| {
                t.name().eq_ignore_ascii_case(requested)
                    || t.target_framework().short_name().eq_ignore_ascii_case(requested)
                    || t.target_framework().full_name().eq_ignore_ascii_case(requested)
            }),
        }
    }

    pub fn try_get_dependents(
        &self,
        target: Option<&str>,
        library_name: &str,
    ) -> Option<&[Arc<AssetsFileTargetLibrary>]> {
        self.try_get_target(target)?.try_get_dependents(library_name)
    }

    pub fn try_get_dependencies(
        &self,
        target: Option<&str>,
        library_name: &str,
        version: Option<&str>,
    ) -> Option<Arc<[Arc<AssetsFileTargetLibrary>]>> {
        self.try_get_target(target)?
            .try_get_dependencies(library_name, version)
    }

    pub fn try_get_package(
        &self,
        target: Option<&str>,
        package_id: &str,
        version: Option<&str>,
    ) -> Option<&Arc<AssetsFileTargetLibrary>> {
        self.try_get_target(target)?.try_get_package(package_id, version)
    }

    pub fn try_get_project(
        &self,
        target: Option<&str>,
        project_name: &str,
    ) -> Option<&Arc<AssetsFileTargetLibrary>> {
        self.try_get_target(target)?.try_get_project(project_name)
    }

    /// Extracted folder of a package in the user or a fallback package folder.
    pub fn try_resolve_package_path(&self, package_id: &str, version: &str) -> Option<PathBuf> {
        self.package_path_resolver.try_resolve(package_id, version)
    }
}

fn log_from_raw(raw: &RawLogMessage) -> AssetsFileLogMessage {
    let level = raw.level.parse().unwrap_or_else(|e| {
        tracing::warn!(code = %raw.code, "{}, treating as information", e);
        LogLevel::Information
    });
    AssetsFileLogMessage {
        code: raw.code.clone(),
        level,
        warning_level: raw.warning_level.map(WarningLevel::new).unwrap_or_default(),
        message: raw.message.clone(),
        library_id: raw.library_id.clone(),
        target_graphs: raw.target_graphs.clone(),
    }
}

fn names_target(group: &str, target_name: &str, target_framework: &TargetFramework) -> bool {
    group.eq_ignore_ascii_case(target_name)
        || group.eq_ignore_ascii_case(target_framework.short_name())
}

fn find_framework<'a>(
    frameworks: &'a BTreeMap<String, RawProjectFramework>,
    target_name: &str,
    target_framework: &TargetFramework,
) -> Option<&'a RawProjectFramework> {
    frameworks.iter().find_map(|(alias, framework)| {
        let matches = names_target(alias, target_name, target_framework)
            || framework
                .target_alias
                .as_deref()
                .is_some_and(|a| a.eq_ignore_ascii_case(target_name));
        matches.then_some(framework)
    })
}
