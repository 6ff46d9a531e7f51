use super::assets_loader::{load_assets, require_target, select_target};
use crate::application::dto::{AssetsQuery, AssetsQueryRequest, AssetsQueryResponse};
use crate::application::read_models::{
    DiagnosticView, DiagnosticsView, LibraryListView, LibraryRelation, LibraryView,
    PackagePathView, TargetListView, TargetSummaryView,
};
use crate::assets_file::{AssetsFileDependenciesSnapshot, AssetsFileTargetLibrary};
use crate::ports::outbound::{AssetsFileReader, ProgressReporter};
use crate::shared::error::DependencyError;
use crate::shared::Result;
use std::sync::Arc;

/// QueryAssetsFileUseCase - Read-only lookups in an assets file
///
/// Answers the questions the tree does not: which targets a file has,
/// who depends on a library, what a library pulls in, what restore
/// complained about, and where a package was extracted.
///
/// # Type Parameters
/// * `R` - AssetsFileReader implementation
/// * `PR` - ProgressReporter implementation
pub struct QueryAssetsFileUseCase<R, PR> {
    assets_reader: R,
    progress_reporter: PR,
}

impl<R, PR> QueryAssetsFileUseCase<R, PR>
where
    R: AssetsFileReader,
    PR: ProgressReporter,
{
    pub fn new(assets_reader: R, progress_reporter: PR) -> Self {
        Self {
            assets_reader,
            progress_reporter,
        }
    }

    /// Executes the use case
    ///
    /// # Errors
    /// Returns an error if the assets file cannot be read or parsed, the
    /// target is unknown or ambiguous, or a library lookup names a library
    /// the target does not contain.
    pub fn execute(&self, request: AssetsQueryRequest) -> Result<AssetsQueryResponse> {
        self.progress_reporter.report(&format!(
            "📖 Loading assets file from: {}",
            request.assets_path.display()
        ));
        let assets = load_assets(&self.assets_reader, &request.assets_path)?;
        let target = request.target.as_deref();

        let response = match &request.query {
            AssetsQuery::Targets => AssetsQueryResponse::Targets(list_targets(&assets)),
            AssetsQuery::Dependents { name } => {
                AssetsQueryResponse::Libraries(dependents(&assets, target, name)?)
            }
            AssetsQuery::Dependencies { name, version } => AssetsQueryResponse::Libraries(
                dependencies(&assets, target, name, version.as_deref())?,
            ),
            AssetsQuery::Diagnostics => {
                AssetsQueryResponse::Diagnostics(diagnostics(&assets, target)?)
            }
            AssetsQuery::PackagePath { name, version } => {
                let view = package_path(&assets, name, version);
                if view.path.is_none() {
                    self.progress_reporter.report_warning(&format!(
                        "Package {} {} is not extracted in any package folder",
                        name, version
                    ));
                }
                AssetsQueryResponse::PackagePath(view)
            }
        };
        Ok(response)
    }
}

fn list_targets(assets: &AssetsFileDependenciesSnapshot) -> TargetListView {
    TargetListView {
        project_name: assets.project_name().map(str::to_string),
        targets: assets
            .data_by_target()
            .values()
            .map(|t| TargetSummaryView::from_target(t))
            .collect(),
    }
}

fn dependents(
    assets: &AssetsFileDependenciesSnapshot,
    target: Option<&str>,
    name: &str,
) -> Result<LibraryListView> {
    let target = require_target(assets, target)?;
    let libraries = target
        .try_get_dependents(name)
        .ok_or_else(|| unknown_library(name, target.name()))?;
    Ok(library_list(
        target.name(),
        name,
        LibraryRelation::Dependents,
        libraries,
    ))
}

fn dependencies(
    assets: &AssetsFileDependenciesSnapshot,
    target: Option<&str>,
    name: &str,
    version: Option<&str>,
) -> Result<LibraryListView> {
    let target = require_target(assets, target)?;
    let libraries = target
        .try_get_dependencies(name, version)
        .ok_or_else(|| match version {
            Some(v) => unknown_library(&format!("{}/{}", name, v), target.name()),
            None => unknown_library(name, target.name()),
        })?;
    Ok(library_list(
        target.name(),
        name,
        LibraryRelation::Dependencies,
        &libraries,
    ))
}

fn library_list(
    target: &str,
    library: &str,
    relation: LibraryRelation,
    libraries: &[Arc<AssetsFileTargetLibrary>],
) -> LibraryListView {
    LibraryListView {
        target: target.to_string(),
        library: library.to_string(),
        relation,
        libraries: libraries.iter().map(|l| LibraryView::from(&**l)).collect(),
    }
}

/// With a target, that target's messages; otherwise every message in the
/// file.
fn diagnostics(
    assets: &AssetsFileDependenciesSnapshot,
    target: Option<&str>,
) -> Result<DiagnosticsView> {
    let view = match target {
        Some(_) => {
            let selected = select_target(assets, target)?;
            DiagnosticsView {
                target: selected.map(|t| t.name().to_string()),
                messages: selected
                    .map(|t| t.logs().iter().map(|m| DiagnosticView::from(&**m)).collect())
                    .unwrap_or_default(),
            }
        }
        None => DiagnosticsView {
            target: None,
            messages: assets
                .logs()
                .iter()
                .map(|m| DiagnosticView::from(&**m))
                .collect(),
        },
    };
    Ok(view)
}

fn package_path(assets: &AssetsFileDependenciesSnapshot, name: &str, version: &str) -> PackagePathView {
    PackagePathView {
        name: name.to_string(),
        version: version.to_string(),
        path: assets.try_resolve_package_path(name, version),
        searched: assets.package_folders().to_vec(),
    }
}

fn unknown_library(name: &str, target: &str) -> anyhow::Error {
    DependencyError::UnknownLibrary {
        name: name.to_string(),
        target: target.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const ASSETS: &str = r#"{
        "version": 3,
        "targets": {
            "net6.0": {
                "Serilog/2.10.0": {"type": "package", "dependencies": {"Serilog.Sinks.File": "1.0.0", "Ghost": "0.1.0"}},
                "Serilog.Sinks.File/1.0.0": {"type": "package"},
                "Serilog.Extensions/3.0.0": {"type": "package", "dependencies": {"Serilog": "2.10.0"}}
            },
            "net48": {
                "Serilog/2.10.0": {"type": "package"}
            }
        },
        "libraries": {
            "Serilog/2.10.0": {"type": "package", "path": "serilog/2.10.0"}
        },
        "project": {"restore": {"projectName": "App"}},
        "logs": [
            {"code": "NU1603", "level": "Warning", "warningLevel": 1, "message": "approximate match", "libraryId": "Serilog", "targetGraphs": ["net6.0"]},
            {"code": "NU1701", "level": "Warning", "message": "compat", "targetGraphs": ["net48"]}
        ]
    }"#;

    struct StaticReader(String);

    impl AssetsFileReader for StaticReader {
        fn read_assets_file(&self, _path: &Path) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct RecordingReporter {
        warnings: RefCell<Vec<String>>,
    }

    impl ProgressReporter for RecordingReporter {
        fn report(&self, _message: &str) {}
        fn report_progress(&self, _current: usize, _total: usize, _item: Option<&str>) {}
        fn report_warning(&self, message: &str) {
            self.warnings.borrow_mut().push(message.to_string());
        }
        fn report_completion(&self, _message: &str) {}
    }

    fn run(json: &str, target: Option<&str>, query: AssetsQuery) -> Result<AssetsQueryResponse> {
        QueryAssetsFileUseCase::new(StaticReader(json.to_string()), RecordingReporter::default())
            .execute(AssetsQueryRequest::new(
                PathBuf::from("obj/project.assets.json"),
                target.map(str::to_string),
                query,
            ))
    }

    fn libraries(response: AssetsQueryResponse) -> Vec<String> {
        match response {
            AssetsQueryResponse::Libraries(view) => {
                view.libraries.into_iter().map(|l| l.name).collect()
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[test]
    fn test_targets_lists_every_target() {
        let response = run(ASSETS, None, AssetsQuery::Targets).unwrap();
        let AssetsQueryResponse::Targets(view) = response else {
            panic!("expected targets");
        };
        assert_eq!(view.project_name.as_deref(), Some("App"));
        let names: Vec<&str> = view.targets.iter().map(|t| t.short_name.as_str()).collect();
        assert_eq!(names, vec!["net48", "net6.0"]);
        let net6 = view.targets.iter().find(|t| t.short_name == "net6.0").unwrap();
        assert_eq!(net6.package_count, 3);
        assert_eq!(net6.diagnostic_count, 1);
    }

    #[test]
    fn test_dependents_of_library() {
        let query = AssetsQuery::Dependents {
            name: "serilog".to_string(),
        };
        let names = libraries(run(ASSETS, Some("net6.0"), query).unwrap());
        assert_eq!(names, vec!["Serilog.Extensions"]);
    }

    #[test]
    fn test_dependencies_skip_missing_libraries() {
        let query = AssetsQuery::Dependencies {
            name: "Serilog".to_string(),
            version: Some("2.10.0".to_string()),
        };
        let names = libraries(run(ASSETS, Some("net6.0"), query).unwrap());
        assert_eq!(names, vec!["Serilog.Sinks.File"]);
    }

    #[test]
    fn test_dependencies_of_unknown_version_is_an_error() {
        let query = AssetsQuery::Dependencies {
            name: "Serilog".to_string(),
            version: Some("9.9.9".to_string()),
        };
        let err = run(ASSETS, Some("net6.0"), query).unwrap_err();
        match err.downcast_ref::<DependencyError>() {
            Some(DependencyError::UnknownLibrary { name, target }) => {
                assert_eq!(name, "Serilog/9.9.9");
                assert_eq!(target, "net6.0");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_library_query_needs_a_target_when_ambiguous() {
        let query = AssetsQuery::Dependents {
            name: "Serilog".to_string(),
        };
        let err = run(ASSETS, None, query).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DependencyError>(),
            Some(DependencyError::Validation { .. })
        ));
    }

    #[test]
    fn test_diagnostics_for_file_and_target() {
        let AssetsQueryResponse::Diagnostics(all) =
            run(ASSETS, None, AssetsQuery::Diagnostics).unwrap()
        else {
            panic!("expected diagnostics");
        };
        assert_eq!(all.messages.len(), 2);
        assert!(all.target.is_none());

        let AssetsQueryResponse::Diagnostics(net48) =
            run(ASSETS, Some("net48"), AssetsQuery::Diagnostics).unwrap()
        else {
            panic!("expected diagnostics");
        };
        assert_eq!(net48.messages.len(), 1);
        assert_eq!(net48.messages[0].code, "NU1701");
    }

    #[test]
    fn test_package_path_searches_folders() {
        let folder = TempDir::new().unwrap();
        let extracted = folder.path().join("serilog").join("2.10.0");
        fs::create_dir_all(&extracted).unwrap();
        fs::write(extracted.join(".nupkg.metadata"), "{}").unwrap();

        let json = ASSETS.replacen(
            "\"version\": 3,",
            &format!(
                "\"version\": 3, \"packageFolders\": {{{}: {{}}}},",
                serde_json::to_string(&folder.path().display().to_string()).unwrap()
            ),
            1,
        );
        let query = AssetsQuery::PackagePath {
            name: "Serilog".to_string(),
            version: "2.10.0".to_string(),
        };
        let AssetsQueryResponse::PackagePath(view) = run(&json, None, query).unwrap() else {
            panic!("expected package path");
        };
        assert_eq!(view.path, Some(extracted));
        assert_eq!(view.searched, vec![folder.path().to_path_buf()]);
    }

    #[test]
    fn test_missing_package_path_warns() {
        let reporter = RecordingReporter::default();
        let use_case = QueryAssetsFileUseCase::new(StaticReader(ASSETS.to_string()), reporter);
        let response = use_case
            .execute(AssetsQueryRequest::new(
                PathBuf::from("obj/project.assets.json"),
                None,
                AssetsQuery::PackagePath {
                    name: "Nope".to_string(),
                    version: "1.0.0".to_string(),
                },
            ))
            .unwrap();
        assert!(!response.is_found());
        assert_eq!(use_case.progress_reporter.warnings.borrow().len(), 1);
    }
}
