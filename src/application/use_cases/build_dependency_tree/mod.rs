use super::assets_loader::{load_assets, select_target};
use crate::adapters::outbound::filesystem::assets_path_for_project;
use crate::adapters::outbound::snapshots::{
    DependenciesSnapshotProvider, InMemoryAggregateSnapshotProvider,
};
use crate::application::dto::{DependencyTreeRequest, DependencyTreeResponse};
use crate::application::read_models::DependencyTreeViewBuilder;
use crate::assets_file::{AssetsFileDependenciesSnapshot, AssetsFileTargetLibrary};
use crate::dependencies::domain::dependency::normalize_lexically;
use crate::dependencies::domain::{
    default_subtree_providers, DependenciesSnapshot, ProjectItemSpecs, SnapshotUpdate,
    SubTreeProviders, TargetFramework,
};
use crate::dependencies::filters::{FilterChain, BUILT_IN_FILTER_NAMES};
use crate::dependencies::services::AssetsModelBuilder;
use crate::ports::outbound::{AggregateSnapshotProvider, AssetsFileReader, ProgressReporter};
use crate::shared::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Referenced projects further than this many hops are not loaded.
const MAX_REFERENCE_DEPTH: usize = 32;

/// Project file name used when the assets file does not record one.
const DEFAULT_PROJECT_FILE: &str = "project.csproj";

/// A project whose assets file has been read, waiting to be pushed
/// through the snapshot pipeline.
struct LoadedProject {
    project_file: PathBuf,
    assets: Arc<AssetsFileDependenciesSnapshot>,
}

/// BuildDependencyTreeUseCase - Core use case for the filtered tree
///
/// Reads an assets file, turns every target into dependency models,
/// feeds them through the filter chain and renders the result as a read
/// model. With `follow_project_references`, referenced projects are loaded
/// first so the unresolved-project-reference filter sees their state.
///
/// # Type Parameters
/// * `R` - AssetsFileReader implementation
/// * `PR` - ProgressReporter implementation
pub struct BuildDependencyTreeUseCase<R, PR> {
    assets_reader: R,
    progress_reporter: PR,
    subtree_providers: Arc<SubTreeProviders>,
    aggregate: Arc<InMemoryAggregateSnapshotProvider>,
}

impl<R, PR> BuildDependencyTreeUseCase<R, PR>
where
    R: AssetsFileReader,
    PR: ProgressReporter,
{
    /// Creates the use case with the built-in subtree providers and a
    /// fresh aggregate store
    pub fn new(assets_reader: R, progress_reporter: PR) -> Self {
        Self::with_providers(
            assets_reader,
            progress_reporter,
            Arc::new(default_subtree_providers()),
            Arc::new(InMemoryAggregateSnapshotProvider::new()),
        )
    }

    pub fn with_providers(
        assets_reader: R,
        progress_reporter: PR,
        subtree_providers: Arc<SubTreeProviders>,
        aggregate: Arc<InMemoryAggregateSnapshotProvider>,
    ) -> Self {
        Self {
            assets_reader,
            progress_reporter,
            subtree_providers,
            aggregate,
        }
    }

    /// Executes the use case
    ///
    /// # Errors
    /// Returns an error if the root assets file cannot be read or parsed,
    /// or the requested target is not in it. Unreadable referenced
    /// projects are reported as warnings and skipped.
    pub async fn execute(&self, request: DependencyTreeRequest) -> Result<DependencyTreeResponse> {
        let assets_path =
            std::path::absolute(&request.assets_path).unwrap_or_else(|_| request.assets_path.clone());

        // Step 1: Read and parse the root assets file
        self.progress_reporter.report(&format!(
            "📖 Loading assets file from: {}",
            assets_path.display()
        ));
        let assets = load_assets(&self.assets_reader, &assets_path)?;
        let selected = select_target(&assets, request.target.as_deref())?
            .map(|t| t.target_framework().clone());
        self.progress_reporter.report(&format!(
            "✅ Detected {} target(s)",
            assets.data_by_target().len()
        ));

        self.warn_unknown_filters(&request.disabled_filters);
        let filters = Arc::new(
            FilterChain::default_chain(
                Arc::clone(&self.aggregate) as Arc<dyn AggregateSnapshotProvider>
            )
            .without(&request.disabled_filters),
        );
        let root = LoadedProject {
            project_file: project_file_for(&assets, &assets_path),
            assets,
        };

        // Step 2: Referenced projects, each after its own references
        if request.follow_project_references {
            let referenced = self.load_referenced_projects(&root);
            for (i, project) in referenced.iter().enumerate() {
                self.progress_reporter.report_progress(
                    i + 1,
                    referenced.len(),
                    project.project_file.file_name().and_then(|n| n.to_str()),
                );
                self.build_snapshot(project, None, None, &filters).await?;
            }
        }

        // Step 3: The root project itself
        let snapshot = self
            .build_snapshot(
                &root,
                selected.as_ref(),
                request.project_item_specs.as_deref(),
                &filters,
            )
            .await?;

        // Step 4: Read model
        let view = DependencyTreeViewBuilder::new(&self.subtree_providers)
            .show_hidden(request.show_hidden)
            .build(&snapshot, root.assets.project_name(), selected.as_ref());

        self.progress_reporter.report_completion(&format!(
            "Resolved dependencies for {} target(s)",
            view.targets.len()
        ));

        Ok(DependencyTreeResponse::new(snapshot, view))
    }

    fn warn_unknown_filters(&self, names: &[String]) {
        for name in names {
            if !BUILT_IN_FILTER_NAMES
                .iter()
                .any(|known| known.eq_ignore_ascii_case(name))
            {
                self.progress_reporter.report_warning(&format!(
                    "Unknown filter '{}' ignored. Known filters: {}",
                    name,
                    BUILT_IN_FILTER_NAMES.join(", ")
                ));
            }
        }
    }

    /// Pushes every target of `project` through a snapshot provider and
    /// returns the final project snapshot. The snapshot is also published
    /// to the aggregate store.
    async fn build_snapshot(
        &self,
        project: &LoadedProject,
        active: Option<&TargetFramework>,
        item_specs_override: Option<&[String]>,
        filters: &Arc<FilterChain>,
    ) -> Result<Arc<DependenciesSnapshot>> {
        let provider = DependenciesSnapshotProvider::spawn(
            &project.project_file,
            Arc::clone(filters),
            Arc::clone(&self.subtree_providers),
            Some(Arc::clone(&self.aggregate)),
        );

        let target_frameworks: Vec<TargetFramework> = project
            .assets
            .data_by_target()
            .values()
            .map(|t| t.target_framework().clone())
            .collect();
        let Some(active) = active.or(target_frameworks.first()).cloned() else {
            return provider.shutdown().await;
        };
        let override_specs: Option<Arc<ProjectItemSpecs>> =
            item_specs_override.map(|specs| Arc::new(specs.iter().collect()));

        for target in project.assets.data_by_target().values() {
            let changes = AssetsModelBuilder::build_changes(target, None);
            let mut update = SnapshotUpdate::new(target.target_framework().clone(), changes)
                .with_target_frameworks(target_frameworks.clone())
                .with_active_target_framework(active.clone());
            let item_specs = override_specs.clone().or_else(|| {
                AssetsModelBuilder::default_item_specs(&project.assets, target).map(Arc::new)
            });
            if let Some(item_specs) = item_specs {
                update = update.with_project_item_specs(item_specs);
            }
            provider.submit(update).await?;
        }

        let snapshot = provider.shutdown().await?;
        tracing::debug!(
            project = %project.project_file.display(),
            targets = snapshot.targets().count(),
            "project snapshot built"
        );
        Ok(snapshot)
    }

    /// Depth-first walk over project references. Projects come back in
    /// post-order, so each one is built after every project it references.
    fn load_referenced_projects(&self, root: &LoadedProject) -> Vec<LoadedProject> {
        let mut seen: HashSet<PathBuf> = HashSet::from([root.project_file.clone()]);
        let mut ordered = Vec::new();
        for project_file in referenced_project_files(root) {
            self.visit_reference(project_file, 1, &mut seen, &mut ordered);
        }
        ordered
    }

    fn visit_reference(
        &self,
        project_file: PathBuf,
        depth: usize,
        seen: &mut HashSet<PathBuf>,
        ordered: &mut Vec<LoadedProject>,
    ) {
        if depth > MAX_REFERENCE_DEPTH || !seen.insert(project_file.clone()) {
            return;
        }
        let assets_path = assets_path_for_project(&project_file);
        match load_assets(&self.assets_reader, &assets_path) {
            Ok(assets) => {
                let project = LoadedProject {
                    project_file,
                    assets,
                };
                for reference in referenced_project_files(&project) {
                    self.visit_reference(reference, depth + 1, seen, ordered);
                }
                ordered.push(project);
            }
            Err(e) => {
                tracing::debug!(error = %e, "referenced project skipped");
                self.progress_reporter.report_warning(&format!(
                    "Skipping referenced project {}: assets file not usable ({})",
                    project_file.display(),
                    assets_path.display()
                ));
            }
        }
    }
}

/// Project files referenced by any target of `project`, resolved against
/// its directory.
fn referenced_project_files(project: &LoadedProject) -> Vec<PathBuf> {
    let base = project.project_file.parent().unwrap_or_else(|| Path::new(""));
    let mut files: Vec<PathBuf> = Vec::new();
    for target in project.assets.data_by_target().values() {
        for library in target.libraries().iter().filter(|l| l.is_project()) {
            if let Some(relative) = project_reference_path(library) {
                let file = normalize_lexically(&base.join(relative));
                if !files.contains(&file) {
                    files.push(file);
                }
            }
        }
    }
    files
}

fn project_reference_path(library: &AssetsFileTargetLibrary) -> Option<&str> {
    library
        .msbuild_project
        .as_deref()
        .or(library.path.as_deref())
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
}

/// The project file an assets file belongs to: `<dir>/<name>` where `dir`
/// holds the `obj` folder the assets file sits in.
fn project_file_for(assets: &AssetsFileDependenciesSnapshot, assets_path: &Path) -> PathBuf {
    let file_name: PathBuf = assets
        .project_path()
        .and_then(|p| p.file_name())
        .map(PathBuf::from)
        .or_else(|| assets.project_name().map(|n| PathBuf::from(format!("{}.csproj", n))))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PROJECT_FILE));
    let project_dir = assets_path
        .parent()
        .and_then(Path::parent)
        .unwrap_or_else(|| Path::new(""));
    normalize_lexically(&project_dir.join(file_name))
}
