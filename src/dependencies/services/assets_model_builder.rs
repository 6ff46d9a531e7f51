use crate::assets_file::{
    AssetsFileDependenciesSnapshot, AssetsFileTarget, AssetsFileTargetLibrary, LogLevel,
};
use crate::dependencies::domain::{
    provider_types, DependenciesChanges, DependenciesChangesBuilder, DependencyModel, ModelRef,
    ProjectItemSpecs, TargetedDependenciesSnapshot,
};
use std::collections::HashSet;

/// AssetsModelBuilder service turning one assets-file target into a batch of
/// dependency models
///
/// This is the rule-handler side of the pipeline: it knows the assets file
/// layout and nothing about filters.
pub struct AssetsModelBuilder;

impl AssetsModelBuilder {
    /// Builds the batch that brings `previous` in line with `target`
    ///
    /// # Arguments
    /// * `target` - The assets-file target to describe
    /// * `previous` - The current snapshot for the same framework, if any;
    ///   its entries missing from `target` are removed
    ///
    /// # Returns
    /// `None` when there is nothing to add or remove
    pub fn build_changes(
        target: &AssetsFileTarget,
        previous: Option<&TargetedDependenciesSnapshot>,
    ) -> Option<DependenciesChanges> {
        let models = Self::build_models(target);
        let mut builder = DependenciesChangesBuilder::new();

        if let Some(previous) = previous {
            let current: HashSet<(String, String)> = models
                .iter()
                .map(|m| {
                    (
                        m.provider_type.to_ascii_lowercase(),
                        m.id.replace('/', "\\").to_ascii_lowercase(),
                    )
                })
                .collect();
            for dependency in previous.dependencies() {
                let model_ref = dependency.model_ref();
                let key = (
                    model_ref.provider_type.to_ascii_lowercase(),
                    model_ref.model_id.to_ascii_lowercase(),
                );
                if !current.contains(&key) {
                    builder.removed(&model_ref.provider_type, &model_ref.model_id);
                }
            }
        }

        for model in models {
            builder.added(model);
        }
        builder.try_build()
    }

    /// Models for every library of `target`, plus unresolved models for
    /// direct references restore could not satisfy.
    pub fn build_models(target: &AssetsFileTarget) -> Vec<DependencyModel> {
        let failed: HashSet<String> = target
            .logs()
            .iter()
            .filter(|m| m.level == LogLevel::Error)
            .filter_map(|m| m.library_id.as_deref())
            .map(str::to_ascii_lowercase)
            .collect();
        let top_level: HashSet<String> = target
            .project_file_dependencies()
            .iter()
            .map(|d| d.name.to_ascii_lowercase())
            .collect();

        let mut models = Vec::new();
        let mut framework_assemblies = HashSet::new();

        for library in target.libraries() {
            let resolved = !failed.contains(&library.name.to_ascii_lowercase());
            let mut model = if library.is_project() {
                let path = project_path(library);
                DependencyModel::project(path, resolved, false).with_item_spec(path)
            } else {
                DependencyModel::package(&library.name, Some(&*library.version), resolved, false)
            };
            if !top_level.contains(&library.name.to_ascii_lowercase()) {
                model = model.transitive();
            }

            let children = library
                .dependencies
                .iter()
                .filter_map(|d| target.try_get_library(&d.name))
                .map(|child| model_ref(child));
            model = model.with_child_refs(children);

            for assembly in &library.framework_assemblies {
                model = model.with_child_refs([ModelRef::new(provider_types::ASSEMBLY, assembly)]);
                if framework_assemblies.insert(assembly.to_ascii_lowercase()) {
                    models.push(DependencyModel::assembly(assembly, "", true, false).transitive());
                }
            }

            models.push(model);
        }

        for missing in target
            .project_file_dependencies()
            .iter()
            .filter(|d| target.try_get_library(&d.name).is_none())
        {
            tracing::debug!(name = %missing.name, "direct reference missing from target");
            models.push(DependencyModel::package(
                &missing.name,
                missing.version_range.as_deref(),
                false,
                false,
            ));
        }

        for reference in target.framework_references() {
            models.push(DependencyModel::framework(reference, true, false));
        }

        models
    }

    /// Item specs written in the project file, as far as the assets file
    /// records them: non auto-referenced packages plus direct project
    /// references. `None` when the file has no `project` section.
    pub fn default_item_specs(
        assets: &AssetsFileDependenciesSnapshot,
        target: &AssetsFileTarget,
    ) -> Option<ProjectItemSpecs> {
        if assets.project_name().is_none() && assets.project_path().is_none() {
            return None;
        }

        let mut item_specs: ProjectItemSpecs = target
            .declared_dependencies()
            .iter()
            .filter(|d| !d.auto_referenced)
            .map(|d| &*d.name)
            .collect();
        for dependency in target.project_file_dependencies() {
            if let Some(project) = target.try_get_project(&dependency.name) {
                item_specs.insert(project_path(project));
            }
        }
        Some(item_specs)
    }
}

fn project_path(library: &AssetsFileTargetLibrary) -> &str {
    library
        .msbuild_project
        .as_deref()
        .or(library.path.as_deref())
        .unwrap_or(&*library.name)
}

fn model_ref(library: &AssetsFileTargetLibrary) -> ModelRef {
    if library.is_project() {
        ModelRef::new(provider_types::PROJECT, project_path(library))
    } else {
        ModelRef::new(provider_types::PACKAGE, &library.name)
    }
}
