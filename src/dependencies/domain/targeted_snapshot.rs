use super::changes::DependenciesChanges;
use super::dependency::{Dependency, DependencyId};
use super::ignore_case;
use super::target_framework::TargetFramework;
use crate::dependencies::filters::{
    AddDecision, AddDependencyContext, FilterInputs, RemoveDecision, RemoveDependencyContext,
};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

/// Immutable dependency world of one target framework of one project.
///
/// New instances are only produced by [`from_changes`](Self::from_changes),
/// which hands back the previous `Arc` when a batch changes nothing, so
/// consumers can compare snapshots with [`Arc::ptr_eq`].
#[derive(Debug)]
pub struct TargetedDependenciesSnapshot {
    project_path: PathBuf,
    target_framework: TargetFramework,
    dependencies_by_id: BTreeMap<DependencyId, Arc<Dependency>>,
    top_level: Vec<Arc<Dependency>>,
    reachable_unresolved: OnceLock<bool>,
}

impl TargetedDependenciesSnapshot {
    pub fn create_empty(project_path: &Path, target_framework: &TargetFramework) -> Arc<Self> {
        Arc::new(Self::new(
            project_path.to_path_buf(),
            target_framework.clone(),
            BTreeMap::new(),
        ))
    }

    fn new(
        project_path: PathBuf,
        target_framework: TargetFramework,
        dependencies_by_id: BTreeMap<DependencyId, Arc<Dependency>>,
    ) -> Self {
        let mut top_level: Vec<Arc<Dependency>> = dependencies_by_id
            .values()
            .filter(|d| d.top_level())
            .cloned()
            .collect();
        top_level.sort_by(|a, b| {
            a.priority()
                .cmp(&b.priority())
                .then_with(|| ignore_case::cmp(a.caption(), b.caption()))
        });

        Self {
            project_path,
            target_framework,
            dependencies_by_id,
            top_level,
            reachable_unresolved: OnceLock::new(),
        }
    }

    /// Applies one batch of changes through the filter chain.
    ///
    /// Removals run first, then adds, all against the same in-progress map.
    /// Returns `previous` itself when no filter pass changed anything.
    pub fn from_changes(
        previous: &Arc<Self>,
        changes: Option<&DependenciesChanges>,
        inputs: &FilterInputs<'_>,
    ) -> Arc<Self> {
        let Some(changes) = changes.filter(|c| !c.is_empty()) else {
            return Arc::clone(previous);
        };

        let target_framework = &previous.target_framework;
        let mut world = previous.dependencies_by_id.clone();
        let mut dirty = false;

        {
            let mut context = RemoveDependencyContext::new(&mut world);
            for removed in changes.removed() {
                let id = DependencyId::new(target_framework, &removed.provider_type, &removed.model_id);
                let Some(existing) = context.try_get(&id).cloned() else {
                    continue;
                };
                context.reset();
                match inputs
                    .filters
                    .before_remove(target_framework, &existing, &mut context)
                {
                    RemoveDecision::Accept => {
                        context.commit_removal(&id);
                        dirty = true;
                    }
                    RemoveDecision::Reject => dirty |= context.changed(),
                }
            }
        }

        {
            let mut context = AddDependencyContext::new(&mut world);
            for model in changes.added() {
                let dependency =
                    Dependency::from_model(model, target_framework, &previous.project_path);
                context.reset();
                match inputs.filters.before_add_or_update(
                    target_framework,
                    dependency,
                    inputs.subtree_providers,
                    inputs.project_item_specs,
                    &mut context,
                ) {
                    AddDecision::Accept(accepted) => {
                        // Sibling rewrites count even when the node itself is unchanged.
                        dirty |= context.changed();
                        // Re-adding an identical node is not a change.
                        if context
                            .try_get(accepted.id())
                            .is_none_or(|existing| **existing != accepted)
                        {
                            context.commit(accepted);
                            dirty = true;
                        }
                    }
                    AddDecision::Reject => dirty |= context.changed(),
                }
            }
        }

        if !dirty {
            tracing::debug!(
                target_framework = %target_framework,
                "batch produced no change, keeping snapshot"
            );
            return Arc::clone(previous);
        }

        tracing::debug!(
            target_framework = %target_framework,
            dependencies = world.len(),
            "built new targeted snapshot"
        );
        Arc::new(Self::new(
            previous.project_path.clone(),
            target_framework.clone(),
            world,
        ))
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    pub fn target_framework(&self) -> &TargetFramework {
        &self.target_framework
    }

    pub fn get(&self, id: &DependencyId) -> Option<&Arc<Dependency>> {
        self.dependencies_by_id.get(id)
    }

    pub fn dependencies(&self) -> impl Iterator<Item = &Arc<Dependency>> {
        self.dependencies_by_id.values()
    }

    pub fn len(&self) -> usize {
        self.dependencies_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies_by_id.is_empty()
    }

    /// Top-level nodes ordered by priority, then caption.
    pub fn top_level_dependencies(&self) -> &[Arc<Dependency>] {
        &self.top_level
    }

    /// Children of `dependency` that are present in this snapshot. Child ids
    /// without an entry are skipped.
    pub fn get_dependency_children(&self, dependency: &Dependency) -> Vec<Arc<Dependency>> {
        dependency
            .dependency_ids()
            .iter()
            .filter_map(|id| self.dependencies_by_id.get(id))
            .cloned()
            .collect()
    }

    /// Whether any visible dependency of `provider_type` is unresolved.
    pub fn check_for_unresolved_dependencies(&self, provider_type: &str) -> bool {
        self.dependencies_by_id.values().any(|d| {
            d.visible() && !d.resolved() && d.provider_type().eq_ignore_ascii_case(provider_type)
        })
    }

    /// Whether an unresolved, visible node can be reached from a top-level
    /// node through visible nodes. Computed on first call.
    pub fn has_reachable_visible_unresolved_dependency(&self) -> bool {
        *self
            .reachable_unresolved
            .get_or_init(|| self.find_reachable_visible_unresolved())
    }

    fn find_reachable_visible_unresolved(&self) -> bool {
        let mut visited: HashSet<&DependencyId> = HashSet::new();
        let mut stack: Vec<&Arc<Dependency>> = self.top_level.iter().collect();

        while let Some(dependency) = stack.pop() {
            if !dependency.visible() || !visited.insert(dependency.id()) {
                continue;
            }
            if !dependency.resolved() {
                return true;
            }
            stack.extend(
                dependency
                    .dependency_ids()
                    .iter()
                    .filter_map(|id| self.dependencies_by_id.get(id)),
            );
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependencies::domain::{
        default_subtree_providers, DependenciesChangesBuilder, DependencyModel,
    };
    use crate::dependencies::filters::FilterChain;

    fn tf() -> TargetFramework {
        TargetFramework::new("net6.0", ".NETCoreApp,Version=v6.0")
    }

    fn empty() -> Arc<TargetedDependenciesSnapshot> {
        TargetedDependenciesSnapshot::create_empty(Path::new("/src/App/App.csproj"), &tf())
    }

    fn apply(
        previous: &Arc<TargetedDependenciesSnapshot>,
        build: impl FnOnce(&mut DependenciesChangesBuilder),
    ) -> Arc<TargetedDependenciesSnapshot> {
        let mut builder = DependenciesChangesBuilder::new();
        build(&mut builder);
        let changes = builder.try_build();
        let filters = FilterChain::empty();
        let providers = default_subtree_providers();
        let inputs = FilterInputs::new(&filters, &providers, None);
        TargetedDependenciesSnapshot::from_changes(previous, changes.as_ref(), &inputs)
    }

    #[test]
    fn test_empty_batch_returns_same_instance() {
        let snapshot = empty();
        let next = apply(&snapshot, |_| {});
        assert!(Arc::ptr_eq(&snapshot, &next));
    }

    #[test]
    fn test_add_then_remove() {
        let snapshot = apply(&empty(), |b| {
            b.added(DependencyModel::package("A", Some("1.0.0"), true, false));
        });
        assert_eq!(snapshot.len(), 1);

        let removed = apply(&snapshot, |b| {
            b.removed("NuGetDependency", "a");
        });
        assert!(removed.is_empty());
    }

    #[test]
    fn test_removing_absent_dependency_is_noop() {
        let snapshot = apply(&empty(), |b| {
            b.added(DependencyModel::package("A", Some("1.0.0"), true, false));
        });
        let next = apply(&snapshot, |b| {
            b.removed("NuGetDependency", "Missing");
        });
        assert!(Arc::ptr_eq(&snapshot, &next));
    }

    #[test]
    fn test_identical_add_returns_same_instance() {
        let snapshot = apply(&empty(), |b| {
            b.added(DependencyModel::package("A", Some("1.0.0"), true, false));
        });
        let next = apply(&snapshot, |b| {
            b.added(DependencyModel::package("A", Some("1.0.0"), true, false));
        });
        assert!(Arc::ptr_eq(&snapshot, &next));
    }

    #[test]
    fn test_children_and_top_level() {
        let snapshot = apply(&empty(), |b| {
            b.added(DependencyModel::package("A", Some("1.0.0"), true, false).with_children(["B"]));
            b.added(DependencyModel::package("B", Some("2.0.0"), true, false).transitive());
        });
        assert_eq!(snapshot.top_level_dependencies().len(), 1);
        let a = &snapshot.top_level_dependencies()[0];
        let children = snapshot.get_dependency_children(a);
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name(), "B");
    }

    #[test]
    fn test_reachable_unresolved_through_children() {
        let snapshot = apply(&empty(), |b| {
            b.added(DependencyModel::package("A", Some("1.0.0"), true, false).with_children(["B"]));
            b.added(DependencyModel::package("B", None, false, false).transitive());
        });
        assert!(snapshot.has_reachable_visible_unresolved_dependency());
        assert!(snapshot.check_for_unresolved_dependencies("NuGetDependency"));
    }

    #[test]
    fn test_hidden_nodes_are_not_traversed() {
        let snapshot = apply(&empty(), |b| {
            b.added(
                DependencyModel::package("A", Some("1.0.0"), true, false)
                    .hidden()
                    .with_children(["B"]),
            );
            b.added(DependencyModel::package("B", None, false, false).transitive());
        });
        assert!(!snapshot.has_reachable_visible_unresolved_dependency());
    }

    #[test]
    fn test_child_cycle_terminates() {
        let snapshot = apply(&empty(), |b| {
            b.added(DependencyModel::package("A", Some("1.0.0"), true, false).with_children(["B"]));
            b.added(
                DependencyModel::package("B", Some("1.0.0"), true, false)
                    .transitive()
                    .with_children(["A"]),
            );
        });
        assert!(!snapshot.has_reachable_visible_unresolved_dependency());
    }
}
