use super::{AddDecision, AddDependencyContext, DependenciesSnapshotFilter};
use crate::dependencies::domain::{Dependency, ProjectItemSpecs, SubTreeProviders, TargetFramework};

pub const NAME: &str = "unresolved-dependencies";

/// Keeps an unresolved update from replacing an entry that is already in
/// the snapshot. Going back to unresolved needs an explicit removal first.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnresolvedDependenciesFilter;

impl DependenciesSnapshotFilter for UnresolvedDependenciesFilter {
    fn name(&self) -> &'static str {
        NAME
    }

    fn order(&self) -> i32 {
        100
    }

    fn before_add_or_update(
        &self,
        _target_framework: &TargetFramework,
        dependency: Dependency,
        _subtree_providers: &SubTreeProviders,
        _project_item_specs: Option<&ProjectItemSpecs>,
        context: &mut AddDependencyContext<'_>,
    ) -> AddDecision {
        // Rejects even when the existing entry is itself unresolved.
        if !dependency.resolved() && context.contains(dependency.id()) {
            return AddDecision::Reject;
        }
        AddDecision::Accept(dependency)
    }
}
