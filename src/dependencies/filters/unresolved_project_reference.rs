use super::{AddDecision, AddDependencyContext, DependenciesSnapshotFilter};
use crate::dependencies::domain::{
    schema, Dependency, DependencyFlag, ProjectItemSpecs, SubTreeProviders, TargetFramework,
};
use crate::ports::outbound::AggregateSnapshotProvider;
use std::fmt;
use std::sync::Arc;

pub const NAME: &str = "unresolved-project-references";

/// Marks a resolved project reference unresolved when the referenced
/// project's own snapshot can reach an unresolved, visible dependency.
pub struct UnresolvedProjectReferenceFilter {
    aggregate_provider: Arc<dyn AggregateSnapshotProvider>,
}

impl UnresolvedProjectReferenceFilter {
    pub fn new(aggregate_provider: Arc<dyn AggregateSnapshotProvider>) -> Self {
        Self { aggregate_provider }
    }
}

impl fmt::Debug for UnresolvedProjectReferenceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnresolvedProjectReferenceFilter").finish_non_exhaustive()
    }
}

impl DependenciesSnapshotFilter for UnresolvedProjectReferenceFilter {
    fn name(&self) -> &'static str {
        NAME
    }

    fn order(&self) -> i32 {
        120
    }

    fn before_add_or_update(
        &self,
        _target_framework: &TargetFramework,
        dependency: Dependency,
        _subtree_providers: &SubTreeProviders,
        _project_item_specs: Option<&ProjectItemSpecs>,
        _context: &mut AddDependencyContext<'_>,
    ) -> AddDecision {
        if dependency.top_level()
            && dependency.resolved()
            && dependency.flags().contains(&DependencyFlag::ProjectDependency)
            && !dependency.flags().contains(&DependencyFlag::SharedProject)
        {
            let referenced = self.aggregate_provider.get_snapshot(&dependency);
            if referenced.is_some_and(|s| s.has_reachable_visible_unresolved_dependency()) {
                tracing::debug!(
                    project = %dependency.full_path().display(),
                    "referenced project has unresolved dependencies"
                );
                return AddDecision::Accept(dependency.to_unresolved(schema::PROJECT_REFERENCE, None));
            }
        }
        AddDecision::Accept(dependency)
    }
}
