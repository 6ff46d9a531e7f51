//! Ordered filters applied to every dependency entering or leaving a
//! targeted snapshot.
//!
//! A filter returns its decision instead of signalling it, so "accepted and
//! rejected" or "neither" cannot be expressed. Filters may still rewrite
//! siblings through the context.

mod context;
pub mod deduplicate_captions;
pub mod implicit_top_level;
pub mod sdk_and_packages;
pub mod unresolved_dependencies;
pub mod unresolved_project_reference;

pub use context::{AddDependencyContext, RemoveDependencyContext};
pub use deduplicate_captions::DeduplicateCaptionsFilter;
pub use implicit_top_level::ImplicitTopLevelFilter;
pub use sdk_and_packages::SdkAndPackagesFilter;
pub use unresolved_dependencies::UnresolvedDependenciesFilter;
pub use unresolved_project_reference::UnresolvedProjectReferenceFilter;

use crate::dependencies::domain::{
    Dependency, ProjectItemSpecs, SubTreeProviders, TargetFramework,
};
use crate::ports::outbound::AggregateSnapshotProvider;
use std::fmt;
use std::sync::Arc;

/// Outcome of one filter for an add or update.
#[derive(Debug, Clone, PartialEq)]
pub enum AddDecision {
    /// Admit the dependency, possibly a rewritten copy of the candidate.
    Accept(Dependency),
    /// Drop the add; whatever the snapshot held for the id stays.
    Reject,
}

/// Outcome of one filter for a removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveDecision {
    Accept,
    Reject,
}

pub trait DependenciesSnapshotFilter: Send + Sync {
    /// Name used to disable the filter from configuration.
    fn name(&self) -> &'static str;

    /// Filters run in ascending order.
    fn order(&self) -> i32;

    fn before_add_or_update(
        &self,
        target_framework: &TargetFramework,
        dependency: Dependency,
        subtree_providers: &SubTreeProviders,
        project_item_specs: Option<&ProjectItemSpecs>,
        context: &mut AddDependencyContext<'_>,
    ) -> AddDecision;

    fn before_remove(
        &self,
        _target_framework: &TargetFramework,
        _dependency: &Dependency,
        _context: &mut RemoveDependencyContext<'_>,
    ) -> RemoveDecision {
        RemoveDecision::Accept
    }
}

/// Names of the built-in filters, in execution order.
pub const BUILT_IN_FILTER_NAMES: [&str; 5] = [
    unresolved_dependencies::NAME,
    deduplicate_captions::NAME,
    sdk_and_packages::NAME,
    unresolved_project_reference::NAME,
    implicit_top_level::NAME,
];

/// Filters sorted by [`order`](DependenciesSnapshotFilter::order). Equal
/// orders keep registration order.
#[derive(Clone, Default)]
pub struct FilterChain {
    filters: Vec<Arc<dyn DependenciesSnapshotFilter>>,
}

impl FilterChain {
    pub fn new(mut filters: Vec<Arc<dyn DependenciesSnapshotFilter>>) -> Self {
        filters.sort_by_key(|f| f.order());
        Self { filters }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn default_chain(aggregate_provider: Arc<dyn AggregateSnapshotProvider>) -> Self {
        Self::new(vec![
            Arc::new(UnresolvedDependenciesFilter),
            Arc::new(DeduplicateCaptionsFilter),
            Arc::new(SdkAndPackagesFilter),
            Arc::new(UnresolvedProjectReferenceFilter::new(aggregate_provider)),
            Arc::new(ImplicitTopLevelFilter),
        ])
    }

    /// Drops every filter whose name matches one of `names` (ignoring case).
    pub fn without<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.filters.retain(|f| {
            !names
                .iter()
                .any(|n| n.as_ref().eq_ignore_ascii_case(f.name()))
        });
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Runs the add chain. Each filter sees the candidate as left by the
    /// previous one; the first reject ends the chain.
    pub fn before_add_or_update(
        &self,
        target_framework: &TargetFramework,
        dependency: Dependency,
        subtree_providers: &SubTreeProviders,
        project_item_specs: Option<&ProjectItemSpecs>,
        context: &mut AddDependencyContext<'_>,
    ) -> AddDecision {
        let mut candidate = dependency;
        for filter in &self.filters {
            match filter.before_add_or_update(
                target_framework,
                candidate,
                subtree_providers,
                project_item_specs,
                context,
            ) {
                AddDecision::Accept(next) => candidate = next,
                AddDecision::Reject => {
                    tracing::trace!(filter = filter.name(), "add rejected");
                    return AddDecision::Reject;
                }
            }
        }
        AddDecision::Accept(candidate)
    }

    pub fn before_remove(
        &self,
        target_framework: &TargetFramework,
        dependency: &Dependency,
        context: &mut RemoveDependencyContext<'_>,
    ) -> RemoveDecision {
        for filter in &self.filters {
            if filter.before_remove(target_framework, dependency, context) == RemoveDecision::Reject {
                tracing::trace!(filter = filter.name(), "removal rejected");
                return RemoveDecision::Reject;
            }
        }
        RemoveDecision::Accept
    }
}

impl fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Everything a targeted snapshot needs besides the batch itself.
#[derive(Debug, Clone, Copy)]
pub struct FilterInputs<'a> {
    pub filters: &'a FilterChain,
    pub subtree_providers: &'a SubTreeProviders,
    /// `None` when the project file has not been read yet.
    pub project_item_specs: Option<&'a ProjectItemSpecs>,
}

impl<'a> FilterInputs<'a> {
    pub fn new(
        filters: &'a FilterChain,
        subtree_providers: &'a SubTreeProviders,
        project_item_specs: Option<&'a ProjectItemSpecs>,
    ) -> Self {
        Self {
            filters,
            subtree_providers,
            project_item_specs,
        }
    }
}
