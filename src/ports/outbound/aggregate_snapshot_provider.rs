use crate::dependencies::domain::{Dependency, TargetedDependenciesSnapshot};
use std::sync::Arc;

/// AggregateSnapshotProvider port for cross-project snapshot lookups
///
/// Gives a filter read access to the published snapshot of the project a
/// project reference points at.
pub trait AggregateSnapshotProvider: Send + Sync {
    /// Returns the referenced project's targeted snapshot
    ///
    /// # Arguments
    /// * `dependency` - A project reference; its `full_path` names the project
    ///
    /// # Returns
    /// The snapshot for the matching target framework, or `None` when the
    /// referenced project has not published one
    fn get_snapshot(&self, dependency: &Dependency) -> Option<Arc<TargetedDependenciesSnapshot>>;
}
