use crate::application::read_models::DependencyTreeView;
use crate::dependencies::domain::DependenciesSnapshot;
use std::sync::Arc;

/// Response DTO from the dependency tree use case
///
/// Carries both the snapshot (for library callers that keep querying it)
/// and the denormalized view the formatters render.
#[derive(Debug, Clone)]
pub struct DependencyTreeResponse {
    pub snapshot: Arc<DependenciesSnapshot>,
    pub view: DependencyTreeView,
    /// Whether any rendered target has a reachable, visible unresolved node.
    /// Drives the `--fail-on-unresolved` exit code.
    pub has_unresolved: bool,
}

impl DependencyTreeResponse {
    pub fn new(snapshot: Arc<DependenciesSnapshot>, view: DependencyTreeView) -> Self {
        let has_unresolved = view.targets.iter().any(|t| t.has_unresolved);
        Self {
            snapshot,
            view,
            has_unresolved,
        }
    }
}
