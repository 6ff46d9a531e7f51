use crate::dependencies::domain::dependency::normalize_lexically;
use crate::dependencies::domain::{Dependency, DependenciesSnapshot, TargetedDependenciesSnapshot};
use crate::ports::outbound::AggregateSnapshotProvider;
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// InMemoryAggregateSnapshotProvider adapter for cross-project lookups
///
/// Holds the latest published snapshot of every loaded project, keyed by
/// the lexically normalized project file path.
#[derive(Debug, Default)]
pub struct InMemoryAggregateSnapshotProvider {
    by_project: DashMap<PathBuf, Arc<DependenciesSnapshot>>,
}

impl InMemoryAggregateSnapshotProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `snapshot` as the current state of its project.
    pub fn publish(&self, snapshot: Arc<DependenciesSnapshot>) {
        let key = normalize_lexically(snapshot.project_path());
        tracing::trace!(project = %key.display(), "publishing snapshot");
        self.by_project.insert(key, snapshot);
    }

    pub fn remove(&self, project_path: &Path) -> Option<Arc<DependenciesSnapshot>> {
        self.by_project
            .remove(&normalize_lexically(project_path))
            .map(|(_, snapshot)| snapshot)
    }

    pub fn get_project(&self, project_path: &Path) -> Option<Arc<DependenciesSnapshot>> {
        self.by_project
            .get(&normalize_lexically(project_path))
            .map(|entry| Arc::clone(entry.value()))
    }

    pub fn len(&self) -> usize {
        self.by_project.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_project.is_empty()
    }
}

impl AggregateSnapshotProvider for InMemoryAggregateSnapshotProvider {
    /// Prefers the referencing dependency's own framework and falls back to
    /// the referenced project's active one.
    fn get_snapshot(&self, dependency: &Dependency) -> Option<Arc<TargetedDependenciesSnapshot>> {
        let project = self.get_project(dependency.full_path())?;
        project
            .targeted(dependency.target_framework())
            .or_else(|| project.active_targeted())
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependencies::domain::{
        default_subtree_providers, DependenciesChangesBuilder, DependencyModel, SnapshotUpdate,
        TargetFramework,
    };
    use crate::dependencies::filters::FilterChain;

    fn net6() -> TargetFramework {
        TargetFramework::new("net6.0", ".NETCoreApp,Version=v6.0")
    }

    fn netstandard() -> TargetFramework {
        TargetFramework::new("netstandard2.0", ".NETStandard,Version=v2.0")
    }

    fn project_snapshot(path: &str, tf: TargetFramework) -> Arc<DependenciesSnapshot> {
        let mut builder = DependenciesChangesBuilder::new();
        builder.added(DependencyModel::package("Missing", None, false, false));
        let update = SnapshotUpdate::new(tf.clone(), builder.try_build())
            .with_target_frameworks(vec![tf.clone()])
            .with_active_target_framework(tf);
        DependenciesSnapshot::from_changes(
            &DependenciesSnapshot::create_empty(Path::new(path)),
            &update,
            &FilterChain::empty(),
            &default_subtree_providers(),
        )
    }

    fn reference_from_app(tf: &TargetFramework) -> Dependency {
        Dependency::from_model(
            &DependencyModel::project("../Lib/Lib.csproj", true, false),
            tf,
            Path::new("/src/App/App.csproj"),
        )
    }

    #[test]
    fn test_get_snapshot_resolves_relative_reference() {
        let provider = InMemoryAggregateSnapshotProvider::new();
        provider.publish(project_snapshot("/src/Lib/Lib.csproj", net6()));

        let found = provider.get_snapshot(&reference_from_app(&net6())).unwrap();
        assert_eq!(found.target_framework(), &net6());
        assert!(found.has_reachable_visible_unresolved_dependency());
    }

    #[test]
    fn test_get_snapshot_falls_back_to_active_target() {
        let provider = InMemoryAggregateSnapshotProvider::new();
        provider.publish(project_snapshot("/src/Lib/Lib.csproj", netstandard()));

        let found = provider.get_snapshot(&reference_from_app(&net6())).unwrap();
        assert_eq!(found.target_framework(), &netstandard());
    }

    #[test]
    fn test_get_snapshot_unknown_project() {
        let provider = InMemoryAggregateSnapshotProvider::new();
        assert!(provider.get_snapshot(&reference_from_app(&net6())).is_none());
    }

    #[test]
    fn test_publish_replaces_and_remove() {
        let provider = InMemoryAggregateSnapshotProvider::new();
        provider.publish(project_snapshot("/src/Lib/Lib.csproj", net6()));
        provider.publish(project_snapshot("/src/Lib/./Lib.csproj", netstandard()));
        assert_eq!(provider.len(), 1);

        assert!(provider.remove(Path::new("/src/Lib/Lib.csproj")).is_some());
        assert!(provider.is_empty());
    }
}
