use super::changes::DependenciesChanges;
use super::dependency::{Dependency, DependencyId};
use super::dependency_model::ProjectItemSpecs;
use super::subtree_provider::SubTreeProviders;
use super::target_framework::TargetFramework;
use super::targeted_snapshot::TargetedDependenciesSnapshot;
use crate::dependencies::filters::{FilterChain, FilterInputs};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One update for a project: a batch for one target framework, plus the
/// project-level state that came with it.
#[derive(Debug, Clone)]
pub struct SnapshotUpdate {
    pub target_framework: TargetFramework,
    pub changes: Option<DependenciesChanges>,
    /// Full list of the project's frameworks, when known.
    pub target_frameworks: Option<Vec<TargetFramework>>,
    pub active_target_framework: Option<TargetFramework>,
    pub project_item_specs: Option<Arc<ProjectItemSpecs>>,
}

impl SnapshotUpdate {
    pub fn new(target_framework: TargetFramework, changes: Option<DependenciesChanges>) -> Self {
        Self {
            target_framework,
            changes,
            target_frameworks: None,
            active_target_framework: None,
            project_item_specs: None,
        }
    }

    pub fn with_target_frameworks(mut self, target_frameworks: Vec<TargetFramework>) -> Self {
        self.target_frameworks = Some(target_frameworks);
        self
    }

    pub fn with_active_target_framework(mut self, target_framework: TargetFramework) -> Self {
        self.active_target_framework = Some(target_framework);
        self
    }

    pub fn with_project_item_specs(mut self, item_specs: Arc<ProjectItemSpecs>) -> Self {
        self.project_item_specs = Some(item_specs);
        self
    }
}

/// All targeted snapshots of one project.
#[derive(Debug)]
pub struct DependenciesSnapshot {
    project_path: PathBuf,
    active_target_framework: TargetFramework,
    targets: BTreeMap<TargetFramework, Arc<TargetedDependenciesSnapshot>>,
}

impl DependenciesSnapshot {
    pub fn create_empty(project_path: &Path) -> Arc<Self> {
        Arc::new(Self {
            project_path: project_path.to_path_buf(),
            active_target_framework: TargetFramework::any(),
            targets: BTreeMap::new(),
        })
    }

    /// Recomposes the project snapshot after one update. Returns `previous`
    /// itself when neither the framework list nor any targeted snapshot changed.
    pub fn from_changes(
        previous: &Arc<Self>,
        update: &SnapshotUpdate,
        filters: &FilterChain,
        subtree_providers: &SubTreeProviders,
    ) -> Arc<Self> {
        let mut targets = previous.targets.clone();
        let mut active = previous.active_target_framework.clone();
        let mut changed = sync_target_frameworks(
            &previous.project_path,
            &mut targets,
            update.target_frameworks.as_deref(),
        );
        if let Some(requested) = &update.active_target_framework {
            changed |= set_active(&mut active, requested);
        }

        let known = targets.contains_key(&update.target_framework);
        if !known && update.target_frameworks.is_some() {
            tracing::debug!(
                target_framework = %update.target_framework,
                "ignoring changes for a framework the project no longer targets"
            );
        } else {
            let previous_targeted = match targets.get(&update.target_framework) {
                Some(existing) => Arc::clone(existing),
                None => TargetedDependenciesSnapshot::create_empty(
                    &previous.project_path,
                    &update.target_framework,
                ),
            };
            let inputs = FilterInputs::new(
                filters,
                subtree_providers,
                update.project_item_specs.as_deref(),
            );
            let next = TargetedDependenciesSnapshot::from_changes(
                &previous_targeted,
                update.changes.as_ref(),
                &inputs,
            );
            if !known || !Arc::ptr_eq(&next, &previous_targeted) {
                targets.insert(update.target_framework.clone(), next);
                changed = true;
            }
        }

        changed |= ensure_active_is_targeted(&mut active, &targets);

        if !changed {
            return Arc::clone(previous);
        }
        Arc::new(Self {
            project_path: previous.project_path.clone(),
            active_target_framework: active,
            targets,
        })
    }

    /// Replaces the framework list without applying any dependency batch.
    pub fn set_target_frameworks(
        previous: &Arc<Self>,
        target_frameworks: &[TargetFramework],
        active_target_framework: &TargetFramework,
    ) -> Arc<Self> {
        let mut targets = previous.targets.clone();
        let mut active = previous.active_target_framework.clone();
        let mut changed =
            sync_target_frameworks(&previous.project_path, &mut targets, Some(target_frameworks));
        changed |= set_active(&mut active, active_target_framework);
        changed |= ensure_active_is_targeted(&mut active, &targets);

        if !changed {
            return Arc::clone(previous);
        }
        Arc::new(Self {
            project_path: previous.project_path.clone(),
            active_target_framework: active,
            targets,
        })
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    pub fn active_target_framework(&self) -> &TargetFramework {
        &self.active_target_framework
    }

    pub fn targets(&self) -> impl Iterator<Item = (&TargetFramework, &Arc<TargetedDependenciesSnapshot>)> {
        self.targets.iter()
    }

    pub fn targeted(&self, target_framework: &TargetFramework) -> Option<&Arc<TargetedDependenciesSnapshot>> {
        self.targets.get(target_framework)
    }

    pub fn active_targeted(&self) -> Option<&Arc<TargetedDependenciesSnapshot>> {
        self.targets.get(&self.active_target_framework)
    }

    pub fn has_reachable_visible_unresolved_dependency(&self) -> bool {
        self.targets
            .values()
            .any(|t| t.has_reachable_visible_unresolved_dependency())
    }

    /// Looks `id` up in every targeted snapshot.
    pub fn find_dependency(&self, id: &DependencyId) -> Option<&Arc<Dependency>> {
        self.targets.values().find_map(|t| t.get(id))
    }
}

fn sync_target_frameworks(
    project_path: &Path,
    targets: &mut BTreeMap<TargetFramework, Arc<TargetedDependenciesSnapshot>>,
    target_frameworks: Option<&[TargetFramework]>,
) -> bool {
    let Some(target_frameworks) = target_frameworks else {
        return false;
    };
    let before = targets.len();
    targets.retain(|tf, _| target_frameworks.contains(tf));
    let mut changed = targets.len() != before;
    for tf in target_frameworks {
        if !targets.contains_key(tf) {
            targets.insert(
                tf.clone(),
                TargetedDependenciesSnapshot::create_empty(project_path, tf),
            );
            changed = true;
        }
    }
    changed
}

fn set_active(active: &mut TargetFramework, requested: &TargetFramework) -> bool {
    if active == requested && active.short_name() == requested.short_name() {
        return false;
    }
    *active = requested.clone();
    true
}

/// Falls back to the first framework when the active one is not targeted.
fn ensure_active_is_targeted(
    active: &mut TargetFramework,
    targets: &BTreeMap<TargetFramework, Arc<TargetedDependenciesSnapshot>>,
) -> bool {
    if targets.contains_key(active) {
        return false;
    }
    match targets.keys().next() {
        Some(first) => {
            *active = first.clone();
            true
        }
        None => false,
    }
}
