//! Builder for constructing the tree view from dependency snapshots

use super::tree_view::{DependencyGroupView, DependencyNodeView, DependencyTreeView, TargetTreeView};
use crate::dependencies::domain::{
    DependenciesSnapshot, Dependency, DependencyId, SubTreeProviders, TargetFramework,
    TargetedDependenciesSnapshot,
};

/// Child expansion stops at this depth; deeper nodes are rendered as leaves.
pub const MAX_TREE_DEPTH: usize = 100;

/// Builds a [`DependencyTreeView`] from a project snapshot.
pub struct DependencyTreeViewBuilder<'a> {
    subtree_providers: &'a SubTreeProviders,
    show_hidden: bool,
}

impl<'a> DependencyTreeViewBuilder<'a> {
    pub fn new(subtree_providers: &'a SubTreeProviders) -> Self {
        Self {
            subtree_providers,
            show_hidden: false,
        }
    }

    /// Include nodes that are not visible (transitive packages and the like)
    pub fn show_hidden(mut self, show_hidden: bool) -> Self {
        self.show_hidden = show_hidden;
        self
    }

    /// Builds the view for every target, or only `only` when given.
    pub fn build(
        &self,
        snapshot: &DependenciesSnapshot,
        project_name: Option<&str>,
        only: Option<&TargetFramework>,
    ) -> DependencyTreeView {
        let targets = snapshot
            .targets()
            .filter(|(tf, _)| only.is_none_or(|wanted| *tf == wanted))
            .map(|(_, targeted)| self.build_target(targeted))
            .collect();

        DependencyTreeView {
            project_name: project_name.map(str::to_string),
            project_path: snapshot.project_path().display().to_string(),
            active_target: snapshot.active_target_framework().short_name().to_string(),
            targets,
        }
    }

    fn build_target(&self, targeted: &TargetedDependenciesSnapshot) -> TargetTreeView {
        let mut groups: Vec<DependencyGroupView> = Vec::new();
        for dependency in targeted.top_level_dependencies() {
            if !self.include(dependency) {
                continue;
            }
            let provider_type = dependency.provider_type();
            let index = match groups
                .iter()
                .position(|g| g.provider_type.eq_ignore_ascii_case(provider_type))
            {
                Some(index) => index,
                None => {
                    groups.push(DependencyGroupView {
                        provider_type: provider_type.to_string(),
                        caption: self.group_caption(provider_type),
                        has_unresolved: targeted.check_for_unresolved_dependencies(provider_type),
                        dependencies: Vec::new(),
                    });
                    groups.len() - 1
                }
            };
            let mut ancestors = Vec::new();
            let node = self.build_node(targeted, dependency, &mut ancestors);
            groups[index].dependencies.push(node);
        }

        TargetTreeView {
            short_name: targeted.target_framework().short_name().to_string(),
            full_name: targeted.target_framework().full_name().to_string(),
            has_unresolved: targeted.has_reachable_visible_unresolved_dependency(),
            groups,
        }
    }

    fn group_caption(&self, provider_type: &str) -> String {
        self.subtree_providers
            .get(provider_type)
            .and_then(|p| p.as_internal().map(|i| i.group_caption().to_string()))
            .unwrap_or_else(|| provider_type.to_string())
    }

    fn include(&self, dependency: &Dependency) -> bool {
        self.show_hidden || dependency.visible()
    }

    fn build_node(
        &self,
        targeted: &TargetedDependenciesSnapshot,
        dependency: &Dependency,
        ancestors: &mut Vec<DependencyId>,
    ) -> DependencyNodeView {
        let cycle = ancestors.contains(dependency.id());
        let mut children = Vec::new();
        if !cycle && ancestors.len() < MAX_TREE_DEPTH {
            ancestors.push(dependency.id().clone());
            for child in targeted.get_dependency_children(dependency) {
                if self.include(&child) {
                    children.push(self.build_node(targeted, &child, ancestors));
                }
            }
            ancestors.pop();
        }

        DependencyNodeView {
            id: dependency.id().to_string(),
            caption: dependency.caption().to_string(),
            name: dependency.name().to_string(),
            version: dependency.version().map(str::to_string),
            resolved: dependency.resolved(),
            implicit: dependency.implicit(),
            visible: dependency.visible(),
            icon: dependency.icon().to_string(),
            flags: dependency.flags().iter().map(|f| f.to_string()).collect(),
            path: dependency.path().to_string(),
            cycle,
            children,
        }
    }
}
