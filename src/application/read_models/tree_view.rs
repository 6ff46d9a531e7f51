//! Tree view structs for the filtered dependency tree

use serde::Serialize;

/// The rendered dependency tree of one project
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyTreeView {
    pub project_name: Option<String>,
    pub project_path: String,
    /// Short name of the active target framework
    pub active_target: String,
    pub targets: Vec<TargetTreeView>,
}

/// One target framework's top-level nodes, grouped by provider type
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetTreeView {
    pub short_name: String,
    pub full_name: String,
    /// A visible unresolved node is reachable from the top level
    pub has_unresolved: bool,
    pub groups: Vec<DependencyGroupView>,
}

/// Nodes of one provider type under their group caption ("Packages", ...)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyGroupView {
    pub provider_type: String,
    pub caption: String,
    pub has_unresolved: bool,
    pub dependencies: Vec<DependencyNodeView>,
}

/// One dependency node with its (visible) children
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyNodeView {
    pub id: String,
    pub caption: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub resolved: bool,
    pub implicit: bool,
    pub visible: bool,
    pub icon: String,
    pub flags: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
    /// Set when this node already appears among its own ancestors; its
    /// children are not expanded again.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub cycle: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DependencyNodeView>,
}

impl DependencyNodeView {
    /// Number of nodes in this subtree, this node included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }
}
