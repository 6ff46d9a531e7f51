use std::path::PathBuf;

/// Request DTO for building the filtered dependency tree of one project
#[derive(Debug, Clone)]
pub struct DependencyTreeRequest {
    /// Path to the project's `project.assets.json`
    pub assets_path: PathBuf,
    /// Target to render; `None` renders every target
    pub target: Option<String>,
    /// Item specs declared in the project file. `None` derives them from
    /// the assets file's `project` section.
    pub project_item_specs: Option<Vec<String>>,
    /// Filter names to leave out of the default chain
    pub disabled_filters: Vec<String>,
    /// Load referenced projects' assets files too, so the
    /// unresolved-project-reference filter can see their state
    pub follow_project_references: bool,
    /// Include dependencies flagged hidden
    pub show_hidden: bool,
}

impl DependencyTreeRequest {
    pub fn new(assets_path: PathBuf) -> Self {
        Self {
            assets_path,
            target: None,
            project_item_specs: None,
            disabled_filters: Vec::new(),
            follow_project_references: false,
            show_hidden: false,
        }
    }

    pub fn with_target(mut self, target: Option<String>) -> Self {
        self.target = target;
        self
    }

    pub fn with_project_item_specs(mut self, item_specs: Option<Vec<String>>) -> Self {
        self.project_item_specs = item_specs;
        self
    }

    pub fn with_disabled_filters(mut self, names: Vec<String>) -> Self {
        self.disabled_filters = names;
        self
    }

    pub fn with_follow_project_references(mut self, follow: bool) -> Self {
        self.follow_project_references = follow;
        self
    }

    pub fn with_show_hidden(mut self, show_hidden: bool) -> Self {
        self.show_hidden = show_hidden;
        self
    }
}
