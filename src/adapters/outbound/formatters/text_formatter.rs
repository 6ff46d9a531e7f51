use crate::application::read_models::{
    DependencyNodeView, DependencyTreeView, DiagnosticsView, LibraryListView, LibraryRelation,
    PackagePathView, TargetListView, TargetTreeView,
};
use crate::ports::outbound::TreeFormatter;
use crate::shared::Result;
use owo_colors::OwoColorize;
use std::fmt::Write;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// TextFormatter adapter for terminal output
///
/// This adapter implements the TreeFormatter port as an indented tree.
/// Unresolved nodes are marked, and coloured when colour is enabled.
pub struct TextFormatter {
    color: bool,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self { color: true }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn bold(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn dimmed(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn warning(&self, text: &str) -> String {
        if self.color {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    fn error(&self, text: &str) -> String {
        if self.color {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }

    fn render_target(&self, output: &mut String, target: &TargetTreeView) {
        let mut heading = self.bold(&format!("{} ({})", target.short_name, target.full_name));
        if target.has_unresolved {
            heading.push_str(&format!("  {}", self.warning("⚠ unresolved dependencies")));
        }
        let _ = writeln!(output, "{}", heading);

        if target.groups.is_empty() {
            let _ = writeln!(output, "{}{}", LAST_BRANCH, self.dimmed("(no dependencies)"));
            return;
        }
        for (i, group) in target.groups.iter().enumerate() {
            let last = i + 1 == target.groups.len();
            let mut caption = self.bold(&group.caption);
            if group.has_unresolved {
                caption.push_str(&format!(" {}", self.warning("⚠")));
            }
            let _ = writeln!(output, "{}{}", if last { LAST_BRANCH } else { BRANCH }, caption);

            let prefix = if last { SPACE } else { PIPE };
            self.render_nodes(output, &group.dependencies, prefix);
        }
    }

    fn render_nodes(&self, output: &mut String, nodes: &[DependencyNodeView], prefix: &str) {
        for (i, node) in nodes.iter().enumerate() {
            let last = i + 1 == nodes.len();
            let _ = writeln!(
                output,
                "{}{}{}",
                prefix,
                if last { LAST_BRANCH } else { BRANCH },
                self.node_label(node)
            );
            let child_prefix = format!("{}{}", prefix, if last { SPACE } else { PIPE });
            self.render_nodes(output, &node.children, &child_prefix);
        }
    }

    fn node_label(&self, node: &DependencyNodeView) -> String {
        let mut label = if node.resolved {
            node.caption.clone()
        } else {
            format!("{} {}", self.error(&node.caption), self.error("[unresolved]"))
        };
        if node.implicit {
            label.push_str(&format!(" {}", self.dimmed("(implicit)")));
        }
        if !node.visible {
            label.push_str(&format!(" {}", self.dimmed("(hidden)")));
        }
        if node.cycle {
            label.push_str(&format!(" {}", self.dimmed("(cycle)")));
        }
        label
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeFormatter for TextFormatter {
    fn format_tree(&self, view: &DependencyTreeView) -> Result<String> {
        let mut output = String::new();
        let title = view.project_name.as_deref().unwrap_or(&view.project_path);
        let _ = writeln!(output, "{}", self.bold(title));
        let _ = writeln!(
            output,
            "{}",
            self.dimmed(&format!("{} (active: {})", view.project_path, view.active_target))
        );

        if view.targets.is_empty() {
            let _ = writeln!(output, "\n{}", self.dimmed("No targets."));
        }
        for target in &view.targets {
            output.push('\n');
            self.render_target(&mut output, target);
        }
        Ok(output)
    }

    fn format_targets(&self, view: &TargetListView) -> Result<String> {
        let mut output = String::new();
        if let Some(name) = &view.project_name {
            let _ = writeln!(output, "{}", self.bold(name));
        }
        for target in &view.targets {
            let _ = writeln!(
                output,
                "{}  {}  {} package(s), {} project(s), {} diagnostic(s)",
                self.bold(&target.short_name),
                self.dimmed(&target.full_name),
                target.package_count,
                target.project_count,
                target.diagnostic_count
            );
        }
        if view.targets.is_empty() {
            let _ = writeln!(output, "{}", self.dimmed("No targets."));
        }
        Ok(output)
    }

    fn format_libraries(&self, view: &LibraryListView) -> Result<String> {
        let mut output = String::new();
        let relation = match view.relation {
            LibraryRelation::Dependents => "Dependents of",
            LibraryRelation::Dependencies => "Dependencies of",
        };
        let _ = writeln!(
            output,
            "{} {} ({})",
            relation,
            self.bold(&view.library),
            view.target
        );
        if view.libraries.is_empty() {
            let _ = writeln!(output, "{}{}", LAST_BRANCH, self.dimmed("(none)"));
        }
        for (i, library) in view.libraries.iter().enumerate() {
            let last = i + 1 == view.libraries.len();
            let _ = writeln!(
                output,
                "{}{} {} {}",
                if last { LAST_BRANCH } else { BRANCH },
                library.name,
                library.version,
                self.dimmed(&format!("[{}]", library.library_type))
            );
        }
        Ok(output)
    }

    fn format_diagnostics(&self, view: &DiagnosticsView) -> Result<String> {
        let mut output = String::new();
        if view.messages.is_empty() {
            let _ = writeln!(output, "No diagnostics.");
            return Ok(output);
        }
        for message in &view.messages {
            let code = match message.level.as_str() {
                "Error" => self.error(&message.code),
                "Warning" => self.warning(&message.code),
                _ => message.code.clone(),
            };
            let _ = write!(output, "{} {}: {}", code, message.level, message.message);
            if !message.target_graphs.is_empty() {
                let _ = write!(
                    output,
                    " {}",
                    self.dimmed(&format!("[{}]", message.target_graphs.join(", ")))
                );
            }
            output.push('\n');
        }
        Ok(output)
    }

    fn format_package_path(&self, view: &PackagePathView) -> Result<String> {
        let mut output = String::new();
        match &view.path {
            Some(path) => {
                let _ = writeln!(output, "{}", path.display());
            }
            None => {
                let _ = writeln!(
                    output,
                    "{} {} {}",
                    self.warning("Not found:"),
                    view.name,
                    view.version
                );
                for folder in &view.searched {
                    let _ = writeln!(output, "  {}", self.dimmed(&folder.display().to_string()));
                }
            }
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::read_models::{
        DependencyGroupView, DiagnosticView, LibraryView, TargetSummaryView,
    };
    use std::path::PathBuf;

    fn node(caption: &str, resolved: bool, children: Vec<DependencyNodeView>) -> DependencyNodeView {
        DependencyNodeView {
            id: caption.to_string(),
            caption: caption.to_string(),
            name: caption.to_string(),
            version: None,
            resolved,
            implicit: false,
            visible: true,
            icon: "NuGetGrey".to_string(),
            flags: Vec::new(),
            path: String::new(),
            cycle: false,
            children,
        }
    }

    fn plain() -> TextFormatter {
        TextFormatter::new().with_color(false)
    }

    #[test]
    fn test_format_tree_draws_branches() {
        let view = DependencyTreeView {
            project_name: Some("App".to_string()),
            project_path: "/src/App/App.csproj".to_string(),
            active_target: "net6.0".to_string(),
            targets: vec![TargetTreeView {
                short_name: "net6.0".to_string(),
                full_name: ".NETCoreApp,Version=v6.0".to_string(),
                has_unresolved: true,
                groups: vec![DependencyGroupView {
                    provider_type: "NuGetDependency".to_string(),
                    caption: "Packages".to_string(),
                    has_unresolved: true,
                    dependencies: vec![
                        node("A (1.0.0)", true, vec![node("B (2.0.0)", true, vec![])]),
                        node("Missing", false, vec![]),
                    ],
                }],
            }],
        };

        let output = plain().format_tree(&view).unwrap();
        let expected = "\
App
/src/App/App.csproj (active: net6.0)

net6.0 (.NETCoreApp,Version=v6.0)  ⚠ unresolved dependencies
└── Packages ⚠
    ├── A (1.0.0)
    │   └── B (2.0.0)
    └── Missing [unresolved]
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_format_tree_no_color_has_no_escape_codes() {
        let view = DependencyTreeView {
            project_name: None,
            project_path: "/src/App/App.csproj".to_string(),
            active_target: "any".to_string(),
            targets: Vec::new(),
        };
        let output = plain().format_tree(&view).unwrap();
        assert!(!output.contains('\u{1b}'));
        assert!(output.contains("No targets."));
    }

    #[test]
    fn test_format_tree_with_color_has_escape_codes() {
        let view = DependencyTreeView {
            project_name: Some("App".to_string()),
            project_path: "/src/App/App.csproj".to_string(),
            active_target: "net6.0".to_string(),
            targets: Vec::new(),
        };
        let output = TextFormatter::new().format_tree(&view).unwrap();
        assert!(output.contains('\u{1b}'));
    }

    #[test]
    fn test_format_targets() {
        let view = TargetListView {
            project_name: Some("App".to_string()),
            targets: vec![TargetSummaryView {
                name: "net6.0".to_string(),
                short_name: "net6.0".to_string(),
                full_name: ".NETCoreApp,Version=v6.0".to_string(),
                package_count: 3,
                project_count: 1,
                diagnostic_count: 0,
            }],
        };
        let output = plain().format_targets(&view).unwrap();
        assert!(output.contains("net6.0  .NETCoreApp,Version=v6.0  3 package(s), 1 project(s)"));
    }

    #[test]
    fn test_format_libraries_empty() {
        let view = LibraryListView {
            target: "net6.0".to_string(),
            library: "A".to_string(),
            relation: LibraryRelation::Dependencies,
            libraries: Vec::<LibraryView>::new(),
        };
        let output = plain().format_libraries(&view).unwrap();
        assert_eq!(output, "Dependencies of A (net6.0)\n└── (none)\n");
    }

    #[test]
    fn test_format_diagnostics() {
        let view = DiagnosticsView {
            target: None,
            messages: vec![DiagnosticView {
                code: "NU1101".to_string(),
                level: "Error".to_string(),
                warning_level: 0,
                message: "Unable to find package Missing".to_string(),
                library_id: Some("Missing".to_string()),
                target_graphs: vec!["net6.0".to_string()],
            }],
        };
        let output = plain().format_diagnostics(&view).unwrap();
        assert_eq!(output, "NU1101 Error: Unable to find package Missing [net6.0]\n");
    }

    #[test]
    fn test_format_package_path_not_found_lists_folders() {
        let view = PackagePathView {
            name: "A".to_string(),
            version: "1.0.0".to_string(),
            path: None,
            searched: vec![PathBuf::from("/home/u/.nuget/packages")],
        };
        let output = plain().format_package_path(&view).unwrap();
        assert!(output.starts_with("Not found: A 1.0.0\n"));
        assert!(output.contains("/home/u/.nuget/packages"));
    }
}
