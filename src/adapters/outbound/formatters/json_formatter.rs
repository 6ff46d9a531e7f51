use crate::application::read_models::{
    DependencyTreeView, DiagnosticsView, LibraryListView, PackagePathView, TargetListView,
};
use crate::ports::outbound::TreeFormatter;
use crate::shared::Result;
use serde::Serialize;

const TOOL_NAME: &str = env!("CARGO_PKG_NAME");
const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Every JSON document carries the producing tool and a `kind` tag.
#[derive(Serialize)]
struct Document<'a, T: Serialize> {
    tool: Tool,
    kind: &'static str,
    #[serde(flatten)]
    body: &'a T,
}

#[derive(Serialize)]
struct Tool {
    name: &'static str,
    version: &'static str,
}

/// JsonFormatter adapter for machine-readable output
///
/// This adapter implements the TreeFormatter port, serializing each read
/// model as pretty-printed JSON.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    fn render<T: Serialize>(kind: &'static str, body: &T) -> Result<String> {
        let document = Document {
            tool: Tool {
                name: TOOL_NAME,
                version: TOOL_VERSION,
            },
            kind,
            body,
        };
        let mut json = serde_json::to_string_pretty(&document)?;
        json.push('\n');
        Ok(json)
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeFormatter for JsonFormatter {
    fn format_tree(&self, view: &DependencyTreeView) -> Result<String> {
        Self::render("dependencyTree", view)
    }

    fn format_targets(&self, view: &TargetListView) -> Result<String> {
        Self::render("targets", view)
    }

    fn format_libraries(&self, view: &LibraryListView) -> Result<String> {
        Self::render("libraries", view)
    }

    fn format_diagnostics(&self, view: &DiagnosticsView) -> Result<String> {
        Self::render("diagnostics", view)
    }

    fn format_package_path(&self, view: &PackagePathView) -> Result<String> {
        Self::render("packagePath", view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::read_models::{
        DependencyGroupView, DependencyNodeView, LibraryRelation, LibraryView, TargetTreeView,
    };
    use serde_json::Value;

    fn node(name: &str, resolved: bool) -> DependencyNodeView {
        DependencyNodeView {
            id: format!("net6.0\\NuGetDependency\\{}", name),
            caption: name.to_string(),
            name: name.to_string(),
            version: Some("1.0.0".to_string()),
            resolved,
            implicit: false,
            visible: true,
            icon: "NuGetGrey".to_string(),
            flags: vec!["PackageDependency".to_string()],
            path: String::new(),
            cycle: false,
            children: Vec::new(),
        }
    }

    fn tree() -> DependencyTreeView {
        DependencyTreeView {
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
                    dependencies: vec![node("A", true), node("Missing", false)],
                }],
            }],
        }
    }

    #[test]
    fn test_format_tree_document_shape() {
        let output = JsonFormatter::new().format_tree(&tree()).unwrap();
        let json: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["kind"], "dependencyTree");
        assert_eq!(json["tool"]["name"], TOOL_NAME);
        assert_eq!(json["projectName"], "App");
        let deps = &json["targets"][0]["groups"][0]["dependencies"];
        assert_eq!(deps[0]["name"], "A");
        assert_eq!(deps[1]["resolved"], false);
        // Empty collections and unset flags are omitted.
        assert!(deps[0].get("children").is_none());
        assert!(deps[0].get("cycle").is_none());
        assert!(deps[0].get("path").is_none());
    }

    #[test]
    fn test_format_tree_keeps_field_order() {
        let output = JsonFormatter::new().format_tree(&tree()).unwrap();
        let tool = output.find("\"tool\"").unwrap();
        let kind = output.find("\"kind\"").unwrap();
        let targets = output.find("\"targets\"").unwrap();
        assert!(tool < kind && kind < targets);
    }

    #[test]
    fn test_format_libraries() {
        let view = LibraryListView {
            target: "net6.0".to_string(),
            library: "B".to_string(),
            relation: LibraryRelation::Dependents,
            libraries: vec![LibraryView {
                name: "A".to_string(),
                version: "1.0.0".to_string(),
                library_type: "package".to_string(),
                path: Some("a/1.0.0".to_string()),
            }],
        };
        let output = JsonFormatter::new().format_libraries(&view).unwrap();
        let json: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["relation"], "dependents");
        assert_eq!(json["libraries"][0]["type"], "package");
        assert!(output.ends_with('\n'));
    }
}
