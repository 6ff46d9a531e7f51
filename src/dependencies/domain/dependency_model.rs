use super::changes::ModelRef;
use super::flags::{DependencyFlag, DependencyFlags};
use super::icon_set::{known_icons, DependencyIconSet};
use std::collections::{BTreeMap, HashSet};

/// Provider type names. Each names the subtree a node is rendered under.
pub mod provider_types {
    pub const PACKAGE: &str = "NuGetDependency";
    pub const PROJECT: &str = "ProjectDependency";
    pub const SHARED_PROJECT: &str = "SharedProjectDependency";
    pub const SDK: &str = "SdkDependency";
    pub const ASSEMBLY: &str = "AssemblyDependency";
    pub const FRAMEWORK: &str = "FrameworkDependency";
    pub const ANALYZER: &str = "AnalyzerDependency";
    pub const COM: &str = "ComDependency";
}

/// Item schema names for resolved and unresolved variants of each reference kind.
pub mod schema {
    pub const PACKAGE_REFERENCE: &str = "PackageReference";
    pub const RESOLVED_PACKAGE_REFERENCE: &str = "ResolvedPackageReference";
    pub const PROJECT_REFERENCE: &str = "ProjectReference";
    pub const RESOLVED_PROJECT_REFERENCE: &str = "ResolvedProjectReference";
    pub const SDK_REFERENCE: &str = "SdkReference";
    pub const RESOLVED_SDK_REFERENCE: &str = "ResolvedSdkReference";
    pub const ASSEMBLY_REFERENCE: &str = "AssemblyReference";
    pub const RESOLVED_ASSEMBLY_REFERENCE: &str = "ResolvedAssemblyReference";
    pub const FRAMEWORK_REFERENCE: &str = "FrameworkReference";
    pub const RESOLVED_FRAMEWORK_REFERENCE: &str = "ResolvedFrameworkReference";
    pub const ANALYZER_REFERENCE: &str = "AnalyzerReference";
    pub const RESOLVED_ANALYZER_REFERENCE: &str = "ResolvedAnalyzerReference";
    pub const COM_REFERENCE: &str = "ComReference";
    pub const RESOLVED_COM_REFERENCE: &str = "ResolvedComReference";
}

/// Sort priorities; lower sorts first.
pub mod priority {
    pub const UNRESOLVED_REFERENCE: i32 = 110;
    pub const PROJECT: i32 = 120;
    pub const PACKAGE: i32 = 130;
    pub const FRAMEWORK_ASSEMBLY: i32 = 140;
    pub const ANALYZER: i32 = 160;
    pub const COM: i32 = 170;
    pub const SDK: i32 = 180;
}

/// Raw dependency data as produced by a rule handler from evaluation or a
/// design-time build. Turned into a [`Dependency`](super::Dependency) by the
/// snapshot builder.
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyModel {
    pub provider_type: String,
    /// Model id, unique per provider type within one target framework.
    pub id: String,
    pub name: String,
    pub caption: String,
    pub original_item_spec: String,
    pub path: String,
    pub version: Option<String>,
    pub schema_name: String,
    pub schema_item_type: String,
    pub resolved: bool,
    pub top_level: bool,
    pub implicit: bool,
    pub visible: bool,
    pub priority: i32,
    pub flags: DependencyFlags,
    pub icon_set: DependencyIconSet,
    pub dependency_ids: Vec<ModelRef>,
    pub properties: BTreeMap<String, String>,
}

impl DependencyModel {
    /// A visible, top-level, explicit model with no flags. The per-provider
    /// constructors below fill in the rest.
    pub fn new(provider_type: &str, id: &str, caption: &str, resolved: bool) -> Self {
        Self {
            provider_type: provider_type.to_string(),
            id: id.to_string(),
            name: id.to_string(),
            caption: caption.to_string(),
            original_item_spec: id.to_string(),
            path: String::new(),
            version: None,
            schema_name: String::new(),
            schema_item_type: String::new(),
            resolved,
            top_level: true,
            implicit: false,
            visible: true,
            priority: 0,
            flags: DependencyFlags::empty(),
            icon_set: DependencyIconSet::simple(
                known_icons::REFERENCE,
                known_icons::REFERENCE_WARNING,
            ),
            dependency_ids: Vec::new(),
            properties: BTreeMap::new(),
        }
    }

    pub fn package(name: &str, version: Option<&str>, resolved: bool, implicit: bool) -> Self {
        // Unresolved packages show the raw item spec; the version may be a range.
        let caption = match version {
            Some(v) if resolved && !v.is_empty() => format!("{} ({})", name, v),
            _ => name.to_string(),
        };
        let mut model = Self::new(provider_types::PACKAGE, name, &caption, resolved);
        model.version = version.map(str::to_string);
        model.implicit = implicit;
        model.schema_name = resolved_schema(
            resolved,
            schema::RESOLVED_PACKAGE_REFERENCE,
            schema::PACKAGE_REFERENCE,
        );
        model.schema_item_type = schema::PACKAGE_REFERENCE.to_string();
        model.priority = unresolved_or(resolved, priority::PACKAGE);
        model.flags = generic_flags(DependencyFlag::PackageDependency)
            .with(DependencyFlag::SupportsHierarchy);
        model.icon_set = implicit_aware(
            implicit,
            known_icons::PACKAGE,
            known_icons::PACKAGE_PRIVATE,
            known_icons::PACKAGE_WARNING,
        );
        model
    }

    /// `path` is the reference as written, usually relative to the referencing project.
    pub fn project(path: &str, resolved: bool, implicit: bool) -> Self {
        let caption = file_stem(path);
        let mut model = Self::new(provider_types::PROJECT, path, &caption, resolved);
        model.name = caption;
        model.path = path.to_string();
        model.implicit = implicit;
        model.schema_name = resolved_schema(
            resolved,
            schema::RESOLVED_PROJECT_REFERENCE,
            schema::PROJECT_REFERENCE,
        );
        model.schema_item_type = schema::PROJECT_REFERENCE.to_string();
        model.priority = unresolved_or(resolved, priority::PROJECT);
        model.flags = generic_flags(DependencyFlag::ProjectDependency)
            .with(DependencyFlag::SupportsHierarchy);
        model.icon_set = implicit_aware(
            implicit,
            known_icons::PROJECT,
            known_icons::PROJECT_PRIVATE,
            known_icons::PROJECT_WARNING,
        );
        model
    }

    pub fn shared_project(path: &str, resolved: bool) -> Self {
        let mut model = Self::project(path, resolved, false);
        model.provider_type = provider_types::SHARED_PROJECT.to_string();
        model.flags = model.flags.with(DependencyFlag::SharedProject);
        model.icon_set =
            DependencyIconSet::simple(known_icons::SHARED_PROJECT, known_icons::PROJECT_WARNING);
        model
    }

    /// SDK references are created unresolved and become resolved once the
    /// matching package resolves.
    pub fn sdk(name: &str, version: Option<&str>, resolved: bool, implicit: bool) -> Self {
        let caption = match version {
            Some(v) if !v.is_empty() => format!("{} ({})", name, v),
            _ => name.to_string(),
        };
        let mut model = Self::new(provider_types::SDK, name, &caption, resolved);
        model.version = version.map(str::to_string);
        model.implicit = implicit;
        model.schema_name =
            resolved_schema(resolved, schema::RESOLVED_SDK_REFERENCE, schema::SDK_REFERENCE);
        model.schema_item_type = schema::SDK_REFERENCE.to_string();
        model.priority = unresolved_or(resolved, priority::SDK);
        model.flags = generic_flags(DependencyFlag::SdkDependency);
        model.icon_set = implicit_aware(
            implicit,
            known_icons::SDK,
            known_icons::SDK_PRIVATE,
            known_icons::SDK_WARNING,
        );
        model
    }

    pub fn assembly(name: &str, path: &str, resolved: bool, implicit: bool) -> Self {
        let mut model = Self::new(provider_types::ASSEMBLY, name, name, resolved);
        model.path = path.to_string();
        model.implicit = implicit;
        model.schema_name = resolved_schema(
            resolved,
            schema::RESOLVED_ASSEMBLY_REFERENCE,
            schema::ASSEMBLY_REFERENCE,
        );
        model.schema_item_type = schema::ASSEMBLY_REFERENCE.to_string();
        model.priority = unresolved_or(resolved, priority::FRAMEWORK_ASSEMBLY);
        model.flags = generic_flags(DependencyFlag::AssemblyDependency);
        model.icon_set = implicit_aware(
            implicit,
            known_icons::REFERENCE,
            known_icons::REFERENCE_PRIVATE,
            known_icons::REFERENCE_WARNING,
        );
        model
    }

    pub fn framework(name: &str, resolved: bool, implicit: bool) -> Self {
        let mut model = Self::new(provider_types::FRAMEWORK, name, name, resolved);
        model.implicit = implicit;
        model.schema_name = resolved_schema(
            resolved,
            schema::RESOLVED_FRAMEWORK_REFERENCE,
            schema::FRAMEWORK_REFERENCE,
        );
        model.schema_item_type = schema::FRAMEWORK_REFERENCE.to_string();
        model.priority = unresolved_or(resolved, priority::FRAMEWORK_ASSEMBLY);
        model.flags = generic_flags(DependencyFlag::FrameworkDependency);
        model.icon_set = implicit_aware(
            implicit,
            known_icons::FRAMEWORK,
            known_icons::FRAMEWORK_PRIVATE,
            known_icons::FRAMEWORK_WARNING,
        );
        model
    }

    pub fn analyzer(path: &str, resolved: bool, implicit: bool) -> Self {
        let caption = file_stem(path);
        let mut model = Self::new(provider_types::ANALYZER, path, &caption, resolved);
        model.name = caption;
        model.path = path.to_string();
        model.implicit = implicit;
        model.schema_name = resolved_schema(
            resolved,
            schema::RESOLVED_ANALYZER_REFERENCE,
            schema::ANALYZER_REFERENCE,
        );
        model.schema_item_type = schema::ANALYZER_REFERENCE.to_string();
        model.priority = unresolved_or(resolved, priority::ANALYZER);
        model.flags = generic_flags(DependencyFlag::AnalyzerDependency);
        model.icon_set = implicit_aware(
            implicit,
            known_icons::ANALYZER,
            known_icons::ANALYZER_PRIVATE,
            known_icons::ANALYZER_WARNING,
        );
        model
    }

    pub fn com(name: &str, resolved: bool, implicit: bool) -> Self {
        let mut model = Self::new(provider_types::COM, name, name, resolved);
        model.implicit = implicit;
        model.schema_name =
            resolved_schema(resolved, schema::RESOLVED_COM_REFERENCE, schema::COM_REFERENCE);
        model.schema_item_type = schema::COM_REFERENCE.to_string();
        model.priority = unresolved_or(resolved, priority::COM);
        model.flags = generic_flags(DependencyFlag::ComDependency);
        model.icon_set = implicit_aware(
            implicit,
            known_icons::COM,
            known_icons::COM_PRIVATE,
            known_icons::COM_WARNING,
        );
        model
    }

    pub fn with_item_spec(mut self, original_item_spec: &str) -> Self {
        self.original_item_spec = original_item_spec.to_string();
        self
    }

    pub fn with_caption(mut self, caption: &str) -> Self {
        self.caption = caption.to_string();
        self
    }

    /// Marks the model as a transitive (non top-level) node.
    pub fn transitive(mut self) -> Self {
        self.top_level = false;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Adds children of the same provider type, by model id.
    pub fn with_children<'a>(mut self, model_ids: impl IntoIterator<Item = &'a str>) -> Self {
        let provider_type = self.provider_type.clone();
        self.dependency_ids.extend(
            model_ids
                .into_iter()
                .map(|id| ModelRef::new(&provider_type, id)),
        );
        self
    }

    pub fn with_child_refs(mut self, refs: impl IntoIterator<Item = ModelRef>) -> Self {
        self.dependency_ids.extend(refs);
        self
    }

    pub fn with_property(mut self, key: &str, value: &str) -> Self {
        self.properties.insert(key.to_string(), value.to_string());
        self
    }

    pub fn model_ref(&self) -> ModelRef {
        ModelRef::new(&self.provider_type, &self.id)
    }
}

/// Item specs literally written in the project file. Lookups ignore ASCII case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectItemSpecs(HashSet<String>);

impl ProjectItemSpecs {
    pub fn contains(&self, item_spec: &str) -> bool {
        self.0.contains(&item_spec.to_ascii_lowercase())
    }

    pub fn insert(&mut self, item_spec: &str) {
        self.0.insert(item_spec.to_ascii_lowercase());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ProjectItemSpecs {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|s| s.as_ref().to_ascii_lowercase())
                .collect(),
        )
    }
}

fn generic_flags(kind: DependencyFlag) -> DependencyFlags {
    DependencyFlags::empty()
        .with(DependencyFlag::GenericDependency)
        .with(kind)
}

fn resolved_schema(resolved: bool, resolved_name: &str, unresolved_name: &str) -> String {
    let name = if resolved { resolved_name } else { unresolved_name };
    name.to_string()
}

fn unresolved_or(resolved: bool, priority: i32) -> i32 {
    if resolved {
        priority
    } else {
        priority::UNRESOLVED_REFERENCE
    }
}

fn implicit_aware(implicit: bool, icon: &str, implicit_icon: &str, warning: &str) -> DependencyIconSet {
    DependencyIconSet::simple(if implicit { implicit_icon } else { icon }, warning)
}

/// `..\Lib\Lib.csproj` → `Lib`
fn file_stem(path: &str) -> String {
    let file = path.rsplit(|c: char| c == '\\' || c == '/').next().unwrap_or(path);
    match file.rfind('.') {
        Some(dot) if dot > 0 => file[..dot].to_string(),
        _ => file.to_string(),
    }
}
