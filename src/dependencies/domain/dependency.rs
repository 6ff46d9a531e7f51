use super::changes::ModelRef;
use super::dependency_model::DependencyModel;
use super::flags::DependencyFlags;
use super::icon_set::{DependencyIconSet, DependencyIconSetCache};
use super::ignore_case;
use super::target_framework::TargetFramework;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

const ID_SEPARATOR: char = '\\';

/// Snapshot key of a dependency: `"{target}\{provider type}\{model id}"`.
///
/// Stable across snapshot regenerations for the same logical dependency.
/// Compares ordinal, ignoring ASCII case.
#[derive(Debug, Clone)]
pub struct DependencyId(Arc<str>);

impl DependencyId {
    pub fn new(target_framework: &TargetFramework, provider_type: &str, model_id: &str) -> Self {
        let short_name = target_framework.short_name();
        let mut id =
            String::with_capacity(short_name.len() + provider_type.len() + model_id.len() + 2);
        id.push_str(short_name);
        id.push(ID_SEPARATOR);
        id.push_str(provider_type);
        id.push(ID_SEPARATOR);
        id.extend(model_id.chars().map(|c| if c == '/' { ID_SEPARATOR } else { c }));
        let trimmed = id.trim_end_matches(ID_SEPARATOR).len();
        id.truncate(trimmed);
        Self(Arc::from(id))
    }

    /// Wraps an already-formed id, e.g. one read back from a view.
    pub fn from_raw(id: &str) -> Self {
        Self(Arc::from(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for DependencyId {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for DependencyId {}

impl Hash for DependencyId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        ignore_case::hash(&self.0, state);
    }
}

impl PartialOrd for DependencyId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DependencyId {
    fn cmp(&self, other: &Self) -> Ordering {
        ignore_case::cmp(&self.0, &other.0)
    }
}

impl fmt::Display for DependencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for DependencyId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Optional overrides applied by [`Dependency::set_properties`].
#[derive(Debug, Clone, Default)]
pub struct PropertyChanges {
    pub caption: Option<String>,
    pub resolved: Option<bool>,
    pub flags: Option<DependencyFlags>,
    pub schema_name: Option<String>,
    pub dependency_ids: Option<Arc<[DependencyId]>>,
    pub icon_set: Option<DependencyIconSet>,
    pub implicit: Option<bool>,
}

/// One immutable node of a target framework's dependency tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Dependency {
    id: DependencyId,
    target_framework: TargetFramework,
    provider_type: String,
    name: String,
    caption: String,
    original_item_spec: String,
    path: String,
    full_path: PathBuf,
    version: Option<String>,
    schema_name: String,
    schema_item_type: String,
    resolved: bool,
    top_level: bool,
    implicit: bool,
    visible: bool,
    priority: i32,
    flags: DependencyFlags,
    icon_set: Arc<DependencyIconSet>,
    dependency_ids: Arc<[DependencyId]>,
    properties: Arc<BTreeMap<String, String>>,
}

impl Dependency {
    /// Builds the unfiltered node for `model` within `target_framework` of the
    /// project at `project_path`.
    pub fn from_model(
        model: &DependencyModel,
        target_framework: &TargetFramework,
        project_path: &Path,
    ) -> Self {
        let caption = if model.caption.is_empty() {
            if model.name.is_empty() {
                model.id.clone()
            } else {
                model.name.clone()
            }
        } else {
            model.caption.clone()
        };

        let dependency_ids: Arc<[DependencyId]> = model
            .dependency_ids
            .iter()
            .map(|r| DependencyId::new(target_framework, &r.provider_type, &r.model_id))
            .collect();

        Self {
            id: DependencyId::new(target_framework, &model.provider_type, &model.id),
            target_framework: target_framework.clone(),
            provider_type: model.provider_type.clone(),
            name: model.name.clone(),
            caption,
            original_item_spec: model.original_item_spec.clone(),
            path: model.path.clone(),
            full_path: resolve_full_path(project_path, &model.path),
            version: model.version.clone(),
            schema_name: model.schema_name.clone(),
            schema_item_type: model.schema_item_type.clone(),
            resolved: model.resolved,
            top_level: model.top_level,
            implicit: model.implicit,
            visible: model.visible,
            priority: model.priority,
            flags: model.flags.clone().with_resolution(model.resolved),
            icon_set: DependencyIconSetCache::instance().get_or_add(model.icon_set.clone()),
            dependency_ids,
            properties: Arc::new(model.properties.clone()),
        }
    }

    pub fn id(&self) -> &DependencyId {
        &self.id
    }

    pub fn target_framework(&self) -> &TargetFramework {
        &self.target_framework
    }

    pub fn provider_type(&self) -> &str {
        &self.provider_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn original_item_spec(&self) -> &str {
        &self.original_item_spec
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// `path` resolved against the owning project's directory. Empty when the
    /// model carried no path.
    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    pub fn schema_item_type(&self) -> &str {
        &self.schema_item_type
    }

    pub fn resolved(&self) -> bool {
        self.resolved
    }

    pub fn top_level(&self) -> bool {
        self.top_level
    }

    pub fn implicit(&self) -> bool {
        self.implicit
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn flags(&self) -> &DependencyFlags {
        &self.flags
    }

    pub fn icon_set(&self) -> &Arc<DependencyIconSet> {
        &self.icon_set
    }

    /// The icon matching the current resolution state.
    pub fn icon(&self) -> &str {
        if self.resolved {
            &self.icon_set.icon
        } else {
            &self.icon_set.unresolved_icon
        }
    }

    pub fn dependency_ids(&self) -> &[DependencyId] {
        &self.dependency_ids
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Caption disambiguated with the item spec (or path), used when two
    /// top-level siblings would otherwise render the same text.
    pub fn alias(&self) -> String {
        let spec = if self.original_item_spec.is_empty() {
            &self.path
        } else {
            &self.original_item_spec
        };
        if spec.is_empty() || spec.eq_ignore_ascii_case(&self.caption) {
            self.caption.clone()
        } else {
            format!("{} ({})", self.caption, spec)
        }
    }

    pub fn with_caption(&self, caption: impl Into<String>) -> Self {
        self.set_properties(PropertyChanges {
            caption: Some(caption.into()),
            ..Default::default()
        })
    }

    pub fn set_properties(&self, changes: PropertyChanges) -> Self {
        let mut dependency = self.clone();
        if let Some(caption) = changes.caption {
            dependency.caption = caption;
        }
        if let Some(resolved) = changes.resolved {
            dependency.resolved = resolved;
        }
        if let Some(flags) = changes.flags {
            dependency.flags = flags;
        }
        if let Some(schema_name) = changes.schema_name {
            dependency.schema_name = schema_name;
        }
        if let Some(dependency_ids) = changes.dependency_ids {
            dependency.dependency_ids = dependency_ids;
        }
        if let Some(icon_set) = changes.icon_set {
            dependency.icon_set = DependencyIconSetCache::instance().get_or_add(icon_set);
        }
        if let Some(implicit) = changes.implicit {
            dependency.implicit = implicit;
        }
        dependency
    }

    pub fn to_resolved(
        &self,
        schema_name: &str,
        dependency_ids: Option<Arc<[DependencyId]>>,
    ) -> Self {
        self.set_properties(PropertyChanges {
            resolved: Some(true),
            flags: Some(self.flags.clone().with_resolution(true)),
            schema_name: Some(schema_name.to_string()),
            dependency_ids,
            ..Default::default()
        })
    }

    pub fn to_unresolved(
        &self,
        schema_name: &str,
        dependency_ids: Option<Arc<[DependencyId]>>,
    ) -> Self {
        self.set_properties(PropertyChanges {
            resolved: Some(false),
            flags: Some(self.flags.clone().with_resolution(false)),
            schema_name: Some(schema_name.to_string()),
            dependency_ids,
            ..Default::default()
        })
    }

    /// The `(provider type, model id)` this node was built from, recovered
    /// from the id. Separators in the model id come back as `\`.
    pub fn model_ref(&self) -> ModelRef {
        let prefix = self.target_framework.short_name().len() + self.provider_type.len() + 2;
        ModelRef::new(&self.provider_type, self.id.as_str().get(prefix..).unwrap_or(""))
    }

    pub(crate) fn shared_dependency_ids(&self) -> Arc<[DependencyId]> {
        Arc::clone(&self.dependency_ids)
    }
}

fn resolve_full_path(project_path: &Path, path: &str) -> PathBuf {
    if path.is_empty() {
        return PathBuf::new();
    }
    let native: String = path
        .chars()
        .map(|c| if c == '\\' || c == '/' { std::path::MAIN_SEPARATOR } else { c })
        .collect();
    let candidate = Path::new(&native);
    if candidate.is_absolute() {
        return normalize_lexically(candidate);
    }
    let base = project_path.parent().unwrap_or_else(|| Path::new(""));
    normalize_lexically(&base.join(candidate))
}

/// Folds `.` and `..` without touching the filesystem.
pub(crate) fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependencies::domain::{provider_types, DependencyFlag};

    fn tf() -> TargetFramework {
        TargetFramework::new("net6.0", ".NETCoreApp,Version=v6.0")
    }

    #[test]
    fn test_id_normalizes_separators() {
        let id = DependencyId::new(&tf(), provider_types::PROJECT, "../Lib/Lib.csproj/");
        assert_eq!(id.as_str(), r"net6.0\ProjectDependency\..\Lib\Lib.csproj");
    }

    #[test]
    fn test_id_comparison_ignores_case() {
        let a = DependencyId::new(&tf(), provider_types::PACKAGE, "Serilog");
        let b = DependencyId::from_raw(r"NET6.0\nugetdependency\serilog");
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn test_from_model_sets_resolution_flag_and_children() {
        let model = DependencyModel::package("A", Some("1.0.0"), true, false).with_children(["B"]);
        let dependency = Dependency::from_model(&model, &tf(), Path::new("/src/App/App.csproj"));

        assert!(dependency.flags().contains(&DependencyFlag::Resolved));
        assert_eq!(dependency.dependency_ids().len(), 1);
        assert_eq!(
            dependency.dependency_ids()[0].as_str(),
            r"net6.0\NuGetDependency\B"
        );
        assert_eq!(dependency.icon(), "NuGetGrey");
    }

    #[test]
    fn test_full_path_resolves_relative_to_project_directory() {
        let model = DependencyModel::project(r"..\Lib\Lib.csproj", true, false);
        let dependency = Dependency::from_model(&model, &tf(), Path::new("/src/App/App.csproj"));
        assert_eq!(dependency.full_path(), Path::new("/src/Lib/Lib.csproj"));
    }

    #[test]
    fn test_alias() {
        let model = DependencyModel::package("MetadataExtractor", None, true, false)
            .with_item_spec("Extractor1");
        let dependency = Dependency::from_model(&model, &tf(), Path::new("/p/p.csproj"));
        assert_eq!(dependency.alias(), "MetadataExtractor (Extractor1)");

        let same = DependencyModel::package("Serilog", None, true, false);
        let dependency = Dependency::from_model(&same, &tf(), Path::new("/p/p.csproj"));
        assert_eq!(dependency.alias(), "Serilog");
    }

    #[test]
    fn test_to_unresolved_swaps_flags_and_icon() {
        let model = DependencyModel::project("../Lib/Lib.csproj", true, false);
        let dependency = Dependency::from_model(&model, &tf(), Path::new("/p/p.csproj"));
        let unresolved = dependency.to_unresolved("ProjectReference", None);

        assert!(!unresolved.resolved());
        assert!(unresolved.flags().contains(&DependencyFlag::Unresolved));
        assert!(!unresolved.flags().contains(&DependencyFlag::Resolved));
        assert_eq!(unresolved.icon(), "ApplicationWarning");
        assert_eq!(unresolved.schema_name(), "ProjectReference");
        assert!(dependency.resolved());
    }

    #[test]
    fn test_set_properties_leaves_unset_fields() {
        let model = DependencyModel::package("A", Some("1.0.0"), true, false);
        let dependency = Dependency::from_model(&model, &tf(), Path::new("/p/p.csproj"));
        let implicit = dependency.set_properties(PropertyChanges {
            implicit: Some(true),
            ..Default::default()
        });
        assert!(implicit.implicit());
        assert_eq!(implicit.caption(), dependency.caption());
        assert_eq!(implicit.id(), dependency.id());
    }

    #[test]
    fn test_model_ref_round_trips_through_id() {
        let model = DependencyModel::project("../Lib/Lib.csproj", true, false);
        let dependency = Dependency::from_model(&model, &tf(), Path::new("/p/p.csproj"));
        let model_ref = dependency.model_ref();
        assert_eq!(model_ref.model_id, r"..\Lib\Lib.csproj");
        assert_eq!(
            DependencyId::new(&tf(), &model_ref.provider_type, &model_ref.model_id),
            *dependency.id()
        );
    }

    #[test]
    fn test_normalize_lexically() {
        assert_eq!(
            normalize_lexically(Path::new("/a/b/../c/./d")),
            PathBuf::from("/a/c/d")
        );
    }
}
