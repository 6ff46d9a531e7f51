use super::dependency_model::provider_types;
use super::icon_set::known_icons;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Capability object for one provider type, queried by filters.
pub trait DependencySubTreeProvider: Send + Sync {
    fn provider_type(&self) -> &str;

    /// Icon shown for dependencies this provider marks implicit.
    fn implicit_icon(&self) -> &str;

    /// Providers shipped with the crate also render a group node. External
    /// providers return `None`.
    fn as_internal(&self) -> Option<&dyn InternalSubTreeProvider> {
        None
    }
}

/// Providers whose nodes are grouped under a captioned root in the tree.
pub trait InternalSubTreeProvider {
    fn group_caption(&self) -> &str;
}

/// Built-in provider for one of the well-known [`provider_types`].
#[derive(Debug, Clone)]
pub struct BuiltInSubTreeProvider {
    provider_type: &'static str,
    implicit_icon: &'static str,
    group_caption: &'static str,
}

impl BuiltInSubTreeProvider {
    pub const fn new(
        provider_type: &'static str,
        implicit_icon: &'static str,
        group_caption: &'static str,
    ) -> Self {
        Self {
            provider_type,
            implicit_icon,
            group_caption,
        }
    }
}

impl DependencySubTreeProvider for BuiltInSubTreeProvider {
    fn provider_type(&self) -> &str {
        self.provider_type
    }

    fn implicit_icon(&self) -> &str {
        self.implicit_icon
    }

    fn as_internal(&self) -> Option<&dyn InternalSubTreeProvider> {
        Some(self)
    }
}

impl InternalSubTreeProvider for BuiltInSubTreeProvider {
    fn group_caption(&self) -> &str {
        self.group_caption
    }
}

const BUILT_IN: [BuiltInSubTreeProvider; 8] = [
    BuiltInSubTreeProvider::new(provider_types::PACKAGE, known_icons::PACKAGE_PRIVATE, "Packages"),
    BuiltInSubTreeProvider::new(provider_types::PROJECT, known_icons::PROJECT_PRIVATE, "Projects"),
    BuiltInSubTreeProvider::new(
        provider_types::SHARED_PROJECT,
        known_icons::SHARED_PROJECT,
        "Shared projects",
    ),
    BuiltInSubTreeProvider::new(provider_types::SDK, known_icons::SDK_PRIVATE, "SDK"),
    BuiltInSubTreeProvider::new(
        provider_types::ASSEMBLY,
        known_icons::REFERENCE_PRIVATE,
        "Assemblies",
    ),
    BuiltInSubTreeProvider::new(
        provider_types::FRAMEWORK,
        known_icons::FRAMEWORK_PRIVATE,
        "Frameworks",
    ),
    BuiltInSubTreeProvider::new(
        provider_types::ANALYZER,
        known_icons::ANALYZER_PRIVATE,
        "Analyzers",
    ),
    BuiltInSubTreeProvider::new(provider_types::COM, known_icons::COM_PRIVATE, "COM"),
];

/// Provider-type name → provider. Lookups ignore ASCII case.
#[derive(Clone, Default)]
pub struct SubTreeProviders {
    by_type: HashMap<String, Arc<dyn DependencySubTreeProvider>>,
}

impl SubTreeProviders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, provider: Arc<dyn DependencySubTreeProvider>) {
        self.by_type
            .insert(provider.provider_type().to_ascii_lowercase(), provider);
    }

    pub fn get(&self, provider_type: &str) -> Option<&Arc<dyn DependencySubTreeProvider>> {
        self.by_type.get(&provider_type.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}

impl fmt::Debug for SubTreeProviders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<&str> = self.by_type.values().map(|p| p.provider_type()).collect();
        types.sort_unstable();
        f.debug_struct("SubTreeProviders").field("types", &types).finish()
    }
}

/// Providers for every built-in provider type.
pub fn default_subtree_providers() -> SubTreeProviders {
    let mut providers = SubTreeProviders::new();
    for provider in BUILT_IN {
        providers.insert(Arc::new(provider));
    }
    providers
}
