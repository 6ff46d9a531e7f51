use dashmap::DashMap;
use serde::Serialize;
use std::sync::{Arc, OnceLock};

/// Icon identifiers used by the built-in providers.
pub mod known_icons {
    pub const PACKAGE: &str = "NuGetGrey";
    pub const PACKAGE_WARNING: &str = "NuGetGreyWarning";
    pub const PACKAGE_PRIVATE: &str = "NuGetGreyPrivate";
    pub const PROJECT: &str = "Application";
    pub const PROJECT_WARNING: &str = "ApplicationWarning";
    pub const PROJECT_PRIVATE: &str = "ApplicationPrivate";
    pub const SHARED_PROJECT: &str = "SharedProject";
    pub const SDK: &str = "Sdk";
    pub const SDK_WARNING: &str = "SdkWarning";
    pub const SDK_PRIVATE: &str = "SdkPrivate";
    pub const REFERENCE: &str = "Reference";
    pub const REFERENCE_WARNING: &str = "ReferenceWarning";
    pub const REFERENCE_PRIVATE: &str = "ReferencePrivate";
    pub const FRAMEWORK: &str = "Framework";
    pub const FRAMEWORK_WARNING: &str = "FrameworkWarning";
    pub const FRAMEWORK_PRIVATE: &str = "FrameworkPrivate";
    pub const ANALYZER: &str = "CodeInformation";
    pub const ANALYZER_WARNING: &str = "CodeInformationWarning";
    pub const ANALYZER_PRIVATE: &str = "CodeInformationPrivate";
    pub const COM: &str = "Component";
    pub const COM_WARNING: &str = "ComponentWarning";
    pub const COM_PRIVATE: &str = "ComponentPrivate";
}

/// The four icons a dependency node can show.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DependencyIconSet {
    pub icon: String,
    pub expanded_icon: String,
    pub unresolved_icon: String,
    pub unresolved_expanded_icon: String,
}

impl DependencyIconSet {
    pub fn new(
        icon: impl Into<String>,
        expanded_icon: impl Into<String>,
        unresolved_icon: impl Into<String>,
        unresolved_expanded_icon: impl Into<String>,
    ) -> Self {
        Self {
            icon: icon.into(),
            expanded_icon: expanded_icon.into(),
            unresolved_icon: unresolved_icon.into(),
            unresolved_expanded_icon: unresolved_expanded_icon.into(),
        }
    }

    /// Icon set where the expanded variants equal the collapsed ones.
    pub fn simple(icon: &str, unresolved_icon: &str) -> Self {
        Self::new(icon, icon, unresolved_icon, unresolved_icon)
    }
}

/// Process-wide pool of icon sets. Thousands of nodes share a handful of
/// distinct sets, so every [`Dependency`](super::Dependency) holds a pooled `Arc`.
pub struct DependencyIconSetCache {
    sets: DashMap<DependencyIconSet, Arc<DependencyIconSet>>,
}

impl DependencyIconSetCache {
    pub fn instance() -> &'static DependencyIconSetCache {
        static INSTANCE: OnceLock<DependencyIconSetCache> = OnceLock::new();
        INSTANCE.get_or_init(|| DependencyIconSetCache {
            sets: DashMap::new(),
        })
    }

    pub fn get_or_add(&self, icon_set: DependencyIconSet) -> Arc<DependencyIconSet> {
        if let Some(existing) = self.sets.get(&icon_set) {
            return Arc::clone(existing.value());
        }
        Arc::clone(
            self.sets
                .entry(icon_set.clone())
                .or_insert_with(|| Arc::new(icon_set))
                .value(),
        )
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
