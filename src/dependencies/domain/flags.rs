use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Semantic tag attached to a dependency node, used by filters for matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DependencyFlag {
    Resolved,
    Unresolved,
    /// Produced by a rule handler from a real project item (as opposed to
    /// diagnostic or grouping nodes).
    GenericDependency,
    SupportsHierarchy,
    PackageDependency,
    ProjectDependency,
    SharedProject,
    SdkDependency,
    AssemblyDependency,
    FrameworkDependency,
    AnalyzerDependency,
    ComDependency,
    /// Provider-specific tag not known to this crate.
    Custom(String),
}

impl fmt::Display for DependencyFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyFlag::Custom(name) => write!(f, "{}", name),
            other => write!(f, "{:?}", other),
        }
    }
}

/// Immutable set of [`DependencyFlag`]s. Mutators return a new set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct DependencyFlags(BTreeSet<DependencyFlag>);

impl DependencyFlags {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains(&self, flag: &DependencyFlag) -> bool {
        self.0.contains(flag)
    }

    pub fn with(mut self, flag: DependencyFlag) -> Self {
        self.0.insert(flag);
        self
    }

    pub fn without(mut self, flag: &DependencyFlag) -> Self {
        self.0.remove(flag);
        self
    }

    pub fn union(&self, other: &DependencyFlags) -> Self {
        Self(self.0.union(&other.0).cloned().collect())
    }

    pub fn except(&self, other: &DependencyFlags) -> Self {
        Self(self.0.difference(&other.0).cloned().collect())
    }

    /// Replaces whichever resolution flag is present with the one matching `resolved`.
    pub fn with_resolution(self, resolved: bool) -> Self {
        if resolved {
            self.without(&DependencyFlag::Unresolved)
                .with(DependencyFlag::Resolved)
        } else {
            self.without(&DependencyFlag::Resolved)
                .with(DependencyFlag::Unresolved)
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &DependencyFlag> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<DependencyFlag> for DependencyFlags {
    fn from_iter<I: IntoIterator<Item = DependencyFlag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
