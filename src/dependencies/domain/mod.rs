pub mod changes;
pub mod dependency;
pub mod dependency_model;
pub mod flags;
pub mod icon_set;
pub mod snapshot;
pub mod subtree_provider;
pub mod target_framework;
pub mod targeted_snapshot;

pub(crate) mod ignore_case;

pub use changes::{DependenciesChanges, DependenciesChangesBuilder, ModelRef};
pub use dependency::{Dependency, DependencyId, PropertyChanges};
pub use dependency_model::{provider_types, schema, DependencyModel, ProjectItemSpecs};
pub use flags::{DependencyFlag, DependencyFlags};
pub use icon_set::{known_icons, DependencyIconSet, DependencyIconSetCache};
pub use snapshot::{DependenciesSnapshot, SnapshotUpdate};
pub use subtree_provider::{
    default_subtree_providers, BuiltInSubTreeProvider, DependencySubTreeProvider,
    InternalSubTreeProvider, SubTreeProviders,
};
pub use target_framework::TargetFramework;
pub use targeted_snapshot::TargetedDependenciesSnapshot;
