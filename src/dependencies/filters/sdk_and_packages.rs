use super::{
    AddDecision, AddDependencyContext, DependenciesSnapshotFilter, RemoveDecision,
    RemoveDependencyContext,
};
use crate::dependencies::domain::{
    provider_types, schema, Dependency, DependencyFlag, DependencyId, ProjectItemSpecs,
    SubTreeProviders, TargetFramework,
};
use std::sync::Arc;

pub const NAME: &str = "sdk-and-packages";

/// Keeps an SDK reference in step with the package of the same name: the
/// SDK is resolved, and shows the package's children, only while the
/// package is resolved.
#[derive(Debug, Default, Clone, Copy)]
pub struct SdkAndPackagesFilter;

impl DependenciesSnapshotFilter for SdkAndPackagesFilter {
    fn name(&self) -> &'static str {
        NAME
    }

    fn order(&self) -> i32 {
        110
    }

    fn before_add_or_update(
        &self,
        target_framework: &TargetFramework,
        dependency: Dependency,
        _subtree_providers: &SubTreeProviders,
        _project_item_specs: Option<&ProjectItemSpecs>,
        context: &mut AddDependencyContext<'_>,
    ) -> AddDecision {
        if dependency.flags().contains(&DependencyFlag::SdkDependency) {
            let package_id =
                DependencyId::new(target_framework, provider_types::PACKAGE, dependency.name());
            if let Some(package) = context.try_get(&package_id).filter(|p| p.resolved()) {
                let children = package.shared_dependency_ids();
                return AddDecision::Accept(
                    dependency.to_resolved(schema::RESOLVED_SDK_REFERENCE, Some(children)),
                );
            }
        } else if dependency.flags().contains(&DependencyFlag::PackageDependency)
            && dependency.resolved()
        {
            let sdk_id = DependencyId::new(target_framework, provider_types::SDK, dependency.name());
            if let Some(sdk) = context.try_get(&sdk_id) {
                let resolved = sdk.to_resolved(
                    schema::RESOLVED_SDK_REFERENCE,
                    Some(dependency.shared_dependency_ids()),
                );
                context.add_or_update(resolved);
            }
        }
        AddDecision::Accept(dependency)
    }

    fn before_remove(
        &self,
        target_framework: &TargetFramework,
        dependency: &Dependency,
        context: &mut RemoveDependencyContext<'_>,
    ) -> RemoveDecision {
        if dependency.flags().contains(&DependencyFlag::PackageDependency) && dependency.resolved()
        {
            let sdk_id = DependencyId::new(target_framework, provider_types::SDK, dependency.name());
            if let Some(sdk) = context.try_get(&sdk_id) {
                let unresolved =
                    sdk.to_unresolved(schema::SDK_REFERENCE, Some(Arc::from(Vec::new())));
                context.add_or_update(unresolved);
            }
        }
        RemoveDecision::Accept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependencies::domain::{DependencyModel, TargetedDependenciesSnapshot};
    use crate::dependencies::filters::test_support::*;
    use crate::dependencies::filters::FilterChain;

    fn chain() -> FilterChain {
        FilterChain::new(vec![Arc::new(SdkAndPackagesFilter)])
    }

    fn sdk(snapshot: &TargetedDependenciesSnapshot) -> Arc<Dependency> {
        Arc::clone(
            snapshot
                .get(&DependencyId::new(&tf(), provider_types::SDK, "Microsoft.NET.Sdk.Web"))
                .unwrap(),
        )
    }

    fn package() -> DependencyModel {
        DependencyModel::package("Microsoft.NET.Sdk.Web", Some("6.0.0"), true, false)
            .with_children(["Child"])
    }

    #[test]
    fn test_sdk_added_after_resolved_package_is_resolved() {
        let snapshot = apply(
            &chain(),
            &empty_snapshot(),
            None,
            vec![
                package(),
                DependencyModel::sdk("Microsoft.NET.Sdk.Web", None, false, true),
            ],
            vec![],
        );

        let sdk = sdk(&snapshot);
        assert!(sdk.resolved());
        assert_eq!(sdk.schema_name(), schema::RESOLVED_SDK_REFERENCE);
        assert_eq!(sdk.dependency_ids().len(), 1);
    }

    #[test]
    fn test_package_resolving_later_resolves_existing_sdk() {
        let snapshot = apply(
            &chain(),
            &empty_snapshot(),
            None,
            vec![DependencyModel::sdk("Microsoft.NET.Sdk.Web", None, false, true)],
            vec![],
        );
        assert!(!sdk(&snapshot).resolved());

        let snapshot = apply(&chain(), &snapshot, None, vec![package()], vec![]);
        assert!(sdk(&snapshot).resolved());
    }

    #[test]
    fn test_removing_package_unresolves_sdk() {
        let snapshot = apply(
            &chain(),
            &empty_snapshot(),
            None,
            vec![
                package(),
                DependencyModel::sdk("Microsoft.NET.Sdk.Web", None, false, true),
            ],
            vec![],
        );
        let snapshot = apply(
            &chain(),
            &snapshot,
            None,
            vec![],
            vec![(provider_types::PACKAGE, "Microsoft.NET.Sdk.Web")],
        );

        let sdk = sdk(&snapshot);
        assert!(!sdk.resolved());
        assert_eq!(sdk.schema_name(), schema::SDK_REFERENCE);
        assert!(sdk.dependency_ids().is_empty());
        assert_eq!(snapshot.len(), 1);
    }
}
