use super::{AddDecision, AddDependencyContext, DependenciesSnapshotFilter};
use crate::dependencies::domain::{
    Dependency, DependencyFlag, DependencyIconSet, ProjectItemSpecs, PropertyChanges,
    SubTreeProviders, TargetFramework,
};

pub const NAME: &str = "implicit-top-level";

/// Marks resolved top-level dependencies that are not written in the
/// project file as implicit, with the provider's implicit icon.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImplicitTopLevelFilter;

impl DependenciesSnapshotFilter for ImplicitTopLevelFilter {
    fn name(&self) -> &'static str {
        NAME
    }

    fn order(&self) -> i32 {
        130
    }

    fn before_add_or_update(
        &self,
        _target_framework: &TargetFramework,
        dependency: Dependency,
        subtree_providers: &SubTreeProviders,
        project_item_specs: Option<&ProjectItemSpecs>,
        _context: &mut AddDependencyContext<'_>,
    ) -> AddDecision {
        let Some(item_specs) = project_item_specs else {
            return AddDecision::Accept(dependency);
        };

        if dependency.implicit()
            || !dependency.resolved()
            || !dependency.top_level()
            || !dependency.flags().contains(&DependencyFlag::GenericDependency)
            || dependency.flags().contains(&DependencyFlag::SharedProject)
            || item_specs.contains(dependency.original_item_spec())
        {
            return AddDecision::Accept(dependency);
        }

        let Some(provider) = subtree_providers
            .get(dependency.provider_type())
            .filter(|p| p.as_internal().is_some())
        else {
            return AddDecision::Accept(dependency);
        };

        let implicit_icon = provider.implicit_icon();
        let icons = dependency.icon_set();
        let icon_set = DependencyIconSet::new(
            implicit_icon,
            implicit_icon,
            icons.unresolved_icon.as_str(),
            icons.unresolved_expanded_icon.as_str(),
        );
        AddDecision::Accept(dependency.set_properties(PropertyChanges {
            icon_set: Some(icon_set),
            implicit: Some(true),
            ..Default::default()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependencies::domain::{known_icons, DependencyModel};
    use crate::dependencies::filters::test_support::*;
    use crate::dependencies::filters::FilterChain;
    use std::sync::Arc;

    fn run(model: DependencyModel, item_specs: Option<&ProjectItemSpecs>) -> Arc<Dependency> {
        let chain = FilterChain::new(vec![Arc::new(ImplicitTopLevelFilter)]);
        let snapshot = apply(&chain, &empty_snapshot(), item_specs, vec![model], vec![]);
        let dependency = snapshot.dependencies().next().unwrap();
        Arc::clone(dependency)
    }

    #[test]
    fn test_dependency_absent_from_project_file_is_implicit() {
        let specs: ProjectItemSpecs = ["Serilog"].into_iter().collect();
        let dependency = run(
            DependencyModel::package("NETStandard.Library", Some("2.0.3"), true, false),
            Some(&specs),
        );

        assert!(dependency.implicit());
        assert_eq!(dependency.icon_set().icon, known_icons::PACKAGE_PRIVATE);
        assert_eq!(dependency.icon_set().expanded_icon, known_icons::PACKAGE_PRIVATE);
        assert_eq!(dependency.icon_set().unresolved_icon, known_icons::PACKAGE_WARNING);
    }

    #[test]
    fn test_dependency_in_project_file_stays_explicit() {
        let specs: ProjectItemSpecs = ["netstandard.library"].into_iter().collect();
        let dependency = run(
            DependencyModel::package("NETStandard.Library", Some("2.0.3"), true, false),
            Some(&specs),
        );

        assert!(!dependency.implicit());
        assert_eq!(dependency.icon_set().icon, known_icons::PACKAGE);
    }

    #[test]
    fn test_without_item_specs_nothing_changes() {
        let dependency = run(
            DependencyModel::package("NETStandard.Library", Some("2.0.3"), true, false),
            None,
        );
        assert!(!dependency.implicit());
    }

    #[test]
    fn test_unresolved_and_shared_are_exempt() {
        let specs = ProjectItemSpecs::default();
        assert!(!run(DependencyModel::package("A", None, false, false), Some(&specs)).implicit());
        assert!(!run(DependencyModel::shared_project("../S/S.shproj", true), Some(&specs)).implicit());
    }
}
