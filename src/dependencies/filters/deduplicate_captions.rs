use super::{AddDecision, AddDependencyContext, DependenciesSnapshotFilter};
use crate::dependencies::domain::ignore_case;
use crate::dependencies::domain::{Dependency, ProjectItemSpecs, SubTreeProviders, TargetFramework};

pub const NAME: &str = "deduplicate-captions";

/// Rewrites colliding top-level captions of one provider to their
/// `"Caption (ItemSpec)"` alias so siblings stay distinguishable.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeduplicateCaptionsFilter;

impl DependenciesSnapshotFilter for DeduplicateCaptionsFilter {
    fn name(&self) -> &'static str {
        NAME
    }

    fn order(&self) -> i32 {
        101
    }

    fn before_add_or_update(
        &self,
        _target_framework: &TargetFramework,
        dependency: Dependency,
        _subtree_providers: &SubTreeProviders,
        _project_item_specs: Option<&ProjectItemSpecs>,
        context: &mut AddDependencyContext<'_>,
    ) -> AddDecision {
        if !dependency.top_level() {
            return AddDecision::Accept(dependency);
        }

        let caption = dependency.caption();
        let mut should_alias = false;
        let mut exact_match: Option<Dependency> = None;

        for other in context.iter() {
            if !other.top_level()
                || other.id() == dependency.id()
                || !other
                    .provider_type()
                    .eq_ignore_ascii_case(dependency.provider_type())
            {
                continue;
            }

            let other_caption = other.caption();
            if !ignore_case::starts_with(other_caption, caption) {
                continue;
            }

            if other_caption.len() == caption.len() {
                exact_match = Some((**other).clone());
                should_alias = true;
                break;
            }

            // Already aliased: "Caption (ItemSpec)".
            let item_spec = other.original_item_spec();
            let expected_index = caption.len() + 2;
            let expected_len = expected_index + item_spec.len() + 1;
            if other_caption.len() == expected_len
                && other_caption
                    .get(expected_index..expected_index + item_spec.len())
                    .is_some_and(|spec| spec.eq_ignore_ascii_case(item_spec))
            {
                should_alias = true;
                break;
            }
        }

        if !should_alias {
            return AddDecision::Accept(dependency);
        }

        if let Some(other) = exact_match {
            let alias = other.alias();
            context.add_or_update(other.with_caption(alias));
        }
        let alias = dependency.alias();
        AddDecision::Accept(dependency.with_caption(alias))
    }
}
