use crate::dependencies::domain::{Dependency, DependencyId};
use std::collections::BTreeMap;
use std::sync::Arc;

/// The in-progress dependency map shared by both context kinds.
#[derive(Debug)]
struct InProgress<'a> {
    world: &'a mut BTreeMap<DependencyId, Arc<Dependency>>,
    changed: bool,
}

macro_rules! in_progress_context {
    ($name:ident) => {
        impl<'a> $name<'a> {
            pub(crate) fn new(world: &'a mut BTreeMap<DependencyId, Arc<Dependency>>) -> Self {
                Self {
                    inner: InProgress {
                        world,
                        changed: false,
                    },
                }
            }

            pub fn contains(&self, id: &DependencyId) -> bool {
                self.inner.world.contains_key(id)
            }

            pub fn try_get(&self, id: &DependencyId) -> Option<&Arc<Dependency>> {
                self.inner.world.get(id)
            }

            /// Every dependency currently in the in-progress snapshot.
            pub fn iter(&self) -> impl Iterator<Item = &Arc<Dependency>> {
                self.inner.world.values()
            }

            /// Adds or replaces a sibling dependency.
            pub fn add_or_update(&mut self, dependency: Dependency) {
                self.inner
                    .world
                    .insert(dependency.id().clone(), Arc::new(dependency));
                self.inner.changed = true;
            }

            /// Whether a filter mutated a sibling since the last reset.
            pub fn changed(&self) -> bool {
                self.inner.changed
            }

            pub(crate) fn reset(&mut self) {
                self.inner.changed = false;
            }
        }
    };
}

/// Sibling view handed to filters for an add or update.
#[derive(Debug)]
pub struct AddDependencyContext<'a> {
    inner: InProgress<'a>,
}

in_progress_context!(AddDependencyContext);

impl AddDependencyContext<'_> {
    pub(crate) fn commit(&mut self, dependency: Dependency) {
        self.inner
            .world
            .insert(dependency.id().clone(), Arc::new(dependency));
    }
}

/// Sibling view handed to filters for a removal.
#[derive(Debug)]
pub struct RemoveDependencyContext<'a> {
    inner: InProgress<'a>,
}

in_progress_context!(RemoveDependencyContext);

impl RemoveDependencyContext<'_> {
    pub(crate) fn commit_removal(&mut self, id: &DependencyId) {
        self.inner.world.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependencies::domain::{DependencyModel, TargetFramework};
    use std::path::Path;

    fn package(name: &str) -> Dependency {
        Dependency::from_model(
            &DependencyModel::package(name, Some("1.0.0"), true, false),
            &TargetFramework::from_name("net6.0"),
            Path::new("/p/p.csproj"),
        )
    }

    #[test]
    fn test_add_or_update_marks_changed_until_reset() {
        let mut world = BTreeMap::new();
        let mut context = AddDependencyContext::new(&mut world);
        assert!(!context.changed());

        let a = package("A");
        let id = a.id().clone();
        context.add_or_update(a);
        assert!(context.changed());
        assert!(context.contains(&id));

        context.reset();
        assert!(!context.changed());
        assert_eq!(context.iter().count(), 1);
    }

    #[test]
    fn test_commit_does_not_mark_changed() {
        let mut world = BTreeMap::new();
        let mut context = AddDependencyContext::new(&mut world);
        context.commit(package("A"));
        assert!(!context.changed());
        drop(context);
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_commit_removal() {
        let a = package("A");
        let id = a.id().clone();
        let mut world = BTreeMap::from([(id.clone(), Arc::new(a))]);
        let mut context = RemoveDependencyContext::new(&mut world);
        assert!(context.try_get(&id).is_some());
        context.commit_removal(&id);
        assert!(!context.contains(&id));
    }
}
