//! Process-wide interning for the strings an assets file repeats thousands
//! of times (library names, versions, target names).

use dashmap::DashSet;
use std::sync::{Arc, OnceLock};

fn pool() -> &'static DashSet<Arc<str>> {
    static POOL: OnceLock<DashSet<Arc<str>>> = OnceLock::new();
    POOL.get_or_init(DashSet::new)
}

pub(crate) fn intern(value: &str) -> Arc<str> {
    if let Some(existing) = pool().get(value) {
        return Arc::clone(existing.key());
    }
    let interned: Arc<str> = Arc::from(value);
    pool().insert(Arc::clone(&interned));
    interned
}
