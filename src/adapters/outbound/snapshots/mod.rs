/// Snapshot adapters - cross-project lookup and the per-project update loop
mod aggregate_provider;
mod snapshot_provider;

pub use aggregate_provider::InMemoryAggregateSnapshotProvider;
pub use snapshot_provider::DependenciesSnapshotProvider;
