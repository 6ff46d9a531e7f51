use super::InMemoryAggregateSnapshotProvider;
use crate::dependencies::domain::{DependenciesSnapshot, SnapshotUpdate, SubTreeProviders};
use crate::dependencies::filters::FilterChain;
use crate::shared::Result;
use anyhow::Context;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Updates queued beyond this make `submit` wait.
const UPDATE_QUEUE_CAPACITY: usize = 64;

/// Owns one project's current [`DependenciesSnapshot`].
///
/// Updates are applied in order by a single background task. Subscribers
/// are woken only when an update produced a new snapshot.
pub struct DependenciesSnapshotProvider {
    sender: mpsc::Sender<SnapshotUpdate>,
    current: watch::Receiver<Arc<DependenciesSnapshot>>,
    task: JoinHandle<()>,
}

impl DependenciesSnapshotProvider {
    /// Starts the update loop on the current tokio runtime. With an
    /// `aggregate`, every new snapshot is also published there.
    pub fn spawn(
        project_path: &Path,
        filters: Arc<FilterChain>,
        subtree_providers: Arc<SubTreeProviders>,
        aggregate: Option<Arc<InMemoryAggregateSnapshotProvider>>,
    ) -> Self {
        let initial = DependenciesSnapshot::create_empty(project_path);
        let (sender, receiver) = mpsc::channel(UPDATE_QUEUE_CAPACITY);
        let (publisher, current) = watch::channel(Arc::clone(&initial));

        let task = tokio::spawn(run_update_loop(
            initial,
            receiver,
            publisher,
            filters,
            subtree_providers,
            aggregate,
        ));

        Self {
            sender,
            current,
            task,
        }
    }

    /// Queues an update.
    ///
    /// # Errors
    /// Returns an error if the update loop has stopped
    pub async fn submit(&self, update: SnapshotUpdate) -> Result<()> {
        self.sender
            .send(update)
            .await
            .ok()
            .context("Snapshot update loop has stopped")
    }

    pub fn current(&self) -> Arc<DependenciesSnapshot> {
        Arc::clone(&self.current.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<DependenciesSnapshot>> {
        self.current.clone()
    }

    /// Stops accepting updates, drains the queue and returns the final snapshot.
    ///
    /// # Errors
    /// Returns an error if the update loop panicked
    pub async fn shutdown(self) -> Result<Arc<DependenciesSnapshot>> {
        let Self {
            sender,
            current,
            task,
        } = self;
        drop(sender);
        task.await.context("Snapshot update loop panicked")?;
        let snapshot = Arc::clone(&current.borrow());
        Ok(snapshot)
    }
}

async fn run_update_loop(
    mut snapshot: Arc<DependenciesSnapshot>,
    mut receiver: mpsc::Receiver<SnapshotUpdate>,
    publisher: watch::Sender<Arc<DependenciesSnapshot>>,
    filters: Arc<FilterChain>,
    subtree_providers: Arc<SubTreeProviders>,
    aggregate: Option<Arc<InMemoryAggregateSnapshotProvider>>,
) {
    while let Some(update) = receiver.recv().await {
        let next = DependenciesSnapshot::from_changes(&snapshot, &update, &filters, &subtree_providers);
        if Arc::ptr_eq(&next, &snapshot) {
            tracing::debug!(
                project = %snapshot.project_path().display(),
                target = %update.target_framework.short_name(),
                "update left snapshot unchanged"
            );
            continue;
        }

        snapshot = next;
        if let Some(aggregate) = &aggregate {
            aggregate.publish(Arc::clone(&snapshot));
        }
        publisher.send_replace(Arc::clone(&snapshot));
    }
    tracing::trace!(project = %snapshot.project_path().display(), "snapshot update loop finished");
}
