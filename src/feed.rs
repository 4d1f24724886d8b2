// Reactive snapshot of the task table

use crate::models::Task;
use tokio::sync::watch;

/// Observable holder of the last-loaded task snapshot
///
/// Starts empty; only the repository's reload routine writes to it. The
/// snapshot is always replaced wholesale, never patched in place.
pub struct TaskFeed {
    tx: watch::Sender<Vec<Task>>,
}

impl TaskFeed {
    pub(crate) fn new() -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self { tx }
    }

    /// Register a read-only handle on the snapshot
    ///
    /// Receivers see the current value immediately and are woken on each
    /// publish. Any number of subscribers is fine.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Task>> {
        self.tx.subscribe()
    }

    /// Clone of the latest published snapshot
    pub fn current(&self) -> Vec<Task> {
        self.tx.borrow().clone()
    }

    pub(crate) fn publish(&self, tasks: Vec<Task>) {
        // send_replace stores the value even with zero live receivers
        self.tx.send_replace(tasks);
    }
}
