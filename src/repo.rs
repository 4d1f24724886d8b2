// Task repository with reload-after-write snapshot refresh

use crate::feed::TaskFeed;
use crate::models::{Task, TaskPatch};
use crate::store::Store;
use eyre::Result;
use std::path::Path;
use tokio::sync::watch;
use tracing::debug;

/// Task list context: the store plus its snapshot feed
///
/// Every mutating operation re-reads the whole table and republishes it, so
/// subscribers always observe the authoritative full state after each write.
pub struct TaskList {
    store: Store,
    feed: TaskFeed,
}

impl TaskList {
    /// Open the underlying store; the feed starts empty until `load` runs
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let store = Store::open(path)?;
        Ok(Self {
            store,
            feed: TaskFeed::new(),
        })
    }

    /// Read the full table and publish it as the new snapshot
    pub fn load(&self) -> Result<Vec<Task>> {
        let tasks = self.store.list_all()?;
        debug!(count = tasks.len(), "Publishing task snapshot");
        self.feed.publish(tasks.clone());
        Ok(tasks)
    }

    /// Insert a task and return the store-assigned id
    ///
    /// The snapshot reflects the new record before this returns.
    pub fn add(&self, task: Task) -> Result<i64> {
        let id = self.store.insert(&task)?;
        self.load()?;
        Ok(id)
    }

    /// Merge `patch` onto the task at `id`
    ///
    /// A missing id is a store-level no-op; the snapshot is republished
    /// either way.
    pub fn update(&self, id: i64, patch: TaskPatch) -> Result<()> {
        self.store.update(id, &patch)?;
        self.load()?;
        Ok(())
    }

    /// Delete the task at `id`; no-op when absent
    pub fn delete(&self, id: i64) -> Result<()> {
        self.store.delete(id)?;
        self.load()?;
        Ok(())
    }

    /// Read-only handle on the snapshot feed
    pub fn subscribe(&self) -> watch::Receiver<Vec<Task>> {
        self.feed.subscribe()
    }

    /// Clone of the latest published snapshot
    pub fn tasks(&self) -> Vec<Task> {
        self.feed.current()
    }

    /// Direct access to the underlying store
    pub fn store(&self) -> &Store {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_temp() -> (TempDir, TaskList) {
        let temp = TempDir::new().unwrap();
        let list = TaskList::open(temp.path()).unwrap();
        (temp, list)
    }

    #[test]
    fn test_feed_empty_before_first_load() {
        let temp = TempDir::new().unwrap();

        {
            let list = TaskList::open(temp.path()).unwrap();
            list.add(Task::new("persisted", "2024-01-01")).unwrap();
        }

        let list = TaskList::open(temp.path()).unwrap();
        assert!(list.tasks().is_empty());

        let loaded = list.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(list.tasks().len(), 1);
    }

    #[test]
    fn test_add_publishes_before_returning() {
        let (_temp, list) = open_temp();

        let id = list.add(Task::new("Buy milk", "2024-01-01")).unwrap();

        // No explicit load: the triggered reload already ran
        let tasks = list.tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, Some(id));
        assert_eq!(tasks[0].title, "Buy milk");
    }

    #[test]
    fn test_add_round_trip() {
        let (_temp, list) = open_temp();

        let mut task = Task::new("Water plants", "2024-06-01");
        task.description = Some("balcony only".to_string());
        task.alarm = true;

        let id = list.add(task.clone()).unwrap();

        task.id = Some(id);
        let tasks = list.load().unwrap();
        assert_eq!(tasks, vec![task]);
    }

    #[test]
    fn test_update_republishes_snapshot() {
        let (_temp, list) = open_temp();

        let id = list.add(Task::new("t", "2024-01-01")).unwrap();
        list.update(id, TaskPatch::new().completed(true)).unwrap();

        let tasks = list.tasks();
        assert!(tasks[0].completed);
        assert_eq!(tasks[0].title, "t");
    }

    #[test]
    fn test_update_missing_id_still_republishes() {
        let (_temp, list) = open_temp();

        list.add(Task::new("t", "2024-01-01")).unwrap();
        let mut rx = list.subscribe();
        rx.borrow_and_update();

        list.update(99, TaskPatch::new().completed(true)).unwrap();

        // The reload fires even though nothing changed in the store
        assert!(rx.has_changed().unwrap());
        assert_eq!(list.tasks().len(), 1);
        assert!(!list.tasks()[0].completed);
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let (_temp, list) = open_temp();

        let id1 = list.add(Task::new("a", "2024-01-01")).unwrap();
        let id2 = list.add(Task::new("b", "2024-01-02")).unwrap();

        list.delete(id1).unwrap();

        let tasks = list.tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, Some(id2));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let (_temp, list) = open_temp();

        let id = list.add(Task::new("t", "2024-01-01")).unwrap();
        list.delete(id).unwrap();
        list.delete(id).unwrap();

        assert!(list.tasks().is_empty());
    }

    #[test]
    fn test_subscriber_observes_each_mutation() {
        let (_temp, list) = open_temp();
        let mut rx = list.subscribe();

        let id = list.add(Task::new("t", "2024-01-01")).unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);

        list.delete(id).unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_empty());
    }

    // The end-to-end scenario: add, complete, delete
    #[test]
    fn test_add_complete_delete_scenario() {
        let (_temp, list) = open_temp();

        let id = list.add(Task::new("Buy milk", "2024-01-01")).unwrap();
        assert_eq!(id, 1);

        let tasks = list.load().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, Some(1));
        assert_eq!(tasks[0].title, "Buy milk");
        assert!(!tasks[0].completed);
        assert!(!tasks[0].alarm);

        list.update(1, TaskPatch::new().completed(true)).unwrap();
        let tasks = list.load().unwrap();
        assert_eq!(tasks.len(), 1);
        assert!(tasks[0].completed);
        assert_eq!(tasks[0].title, "Buy milk");

        list.delete(1).unwrap();
        assert!(list.load().unwrap().is_empty());
    }
}
