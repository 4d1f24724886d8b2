//! Demo 02: Snapshot Feed
//!
//! Shows how subscribers observe the republished snapshot after each
//! mutation without touching the store themselves.
//!
//! Run with: cargo run --example 02_snapshot_feed

use eyre::Result;
use taskdb::{Task, TaskList, TaskPatch};

fn main() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;

    println!("TaskDB Snapshot Feed Demo");
    println!("=========================\n");

    let list = TaskList::open(temp_dir.path())?;
    let mut rx = list.subscribe();

    println!("Initial snapshot: {} tasks\n", rx.borrow_and_update().len());

    let id = list.add(Task::new("Water plants", "2024-06-01"))?;
    println!("After add:");
    println!("  changed = {}", rx.has_changed()?);
    for task in rx.borrow_and_update().iter() {
        println!("  {:?}", task);
    }
    println!();

    list.update(id, TaskPatch::new().completed(true))?;
    println!("After update:");
    println!("  changed = {}", rx.has_changed()?);
    println!("  completed = {}", rx.borrow_and_update()[0].completed);
    println!();

    list.delete(id)?;
    println!("After delete:");
    println!("  changed = {}", rx.has_changed()?);
    println!("  snapshot size = {}", rx.borrow_and_update().len());

    Ok(())
}
