//! Demo 01: Basic CRUD Operations
//!
//! Demonstrates add, load, update, and delete against a throwaway store.
//!
//! Run with: cargo run --example 01_basic_crud

use eyre::Result;
use taskdb::{Task, TaskList, TaskPatch};

fn main() -> Result<()> {
    // Create a temporary directory for this demo
    let temp_dir = tempfile::tempdir()?;

    println!("TaskDB Basic CRUD Demo");
    println!("======================\n");
    println!("Store path: {}\n", temp_dir.path().display());

    let list = TaskList::open(temp_dir.path())?;

    // CREATE: add a task; the store assigns the id
    println!("1. ADD - Adding a task...");
    let mut task = Task::new("Buy milk", "2024-01-01");
    task.description = Some("2 liters, whole".to_string());
    let id = list.add(task)?;
    println!("   Assigned id: {}\n", id);

    // READ: the snapshot already reflects the insert
    println!("2. LOAD - Reading the snapshot...");
    for task in list.tasks() {
        println!("   {:?}", task);
    }
    println!();

    // UPDATE: merge a partial field set onto the stored record
    println!("3. UPDATE - Marking it completed...");
    list.update(id, TaskPatch::new().completed(true))?;
    println!("   completed = {}\n", list.tasks()[0].completed);

    // DELETE: remove by id
    println!("4. DELETE - Removing the task...");
    list.delete(id)?;
    println!("   Snapshot size: {}", list.tasks().len());

    Ok(())
}
