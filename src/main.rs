use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::{Context, Result, eyre};
use std::path::PathBuf;
use taskdb::{Task, TaskList, TaskPatch};

#[derive(Parser)]
#[command(name = "taskdb")]
#[command(about = "Local task list backed by SQLite with a reactive snapshot feed")]
#[command(version)]
struct Cli {
    /// Path to the store directory (default: platform data directory)
    #[arg(short, long)]
    store_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        title: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: String,

        #[arg(long)]
        description: Option<String>,

        /// Set the alarm flag
        #[arg(long)]
        alarm: bool,
    },

    /// List tasks
    List {
        /// Hide completed tasks
        #[arg(long)]
        pending: bool,

        /// Emit the snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark a task completed
    Done { id: i64 },

    /// Update fields of a task
    Update {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        /// New due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        completed: Option<bool>,

        #[arg(long)]
        alarm: Option<bool>,
    },

    /// Remove a task
    Rm { id: i64 },
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let store_path = match cli.store_path {
        Some(path) => path,
        None => dirs::data_local_dir()
            .ok_or_else(|| eyre!("No data directory on this platform; pass --store-path"))?
            .join("taskdb"),
    };

    let list = TaskList::open(&store_path)?;

    match cli.command {
        Commands::Add {
            title,
            due,
            description,
            alarm,
        } => {
            parse_due(&due)?;
            let mut task = Task::new(title, due);
            task.description = description;
            task.alarm = alarm;

            let id = list.add(task)?;
            println!("Added task {}", id);
        }
        Commands::List { pending, json } => {
            let mut tasks = list.load()?;
            if pending {
                tasks.retain(|t| !t.completed);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                render(&tasks);
            }
        }
        Commands::Done { id } => {
            list.update(id, TaskPatch::new().completed(true))?;
            println!("Marked task {} done", id);
        }
        Commands::Update {
            id,
            title,
            due,
            description,
            completed,
            alarm,
        } => {
            if let Some(due) = &due {
                parse_due(due)?;
            }

            let patch = TaskPatch {
                title,
                description,
                due_date: due,
                completed,
                alarm,
            };
            if patch.is_empty() {
                return Err(eyre!("Nothing to update; pass at least one field"));
            }

            list.update(id, patch)?;
            println!("Updated task {}", id);
        }
        Commands::Rm { id } => {
            list.delete(id)?;
            println!("Removed task {}", id);
        }
    }

    Ok(())
}

/// The store accepts any text; the CLI insists on a real calendar date
fn parse_due(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .context(format!("Invalid due date {:?} (expected YYYY-MM-DD)", s))
}

fn render(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks");
        return;
    }

    let today = Local::now().date_naive();
    for task in tasks {
        let id = task.id.map(|id| id.to_string()).unwrap_or_default();
        let marker = if task.completed {
            "[x]".green()
        } else {
            "[ ]".normal()
        };
        let title = if task.completed {
            task.title.as_str().dimmed()
        } else {
            task.title.as_str().normal()
        };
        let overdue = !task.completed && task.due().is_some_and(|d| d < today);
        let due = if overdue {
            task.due_date.as_str().red()
        } else {
            task.due_date.as_str().normal()
        };
        let alarm = if task.alarm { " !" } else { "" };

        println!("{:>4} {} {}  due {}{}", id, marker, title, due, alarm);
        if let Some(description) = &task.description {
            println!("         {}", description.as_str().dimmed());
        }
    }
}
