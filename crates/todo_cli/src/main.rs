//! Command-line driver for the task list core.
//!
//! Each invocation opens the store, replays one command as UI events
//! against a headless surface and prints the resulting list.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{error, info};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use todo_core::db::{open_db, open_db_in_memory};
use todo_core::{
    init_logging, AppConfig, Confirm, Controller, EditKey, HeadlessSurface, KvTaskRepository,
    Node, NodeRole, Outcome, SqliteKvStore, Task, TaskId, TaskRepository, TaskStore, UiEvent,
};

#[derive(Parser, Debug)]
#[command(name = "todo")]
#[command(about = "A small persistent task list")]
#[command(version)]
struct Cli {
    /// SQLite file holding the task list [default: <data dir>/todo/todo.db]
    #[arg(long, conflicts_with = "memory")]
    db: Option<PathBuf>,

    /// Keep tasks in memory for this run only
    #[arg(long)]
    memory: bool,

    /// Storage key of the task blob
    #[arg(long, default_value = todo_core::STORAGE_KEY)]
    key: String,

    /// Absolute directory for rolling log files
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error (requires --log-dir)
    #[arg(long, requires = "log_dir")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show all tasks (default)
    List,
    /// Add a task at the top of the list
    Add { text: Vec<String> },
    /// Flip a task between active and completed
    Toggle { id: String },
    /// Replace the text of a task
    Edit { id: String, text: Vec<String> },
    /// Delete a task
    Remove { id: String },
    /// Delete every completed task
    ClearCompleted,
    /// Delete every task
    ClearAll {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Add { .. } => "add",
            Self::Toggle { .. } => "toggle",
            Self::Edit { .. } => "edit",
            Self::Remove { .. } => "remove",
            Self::ClearCompleted => "clear_completed",
            Self::ClearAll { .. } => "clear_all",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli, default_db_path())?;

    if let Some(dir) = &config.log_dir {
        init_logging(&config.log_level, dir)?;
    }

    let conn = match &config.db_path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            open_db(path).with_context(|| format!("opening {}", path.display()))?
        }
        None => open_db_in_memory()?,
    };
    let repo = KvTaskRepository::with_key(SqliteKvStore::new(&conn), config.storage_key.clone());
    let store = TaskStore::open(repo);

    let confirm = StdinConfirm {
        assume_yes: matches!(cli.command, Some(Command::ClearAll { yes: true })),
    };
    let mut controller = Controller::new(store, HeadlessSurface::new(), confirm);
    controller.start();

    let command = cli.command.unwrap_or(Command::List);
    let name = command.name();
    if let Err(err) = run(&mut controller, command) {
        error!("event=cli_command module=cli status=error command={name} error={err}");
        return Err(err);
    }
    info!(
        "event=cli_command module=cli status=ok command={name} count={}",
        controller.store().len()
    );
    print_list(controller.store().tasks(), &controller.surface().summary);
    Ok(())
}

/// Per-user database location, `None` when the platform has no data dir.
fn default_db_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("todo").join("todo.db"))
}

fn build_config(cli: &Cli, default_db: Option<PathBuf>) -> Result<AppConfig> {
    if cli.log_level.is_some() && cli.log_dir.is_none() {
        bail!("--log-level has no effect without --log-dir");
    }
    let db_path = if cli.memory {
        None
    } else {
        match cli.db.clone().or(default_db) {
            Some(path) => Some(path),
            None => bail!("no data directory on this platform; pass --db or --memory"),
        }
    };

    let mut config = AppConfig {
        db_path,
        storage_key: cli.key.clone(),
        log_dir: cli.log_dir.clone(),
        ..AppConfig::default()
    };
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    Ok(config.validate()?)
}

fn run<R: TaskRepository>(
    controller: &mut Controller<R, HeadlessSurface, StdinConfirm>,
    command: Command,
) -> Result<()> {
    match command {
        Command::List => {}
        Command::Add { text } => {
            controller.surface_mut().type_input(&text.join(" "));
            if controller.handle(UiEvent::Submit) == Outcome::Unchanged {
                bail!("task text cannot be empty");
            }
        }
        Command::Toggle { id } => {
            let id = resolve_id(controller.store().tasks(), &id)?;
            controller.handle(row_event(NodeRole::Toggle, id));
        }
        Command::Edit { id, text } => {
            let id = resolve_id(controller.store().tasks(), &id)?;
            controller.handle(UiEvent::ListDoubleClick {
                path: vec![Node::of(NodeRole::Text), Node::row(id)],
            });
            controller.handle(UiEvent::EditKey {
                key: EditKey::Enter,
                value: text.join(" "),
            });
        }
        Command::Remove { id } => {
            let id = resolve_id(controller.store().tasks(), &id)?;
            controller.handle(row_event(NodeRole::Delete, id));
        }
        Command::ClearCompleted => {
            controller.handle(UiEvent::ClearCompleted);
        }
        Command::ClearAll { .. } => {
            controller.handle(UiEvent::ClearAll);
        }
    }
    Ok(())
}

fn row_event(role: NodeRole, id: TaskId) -> UiEvent {
    UiEvent::ListClick {
        path: vec![Node::of(role), Node::row(id)],
    }
}

/// Accepts a full id or any unambiguous prefix of one.
fn resolve_id(tasks: &[Task], input: &str) -> Result<TaskId> {
    let input = input.trim();
    if input.is_empty() {
        bail!("task id cannot be empty");
    }
    if let Some(task) = tasks.iter().find(|task| task.id.as_str() == input) {
        return Ok(task.id.clone());
    }
    let mut matches = tasks
        .iter()
        .filter(|task| task.id.as_str().starts_with(input));
    match (matches.next(), matches.next()) {
        (Some(task), None) => Ok(task.id.clone()),
        (None, _) => bail!("no task matches id `{input}`"),
        (Some(_), Some(_)) => bail!("id prefix `{input}` is ambiguous"),
    }
}

fn print_list(tasks: &[Task], summary: &str) {
    if tasks.is_empty() {
        println!("{}", todo_core::view::EMPTY_HINT);
    }
    for task in tasks {
        let mark = if task.completed { "x" } else { " " };
        println!("[{mark}] {}  {}", task.id, task.text);
    }
    println!("{summary}");
}

struct StdinConfirm {
    assume_yes: bool,
}

impl Confirm for StdinConfirm {
    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{message} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}
