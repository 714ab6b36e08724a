use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use tracing::debug;

use crate::commands;
use crate::config;
use crate::error::{Result, TaskError};
use crate::logging;
use crate::model::Status;
use crate::output::Format;
use crate::store::files::FileStore;
use crate::store::repo::Repository;

#[derive(Parser)]
#[command(
    name = "task-cli",
    version,
    about = "Track tasks in a local JSON file",
    arg_required_else_help = true
)]
struct Cli {
    /// Task file (default: $TASK_CLI_FILE, then ./tasks.json)
    #[arg(long, global = true, value_name = "PATH")]
    file: Option<PathBuf>,
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    format: Format,
    /// Shorthand for --format json
    #[arg(long, global = true, hide = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task description (remaining words are joined with spaces)
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        description: Vec<String>,
    },
    /// Update a task's description
    Update {
        /// Task ID to update
        id: String,
        /// New description (remaining words are joined with spaces)
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        description: Vec<String>,
    },
    /// Delete a task
    Delete {
        /// Task ID to delete
        id: String,
        #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
        extra: Vec<String>,
    },
    /// Mark a task as in progress
    MarkInProgress {
        /// Task ID to mark
        id: String,
        #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
        extra: Vec<String>,
    },
    /// Mark a task as done
    MarkDone {
        /// Task ID to mark
        id: String,
        #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
        extra: Vec<String>,
    },
    /// Mark a task as todo again
    MarkTodo {
        /// Task ID to mark
        id: String,
        #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
        extra: Vec<String>,
    },
    /// List tasks, optionally only those with one status
    List {
        /// Status filter: todo, in-progress or done
        #[arg(value_name = "STATUS", trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Display a single task
    Show {
        /// Task ID to show
        id: String,
        #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
        extra: Vec<String>,
    },
}

/// Read a task id the way a lenient integer parse would: leading
/// whitespace and an optional `+` are skipped, then the leading digits are
/// used and anything after them is ignored (`1abc` is task 1). Input with
/// no leading digits, or a negative number, cannot match any task and is
/// reported as not found.
fn parse_task_id(raw: &str) -> Result<u64> {
    let not_found = || TaskError::TaskNotFound(raw.to_string());
    let rest = raw.trim_start();
    let rest = rest.strip_prefix('+').unwrap_or(rest);
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return Err(not_found());
    }
    rest[..end].parse::<u64>().map_err(|_| not_found())
}

/// The filter applies only when exactly one word follows `list`; any other
/// count lists everything.
fn parse_status_filter(args: &[String]) -> Result<Option<Status>> {
    match args {
        [word] => Status::from_str(word, false).map(Some).map_err(|_| {
            TaskError::InvalidArguments(format!(
                "invalid status '{word}' (expected todo, in-progress or done)"
            ))
        }),
        _ => Ok(None),
    }
}

fn run(cli: Cli, format: Format) -> Result<()> {
    let path = config::resolve_task_file(cli.file);
    debug!(path = %path.display(), "using task file");
    let repo = Repository::new(FileStore::new(path));

    match cli.command {
        Commands::Add { description } => {
            commands::add::run(&repo, &description.join(" "), format)
        }
        Commands::Update { id, description } => {
            commands::update::run(&repo, parse_task_id(&id)?, &description.join(" "), format)
        }
        Commands::Delete { id, .. } => commands::delete::run(&repo, parse_task_id(&id)?, format),
        Commands::MarkInProgress { id, .. } => {
            commands::mark::run(&repo, parse_task_id(&id)?, Status::InProgress, format)
        }
        Commands::MarkDone { id, .. } => {
            commands::mark::run(&repo, parse_task_id(&id)?, Status::Done, format)
        }
        Commands::MarkTodo { id, .. } => {
            commands::mark::run(&repo, parse_task_id(&id)?, Status::Todo, format)
        }
        Commands::List { args } => {
            commands::list::run(&repo, parse_status_filter(&args)?, format)
        }
        Commands::Show { id, .. } => commands::show::run(&repo, parse_task_id(&id)?, format),
    }
}

fn report(err: &TaskError, format: Format) {
    match format {
        Format::Json => {
            eprintln!(
                "{}",
                serde_json::json!({
                    "error": err.code(),
                    "message": err.to_string()
                })
            );
        }
        Format::Pretty => eprintln!("error: {err}"),
    }
}

/// Whether the raw arguments ask for JSON output. Used when parsing failed
/// and the parsed `--format` is unavailable.
fn wants_json(args: &[OsString]) -> bool {
    let mut iter = args.iter().map(|a| a.to_string_lossy());
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--" => break,
            "--json" | "--format=json" => return true,
            "--format" if iter.next().is_some_and(|v| v == "json") => return true,
            _ => {}
        }
    }
    false
}

/// Help and version requests succeed; a bare invocation prints usage and
/// succeeds; every other parse failure is a usage error, reported as JSON
/// when JSON output was asked for.
fn report_parse_error(err: clap::Error, format: Format) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            0
        }
        ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            let _ = Cli::command().print_help();
            0
        }
        _ if format == Format::Json => {
            let rendered = err.render().to_string();
            let line = rendered.lines().next().unwrap_or_default();
            let message = line.strip_prefix("error: ").unwrap_or(line);
            report(&TaskError::InvalidArguments(message.to_string()), format);
            1
        }
        _ => {
            let _ = err.print();
            1
        }
    }
}

/// Parse `args`, run one command, and return the process exit code.
pub fn run_cli_from<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(err) => {
            let format = if wants_json(&args) { Format::Json } else { Format::Pretty };
            return report_parse_error(err, format);
        }
    };
    logging::init();

    let format = if cli.json { Format::Json } else { cli.format };
    match run(cli, format) {
        Ok(()) => 0,
        Err(err) => {
            report(&err, format);
            1
        }
    }
}

pub fn run_cli() -> i32 {
    run_cli_from(std::env::args_os())
}
