//! TableDB - CLI Client

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::EnvFilter;

use tabledb::{EngineConfig, ExecutionEngine};

/// Ends the session; checked before any parsing
const EXIT_COMMAND: &str = "EXIT";

/// TableDB interactive shell
#[derive(Parser, Debug)]
#[command(name = "tabledb", version, about = "TableDB interactive shell")]
struct Args {
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Database file used by SAVE TO FILE / LOAD FROM FILE
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Execute commands from a file, one per line
    #[arg(short = 'f', long)]
    file: Option<PathBuf>,

    /// Execute a single command and exit
    #[arg(short = 'c', long)]
    command: Option<String>,
}

/// Whether the session keeps going after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// How an input line is routed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    /// The literal `EXIT` line
    Exit,
    /// A dot command handled by the shell itself
    Shell(&'a str),
    /// Anything else, passed to the engine
    Command(&'a str),
}

/// Route a line. `EXIT` must match exactly, apart from a trailing `\r`.
fn classify(line: &str) -> LineKind<'_> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line == EXIT_COMMAND {
        return LineKind::Exit;
    }

    let trimmed = line.trim();
    if trimmed.starts_with('.') {
        LineKind::Shell(trimmed)
    } else {
        LineKind::Command(line)
    }
}

/// Print welcome banner
fn print_banner() {
    println!("TableDB v{}", env!("CARGO_PKG_VERSION"));
    print_help();
    println!("{}", "=".repeat(50));
}

/// Print help message
fn print_help() {
    println!(
        r#"Available commands:
  CREATE TABLE <name>
  ADD COLUMN <name> <type> [PRIMARY] [NOTNULL] [UNIQUE]
  INSERT INTO <table> VALUES (val1, val2, ...)
  SELECT * FROM <table>
  SAVE TO FILE
  LOAD FROM FILE
  EXIT
Shell commands:
  .help              Show this help message
  .tables            List all tables
  .schema [table]    Show table schema"#
    );
}

/// Handle special dot commands
fn handle_special_command(cmd: &str, engine: &ExecutionEngine) {
    let parts: Vec<&str> = cmd.split_whitespace().collect();
    let catalog = engine.catalog();

    match parts.first().copied() {
        Some(".help") => print_help(),
        Some(".tables") => {
            let tables = catalog.list_tables();
            if tables.is_empty() {
                println!("No tables found.");
            } else {
                println!("Tables:");
                for table in tables {
                    println!("  {}", table);
                }
            }
        }
        Some(".schema") => {
            let names = match parts.get(1) {
                Some(name) => vec![*name],
                None => catalog.list_tables(),
            };
            for name in names {
                match catalog.get_table_info(name) {
                    Some(info) => println!("{}", info),
                    None => println!("Error: Table {} not found", name),
                }
            }
        }
        Some(cmd) => {
            println!("Unknown shell command: {}", cmd);
            println!("Type '.help' for available commands.");
        }
        None => {}
    }
}

/// Run one input line against the engine and print the outcome
fn process_line(engine: &mut ExecutionEngine, line: &str) -> Flow {
    match classify(line) {
        LineKind::Exit => return Flow::Exit,
        LineKind::Shell(cmd) => handle_special_command(cmd, engine),
        LineKind::Command(line) => match engine.execute(line) {
            Ok(result) => {
                if !result.is_empty() {
                    println!("{}", result);
                }
            }
            Err(e) => println!("Error: {}", e),
        },
    }
    Flow::Continue
}

/// Execute every line of a script file, stopping at EXIT
fn run_script(engine: &mut ExecutionEngine, path: &Path) -> Result<()> {
    let script = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;

    for line in script.lines() {
        if process_line(engine, line) == Flow::Exit {
            break;
        }
    }
    Ok(())
}

/// Main REPL loop
fn run_repl(engine: &mut ExecutionEngine) -> Result<()> {
    let mut editor = DefaultEditor::new().context("failed to initialise line editor")?;

    print_banner();

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                if process_line(engine, &line) == Flow::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error reading input: {}", err);
                break;
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(data_file) = args.data_file {
        config = config.data_file(data_file);
    }

    let mut engine = ExecutionEngine::new(config);

    if let Some(command) = &args.command {
        process_line(&mut engine, command);
        return Ok(());
    }

    if let Some(file) = &args.file {
        return run_script(&mut engine, file);
    }

    run_repl(&mut engine)
}
