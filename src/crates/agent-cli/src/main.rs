//! # agent-parse
//!
//! Run raw model output through the response parser from the shell.
//!
//! Exit status: 0 on success or a match, 1 when the input is not valid JSON
//! or matches no response shape, 2 on I/O or configuration errors.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use response_parser::config::ENV_PREFIX;
use response_parser::{ConfigBuilder, InterpretError, ParserConfig, ResponseParser};
use serde_json::{json, Value};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, Level};

#[derive(Parser)]
#[command(name = "agent-parse")]
#[command(about = "Interpret raw LLM output as a tool call or completion", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove markdown code fences
    Strip {
        /// Input file (defaults to stdin)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Strip fences and decode as JSON
    Parse {
        /// Input file (defaults to stdin)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Classify a JSON document as tool call or completion
    Validate {
        /// Input file (defaults to stdin)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Strip, decode and classify in one step
    Interpret {
        /// Input file (defaults to stdin)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Whether the input was accepted
enum Status {
    Accepted,
    Rejected,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Accepted => ExitCode::SUCCESS,
            Status::Rejected => ExitCode::from(1),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<Status> {
    let config = ParserConfig::from_env_with_defaults(ENV_PREFIX)
        .context("Invalid parser configuration")?;
    init_logging(cli.verbose, &config.log_level);

    let parser = ResponseParser::new(config);

    match cli.command {
        Commands::Strip { file } => {
            let input = read_input(file.as_ref())?;
            println!("{}", parser.strip(&input));
            Ok(Status::Accepted)
        }
        Commands::Parse { file } => {
            let input = read_input(file.as_ref())?;
            match parser.parse_json(&input) {
                Ok(value) => {
                    print_json(&value)?;
                    Ok(Status::Accepted)
                }
                Err(err) => {
                    eprintln!("{}", err);
                    Ok(Status::Rejected)
                }
            }
        }
        Commands::Validate { file } => {
            let input = read_input(file.as_ref())?;
            let value = match parser.parse_json(&input) {
                Ok(value) => value,
                Err(err) => {
                    eprintln!("{}", err);
                    return Ok(Status::Rejected);
                }
            };

            let classification = parser.validate(&value);
            print_json(&serde_json::to_value(&classification)?)?;
            Ok(if classification.is_matched() {
                Status::Accepted
            } else {
                Status::Rejected
            })
        }
        Commands::Interpret { file } => {
            let input = read_input(file.as_ref())?;
            match parser.interpret(&input) {
                Ok(parsed) => {
                    print_json(&json!({"matched": true, "value": parsed}))?;
                    Ok(Status::Accepted)
                }
                Err(err) => {
                    print_json(&rejection_report(&err))?;
                    Ok(Status::Rejected)
                }
            }
        }
    }
}

fn rejection_report(err: &InterpretError) -> Value {
    let errors: Vec<String> = match err {
        InterpretError::Decode(decode) => vec![decode.cause().to_string()],
        InterpretError::Validation(failure) => failure.errors().to_vec(),
    };

    json!({
        "matched": false,
        "code": err.error_code(),
        "errors": errors,
        "feedback": err.feedback(),
    })
}

fn init_logging(verbose: bool, configured: &str) {
    let log_level = if verbose {
        Level::DEBUG
    } else {
        match configured {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => {
            debug!(path = %path.display(), "Reading input file");
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))
        }
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
