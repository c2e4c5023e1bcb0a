use clap::{Parser, Subcommand};
use waflens_core::cli::analyze::{AnalyzeArgs, run_analyze};
use waflens_core::cli::conf::{ConfigCmd, run_config};
use waflens_core::cli::paths::{PathsArgs, run_paths};
use waflens_core::cli::shortcuts::run_shortcuts;
use waflens_core::logging::{LogFormat, default_log_format, init_logging};

#[derive(Parser, Debug)]
#[command(
    name = "waflens",
    version,
    about = "waflens: filter, sort and group web-firewall access logs"
)]
struct Cli {
    /// Log output format (json or pretty); logs always go to stderr
    #[arg(long, global = true, value_name = "FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Filter, sort and group NDJSON logs
    Analyze(AnalyzeArgs),

    /// List every field path found in the logs
    Paths(PathsArgs),

    /// List the built-in analysis presets
    Shortcuts {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.log_format.unwrap_or_else(default_log_format));

    let result = match cli.command {
        Command::Analyze(args) => run_analyze(args),
        Command::Paths(args) => run_paths(args),
        Command::Shortcuts { json } => run_shortcuts(json),
        Command::Config { cmd } => run_config(cmd),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
