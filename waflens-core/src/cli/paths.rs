use crate::cli::session::Session;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct PathsArgs {
    /// NDJSON files or glob patterns (`-` for stdin)
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Extra request header to extract into `header.<Name>`, repeatable
    #[arg(long = "header", value_name = "NAME")]
    pub headers: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to a waflens.hcl file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run_paths(args: PathsArgs) -> Result<()> {
    let session = Session::open(&args.inputs, &args.headers, args.config.as_deref())?;
    let catalog = &session.processed.catalog;

    if args.json {
        println!("{}", serde_json::to_string_pretty(catalog)?);
        return Ok(());
    }

    for path in catalog.paths() {
        println!("{path}");
    }
    if catalog.is_sampled() {
        eprintln!(
            "note: {} records exceed the sample threshold of {}; paths were collected from a random sample",
            session.processed.records.len(),
            session.cfg.engine.sample_threshold
        );
    }
    Ok(())
}
