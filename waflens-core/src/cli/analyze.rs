use crate::cli::render::{OutputFormat, TableStyle, render_group_table, render_groups, render_records, render_table};
use crate::cli::session::{Session, wait_for};
use crate::coordinator::ResponseBody;
use crate::engine::FilterSortQuery;
use crate::filter::{FilterPredicate, TimeRange};
use crate::group::{group, top_groups};
use crate::record::Path;
use crate::shortcuts::find_shortcut;
use crate::sort::SortSpec;
use crate::view::{default_columns, insert_header_column};
use anyhow::{Result, bail};
use clap::Args;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// NDJSON files or glob patterns (`-` for stdin)
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Predicate, repeatable; all must hold
    #[arg(long = "filter", value_name = "FIELD:OP[:VALUE]")]
    pub filters: Vec<FilterPredicate>,

    /// Sort key, ascending unless `:desc` is given
    #[arg(long, value_name = "FIELD[:asc|desc]")]
    pub sort: Option<SortSpec>,

    /// Earliest timestamp, inclusive
    #[arg(long)]
    pub start: Option<String>,

    /// Latest timestamp, inclusive
    #[arg(long)]
    pub end: Option<String>,

    /// Extra request header to extract into `header.<Name>`, repeatable
    #[arg(long = "header", value_name = "NAME")]
    pub headers: Vec<String>,

    /// Group by this path instead of listing records
    #[arg(long, value_name = "PATH")]
    pub group: Option<String>,

    /// Keep only the N largest groups
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Apply a built-in preset (see `waflens shortcuts`)
    #[arg(long, value_name = "ID")]
    pub shortcut: Option<String>,

    /// Comma-separated columns to show
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Show timestamps as UTC dates
    #[arg(long)]
    pub human_time: bool,

    /// Print at most N records
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Path to a waflens.hcl file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let time_range = TimeRange::from_bounds(args.start.as_deref(), args.end.as_deref())?;

    let mut session = Session::open(&args.inputs, &args.headers, args.config.as_deref())?;
    let catalog = session.processed.catalog.clone();

    let mut predicates = args.filters.clone();
    let mut group_by = args.group.as_deref().map(Path::parse);
    let mut limit = args.top;

    if let Some(id) = &args.shortcut {
        if group_by.is_some() {
            bail!("--shortcut and --group cannot be combined");
        }
        let plan = find_shortcut(id)?.apply(&catalog)?;
        info!(shortcut = %id, group_by = %plan.group_by, "applying shortcut");
        predicates.extend(plan.predicates);
        group_by = Some(plan.group_by);
        limit = limit.or(Some(plan.limit));
    }

    let query = FilterSortQuery {
        predicates,
        sort: Some(args.sort.clone().unwrap_or_else(|| session.cfg.view.default_sort.clone())),
        time_range,
    };

    let records = std::mem::take(&mut session.processed.records);
    let seq = session.coordinator.filter_and_sort(records, query)?;
    let records = match wait_for(&mut session.coordinator, seq)? {
        ResponseBody::FilterSortComplete { records } => records,
        _ => bail!("unexpected response to filter_and_sort"),
    };

    info!(matched = records.len(), "filter and sort complete");

    let color = io::stdout().is_terminal();
    let output = match group_by {
        Some(field) => {
            let mut groups = group(&records, &field);
            if let Some(limit) = limit {
                groups = top_groups(groups, limit);
            }
            match args.format {
                OutputFormat::Table => render_group_table(&field, &groups, color),
                format => render_groups(&groups, format)?,
            }
        }
        None => {
            let shown = match args.limit {
                Some(n) => &records[..n.min(records.len())],
                None => &records[..],
            };
            match args.format {
                OutputFormat::Table => {
                    let columns = if args.columns.is_empty() {
                        let mut columns = default_columns(&catalog, &session.cfg.view);
                        for name in session.headers.names() {
                            insert_header_column(&mut columns, &catalog, name);
                        }
                        columns
                    } else {
                        args.columns.clone()
                    };
                    let style = TableStyle {
                        human_time: args.human_time || session.cfg.view.human_time,
                        timestamp_field: session.cfg.engine.timestamp_field.clone(),
                        color,
                    };
                    let mut table = render_table(shown, &columns, &style);
                    table.push_str(&format!(
                        "\n{} of {} records shown ({} lines skipped)\n",
                        shown.len(),
                        records.len(),
                        session.skipped
                    ));
                    table
                }
                format => {
                    let columns = (!args.columns.is_empty()).then_some(args.columns.as_slice());
                    render_records(shown, columns, format)?
                }
            }
        }
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
