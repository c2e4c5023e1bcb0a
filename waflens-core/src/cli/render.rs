//! Output formatting for the CLI.
//!
//! Everything renders into a `String`; callers decide where it goes.

use crate::group::{Group, GroupSummary};
use crate::record::{Node, Path, Record};
use crate::view::render_cell_on;
use anyhow::Result;
use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde_json::{Map, Value};

const MAX_CELL_WIDTH: usize = 48;
const COLUMN_GAP: &str = "  ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Ndjson,
}

#[derive(Debug, Clone)]
pub struct TableStyle {
    pub human_time: bool,
    pub timestamp_field: Path,
    pub color: bool,
}

pub fn render_table(records: &[Record], columns: &[String], style: &TableStyle) -> String {
    let paths: Vec<Path> = columns.iter().map(|c| Path::parse(c.as_str())).collect();

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            paths
                .iter()
                .map(|p| truncate(&render_cell_on(record, p, style.human_time, &style.timestamp_field)))
                .collect()
        })
        .collect();

    let header: Vec<String> = columns.iter().map(|c| truncate(c)).collect();
    layout(&header, &rows, style.color)
}

pub fn render_group_table(field: &Path, groups: &[Group], color: bool) -> String {
    let header = vec![truncate(field.as_str()), "count".to_string()];
    let rows: Vec<Vec<String>> = groups
        .iter()
        .map(|g| vec![truncate(&g.key), g.len().to_string()])
        .collect();

    layout(&header, &rows, color)
}

/// Whole records, or only `columns` keyed by path when columns are given.
pub fn render_records(records: &[Record], columns: Option<&[String]>, format: OutputFormat) -> Result<String> {
    let values: Vec<Value> = records
        .iter()
        .map(|r| match columns {
            Some(columns) => project(r, columns),
            None => r.to_json(),
        })
        .collect();
    serialize(&values, format)
}

pub fn render_groups(groups: &[Group], format: OutputFormat) -> Result<String> {
    let summaries: Vec<GroupSummary<'_>> = groups.iter().map(Group::summary).collect();
    serialize(&summaries, format)
}

fn serialize<T: serde::Serialize>(items: &[T], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Ndjson => {
            let mut out = String::new();
            for item in items {
                out.push_str(&serde_json::to_string(item)?);
                out.push('\n');
            }
            Ok(out)
        }
        // Table callers never get here; JSON is the fallback.
        OutputFormat::Json | OutputFormat::Table => Ok(serde_json::to_string_pretty(items)? + "\n"),
    }
}

fn project(record: &Node, columns: &[String]) -> Value {
    let mut map = Map::with_capacity(columns.len());
    for column in columns {
        let value = record
            .get(&Path::parse(column.as_str()))
            .map_or(Value::Null, Node::to_json);
        map.insert(column.clone(), value);
    }
    Value::Object(map)
}

fn layout(header: &[String], rows: &[Vec<String>], color: bool) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();

    let line = pad_row(header, &widths);
    if color {
        out.push_str(&line.bold().to_string());
    } else {
        out.push_str(&line);
    }
    out.push('\n');

    let rule = widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join(COLUMN_GAP);
    if color {
        out.push_str(&rule.dimmed().to_string());
    } else {
        out.push_str(&rule);
    }
    out.push('\n');

    for row in rows {
        out.push_str(&pad_row(row, &widths));
        out.push('\n');
    }
    out
}

fn pad_row(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect();
    padded.join(COLUMN_GAP).trim_end().to_string()
}

fn truncate(s: &str) -> String {
    // Cells are single-line.
    let s = s.replace(['\n', '\r', '\t'], " ");
    if s.chars().count() <= MAX_CELL_WIDTH {
        return s;
    }
    let mut out: String = s.chars().take(MAX_CELL_WIDTH - 1).collect();
    out.push('…');
    out
}
