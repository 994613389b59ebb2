use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::model::query::{Query, QueryError, QueryType};

#[derive(Parser)]
#[command(name = "mn", about = concat!("marvin-notes v", env!("CARGO_PKG_VERSION"), " - Amazing Marvin lists as plain-text checklists"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: $XDG_CONFIG_HOME/marvin-notes/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch items and show them as a tree
    Show(QueryArgs),
    /// Print the checklist snapshot
    Checklist(QueryArgs),
    /// Read a note on stdin and write it back with the snapshot section updated
    Splice(QueryArgs),
}

#[derive(Args, Clone, Default)]
pub struct QueryArgs {
    /// Which items to fetch: today, due-today
    #[arg(long = "type", value_parser = parse_query_type)]
    pub kind: Option<QueryType>,
    /// Query as a JSON object, applied over the configured default query
    #[arg(long)]
    pub query: Option<String>,
    /// Fetch items for this day (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Heading shown above the list
    #[arg(long)]
    pub title: Option<String>,
    /// Show notes under each item
    #[arg(long)]
    pub show_note: bool,
    /// Keep categories that hold no tasks
    #[arg(long)]
    pub keep_empty: bool,
    /// Don't copy category colors down to their contents
    #[arg(long)]
    pub no_inherit_color: bool,
    /// Don't fetch or show labels
    #[arg(long)]
    pub no_labels: bool,
}

fn parse_query_type(s: &str) -> Result<QueryType, String> {
    match s {
        "today" => Ok(QueryType::Today),
        "due-today" => Ok(QueryType::DueToday),
        other => Err(format!("unknown type '{}' (expected today or due-today)", other)),
    }
}

impl QueryArgs {
    /// Build the effective query: `base`, then `--query`, then flags
    pub fn resolve(&self, base: &Query) -> Result<Query, QueryError> {
        let mut query = match &self.query {
            Some(json) => base.overlay(json)?,
            None => base.clone(),
        };
        if let Some(kind) = self.kind {
            query.kind = Some(kind);
        }
        if let Some(date) = self.date {
            query.date = Some(date);
        }
        if let Some(title) = &self.title {
            query.title = title.clone();
        }
        if self.show_note {
            query.show_note = true;
        }
        if self.keep_empty {
            query.hide_empty = false;
        }
        if self.no_inherit_color {
            query.inherit_color = false;
        }
        if self.no_labels {
            query.show_label = false;
        }
        Ok(query)
    }
}
