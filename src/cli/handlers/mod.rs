use std::io::{IsTerminal, Read};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::client::MarvinClient;
use crate::io::config_io::{self, TOKEN_ENV};
use crate::model::config::AppConfig;
use crate::model::query::Query;
use crate::ops::pipeline::Digest;
use crate::parse::{section_body, serialize_checklist, splice_section};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub async fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let config = config_io::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Show(args) => cmd_show(&config, args, json).await,
        Commands::Checklist(args) => cmd_checklist(&config, args, json).await,
        Commands::Splice(args) => cmd_splice(&config, args).await,
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn fetch(
    config: &AppConfig,
    args: &QueryArgs,
) -> Result<(Query, Digest), Box<dyn std::error::Error>> {
    if config.api_token.is_empty() {
        return Err(format!(
            "no API token: set api_token in {} or {}",
            config_io::config_path().display(),
            TOKEN_ENV
        )
        .into());
    }
    let query = args.resolve(&config.default_query)?;
    let client = MarvinClient::from_config(config)?;
    let digest = client.fetch_digest(&query).await?;
    Ok((query, digest))
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

async fn cmd_show(
    config: &AppConfig,
    args: QueryArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (query, digest) = fetch(config, &args).await?;
    if json {
        let out = digest_to_json(&query, &digest);
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        let ansi = std::io::stdout().is_terminal();
        print_lines(&format_digest(&query, &digest, ansi));
    }
    Ok(())
}

async fn cmd_checklist(
    config: &AppConfig,
    args: QueryArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_, digest) = fetch(config, &args).await?;
    let lines = serialize_checklist(&digest.items);
    if json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
    } else {
        print_lines(&lines);
    }
    Ok(())
}

async fn cmd_splice(config: &AppConfig, args: QueryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut document = String::new();
    std::io::stdin().read_to_string(&mut document)?;

    let (_, digest) = fetch(config, &args).await?;
    let body = section_body(&serialize_checklist(&digest.items));
    println!("{}", splice_section(&document, &body));
    Ok(())
}

