//! # chatlens CLI
//!
//! Command-line front end for the chatlens library.

use std::io::{self, Write};
use std::process;

use clap::Parser as ClapParser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chatlens::{ChatlensError, MessageTable};
use chatlens::analysis::analyze;
use chatlens::cli::Args;
use chatlens::config::Config;
use chatlens::core::FilterConfig;
use chatlens::format::{OutputFormat, render};
use chatlens::parser::LineParser;

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<(), ChatlensError> {
    let args = <Args as ClapParser>::parse();
    init_logging(&args);

    // Config file first, flags override it
    let mut config = match &args.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };
    if let Some(n) = args.top_words {
        config.analysis.top_words = n;
    }
    if let Some(n) = args.top_users {
        config.analysis.top_users = n;
    }
    if let Some(path) = &args.stop_words {
        config.analysis.stop_words_file = Some(path.clone());
    }

    let mut filter = FilterConfig::new().with_user(args.user.as_str());
    if let Some(ref after) = args.after {
        filter = filter.with_date_from(after)?;
    }
    if let Some(ref before) = args.before {
        filter = filter.with_date_to(before)?;
    }

    let text = read_export(&args)?;
    let parser = LineParser::new(&config.parser)?;
    let table = MessageTable::from_export_with(&text, &parser);
    info!(
        messages = table.len(),
        dropped = table.dropped(),
        format = table.format().unwrap_or("none"),
        "parsed export"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.list_users {
        for user in table.user_options() {
            writeln!(out, "{}", user)?;
        }
        return Ok(());
    }

    let format: OutputFormat = args.format.into();
    if format == OutputFormat::Text {
        writeln!(out, "💬 chatlens v{}", env!("CARGO_PKG_VERSION"))?;
        writeln!(out, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(out, "📂 Input:    {}", args.input.display())?;
        writeln!(out, "🔎 Format:   {}", table.format().unwrap_or("not recognized"))?;
        writeln!(out, "📨 Messages: {}", table.len())?;
        if table.dropped() > 0 {
            writeln!(out, "⏭️  Dropped:  {} (unparseable timestamps)", table.dropped())?;
        }
        if let Some(after) = filter.after {
            writeln!(out, "📅 After:    {}", after)?;
        }
        if let Some(before) = filter.before {
            writeln!(out, "📅 Before:   {}", before)?;
        }
        writeln!(out)?;
    }

    let report = analyze(&table, &filter, &config.analysis)?;
    writeln!(out, "{}", render(&report, format)?)?;

    Ok(())
}

fn read_export(args: &Args) -> Result<String, ChatlensError> {
    let bytes = std::fs::read(&args.input)?;
    String::from_utf8(bytes).map_err(|e| ChatlensError::utf8(args.input.display().to_string(), e))
}
