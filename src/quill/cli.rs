//! Command-line driver: find or replace text in a file from the shell.

use std::io::Write;
use std::path::PathBuf;

use anyhow::bail;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::quill::{
    document::Document,
    find_panel::FindPanel,
    search::{
        SearchMatch,
        highlight::LogHighlight,
        position::{Position, line_col},
        status::SearchStatus,
    },
};

/// Quill find & replace
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(about = "Find and replace text in a file", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every occurrence of a term
    Find(FindArgs),
    /// Replace every occurrence of a term, or a single one
    Replace(ReplaceArgs),
}

#[derive(Args, Debug)]
pub struct FindArgs {
    /// File to search
    pub file: PathBuf,

    /// Text to look for
    pub term: String,

    /// Match case exactly
    #[arg(short, long)]
    pub case_sensitive: bool,

    /// Print matches as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ReplaceArgs {
    /// File to edit
    pub file: PathBuf,

    /// Text to look for
    pub term: String,

    /// Text to put in its place
    pub replacement: String,

    /// Match case exactly
    #[arg(short, long)]
    pub case_sensitive: bool,

    /// Only replace the N-th match (1-based)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub nth: Option<u64>,

    /// Write the result here instead of overwriting the file (written even when nothing matched)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Serialize)]
struct MatchReport {
    #[serde(flatten)]
    span: SearchMatch,
    #[serde(flatten)]
    position: Position,
}

fn open_panel(term: &str, case_sensitive: bool) -> FindPanel {
    let mut panel = FindPanel::with_observer(Box::new(LogHighlight));
    panel.open();
    panel.set_term(term);
    panel.set_case_sensitive(case_sensitive);
    panel
}

/// Run a parsed command, writing its report to `out`
///
/// ### Arguments
/// - `command`: The command to run
/// - `out`: Where to write the report
///
/// ### Returns
/// - `Ok(())`: If the command completed, including when nothing matched
/// - `Err(anyhow::Error)`: If a file could not be read or written, or `--nth` is out of range
pub fn run(command: Command, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Command::Find(args) => find(args, out),
        Command::Replace(args) => replace(args, out),
    }
}

fn find(args: FindArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let document = Document::open(&args.file)?;
    let mut panel = open_panel(&args.term, args.case_sensitive);
    panel.find_all(&document);
    let text = document.content();
    let reports: Vec<MatchReport> = panel
        .matches()
        .iter()
        .map(|&span| MatchReport {
            span,
            position: line_col(text, span.start),
        })
        .collect();
    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&reports)?)?;
        return Ok(());
    }
    for report in &reports {
        writeln!(out, "{}:{}", args.file.display(), report.position)?;
    }
    let summary = if reports.is_empty() {
        SearchStatus::NoMatches
    } else {
        SearchStatus::Found(reports.len())
    };
    writeln!(out, "{}", summary)?;
    Ok(())
}

fn replace(args: ReplaceArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let mut document = Document::open(&args.file)?;
    let mut panel = open_panel(&args.term, args.case_sensitive);
    panel.set_replacement(args.replacement.as_str());
    let status = panel.find_all(&document);
    if panel.matches().is_empty() {
        writeln!(out, "{}", status)?;
        // An explicit output file is still produced, holding the unchanged text
        if let Some(path) = args.output {
            document.save_as(path)?;
        }
        return Ok(());
    }
    let total = panel.matches().len();
    match args.nth {
        Some(nth) => {
            let nth = nth as usize;
            if nth > total {
                bail!("Cannot replace match {}: only {} found", nth, total);
            }
            for _ in 1..nth {
                panel.next();
            }
            panel.replace(&mut document);
            writeln!(out, "Replaced match {} of {}", nth, total)?;
        }
        None => {
            panel.replace_all(&mut document);
            writeln!(out, "{}", panel.status())?;
        }
    }
    match args.output {
        Some(path) => document.save_as(path)?,
        None => document.save()?,
    }
    log::info!("{}", document.title());
    Ok(())
}
