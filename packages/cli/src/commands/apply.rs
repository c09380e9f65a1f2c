use crate::config::Config;
use anyhow::{Context, Result};
use apistudio_common::{write_document, RealFileSystem};
use apistudio_editor::{ApiDocument, Command};
use apistudio_model::SourceFormat;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// API document to edit
    pub file: PathBuf,

    /// JSON array of commands to execute, in order
    #[arg(short, long)]
    pub commands: PathBuf,

    /// Undo this many commands after replaying the log
    #[arg(long, default_value_t = 0)]
    pub undo: usize,

    /// Write the result here instead of back to the document
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, PartialEq)]
pub struct ReplaySummary {
    pub executed: usize,
    pub undone: usize,
}

/// Execute every command through the document's history, then undo up to
/// `undo` of them
pub fn replay(document: &mut ApiDocument, commands: Vec<Command>, undo: usize) -> ReplaySummary {
    let executed = commands.len();
    for command in commands {
        document.execute(command);
    }

    let mut undone = 0;
    while undone < undo && document.undo() {
        undone += 1;
    }
    ReplaySummary { executed, undone }
}

pub fn apply(args: ApplyArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let path = cwd.join(&args.file);

    let log = fs::read_to_string(cwd.join(&args.commands))
        .with_context(|| format!("Failed to read {}", args.commands.display()))?;
    let commands: Vec<Command> = serde_json::from_str(&log)
        .with_context(|| format!("Invalid command log {}", args.commands.display()))?;

    let mut document = ApiDocument::load(path)?.with_history(config.command_manager());
    let summary = replay(&mut document, commands, args.undo);
    info!(
        executed = summary.executed,
        undone = summary.undone,
        version = document.version,
        "replayed command log"
    );

    let target = match &args.out {
        None => {
            document.save()?;
            args.file.clone()
        }
        Some(out) => {
            let out_path = cwd.join(out);
            let format = SourceFormat::from_path(&out_path).unwrap_or(document.format());
            write_document(&RealFileSystem, &out_path, document.document(), format)?;
            out.clone()
        }
    };

    println!(
        "{} Executed {} commands, undid {}",
        "✓".green(),
        summary.executed,
        summary.undone
    );
    if summary.undone < args.undo {
        println!(
            "  {} only {} undo levels were available",
            "⚠️".yellow(),
            summary.undone
        );
    }
    println!("  {} Wrote {}", "✓".green(), target.display());

    Ok(())
}
