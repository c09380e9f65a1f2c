use crate::config::Config;
use anyhow::{anyhow, bail, Result};
use apistudio_common::{read_document, CommonError, RealFileSystem};
use apistudio_model::{ParseError, SourceFormat};
use apistudio_validation::{find_problems, Severity, ValidationProblem};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// API document or directory of documents to validate
    pub input: PathBuf,

    /// Only report problems whose message contains this text
    #[arg(long)]
    pub filter: Option<String>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

#[derive(Debug, Default, PartialEq)]
struct Totals {
    files: usize,
    errors: usize,
    warnings: usize,
}

pub fn validate(args: ValidateArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let input = cwd.join(&args.input);
    let json = match args.format.as_str() {
        "text" => false,
        "json" => true,
        other => bail!("Unknown output format: {}", other),
    };

    if !json {
        println!("🔍 {} API validation", "Starting".green().bold());
        println!("   Input: {}", args.input.display());
        println!();
    }

    let mut totals = Totals::default();

    if input.is_file() {
        validate_file(&input, &config, &args, json, false, &mut totals)?;
    } else if input.is_dir() {
        let files = find_api_files(&input);
        if !json {
            println!("   Found {} candidate files", files.len());
            println!();
        }
        for file in files {
            validate_file(&file, &config, &args, json, true, &mut totals)?;
        }
    } else {
        return Err(anyhow!("Input path does not exist: {}", args.input.display()));
    }

    if !json {
        println!();
        println!(
            "✨ {} Validation complete!",
            if totals.errors > 0 {
                "Done".red().bold()
            } else {
                "Done".green().bold()
            }
        );
        println!("   Files checked: {}", totals.files);
        if totals.errors > 0 {
            println!("   {} {}", "Errors:".red(), totals.errors);
        }
        if totals.warnings > 0 {
            println!("   {} {}", "Warnings:".yellow(), totals.warnings);
        }
        if totals.errors == 0 && totals.warnings == 0 {
            println!("   {} No issues found!", "✓".green());
        }
    }

    if totals.errors > 0 {
        bail!("{} validation error(s)", totals.errors);
    }
    Ok(())
}

fn validate_file(
    path: &Path,
    config: &Config,
    args: &ValidateArgs,
    json: bool,
    skip_foreign: bool,
    totals: &mut Totals,
) -> Result<()> {
    let document = match read_document(&RealFileSystem, path) {
        Ok((document, _)) => document,
        // JSON and YAML files that are not API documents are not our concern
        // when scanning a directory
        Err(CommonError::Parse(ParseError::UnknownVersion | ParseError::NotAnObject))
            if skip_foreign =>
        {
            debug!(path = %path.display(), "skipping non-API file");
            return Ok(());
        }
        Err(err) => {
            eprintln!("{} Failed to parse {}: {}", "✗".red(), path.display(), err);
            totals.files += 1;
            totals.errors += 1;
            return Ok(());
        }
    };

    let problems = find_problems(&document, config.validation_options(), args.filter.as_deref());
    totals.files += 1;
    totals.errors += problems.iter().filter(|p| p.is_error()).count();
    totals.warnings += problems
        .iter()
        .filter(|p| p.severity == Severity::Warning)
        .count();

    if json {
        println!("{}", serde_json::to_string_pretty(&problems)?);
    } else {
        print_problems(path, &problems);
    }
    Ok(())
}

fn print_problems(path: &Path, problems: &[ValidationProblem]) {
    if problems.is_empty() {
        println!("{} {}", "✓".green(), path.display());
        return;
    }

    println!("{}", path.display());
    for problem in problems {
        let level = match problem.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Info => "info".blue().bold(),
        };
        println!("  {} [{}] {}", level, problem.code, problem.message);
        println!("    {} {}", "at".dimmed(), problem.path.to_string().dimmed());
    }
    println!();
}

/// JSON and YAML files below `dir`, in a stable order
fn find_api_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_api_file(path))
        .collect();
    files.sort();
    files
}

fn is_api_file(path: &Path) -> bool {
    SourceFormat::from_path(path).is_some()
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .map_or(true, |name| !name.ends_with(".config.json"))
}
