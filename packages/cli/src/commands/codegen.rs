use crate::config::Config;
use anyhow::{Context, Result};
use apistudio_codegen::{generate_info, to_json};
use apistudio_common::{read_document, RealFileSystem};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Args)]
pub struct CodegenArgs {
    /// API document to generate from
    pub file: PathBuf,

    /// Java package (overrides config)
    #[arg(short, long)]
    pub package: Option<String>,

    /// Output file for the codegen JSON (defaults to stdout)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn codegen(args: CodegenArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let path = cwd.join(&args.file);
    let (document, format) = read_document(&RealFileSystem, &path)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    debug!(path = %path.display(), ?format, "loaded document");

    let options = config.codegen_options(args.package.as_deref());
    let info = generate_info(&document, &options)?;
    let json = to_json(&info)?;

    match &args.out {
        None => println!("{}", json),
        Some(out) => {
            let out_path = cwd.join(out);
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&out_path, json)?;

            println!(
                "{} {} → {}",
                "✓".green(),
                args.file.display(),
                out.display()
            );
            println!(
                "   {} interfaces, {} beans in {}",
                info.interfaces.len(),
                info.beans.len(),
                options.package_name.bright_white()
            );
        }
    }

    Ok(())
}
