use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::{bail, Result};
use apistudio_common::{write_document, RealFileSystem};
use apistudio_model::{Document, SourceFormat};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Document to create (.json, .yaml or .yml)
    pub file: PathBuf,

    /// API title
    #[arg(short, long, default_value = "My API")]
    pub title: String,

    /// API version written to `info.version`
    #[arg(long, default_value = "1.0.0")]
    pub api_version: String,

    /// OpenAPI dialect: 2.0 or a 3.x version such as 3.0.3
    #[arg(long, default_value = "3.0.3")]
    pub openapi: String,

    /// Force overwrite an existing document
    #[arg(short, long)]
    pub force: bool,
}

/// Blank document in the requested dialect
pub fn blank_document(title: &str, api_version: &str, openapi: &str) -> Result<Document> {
    if openapi == "2.0" {
        return Ok(Document::swagger2(title, api_version));
    }
    if !openapi.starts_with("3.") {
        bail!("Unsupported OpenAPI version '{}'. Use 2.0 or 3.x", openapi);
    }
    let mut document = Document::openapi3(title, api_version);
    document.openapi = Some(openapi.to_string());
    Ok(document)
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let path = cwd.join(&args.file);

    if path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            args.file.display().to_string().bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing API document...".bright_blue().bold());

    let document = blank_document(&args.title, &args.api_version, &args.openapi)?;
    let format = SourceFormat::from_path(&path).unwrap_or(SourceFormat::Yaml);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    write_document(&RealFileSystem, &path, &document, format)?;
    println!("  {} Created {}", "✓".green(), args.file.display());

    let config_path = cwd.join(DEFAULT_CONFIG_NAME);
    if !config_path.exists() {
        let config_json = serde_json::to_string_pretty(&Config::default())?;
        fs::write(&config_path, config_json)?;
        println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    }

    println!();
    println!("{}", "✅ Document initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}", args.file.display());
    println!("  2. Run: apistudio validate {}", args.file.display());
    println!("  3. Run: apistudio codegen {}", args.file.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use apistudio_model::SpecVersion;

    #[test]
    fn test_blank_documents() {
        let swagger = blank_document("Pets", "1.0", "2.0").unwrap();
        assert_eq!(swagger.spec_version(), SpecVersion::Swagger2);

        let openapi = blank_document("Pets", "1.0", "3.1.0").unwrap();
        assert_eq!(openapi.spec_version(), SpecVersion::OpenApi3);
        assert_eq!(openapi.openapi.as_deref(), Some("3.1.0"));
        assert_eq!(
            openapi.info.as_ref().and_then(|info| info.title.as_deref()),
            Some("Pets")
        );

        assert!(blank_document("Pets", "1.0", "1.2").is_err());
    }
}
