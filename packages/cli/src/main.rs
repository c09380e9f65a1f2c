mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    apply, codegen, init, validate, ApplyArgs, CodegenArgs, InitArgs, ValidateArgs,
};
use tracing_subscriber::EnvFilter;

/// API Studio CLI - edit, validate and generate code from OpenAPI documents
#[derive(Parser, Debug)]
#[command(name = "apistudio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// More log output (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a blank API document
    Init(InitArgs),

    /// Write the codegen description of a document as JSON
    Codegen(CodegenArgs),

    /// Report validation problems
    Validate(ValidateArgs),

    /// Replay a command log against a document
    Apply(ApplyArgs),
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::Init(args) => init(args, &cwd),
            Command::Codegen(args) => codegen(args, &cwd),
            Command::Validate(args) => validate(args, &cwd),
            Command::Apply(args) => apply(args, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
