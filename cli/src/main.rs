//! `office2pdf` command-line tool.
//!
//! A thin shim over `office2pdf-client`: `convert` uploads a local document
//! and writes the PDF next to it (or to `--output`), `health` asks the
//! service whether it is up.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use office2pdf_client::{config, Office2PdfClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Convert office documents to PDF with an office2pdf service")]
struct Cli {
    /// Base URL of the office2pdf service.
    #[arg(long, global = true, env = config::BASE_URL_ENV, default_value = config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Log progress to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a document to PDF.
    Convert {
        /// Document to convert.
        input: PathBuf,

        /// Where to write the PDF. Defaults to INPUT with a `.pdf` extension.
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Send the file even if its extension is not a known office format.
        #[arg(long)]
        skip_type_check: bool,
    },
    /// Check whether the service is up.
    Health,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let client = Office2PdfClient::with_default_transport(cli.base_url);

    match cli.command {
        Command::Convert {
            input,
            output,
            skip_type_check,
        } => {
            let output = output.unwrap_or_else(|| default_output(&input));
            info!("converting {} -> {}", input.display(), output.display());
            let written = client
                .convert_file(&input, &output, skip_type_check)
                .with_context(|| format!("failed to convert '{}'", input.display()))?;
            println!("{} ({written} bytes)", output.display());
            Ok(ExitCode::SUCCESS)
        }
        Command::Health => {
            if client.is_healthy() {
                println!("up");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("down");
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

fn default_output(input: &Path) -> PathBuf {
    input.with_extension("pdf")
}
