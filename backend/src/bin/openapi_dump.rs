//! Print the OpenAPI document as JSON.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use users_backend::doc::ApiDoc;
use utoipa::OpenApi;

/// `openapi-dump` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "openapi-dump",
    about = "Print the users API OpenAPI document",
    version
)]
struct CliArgs {
    /// Write the document to this file instead of stdout.
    #[arg(long, value_name = "path")]
    output: Option<PathBuf>,
    /// Emit compact JSON instead of pretty-printed JSON.
    #[arg(long)]
    compact: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();

    let doc = ApiDoc::openapi();
    let json = if args.compact {
        doc.to_json()?
    } else {
        doc.to_pretty_json()?
    };

    match args.output {
        Some(path) => fs::write(&path, format!("{json}\n"))
            .wrap_err_with(|| format!("failed to write {}", path.display()))?,
        None => writeln!(std::io::stdout().lock(), "{json}")?,
    }
    Ok(())
}
