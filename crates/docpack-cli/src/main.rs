#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use docpack_core::index::{run_index, IndexOptions, INDEX_FILENAME};
use docpack_core::validate::{validate_package, ValidationReport};
use docpack_core::ExitCode;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::process::ExitCode as ProcessExitCode;

#[derive(Parser)]
#[command(name = "docpack")]
#[command(about = "Documentation package maintenance CLI")]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build or update the markdown title index (`_index.yaml`).
    Index {
        #[arg(default_value = ".")]
        root: PathBuf,
        /// Drop index entries whose file no longer exists in ROOT.
        #[arg(long, default_value_t = false)]
        prune: bool,
    },
    /// Check required files and the declared license.
    Validate {
        #[arg(default_value = ".")]
        root: PathBuf,
    },
}

fn main() -> ProcessExitCode {
    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Index { root, prune } => run_index_command(&root, prune, cli.json),
        Commands::Validate { root } => run_validate_command(&root, cli.json),
    };
    ProcessExitCode::from(code as u8)
}

fn run_index_command(root: &Path, prune: bool, json: bool) -> ExitCode {
    let outcome = match run_index(root, IndexOptions { prune }) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::Internal;
        }
    };
    let text = if outcome.written {
        format!(
            "Updated: {INDEX_FILENAME} with {} entries.",
            outcome.entries.len()
        )
    } else {
        "No markdown files found.".to_string()
    };
    if json {
        let payload = json!({
            "text": text,
            "index": INDEX_FILENAME,
            "written": outcome.written,
            "entries": outcome.entries.len(),
            "warnings": outcome.warnings,
        });
        println!("{payload}");
    } else {
        for warning in &outcome.warnings {
            eprintln!("Warning: {warning}");
        }
        println!("{text}");
    }
    ExitCode::Success
}

fn run_validate_command(root: &Path, json: bool) -> ExitCode {
    let report = validate_package(root);
    if json {
        let missing = match &report {
            ValidationReport::MissingFiles(names) => names.clone(),
            _ => Vec::new(),
        };
        let license = match &report {
            ValidationReport::InvalidLicense(value) => Some(value.as_str()),
            _ => None,
        };
        let payload = json!({
            "text": report.text(),
            "valid": report.is_valid(),
            "missing": missing,
            "license": license,
        });
        println!("{payload}");
    } else {
        println!("{}", report.text());
    }
    report.exit_code()
}
