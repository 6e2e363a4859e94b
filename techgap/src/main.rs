//! # techgap - Main Entry Point
//!
//! Supports two operational modes:
//! - **TUI** (default): interactive dashboard over the assessment workbook
//! - **Headless** (`--headless`): print one page as JSON, optionally exporting CSV

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use std::io::{self, BufWriter, Write};

use techgap::cli::Args;
use techgap::dataset::load_cached;
use techgap::domain::LoadError;
use techgap::export::export_dataset;
use techgap::report::{build_report, write_report, ReportRequest};
use techgap::tui;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_USAGE: i32 = 2;
const EXIT_DATAERR: i32 = 65;
const EXIT_NOINPUT: i32 = 66;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let code = exit_code_for(&e);
            eprintln!("error: {e:#}");
            code
        }
    });
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(load) = err.chain().find_map(|c| c.downcast_ref::<LoadError>()) {
        return if load.is_not_found() { EXIT_NOINPUT } else { EXIT_DATAERR };
    }
    let msg = err.to_string().to_lowercase();
    if msg.contains("unknown category") {
        EXIT_USAGE
    } else {
        EXIT_ERROR
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let dataset = load_cached(&args.input, args.sheet)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;

    if !args.headless {
        return tui::App::new(dataset, &args).run();
    }

    let jurisdictions = args.jurisdictions();
    let request = ReportRequest {
        input: args.input.display().to_string(),
        page: args.page,
        scope: args.scope,
        jurisdictions: &jurisdictions,
        category: args.category.as_deref(),
        detail: args.detail.as_deref(),
    };
    let report = build_report(&dataset, &request)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_report(&mut out, &report)?;
    out.flush()?;

    if let Some(dir) = &args.export {
        let paths = export_dataset(dir, &dataset, Local::now().naive_local())
            .context("CSV export failed")?;
        if !args.quiet {
            eprintln!("Exported {}", paths.summary.display());
            eprintln!("Exported {}", paths.detail.display());
        }
    }

    Ok(())
}
