//! # techgap - Climate Technology Gap Dashboard
//!
//! techgap reads an expert assessment of climate technologies (one row per
//! sub-technology, scored for five jurisdictions) and compares the domestic
//! technology level and gap against the others, per category and overall.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │              Assessment workbook (.xlsx / .csv)                 │
//! └───────────────────────┬─────────────────────────────────────────┘
//!                         │ dataset::load_cached()
//!                         ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         techgap                                 │
//! │                                                                 │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐        │
//! │  │   Dataset    │──▶│   Analysis   │──▶│    Charts    │        │
//! │  │ (reader,     │   │ (aggregate,  │   │ (bars, radar,│        │
//! │  │  schema)     │   │  ranking)    │   │  tables)     │        │
//! │  └──────────────┘   └──────────────┘   └──────┬───────┘        │
//! │         │                                     │                │
//! │         ▼                                     ▼                │
//! │  ┌──────────────┐                     ┌──────────────┐         │
//! │  │    Export    │                     │    Report    │         │
//! │  │    (CSV)     │                     │   (pages)    │         │
//! │  └──────────────┘                     └──────┬───────┘         │
//! │                                    ┌─────────┴────────┐         │
//! │                                    ▼                  ▼         │
//! │                             ┌────────────┐     ┌────────────┐   │
//! │                             │    TUI     │     │ JSON report│   │
//! │                             └────────────┘     └────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - [`dataset`]: Load the assessment table and resolve its columns
//!   - `reader`: workbook and CSV cells, UTF-8 BOM handling
//!   - `schema`: canonical field names and their source headers
//!   - `cache`: one parsed dataset per input for the life of the process
//!
//! - [`analysis`]: Per-category aggregation and rankings
//!   - NaN-skipping means, most-frequent group and leader
//!   - top/bottom categories, jurisdiction standings, insight text
//!
//! - [`charts`]: Renderer-independent chart and table models
//!
//! - [`report`]: The three dashboard pages assembled from a dataset
//!
//! - [`export`]: Summary and detail CSV files
//!
//! - [`tui`]: Interactive terminal dashboard
//!
//! - [`cli`]: Command-line argument parsing
//!
//! - [`domain`]: Jurisdictions, metrics, scopes and error types
//!
//! ## Operational Modes
//!
//! 1. **TUI Mode** (default): Interactive dashboard
//! 2. **Headless Mode** (`--headless`): Print one page as JSON
//!
//! ## Typical Usage
//!
//! ```bash
//! # Open the dashboard on the default workbook
//! techgap
//!
//! # Compare three jurisdictions on adaptation technologies
//! techgap tracker.xlsx --scope adaptation --jurisdictions kr,us,eu
//!
//! # Print one drill-down and write the CSV exports
//! techgap --headless --page category --category 태양광 --export out/
//! ```
//!
//! ## Key Concepts
//!
//! - **Technology level**: % of the best jurisdiction's level (best = 100)
//! - **Technology gap**: years behind the best jurisdiction
//! - **Technology group**: leading / catching-up / lagging
//! - **Scope**: all, mitigation or adaptation technologies

pub mod analysis;
pub mod charts;
pub mod cli;
pub mod dataset;
pub mod domain;
pub mod export;
pub mod report;
pub mod tui;
