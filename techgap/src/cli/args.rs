//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

use crate::domain::{Jurisdiction, Page, Scope};

/// Assessment workbook read when no input is given.
pub const DEFAULT_INPUT: &str = "tracker2020.xlsx";

#[derive(Parser, Debug)]
#[command(
    name = "techgap",
    about = "Compare climate-technology levels across jurisdictions",
    after_help = "\
EXAMPLES:
    techgap                                   Open tracker2020.xlsx in the dashboard
    techgap tracker.csv --scope adaptation    Start filtered to adaptation technologies
    techgap --headless --page countries       Print the comparison page as JSON
    techgap --headless --export out/          Write both CSV exports and exit"
)]
pub struct Args {
    /// Assessment workbook (.xlsx, .xls, .xlsb, .ods) or CSV
    #[arg(value_name = "INPUT", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Worksheet index (0-based) for workbook inputs
    #[arg(long, default_value = "0")]
    pub sheet: usize,

    /// Directory for CSV exports
    #[arg(long, value_name = "DIR")]
    pub export: Option<PathBuf>,

    /// Run without TUI and print the selected page as JSON
    #[arg(long)]
    pub headless: bool,

    /// Page to open (or to print with --headless)
    #[arg(long, value_enum, default_value_t = Page::Overview)]
    pub page: Page,

    /// Technology type filter
    #[arg(long, value_enum, default_value_t = Scope::All)]
    pub scope: Scope,

    /// Jurisdictions to compare, comma separated (default: all)
    #[arg(long, value_delimiter = ',', value_name = "LIST")]
    pub jurisdictions: Vec<Jurisdiction>,

    /// Category for the drill-down page
    #[arg(long, value_name = "NAME")]
    pub category: Option<String>,

    /// Sub-technology within --category
    #[arg(long, value_name = "NAME", requires = "category")]
    pub detail: Option<String>,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Selected jurisdictions in canonical order, all of them when none given.
    #[must_use]
    pub fn jurisdictions(&self) -> Vec<Jurisdiction> {
        if self.jurisdictions.is_empty() {
            return Jurisdiction::ALL.to_vec();
        }
        Jurisdiction::ALL.into_iter().filter(|j| self.jurisdictions.contains(j)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["techgap"]);
        assert_eq!(args.input, PathBuf::from(DEFAULT_INPUT));
        assert_eq!(args.page, Page::Overview);
        assert_eq!(args.scope, Scope::All);
        assert_eq!(args.jurisdictions(), Jurisdiction::ALL.to_vec());
        assert!(!args.headless);
    }

    #[test]
    fn test_jurisdiction_list_is_normalized() {
        let args = Args::parse_from(["techgap", "--jurisdictions", "us,kr,미국"]);
        assert_eq!(args.jurisdictions(), vec![Jurisdiction::Kr, Jurisdiction::Us]);
    }

    #[test]
    fn test_rejects_unknown_values() {
        assert!(Args::try_parse_from(["techgap", "--jurisdictions", "mars"]).is_err());
        assert!(Args::try_parse_from(["techgap", "--scope", "both"]).is_err());
        assert!(Args::try_parse_from(["techgap", "--detail", "PERC"]).is_err());
    }

    #[test]
    fn test_full_command_line() {
        let args = Args::parse_from([
            "techgap",
            "data.csv",
            "--headless",
            "--page",
            "category",
            "--category",
            "태양광",
            "--detail",
            "PERC",
            "--scope",
            "mitigation",
        ]);
        assert_eq!(args.page, Page::Category);
        assert_eq!(args.scope, Scope::Mitigation);
        assert_eq!(args.category.as_deref(), Some("태양광"));
        assert_eq!(args.detail.as_deref(), Some("PERC"));
    }
}
