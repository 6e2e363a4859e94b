use clap::Parser;
use crossterm::event::KeyCode;
use ratatui::{backend::TestBackend, Terminal};
use std::path::{Path, PathBuf};

use techgap::cli::Args;
use techgap::dataset::load_cached;
use techgap::domain::{Jurisdiction, Page, Scope};
use techgap::tui::category::DrillTab;
use techgap::tui::{App, ViewMode};

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/tracker_sample.csv")
}

fn app_with(extra: &[&str]) -> App {
    let input = fixture();
    let mut argv = vec!["techgap".to_string(), input.display().to_string()];
    argv.extend(extra.iter().map(|s| (*s).to_string()));
    let args = Args::parse_from(argv);
    let dataset = load_cached(&args.input, args.sheet).expect("Failed to load fixture");
    App::new(dataset, &args)
}

fn app() -> App {
    app_with(&[])
}

fn screen(app: &App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| app.draw(f)).unwrap();
    terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect()
}

#[test]
fn test_page_cycling() {
    let mut app = app();
    assert_eq!(app.page(), Page::Overview);

    app.handle_key(KeyCode::Tab);
    assert_eq!(app.page(), Page::Countries);
    app.handle_key(KeyCode::Tab);
    assert_eq!(app.page(), Page::Category);
    app.handle_key(KeyCode::Tab);
    assert_eq!(app.page(), Page::Overview);
    app.handle_key(KeyCode::BackTab);
    assert_eq!(app.page(), Page::Category);
}

#[test]
fn test_scope_cycling_resets_scroll() {
    let mut app = app();
    app.handle_key(KeyCode::Down);
    assert_eq!(app.scroll(), 1);

    app.handle_key(KeyCode::Char('t'));
    assert_eq!(app.scope(), Scope::Mitigation);
    assert_eq!(app.scroll(), 0);
    app.handle_key(KeyCode::Char('t'));
    assert_eq!(app.scope(), Scope::Adaptation);
    app.handle_key(KeyCode::Char('t'));
    assert_eq!(app.scope(), Scope::All);
}

#[test]
fn test_scroll_stops_at_last_row() {
    let mut app = app();
    for _ in 0..10 {
        app.handle_key(KeyCode::Down);
    }
    assert_eq!(app.scroll(), 2);
    app.handle_key(KeyCode::Up);
    assert_eq!(app.scroll(), 1);
}

#[test]
fn test_jurisdiction_filter() {
    let mut app = app();

    // Deselect the first entry (Korea) and apply
    app.handle_key(KeyCode::Char('f'));
    assert_eq!(app.view_mode(), ViewMode::JurisdictionFilter);
    app.handle_key(KeyCode::Char(' '));
    app.handle_key(KeyCode::Enter);
    assert_eq!(app.view_mode(), ViewMode::Browse);
    assert!(!app.jurisdictions().contains(&Jurisdiction::Kr));
    assert_eq!(app.jurisdictions().len(), 4);

    // An empty selection means everyone
    app.handle_key(KeyCode::Char('f'));
    app.handle_key(KeyCode::Char('n'));
    app.handle_key(KeyCode::Enter);
    assert_eq!(app.jurisdictions(), &Jurisdiction::ALL);

    // Esc discards pending changes
    app.handle_key(KeyCode::Char('f'));
    app.handle_key(KeyCode::Down);
    app.handle_key(KeyCode::Char(' '));
    app.handle_key(KeyCode::Esc);
    assert_eq!(app.jurisdictions(), &Jurisdiction::ALL);
}

#[test]
fn test_category_navigation() {
    let mut app = app_with(&["--page", "category"]);
    assert_eq!(app.selected_category(), Some("수자원관리"));
    assert_eq!(app.selected_detail(), None);

    app.handle_key(KeyCode::Down);
    assert_eq!(app.selected_category(), Some("원자력발전"));

    // one sub-technology: mean -> item -> mean
    app.handle_key(KeyCode::Right);
    assert_eq!(app.selected_detail(), Some("소형모듈원전"));
    app.handle_key(KeyCode::Right);
    assert_eq!(app.selected_detail(), None);
    app.handle_key(KeyCode::Left);
    assert_eq!(app.selected_detail(), Some("소형모듈원전"));

    // changing category resets the sub-technology
    app.handle_key(KeyCode::Down);
    assert_eq!(app.selected_category(), Some("태양광"));
    assert_eq!(app.selected_detail(), None);
    app.handle_key(KeyCode::Down);
    assert_eq!(app.selected_category(), Some("태양광"));

    app.handle_key(KeyCode::Char('2'));
    assert_eq!(app.tab(), DrillTab::Research);
    app.handle_key(KeyCode::Char('3'));
    assert_eq!(app.tab(), DrillTab::Publications);
}

#[test]
fn test_command_line_selection() {
    let app = app_with(&[
        "--page",
        "category",
        "--category",
        "태양광",
        "--detail",
        "페로브스카이트",
        "--jurisdictions",
        "us,kr",
    ]);
    assert_eq!(app.selected_category(), Some("태양광"));
    assert_eq!(app.selected_detail(), Some("페로브스카이트"));
    assert_eq!(app.jurisdictions(), &[Jurisdiction::Kr, Jurisdiction::Us]);
}

#[test]
fn test_help_and_quit() {
    let mut app = app();
    app.handle_key(KeyCode::Char('?'));
    assert_eq!(app.view_mode(), ViewMode::Help);
    // any key closes help without acting on it
    app.handle_key(KeyCode::Char('q'));
    assert_eq!(app.view_mode(), ViewMode::Browse);
    assert!(!app.should_quit());

    app.handle_key(KeyCode::Char('q'));
    assert!(app.should_quit());
}

#[test]
fn test_export_key_writes_files() {
    let dir = tempfile::tempdir().unwrap();
    let dir_arg = dir.path().display().to_string();
    let mut app = app_with(&["--export", &dir_arg]);

    app.handle_key(KeyCode::Char('e'));
    assert!(app.status().unwrap().starts_with("Exported"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[test]
fn test_export_failure_is_reported() {
    let mut app = app_with(&["--export", "/nonexistent/exports"]);
    app.handle_key(KeyCode::Char('e'));
    assert!(app.status().unwrap().starts_with("Export failed"));
}

#[test]
fn test_every_page_renders_at_every_size() {
    let mut app = app();
    for page in 0..3 {
        for (width, height) in [(180, 50), (120, 40), (80, 24), (60, 12)] {
            let text = screen(&app, width, height);
            assert!(text.contains("TECHGAP"), "page {page} at {width}x{height}");
        }
        app.handle_key(KeyCode::Tab);
    }
}

#[test]
fn test_overlays_render() {
    let mut app = app();
    app.handle_key(KeyCode::Char('f'));
    assert!(screen(&app, 120, 40).contains("Select Jurisdictions"));
    app.handle_key(KeyCode::Esc);

    app.handle_key(KeyCode::Char('?'));
    assert!(screen(&app, 120, 40).contains("Keys"));
}

#[test]
fn test_drill_down_tabs_render() {
    let mut app = app_with(&["--page", "category", "--category", "태양광"]);
    for tab in ['1', '2', '3'] {
        app.handle_key(KeyCode::Char(tab));
        let text = screen(&app, 140, 45);
        assert!(text.contains("Drill-down"), "tab {tab}");
    }
    assert!(screen(&app, 140, 45).contains("sample figures"));
}

#[test]
fn test_drill_down_title_names_category() {
    let mut app = app_with(&["--page", "category", "--category", "태양광"]);
    app.handle_key(KeyCode::Char('t'));
    assert_eq!(app.scope(), Scope::Mitigation);

    // wide glyphs are followed by a blank cell
    let text: String = screen(&app, 140, 45).chars().filter(|c| *c != ' ').collect();
    assert!(text.contains("Drill-down:태양광"));
    assert!(!text.contains("Drill-down:Mitigation"));
}
