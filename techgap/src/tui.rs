//! # Terminal User Interface (TUI)
//!
//! Interactive dashboard using `ratatui`.
//!
//! ## Pages
//!
//! - **Overview** - domestic headline, level/gap bars, heatmap, detail table
//! - **Jurisdictions** - radar, standings, comparison and ranked tables
//! - **Category** - drill-down into one category or sub-technology
//!
//! ## View Modes
//!
//! - **Browse** - page navigation (default)
//! - **`JurisdictionFilter`** - checkbox list of jurisdictions to compare
//! - **Help** - keyboard shortcuts
//!
//! ## Sub-Modules
//!
//! - `overview`, `countries`, `category` - page renderers
//! - `widgets` - shared panels (bars, heatmap, tables)
//! - `layout` - size breakpoints
//! - `theme` - colour scheme

#![allow(clippy::too_many_lines)]

use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, warn};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub mod category;
pub mod countries;
pub mod layout;
pub mod overview;
pub mod theme;
pub mod widgets;

use category::{DrillTab, Selection};
use layout::compute_layout;
use theme::{ACCENT, BACKGROUND, CAUTION_AMBER, HIGHLIGHT, INFO_DIM, TEXT};

use crate::analysis::filter_scope;
use crate::cli::Args;
use crate::dataset::Dataset;
use crate::domain::{Jurisdiction, Page, Scope};
use crate::export::export_dataset;
use crate::report::{category_page, countries_page, overview_page};

// =============================================================================
// STYLE CONSTANTS
// =============================================================================

const STYLE_HEADING: Style = Style::new().fg(ACCENT).add_modifier(Modifier::BOLD);
const STYLE_LABEL: Style = Style::new().fg(CAUTION_AMBER).add_modifier(Modifier::BOLD);
const STYLE_DIM: Style = Style::new().fg(INFO_DIM);
const STYLE_KEY: Style = Style::new().fg(CAUTION_AMBER);
const STYLE_TEXT: Style = Style::new().fg(TEXT);

/// Current view mode determines which overlay is shown and how keys are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Page navigation
    Browse,
    /// Checkbox list of jurisdictions
    JurisdictionFilter,
    /// Help overlay with keyboard shortcuts
    Help,
}

/// Dashboard state. Pages are rebuilt from the shared dataset on every draw.
pub struct App {
    dataset: Arc<Dataset>,
    input: String,
    export_dir: PathBuf,

    page: Page,
    scope: Scope,
    jurisdictions: Vec<Jurisdiction>,

    // Jurisdiction filter overlay
    pending: Vec<Jurisdiction>,
    filter_cursor: usize,

    // Category page
    category_index: usize,
    detail_index: Option<usize>,
    tab: DrillTab,

    /// Selected row on the overview / jurisdictions tables
    scroll: usize,
    view_mode: ViewMode,
    status: Option<String>,
    should_quit: bool,
}

impl App {
    /// Build the dashboard with the selection given on the command line.
    ///
    /// An unknown `--category` or `--detail` falls back to the first category
    /// and the category mean.
    #[must_use]
    pub fn new(dataset: Arc<Dataset>, args: &Args) -> Self {
        let categories = dataset.categories();
        let category_index = args
            .category
            .as_deref()
            .and_then(|name| categories.iter().position(|c| *c == name))
            .unwrap_or(0);
        let detail_index = match (categories.get(category_index), args.detail.as_deref()) {
            (Some(category), Some(name)) => {
                dataset.details(category).iter().position(|o| o.detail == name)
            }
            _ => None,
        };
        let jurisdictions = args.jurisdictions();

        Self {
            input: args.input.display().to_string(),
            export_dir: args.export.clone().unwrap_or_else(|| PathBuf::from(".")),
            page: args.page,
            scope: args.scope,
            pending: jurisdictions.clone(),
            jurisdictions,
            filter_cursor: 0,
            category_index,
            detail_index,
            tab: DrillTab::default(),
            scroll: 0,
            view_mode: ViewMode::Browse,
            status: None,
            should_quit: false,
            dataset,
        }
    }

    #[must_use]
    pub fn page(&self) -> Page {
        self.page
    }

    #[must_use]
    pub fn scope(&self) -> Scope {
        self.scope
    }

    #[must_use]
    pub fn jurisdictions(&self) -> &[Jurisdiction] {
        &self.jurisdictions
    }

    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    #[must_use]
    pub fn tab(&self) -> DrillTab {
        self.tab
    }

    #[must_use]
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Last status message (export result).
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    #[must_use]
    pub fn selected_category(&self) -> Option<&str> {
        self.dataset.categories().get(self.category_index).copied()
    }

    /// Selected sub-technology of the selected category, `None` for the mean.
    #[must_use]
    pub fn selected_detail(&self) -> Option<&str> {
        let category = self.selected_category()?;
        let index = self.detail_index?;
        self.dataset.details(category).get(index).copied().map(|o| o.detail.as_str())
    }

    /// Rows on the current page's scrollable table.
    fn row_count(&self) -> usize {
        match self.page {
            Page::Overview => filter_scope(&self.dataset.summaries, self.scope).len(),
            Page::Countries => self.dataset.summaries.len(),
            Page::Category => 0,
        }
    }

    fn detail_count(&self) -> usize {
        self.selected_category().map_or(0, |c| self.dataset.details(c).len())
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyCode) {
        match self.view_mode {
            ViewMode::Browse => self.handle_browse_key(key),
            ViewMode::Help => {
                // Any key closes help
                self.view_mode = ViewMode::Browse;
            }
            ViewMode::JurisdictionFilter => self.handle_filter_key(key),
        }
    }

    fn handle_browse_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q' | 'Q') => self.should_quit = true,
            KeyCode::Tab => {
                self.page = self.page.next();
                self.scroll = 0;
            }
            KeyCode::BackTab => {
                self.page = self.page.previous();
                self.scroll = 0;
            }
            KeyCode::Char('?') => self.view_mode = ViewMode::Help,
            KeyCode::Char('t' | 'T') => {
                self.scope = self.scope.next();
                self.scroll = 0;
            }
            KeyCode::Char('f' | 'F') => {
                self.pending = self.jurisdictions.clone();
                self.filter_cursor = 0;
                self.view_mode = ViewMode::JurisdictionFilter;
            }
            KeyCode::Char('e' | 'E') => self.export(),
            KeyCode::Up => {
                if self.page == Page::Category {
                    if self.category_index > 0 {
                        self.category_index -= 1;
                        self.detail_index = None;
                    }
                } else {
                    self.scroll = self.scroll.saturating_sub(1);
                }
            }
            KeyCode::Down => {
                if self.page == Page::Category {
                    if self.category_index + 1 < self.dataset.categories().len() {
                        self.category_index += 1;
                        self.detail_index = None;
                    }
                } else if self.scroll + 1 < self.row_count() {
                    self.scroll += 1;
                }
            }
            // Cycle: category mean, first detail, ..., last detail, category mean
            KeyCode::Right if self.page == Page::Category => {
                let count = self.detail_count();
                self.detail_index = match self.detail_index {
                    None if count > 0 => Some(0),
                    Some(i) if i + 1 < count => Some(i + 1),
                    _ => None,
                };
            }
            KeyCode::Left if self.page == Page::Category => {
                let count = self.detail_count();
                self.detail_index = match self.detail_index {
                    None if count > 0 => Some(count - 1),
                    Some(i) if i > 0 => Some(i - 1),
                    _ => None,
                };
            }
            KeyCode::Char('1') => self.tab = DrillTab::LevelGap,
            KeyCode::Char('2') => self.tab = DrillTab::Research,
            KeyCode::Char('3') => self.tab = DrillTab::Publications,
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.view_mode = ViewMode::Browse;
            }
            KeyCode::Up => {
                self.filter_cursor = self.filter_cursor.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.filter_cursor + 1 < Jurisdiction::ALL.len() {
                    self.filter_cursor += 1;
                }
            }
            KeyCode::Char(' ') => {
                let jurisdiction = Jurisdiction::ALL[self.filter_cursor];
                if let Some(pos) = self.pending.iter().position(|&j| j == jurisdiction) {
                    self.pending.remove(pos);
                } else {
                    self.pending.push(jurisdiction);
                    self.pending.sort_unstable_by_key(|j| j.index());
                }
            }
            KeyCode::Char('a' | 'A') => {
                self.pending = Jurisdiction::ALL.to_vec();
            }
            KeyCode::Char('n' | 'N') => {
                self.pending.clear();
            }
            KeyCode::Enter => {
                self.view_mode = ViewMode::Browse;
                // An empty selection compares everyone
                self.jurisdictions = if self.pending.is_empty() {
                    Jurisdiction::ALL.to_vec()
                } else {
                    self.pending.clone()
                };
            }
            _ => {}
        }
    }

    fn export(&mut self) {
        match export_dataset(&self.export_dir, &self.dataset, Local::now().naive_local()) {
            Ok(paths) => {
                info!("Export written to {}", self.export_dir.display());
                self.status = Some(format!(
                    "Exported {} and {}",
                    paths.summary.display(),
                    paths.detail.display()
                ));
            }
            Err(e) => {
                warn!("Export failed: {e}");
                self.status = Some(format!("Export failed: {e}"));
            }
        }
    }

    /// Render one frame.
    pub fn draw(&self, f: &mut Frame) {
        let area = f.area();
        let config = compute_layout(area.width, area.height);

        let mut constraints = vec![Constraint::Length(3), Constraint::Min(0)];
        if config.show_status_bar {
            constraints.push(Constraint::Length(3));
        }
        let outer = Layout::default().direction(Direction::Vertical).constraints(constraints).split(area);

        f.render_widget(self.header(), outer[0]);

        let main_area = outer[1];
        match self.page {
            Page::Overview => {
                let page = overview_page(&self.dataset, self.scope, &self.jurisdictions);
                overview::render(f, main_area, &page, &config, self.scroll);
            }
            Page::Countries => {
                let page = countries_page(&self.dataset, self.scope, &self.jurisdictions);
                countries::render(f, main_area, &page, &config, self.scroll);
            }
            Page::Category => self.render_category(f, main_area, &config),
        }

        match self.view_mode {
            ViewMode::JurisdictionFilter => self.render_filter(f, main_area),
            ViewMode::Help => render_help_overlay(f, main_area),
            ViewMode::Browse => {}
        }

        if config.show_status_bar {
            let status = Paragraph::new(vec![self.status_line()]).block(
                Block::default().borders(Borders::ALL).border_style(Style::new().fg(ACCENT)),
            );
            f.render_widget(status, outer[2]);
        }
    }

    fn header(&self) -> Paragraph<'static> {
        let mut spans = vec![Span::styled("TECHGAP", STYLE_HEADING), Span::styled(" | ", STYLE_DIM)];
        for page in Page::ALL {
            let style = if page == self.page {
                Style::new().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
            } else {
                STYLE_DIM
            };
            spans.push(Span::styled(format!("{} ", page.title()), style));
        }
        spans.extend([
            Span::styled("| ", STYLE_DIM),
            Span::styled(self.scope.label(), Style::new().fg(CAUTION_AMBER)),
            Span::styled(" | ", STYLE_DIM),
            Span::styled(
                self.jurisdictions.iter().map(|j| j.code()).collect::<Vec<_>>().join(","),
                STYLE_TEXT,
            ),
            Span::styled(" | ", STYLE_DIM),
            Span::styled(self.input.clone(), STYLE_DIM),
        ]);
        Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL).border_style(Style::new().fg(ACCENT)))
    }

    fn render_category(&self, f: &mut Frame, area: Rect, config: &layout::LayoutConfig) {
        let categories = self.dataset.categories();
        let page = self
            .selected_category()
            .and_then(|c| category_page(&self.dataset, c, self.selected_detail(), &self.jurisdictions));
        let Some(page) = page else {
            let empty = Paragraph::new(Span::styled(" No categories in the dataset", STYLE_DIM));
            f.render_widget(empty.block(widgets::panel("Drill-down")), area);
            return;
        };
        let selection = Selection {
            category_index: self.category_index,
            category_count: categories.len(),
        };
        category::render(f, area, &page, self.tab, selection, config);
    }

    fn status_line(&self) -> Line<'static> {
        let key = |k: &'static str| Span::styled(k, STYLE_KEY);
        let action = |a: &'static str| Span::styled(a, STYLE_DIM);
        let mut spans = match self.view_mode {
            ViewMode::Browse => {
                let mut spans = vec![
                    key("Q"),
                    action(":Quit "),
                    key("Tab"),
                    action(":Page "),
                    key("T"),
                    action(":Scope "),
                    key("F"),
                    action(":Jurisdictions "),
                    key("E"),
                    action(":Export "),
                    key("?"),
                    action(":Help "),
                ];
                if self.page == Page::Category {
                    spans.extend([
                        key("↑↓"),
                        action(":Category "),
                        key("←→"),
                        action(":Sub-tech "),
                        key("1-3"),
                        action(":View "),
                    ]);
                } else {
                    spans.extend([key("↑↓"), action(":Scroll ")]);
                }
                spans
            }
            ViewMode::JurisdictionFilter => vec![
                key("Space"),
                action(":Toggle "),
                key("A"),
                action(":All "),
                key("N"),
                action(":None "),
                key("Enter"),
                action(":Apply "),
                key("ESC"),
                action(":Cancel "),
                Span::styled("[Filter]", STYLE_KEY),
            ],
            ViewMode::Help => vec![
                key("Any key"),
                action(":Close "),
                Span::styled("[Help]", Style::new().fg(ACCENT)),
            ],
        };
        if let Some(status) = &self.status {
            spans.push(Span::styled(format!(" {status}"), STYLE_TEXT));
        }
        Line::from(spans)
    }

    /// Render jurisdiction filter overlay
    fn render_filter(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_popup(area, 40, 14);
        let separator = "─".repeat(popup_area.width.saturating_sub(4) as usize);

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled("Select Jurisdictions to Compare", STYLE_HEADING)),
            Line::from(separator.clone()),
        ];

        for (idx, jurisdiction) in Jurisdiction::ALL.into_iter().enumerate() {
            let is_cursor = idx == self.filter_cursor;
            let is_selected = self.pending.contains(&jurisdiction);

            let cursor = if is_cursor { "▶ " } else { "  " };
            let checkbox = if is_selected { "[✓] " } else { "[ ] " };

            let style = if is_cursor {
                Style::new().fg(CAUTION_AMBER).add_modifier(Modifier::REVERSED)
            } else if is_selected {
                Style::new().fg(ACCENT)
            } else {
                STYLE_DIM
            };

            lines.push(Line::from(vec![
                Span::raw(cursor),
                Span::styled(format!("{checkbox}{}", jurisdiction.label()), style),
            ]));
        }

        lines.push(Line::from(separator));
        lines.push(Line::from(vec![
            Span::styled("[Space]", STYLE_KEY),
            Span::raw(" Toggle  "),
            Span::styled("[Enter]", STYLE_KEY),
            Span::raw(" Apply (none = all)"),
        ]));

        let widget = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Jurisdictions ({} selected)", self.pending.len()))
                .style(Style::new().bg(BACKGROUND).fg(ACCENT)),
        );

        f.render_widget(Clear, popup_area);
        f.render_widget(widget, popup_area);
    }

    /// Run the TUI event loop
    ///
    /// # Errors
    /// Returns an error if terminal setup or rendering fails
    pub fn run(mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        loop {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        terminal.show_cursor()?;

        Ok(())
    }
}

// =============================================================================
// OVERLAY RENDERERS
// =============================================================================

/// Render the help overlay explaining the pages and keyboard shortcuts
fn render_help_overlay(f: &mut Frame, area: Rect) {
    let popup_area = centered_popup(area, 70, 22);

    let help_text = vec![
        Line::from(""),
        Line::from(Span::styled("  What You're Looking At", STYLE_HEADING)),
        Line::from(Span::styled(
            "  Expert assessments of climate technologies, averaged per category.",
            STYLE_DIM,
        )),
        Line::from(Span::styled(
            "  Level is % of the best jurisdiction; gap is years behind it.",
            STYLE_DIM,
        )),
        Line::from(""),
        Line::from(Span::styled("  Pages", STYLE_HEADING)),
        Line::from(vec![
            Span::styled("  Overview       ", STYLE_LABEL),
            Span::styled("Domestic standing across the selected scope.", STYLE_DIM),
        ]),
        Line::from(vec![
            Span::styled("  Jurisdictions  ", STYLE_LABEL),
            Span::styled("Radar, standings and category rankings.", STYLE_DIM),
        ]),
        Line::from(vec![
            Span::styled("  Category       ", STYLE_LABEL),
            Span::styled("One category or sub-technology in depth.", STYLE_DIM),
        ]),
        Line::from(""),
        Line::from(Span::styled("  Keys", STYLE_HEADING)),
        Line::from(vec![
            Span::styled("  Tab", STYLE_KEY),
            Span::styled(" Page   ", STYLE_TEXT),
            Span::styled("T", STYLE_KEY),
            Span::styled(" Scope   ", STYLE_TEXT),
            Span::styled("F", STYLE_KEY),
            Span::styled(" Jurisdictions   ", STYLE_TEXT),
            Span::styled("E", STYLE_KEY),
            Span::styled(" Export CSV", STYLE_TEXT),
        ]),
        Line::from(vec![
            Span::styled("  ↑↓", STYLE_KEY),
            Span::styled(" Row / category   ", STYLE_TEXT),
            Span::styled("←→", STYLE_KEY),
            Span::styled(" Sub-technology   ", STYLE_TEXT),
            Span::styled("1-3", STYLE_KEY),
            Span::styled(" Drill-down view", STYLE_TEXT),
        ]),
        Line::from(vec![Span::styled("  Q", STYLE_KEY), Span::styled(" Quit", STYLE_TEXT)]),
        Line::from(""),
        Line::from(Span::styled("  Press any key to close", STYLE_DIM)),
    ];

    let help_widget = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .style(Style::new().bg(BACKGROUND).fg(ACCENT)),
    );

    f.render_widget(Clear, popup_area);
    f.render_widget(help_widget, popup_area);
}

/// Create a centered popup area with given width percentage and height in lines
fn centered_popup(area: Rect, width_percent: u16, height_lines: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(height_lines), Constraint::Fill(1)])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_percent) / 2),
            Constraint::Percentage(width_percent),
            Constraint::Percentage((100 - width_percent) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_popup(area, 40, 14);
        assert_eq!(popup.height, 14);
        assert_eq!(popup.width, 40);
        assert!(popup.x >= 30 && popup.y >= 13);
    }
}
