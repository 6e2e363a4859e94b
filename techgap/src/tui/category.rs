//! Category page - drill-down into one category or sub-technology.
//!
//! Three tabs below the summary tiles:
//!
//! 1. level and gap bars per jurisdiction, with a leader-flagged table
//! 2. R&D capability and activity trends, with the domestic gap to the best
//! 3. paper / patent counts (fixed sample figures, labelled as such)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Tabs, Wrap},
    Frame,
};

use super::layout::LayoutConfig;
use super::theme::{jurisdiction_color, signal_marker, ACCENT, CAUTION_AMBER, HIGHLIGHT, INFO_DIM, TEXT};
use super::widgets::{panel, render_bars, render_table};
use crate::domain::{Jurisdiction, Metric};
use crate::report::CategoryPage;

/// Drill-down tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrillTab {
    #[default]
    LevelGap,
    Research,
    Publications,
}

impl DrillTab {
    pub const ALL: [DrillTab; 3] = [DrillTab::LevelGap, DrillTab::Research, DrillTab::Publications];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            DrillTab::LevelGap => "1 Level & gap",
            DrillTab::Research => "2 R&D capability",
            DrillTab::Publications => "3 Papers & patents",
        }
    }

    const fn index(self) -> usize {
        match self {
            DrillTab::LevelGap => 0,
            DrillTab::Research => 1,
            DrillTab::Publications => 2,
        }
    }
}

/// Position of the current selection, shown in the selector panel.
#[derive(Debug, Clone, Copy)]
pub struct Selection {
    pub category_index: usize,
    pub category_count: usize,
}

pub fn render(
    f: &mut Frame,
    area: Rect,
    page: &CategoryPage,
    tab: DrillTab,
    selection: Selection,
    config: &LayoutConfig,
) {
    let mut constraints = vec![Constraint::Length(3)];
    if config.show_secondary {
        constraints.push(Constraint::Length(6));
    }
    constraints.extend([Constraint::Length(4), Constraint::Length(3), Constraint::Min(0)]);
    let rows = Layout::default().direction(Direction::Vertical).constraints(constraints).split(area);

    render_selector(f, rows[0], page, selection);
    let mut next = 1;
    if config.show_secondary {
        render_description(f, rows[next], page);
        next += 1;
    }
    render_tiles(f, rows[next], page);

    let tabs = Tabs::new(DrillTab::ALL.iter().map(|t| t.title()).collect::<Vec<_>>())
        .select(tab.index())
        .style(Style::new().fg(INFO_DIM))
        .highlight_style(Style::new().fg(CAUTION_AMBER).add_modifier(Modifier::BOLD))
        .block(panel("View"));
    f.render_widget(tabs, rows[next + 1]);

    let body = rows[next + 2];
    match tab {
        DrillTab::LevelGap => render_level_gap(f, body, page, config),
        DrillTab::Research => render_research(f, body, page, config),
        DrillTab::Publications => render_publications(f, body, page),
    }
}

fn render_selector(f: &mut Frame, area: Rect, page: &CategoryPage, selection: Selection) {
    let detail = page.detail.as_deref().unwrap_or("All (category mean)");
    let line = Line::from(vec![
        Span::styled(" Category ", Style::new().fg(INFO_DIM)),
        Span::styled(page.category.clone(), Style::new().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!(" ({}/{})", selection.category_index + 1, selection.category_count),
            Style::new().fg(INFO_DIM),
        ),
        Span::styled("  Sub-technology ", Style::new().fg(INFO_DIM)),
        Span::styled(detail.to_string(), Style::new().fg(TEXT)),
        Span::styled(format!(" ({} items)", page.details.len()), Style::new().fg(INFO_DIM)),
    ]);
    let title = format!("Drill-down: {}", page.category);
    f.render_widget(Paragraph::new(line).block(panel(title)), area);
}

fn render_description(f: &mut Frame, area: Rect, page: &CategoryPage) {
    let d = &page.description;
    let lines = vec![
        Line::from(Span::styled(d.description, Style::new().fg(TEXT))),
        Line::from(vec![
            Span::styled("Domestic: ", Style::new().fg(ACCENT)),
            Span::styled(d.domestic_status, Style::new().fg(TEXT)),
        ]),
        Line::from(vec![
            Span::styled("Global:   ", Style::new().fg(ACCENT)),
            Span::styled(d.global_trend, Style::new().fg(TEXT)),
        ]),
    ];
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(panel("About")),
        area,
    );
}

fn render_tiles(f: &mut Frame, area: Rect, page: &CategoryPage) {
    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25); 4])
        .split(area);

    let (level_marker, level_color) = signal_marker(page.level_signal);
    let (gap_marker, gap_color) = signal_marker(page.gap_signal);
    let summary = &page.summary;
    let values = [
        (
            format!("{level_marker} Level"),
            Metric::TechLevel.format_value(summary.domestic_level()),
            level_color,
        ),
        (
            format!("{gap_marker} Gap"),
            Metric::TechGap.format_value(summary.domestic_gap()),
            gap_color,
        ),
        (
            format!("{} Group", page.badge),
            summary.domestic_group.map_or("N/A", |g| g.label()).to_string(),
            TEXT,
        ),
        (
            "Leader".to_string(),
            summary.leading_jurisdiction.clone().unwrap_or_else(|| "N/A".to_string()),
            TEXT,
        ),
    ];

    for ((title, value, color), tile) in values.into_iter().zip(tiles.iter()) {
        let text = Paragraph::new(Span::styled(
            value,
            Style::new().fg(color).add_modifier(Modifier::BOLD),
        ));
        f.render_widget(text.block(panel(title)), *tile);
    }
}

fn render_level_gap(f: &mut Frame, area: Rect, page: &CategoryPage, config: &LayoutConfig) {
    let chart_height = if config.side_by_side { 7 } else { 14 };
    let mut constraints = vec![Constraint::Length(chart_height)];
    if config.show_tables {
        constraints.push(Constraint::Min(0));
    }
    let rows = Layout::default().direction(Direction::Vertical).constraints(constraints).split(area);

    let charts = Layout::default()
        .direction(config.pair_direction())
        .constraints(config.col_constraints())
        .split(rows[0]);
    render_bars(f, charts[0], &page.level_bars);
    render_bars(f, charts[1], &page.gap_bars);

    if !config.show_tables {
        return;
    }
    let table_rows = page
        .jurisdictions
        .iter()
        .map(|row| {
            let name = if row.is_leader {
                format!("* {}", row.jurisdiction.label())
            } else {
                row.jurisdiction.label().to_string()
            };
            Row::new(vec![
                Cell::from(name).style(Style::new().fg(jurisdiction_color(row.jurisdiction))),
                Cell::from(Metric::TechLevel.format_value(row.level)),
                Cell::from(Metric::TechGap.format_value(row.gap)),
                Cell::from(row.group.map_or("", |g| g.label())),
                Cell::from(if row.is_leader { "yes" } else { "" }),
            ])
        })
        .collect();
    render_table(
        f,
        rows[1],
        "Jurisdictions".to_string(),
        vec!["Jurisdiction", "Level", "Gap", "Group", "Leader"],
        table_rows,
        vec![
            Constraint::Length(14),
            Constraint::Length(8),
            Constraint::Length(7),
            Constraint::Length(12),
            Constraint::Length(6),
        ],
        None,
    );
}

fn render_research(f: &mut Frame, area: Rect, page: &CategoryPage, config: &LayoutConfig) {
    let halves = Layout::default()
        .direction(config.pair_direction())
        .constraints(config.col_constraints())
        .split(area);

    let table_rows = page
        .research
        .iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(row.jurisdiction.label())
                    .style(Style::new().fg(jurisdiction_color(row.jurisdiction))),
                Cell::from(Metric::BasicResearch.format_value(row.basic)),
                Cell::from(Metric::AppliedResearch.format_value(row.applied)),
                Cell::from(row.rd_trend.clone().unwrap_or_else(|| "N/A".to_string())),
            ])
        })
        .collect();
    render_table(
        f,
        halves[0],
        "R&D capability".to_string(),
        vec!["Jurisdiction", "Basic", "Applied", "Trend"],
        table_rows,
        vec![
            Constraint::Length(13),
            Constraint::Length(7),
            Constraint::Length(8),
            Constraint::Min(6),
        ],
        None,
    );

    let cmp = &page.research_comparison;
    let trend = page.summary.jurisdiction(Jurisdiction::DOMESTIC).rd_trend.clone();
    let label = |text: &'static str| Span::styled(text, Style::new().fg(ACCENT));
    let value = |text: String| Span::styled(text, Style::new().fg(TEXT));
    let lines = vec![
        Line::from(vec![label(" Basic research    "), value(Metric::BasicResearch.format_value(cmp.basic))]),
        Line::from(vec![
            label(" Applied research  "),
            value(Metric::AppliedResearch.format_value(cmp.applied)),
        ]),
        Line::from(vec![label(" Activity trend    "), value(trend.unwrap_or_else(|| "N/A".into()))]),
        Line::from(""),
        Line::from(vec![
            label(" Gap to best basic   "),
            value(Metric::BasicResearch.format_value(cmp.basic_gap)),
        ]),
        Line::from(vec![
            label(" Gap to best applied "),
            value(Metric::AppliedResearch.format_value(cmp.applied_gap)),
        ]),
        Line::from(vec![
            label(" Overall             "),
            Span::styled(cmp.verdict(), Style::new().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)),
        ]),
    ];
    f.render_widget(Paragraph::new(lines).block(panel("Domestic R&D")), halves[1]);
}

fn render_publications(f: &mut Frame, area: Rect, page: &CategoryPage) {
    let rows = page
        .sample_publications
        .iter()
        .map(|p| {
            Row::new(vec![
                Cell::from(p.jurisdiction.label())
                    .style(Style::new().fg(jurisdiction_color(p.jurisdiction))),
                Cell::from(p.papers.to_string()),
                Cell::from(p.patents.to_string()),
                Cell::from(p.growth),
            ])
        })
        .collect();
    render_table(
        f,
        area,
        "Papers & patents (sample figures, not from input)".to_string(),
        vec!["Jurisdiction", "Papers", "Patents", "Growth"],
        rows,
        vec![
            Constraint::Length(13),
            Constraint::Length(7),
            Constraint::Length(8),
            Constraint::Length(7),
        ],
        None,
    );
}
