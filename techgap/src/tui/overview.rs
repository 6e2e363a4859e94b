//! Overview page - domestic headline, level/gap bars, heatmap and detail table.
//!
//! ```text
//! ┌ level ┐┌ gap ┐┌ leading ┐┌ best ┐
//! ┌ Technology level ─┐┌ Technology gap ──┐
//! │ Korea ████░ 79.2% ││ Korea ███░  2.8y │
//! ┌ Insights ───────────────────────────────┐
//! ┌ Heatmap ──────────┐┌ Detail ──────────┐
//! ```

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row},
    Frame,
};

use super::layout::LayoutConfig;
use super::theme::{signal_marker, INFO_DIM, TEXT};
use super::widgets::{panel, render_bars, render_headlines, render_heatmap, render_table, type_label};
use crate::domain::Metric;
use crate::report::OverviewPage;

pub fn render(f: &mut Frame, area: Rect, page: &OverviewPage, config: &LayoutConfig, selected: usize) {
    let chart_height = if config.side_by_side { 7 } else { 14 };
    let mut constraints = vec![Constraint::Length(4), Constraint::Length(chart_height)];
    if config.show_secondary {
        constraints.push(Constraint::Length(5));
    }
    if config.show_tables {
        constraints.push(Constraint::Min(0));
    }
    let rows = Layout::default().direction(Direction::Vertical).constraints(constraints).split(area);

    render_headlines(f, rows[0], &page.headlines);

    let charts = Layout::default()
        .direction(config.pair_direction())
        .constraints(config.col_constraints())
        .split(rows[1]);
    render_bars(f, charts[0], &page.level_bars);
    render_bars(f, charts[1], &page.gap_bars);

    let mut next = 2;
    if config.show_secondary {
        let lines: Vec<Line> = page
            .sentences
            .iter()
            .map(|s| Line::from(Span::styled(format!(" {s}"), Style::new().fg(TEXT))))
            .collect();
        let title = format!("Insights: {}", page.insights.scope.label());
        f.render_widget(Paragraph::new(lines).block(panel(title)), rows[next]);
        next += 1;
    }

    if config.show_tables {
        let lower = Layout::default()
            .direction(config.pair_direction())
            .constraints(config.col_constraints())
            .split(rows[next]);
        let current = page.rows.get(selected).map(|row| row.category.as_str());
        render_heatmap(f, lower[0], "Technology level heatmap", &page.heatmap, current);
        render_detail_table(f, lower[1], page, selected);
    }
}

fn render_detail_table(f: &mut Frame, area: Rect, page: &OverviewPage, selected: usize) {
    let rows = page
        .rows
        .iter()
        .map(|row| {
            let (level_marker, level_color) = signal_marker(row.level_signal);
            let (gap_marker, gap_color) = signal_marker(row.gap_signal);
            Row::new(vec![
                Cell::from(type_label(row.tech_type)),
                Cell::from(row.category.clone()),
                Cell::from(format!("{level_marker} {}", Metric::TechLevel.format_value(row.level)))
                    .style(Style::new().fg(level_color)),
                Cell::from(format!("{gap_marker} {}", Metric::TechGap.format_value(row.gap)))
                    .style(Style::new().fg(gap_color)),
                Cell::from(format!(
                    "{} {}",
                    row.badge,
                    row.group.map_or("N/A", |g| g.label())
                )),
                Cell::from(row.leading_jurisdiction.clone().unwrap_or_default())
                    .style(Style::new().fg(INFO_DIM)),
            ])
        })
        .collect();

    render_table(
        f,
        area,
        format!("Detail ({} categories)", page.rows.len()),
        vec!["Type", "Category", "Level", "Gap", "Group", "Leader"],
        rows,
        vec![
            Constraint::Length(4),
            Constraint::Min(12),
            Constraint::Length(10),
            Constraint::Length(9),
            Constraint::Length(17),
            Constraint::Length(8),
        ],
        Some(selected),
    );
}
