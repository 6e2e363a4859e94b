//! Jurisdictions page - radar, standings, heatmap and ranked tables.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Cell, Chart, Dataset, GraphType, Paragraph, Row},
    Frame,
};

use super::layout::LayoutConfig;
use super::theme::{jurisdiction_color, CAUTION_AMBER, HIGHLIGHT, INFO_DIM, TEXT};
use super::widgets::{panel, render_heatmap, render_table, type_label};
use crate::charts::tables::RankedRow;
use crate::domain::Metric;
use crate::report::CountriesPage;

const RADAR_BOUND: f64 = 110.0;

pub fn render(
    f: &mut Frame,
    area: Rect,
    page: &CountriesPage,
    config: &LayoutConfig,
    selected: usize,
) {
    let mut constraints = vec![Constraint::Length(18)];
    if config.show_tables {
        constraints.push(Constraint::Min(0));
    }
    if config.show_secondary {
        constraints.push(Constraint::Length(13));
    }
    let rows = Layout::default().direction(Direction::Vertical).constraints(constraints).split(area);

    let top = Layout::default()
        .direction(config.pair_direction())
        .constraints(config.col_constraints())
        .split(rows[0]);
    render_radar(f, top[0], page);
    render_standings(f, top[1], page);

    let mut next = 1;
    if config.show_tables {
        let middle = Layout::default()
            .direction(config.pair_direction())
            .constraints(config.col_constraints())
            .split(rows[next]);
        let current = page.comparison.get(selected).map(|row| row.category.as_str());
        render_heatmap(f, middle[0], "Technology level heatmap", &page.heatmap, current);
        render_comparison(f, middle[1], page, selected);
        next += 1;
    }

    if config.show_secondary {
        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[next]);
        render_ranked(f, bottom[0], "Domestic top 10", &page.top);
        render_ranked(f, bottom[1], "Domestic bottom 10", &page.bottom);
    }
}

fn render_radar(f: &mut Frame, area: Rect, page: &CountriesPage) {
    let radar = &page.radar;
    let title = format!("Radar: {}", radar.scope.label());
    if radar.axes.is_empty() {
        let empty = Paragraph::new(Span::styled(" No categories in scope", Style::new().fg(INFO_DIM)));
        f.render_widget(empty.block(panel(title)), area);
        return;
    }

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(18)])
        .split(area);

    let ring = radar.ring(radar.range.1);
    let polygons: Vec<Vec<(f64, f64)>> = radar.series.iter().map(|s| s.to_cartesian()).collect();

    let mut datasets = vec![Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::new().fg(INFO_DIM))
        .data(&ring)];
    for (series, points) in radar.series.iter().zip(&polygons) {
        datasets.push(
            Dataset::default()
                .name(series.jurisdiction.label())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::new().fg(jurisdiction_color(series.jurisdiction)))
                .data(points),
        );
    }

    let chart = Chart::new(datasets)
        .block(panel(title))
        .x_axis(Axis::default().bounds([-RADAR_BOUND, RADAR_BOUND]))
        .y_axis(Axis::default().bounds([-RADAR_BOUND, RADAR_BOUND]));
    f.render_widget(chart, cols[0]);

    // Axis order: clockwise from 12 o'clock
    let labels: Vec<Line> = radar
        .axes
        .iter()
        .enumerate()
        .map(|(i, label)| {
            Line::from(vec![
                Span::styled(format!("{}.", i + 1), Style::new().fg(CAUTION_AMBER)),
                Span::styled(label.clone(), Style::new().fg(TEXT)),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(labels).block(panel("Axes")), cols[1]);
}

fn render_standings(f: &mut Frame, area: Rect, page: &CountriesPage) {
    let mut lines = vec![Line::from(Span::styled(
        " #  Jurisdiction  Avg level  Leading",
        Style::new().fg(INFO_DIM).add_modifier(Modifier::BOLD),
    ))];
    for standing in &page.standings {
        let color = jurisdiction_color(standing.jurisdiction);
        let rank_style = if standing.rank == 1 {
            Style::new().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(TEXT)
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<2} ", standing.rank), rank_style),
            Span::styled(format!("{:<13} ", standing.jurisdiction.label()), Style::new().fg(color)),
            Span::styled(
                format!("{:>9}  ", Metric::TechLevel.format_value(standing.average_level)),
                Style::new().fg(TEXT),
            ),
            Span::styled(format!("{:>7}", standing.leading_count), Style::new().fg(TEXT)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Leading: categories with level >= 90%",
        Style::new().fg(INFO_DIM),
    )));
    f.render_widget(Paragraph::new(lines).block(panel("Standings")), area);
}

fn render_comparison(f: &mut Frame, area: Rect, page: &CountriesPage, selected: usize) {
    let mut header = vec!["#", "Type", "Category"];
    if let Some(first) = page.comparison.first() {
        header.extend(first.levels.iter().map(|(j, _)| j.label()));
    }
    header.push("Leader");

    let level_count = page.comparison.first().map_or(0, |r| r.levels.len());
    let rows = page
        .comparison
        .iter()
        .map(|row| {
            let mut cells = vec![
                Cell::from(row.rank.to_string()),
                Cell::from(type_label(row.tech_type)),
                Cell::from(row.category.clone()),
            ];
            cells.extend(row.levels.iter().map(|&(j, v)| {
                let style = if j.is_domestic() { Style::new().fg(HIGHLIGHT) } else { Style::new() };
                Cell::from(Metric::TechLevel.format_value(v)).style(style)
            }));
            cells.push(Cell::from(row.leading_jurisdiction.clone().unwrap_or_default()));
            Row::new(cells)
        })
        .collect();

    let mut widths = vec![Constraint::Length(3), Constraint::Length(4), Constraint::Min(12)];
    widths.extend((0..level_count).map(|_| Constraint::Length(7)));
    widths.push(Constraint::Length(8));

    render_table(
        f,
        area,
        format!("Comparison ({} categories)", page.comparison.len()),
        header,
        rows,
        widths,
        Some(selected),
    );
}

fn render_ranked(f: &mut Frame, area: Rect, title: &str, rows: &[RankedRow]) {
    let table_rows = rows
        .iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(type_label(row.tech_type)),
                Cell::from(row.category.clone()),
                Cell::from(Metric::TechLevel.format_value(row.level)),
                Cell::from(Metric::TechGap.format_value(row.gap)),
            ])
        })
        .collect();
    render_table(
        f,
        area,
        title.to_string(),
        vec!["Type", "Category", "Level", "Gap"],
        table_rows,
        vec![
            Constraint::Length(4),
            Constraint::Min(12),
            Constraint::Length(7),
            Constraint::Length(6),
        ],
        None,
    );
}
