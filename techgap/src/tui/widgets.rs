//! Panel renderers shared by the three pages.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::theme::{
    gauge_bar, heat_color, jurisdiction_color, ACCENT, BACKGROUND, HIGHLIGHT, INFO_DIM, MUTED_BAR,
    TEXT,
};
use crate::analysis::insights::Headline;
use crate::charts::{BarSeries, Heatmap};
use crate::domain::{Metric, TechType};

pub const STYLE_HEADER_ROW: Style = Style::new().fg(ACCENT).add_modifier(Modifier::BOLD);
pub const STYLE_SELECTED_ROW: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Bordered panel with a title.
pub fn panel(title: impl Into<String>) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(title.into())
        .border_style(Style::new().fg(ACCENT))
}

/// Short type label for tables.
#[must_use]
pub fn type_label(tech_type: Option<TechType>) -> &'static str {
    match tech_type {
        Some(TechType::Mitigation) => "MIT",
        Some(TechType::Adaptation) => "ADA",
        None => "-",
    }
}

/// Horizontal gauge chart, one line per bar.
pub fn render_bars(f: &mut Frame, area: Rect, series: &BarSeries) {
    // label (7) + spaces (2) + value (8) + borders (2)
    let bar_width = (area.width as usize).saturating_sub(19).max(1);
    let any_highlight = series.bars.iter().any(|b| b.highlighted);
    let lines: Vec<Line> = series
        .bars
        .iter()
        .map(|bar| {
            let color = match (any_highlight, bar.highlighted) {
                (false, _) => jurisdiction_color(bar.jurisdiction),
                (true, true) => HIGHLIGHT,
                (true, false) => MUTED_BAR,
            };
            Line::from(vec![
                Span::styled(format!("{:<7}", bar.jurisdiction.label()), Style::new().fg(TEXT)),
                Span::raw(" "),
                Span::styled(gauge_bar(bar.value, series.y_max, bar_width), Style::new().fg(color)),
                Span::styled(format!(" {:>7}", bar.label), Style::new().fg(color)),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(panel(series.title.clone())), area);
}

/// Level heatmap as a coloured table. `selected` scrolls the rows.
pub fn render_heatmap(f: &mut Frame, area: Rect, title: &str, map: &Heatmap, selected: Option<&str>) {
    let header = Row::new(
        std::iter::once(Cell::from("Category"))
            .chain(map.columns.iter().map(|j| Cell::from(j.label())))
            .collect::<Vec<_>>(),
    )
    .style(STYLE_HEADER_ROW);

    let rows = map.rows.iter().map(|row| {
        let cells = std::iter::once(Cell::from(row.label.clone())).chain(row.values.iter().map(|&v| {
            Cell::from(Metric::TechLevel.format_value(v))
                .style(Style::new().fg(BACKGROUND).bg(heat_color(&map.scale, v)))
        }));
        Row::new(cells.collect::<Vec<_>>())
    });

    let widths = std::iter::once(Constraint::Length(19))
        .chain(map.columns.iter().map(|_| Constraint::Length(7)))
        .collect::<Vec<_>>();

    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(format!(
            "{title} (scale {:.0}/{:.0}/{:.0})",
            map.scale.min, map.scale.mid, map.scale.max
        )))
        .row_highlight_style(STYLE_SELECTED_ROW);

    let mut state = TableState::default().with_selected(selected.and_then(|c| map.row_index(c)));
    f.render_stateful_widget(table, area, &mut state);
}

/// Row of headline tiles.
pub fn render_headlines(f: &mut Frame, area: Rect, headlines: &[Headline]) {
    if headlines.is_empty() {
        return;
    }
    #[allow(clippy::cast_possible_truncation)]
    let tile_pct = (100 / headlines.len()) as u16;
    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(headlines.iter().map(|_| Constraint::Percentage(tile_pct)).collect::<Vec<_>>())
        .split(area);

    for (headline, tile) in headlines.iter().zip(tiles.iter()) {
        let mut lines = vec![Line::from(Span::styled(
            headline.value.clone(),
            Style::new().fg(HIGHLIGHT).add_modifier(Modifier::BOLD),
        ))];
        if let Some(delta) = &headline.delta {
            lines.push(Line::from(Span::styled(delta.clone(), Style::new().fg(INFO_DIM))));
        }
        f.render_widget(Paragraph::new(lines).block(panel(headline.label)), *tile);
    }
}

/// Scrollable table with a header, keeping row `selected` in view.
pub fn render_table<'a>(
    f: &mut Frame,
    area: Rect,
    title: String,
    header: Vec<&'a str>,
    rows: Vec<Row<'a>>,
    widths: Vec<Constraint>,
    selected: Option<usize>,
) {
    let len = rows.len();
    let table = Table::new(rows, widths)
        .header(Row::new(header).style(STYLE_HEADER_ROW))
        .block(panel(title))
        .row_highlight_style(STYLE_SELECTED_ROW);
    let mut state =
        TableState::default().with_selected(selected.filter(|_| len > 0).map(|s| s.min(len - 1)));
    f.render_stateful_widget(table, area, &mut state);
}
