//! Responsive layout engine for the TUI.
//!
//! Adapts the layout based on terminal dimensions to keep the dashboard
//! usable from a minimal 60x12 window up to full screen.

use ratatui::layout::{Constraint, Direction};

// Width breakpoints
const WIDTH_STACKED: u16 = 100; // Below this: charts stacked vertically
const WIDTH_WIDE: u16 = 160; // At or above this: wider chart column

// Height breakpoints
const HEIGHT_MINIMAL: u16 = 16; // Below this: charts only, no tables
const HEIGHT_COMPACT: u16 = 30; // Below this: hide the secondary panels

/// Terminal size classification for layout decisions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TerminalSize {
    /// Height < 16: headline and charts only
    Minimal,
    /// Height 16-30: tables shown, secondary panels hidden
    Compact,
    /// Height > 30: every panel
    Normal,
}

/// Computed layout configuration based on terminal dimensions.
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct LayoutConfig {
    pub size: TerminalSize,

    /// Charts side by side rather than stacked
    pub side_by_side: bool,

    /// Whether tables (detail, comparison, ranked) are shown
    pub show_tables: bool,

    /// Whether insight text and info panels are shown
    pub show_secondary: bool,

    /// Whether the key-hint status bar is shown
    pub show_status_bar: bool,

    /// Left column percentage (0-100)
    pub left_col_pct: u16,

    /// Right column percentage (0-100)
    pub right_col_pct: u16,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            size: TerminalSize::Normal,
            side_by_side: true,
            show_tables: true,
            show_secondary: true,
            show_status_bar: true,
            left_col_pct: 50,
            right_col_pct: 50,
        }
    }
}

impl LayoutConfig {
    /// Column constraints for a two-panel split.
    #[must_use]
    pub fn col_constraints(&self) -> [Constraint; 2] {
        [Constraint::Percentage(self.left_col_pct), Constraint::Percentage(self.right_col_pct)]
    }

    /// Direction for a pair of charts.
    #[must_use]
    pub fn pair_direction(&self) -> Direction {
        if self.side_by_side {
            Direction::Horizontal
        } else {
            Direction::Vertical
        }
    }
}

/// Compute layout configuration based on terminal dimensions.
///
/// # Breakpoints
///
/// | Terminal Size  | Behavior |
/// |----------------|----------|
/// | Width < 100    | Charts stacked vertically |
/// | Width 100-160  | Side by side, 50/50 |
/// | Width >= 160   | Side by side, 40/60 |
/// | Height < 16    | Minimal: no tables, no status bar |
/// | Height 16-30   | Compact: tables, no secondary panels |
/// | Height > 30    | Full layout |
#[must_use]
pub fn compute_layout(width: u16, height: u16) -> LayoutConfig {
    let mut config = LayoutConfig::default();

    if width < WIDTH_STACKED {
        config.side_by_side = false;
    } else if width >= WIDTH_WIDE {
        config.left_col_pct = 40;
        config.right_col_pct = 60;
    }

    if height < HEIGHT_MINIMAL {
        config.size = TerminalSize::Minimal;
        config.show_tables = false;
        config.show_secondary = false;
        config.show_status_bar = false;
    } else if height <= HEIGHT_COMPACT {
        config.size = TerminalSize::Compact;
        config.show_secondary = false;
    }

    config
}
