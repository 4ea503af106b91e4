//! Five-option region selector shown above the charts.

use ratatui::text::{Line, Span};

use sales_core::models::{RegionFilter, SELECTOR_OPTIONS};

use crate::themes::Theme;

const SELECTED_MARK: &str = "◉ ";
const UNSELECTED_MARK: &str = "○ ";

/// Radio-style selector over `all, north, south, east, west`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegionPicker {
    selected: usize,
}

impl RegionPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start on `filter`'s option; unmatched filters fall back to `all`.
    pub fn from_filter(filter: &RegionFilter) -> Self {
        let value = filter.to_string();
        let selected = SELECTOR_OPTIONS
            .iter()
            .position(|opt| *opt == value)
            .unwrap_or(0);
        Self { selected }
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Selector value of the current option, e.g. `"north"`.
    pub fn value(&self) -> &'static str {
        SELECTOR_OPTIONS[self.selected]
    }

    pub fn filter(&self) -> RegionFilter {
        RegionFilter::parse(self.value())
    }

    /// Move right, wrapping around.
    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % SELECTOR_OPTIONS.len();
    }

    /// Move left, wrapping around.
    pub fn previous(&mut self) {
        self.selected = (self.selected + SELECTOR_OPTIONS.len() - 1) % SELECTOR_OPTIONS.len();
    }

    /// Select by zero-based index; out-of-range indices are ignored.
    /// Returns whether the selection changed.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= SELECTOR_OPTIONS.len() || index == self.selected {
            return false;
        }
        self.selected = index;
        true
    }

    /// Display labels in option order.
    pub fn labels() -> Vec<String> {
        SELECTOR_OPTIONS
            .iter()
            .map(|opt| RegionFilter::parse(opt).label())
            .collect()
    }

    pub fn to_line(&self, theme: &Theme) -> Line<'static> {
        let mut spans = Vec::with_capacity(SELECTOR_OPTIONS.len() * 2);
        for (i, label) in Self::labels().into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("   "));
            }
            let (mark, style) = if i == self.selected {
                (SELECTED_MARK, theme.picker_selected)
            } else {
                (UNSELECTED_MARK, theme.picker_option)
            };
            spans.push(Span::styled(format!("{mark}{label}"), style));
        }
        Line::from(spans)
    }
}
