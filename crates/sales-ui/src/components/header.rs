use chrono::NaiveDate;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use sales_core::time_utils::format_long_date;

use crate::themes::Theme;

/// Decoration placed either side of the title.
pub const ACCENT: &str = "◆ ◇ ◆";

/// Dashboard header rendering four lines:
///
/// 1. Product title in capitals, framed by accents.
/// 2. Subtitle naming the cutoff date.
/// 3. A `=` separator as wide as the widest line above.
/// 4. An empty line.
pub struct Header<'a> {
    pub product: &'a str,
    pub cutoff: NaiveDate,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(product: &'a str, cutoff: NaiveDate, theme: &'a Theme) -> Self {
        Self {
            product,
            cutoff,
            theme,
        }
    }

    pub fn title(&self) -> String {
        format!(" {} SALES ANALYSIS ", self.product.to_uppercase())
    }

    pub fn subtitle(&self) -> String {
        format!(
            "Sales Performance: Before vs After Price Increase ({})",
            format_long_date(self.cutoff)
        )
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let title = self.title();
        let subtitle = self.subtitle();

        let title_width = ACCENT.width() * 2 + title.width();
        let separator = "=".repeat(title_width.max(subtitle.width()));

        vec![
            Line::from(vec![
                Span::styled(ACCENT, self.theme.header_accent),
                Span::styled(title, self.theme.header),
                Span::styled(ACCENT, self.theme.header_accent),
            ]),
            Line::from(Span::styled(subtitle, self.theme.subtitle)),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
