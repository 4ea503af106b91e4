//! Before/after average daily sales panel.

use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
    Frame,
};

use sales_core::error::Result;
use sales_core::formatting::{format_currency, format_percent_change};
use sales_core::models::BeforeAfterSummary;
use sales_core::time_utils::format_long_date;

use crate::themes::Theme;

const LABEL_WIDTH: usize = 44;

/// Lines describing `summary`, or why it could not be computed.
pub fn insight_lines(summary: &Result<BeforeAfterSummary>, cutoff: NaiveDate, theme: &Theme) -> Vec<Line<'static>> {
    match summary {
        Ok(s) => vec![
            value_line("Average Daily Sales Before Price Increase:", format_currency(s.before), theme),
            value_line("Average Daily Sales After Price Increase:", format_currency(s.after), theme),
            Line::from(vec![
                Span::styled(format!("{:<LABEL_WIDTH$}", "Change:"), theme.label),
                Span::styled(
                    format_percent_change(s.percent_change),
                    theme.change_style(s.is_increase()),
                ),
            ]),
        ],
        Err(e) if e.is_insufficient_data() => vec![
            Line::from(Span::styled(
                format!("Not enough data on both sides of {}", format_long_date(cutoff)),
                theme.warning,
            )),
            Line::from(Span::styled(e.to_string(), theme.dim)),
        ],
        Err(e) => vec![Line::from(Span::styled(e.to_string(), theme.error))],
    }
}

fn value_line(label: &'static str, value: String, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<LABEL_WIDTH$}"), theme.label),
        Span::styled(value, theme.value),
    ])
}

pub fn render_insights(
    frame: &mut Frame,
    area: Rect,
    summary: &Result<BeforeAfterSummary>,
    cutoff: NaiveDate,
    theme: &Theme,
) {
    let paragraph = Paragraph::new(insight_lines(summary, cutoff, theme))
        .wrap(Wrap { trim: true })
        .block(Block::bordered().title("Key Insights").border_style(theme.border));
    frame.render_widget(paragraph, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use rust_decimal::Decimal;
    use sales_core::error::SalesError;

    fn cutoff() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 1, 15).unwrap()
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_summary_lines() {
        let theme = Theme::dark();
        let summary = Ok(BeforeAfterSummary {
            before: Decimal::from(30),
            after: Decimal::from(15),
            percent_change: Decimal::from(-50),
        });
        let lines = insight_lines(&summary, cutoff(), &theme);

        assert_eq!(lines.len(), 3);
        assert!(line_text(&lines[0]).starts_with("Average Daily Sales Before Price Increase:"));
        assert!(line_text(&lines[0]).ends_with("$30.00"));
        assert!(line_text(&lines[1]).ends_with("$15.00"));
        assert!(line_text(&lines[2]).ends_with("-50.00%"));
        assert_eq!(lines[2].spans[1].style, theme.change_style(false));
    }

    #[test]
    fn test_increase_uses_success_style() {
        let theme = Theme::dark();
        let summary = Ok(BeforeAfterSummary {
            before: Decimal::from(10),
            after: Decimal::from(12),
            percent_change: Decimal::from(20),
        });
        let lines = insight_lines(&summary, cutoff(), &theme);
        assert!(line_text(&lines[2]).ends_with("+20.00%"));
        assert_eq!(lines[2].spans[1].style, theme.change_style(true));
    }

    #[test]
    fn test_insufficient_data_message() {
        let theme = Theme::dark();
        let summary = Err(SalesError::InsufficientData("no sales after cutoff".to_string()));
        let lines = insight_lines(&summary, cutoff(), &theme);

        assert_eq!(line_text(&lines[0]), "Not enough data on both sides of January 15, 2021");
        assert_eq!(lines[0].spans[0].style, theme.warning);
    }

    #[test]
    fn test_other_errors_use_error_style() {
        let theme = Theme::dark();
        let summary = Err(SalesError::Config("broken".to_string()));
        let lines = insight_lines(&summary, cutoff(), &theme);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spans[0].style, theme.error);
    }

    #[test]
    fn test_render_insights_block() {
        let theme = Theme::dark();
        let summary = Ok(BeforeAfterSummary {
            before: Decimal::from(30),
            after: Decimal::from(15),
            percent_change: Decimal::from(-50),
        });
        let mut terminal = Terminal::new(TestBackend::new(80, 6)).unwrap();
        terminal
            .draw(|frame| render_insights(frame, frame.area(), &summary, cutoff(), &theme))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Key Insights"));
        assert!(text.contains("$30.00"));
    }
}
