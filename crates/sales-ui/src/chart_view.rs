//! Total-sales and regional line charts with a vertical cutoff marker.
//!
//! Sales stay [`Decimal`] up to this module; here they become `f64` chart
//! coordinates with dates mapped to day numbers.
//!
//! [`Decimal`]: rust_decimal::Decimal

use chrono::NaiveDate;
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::Style,
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Chart, Dataset, GraphType, LegendPosition, Paragraph},
    Frame,
};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use sales_core::formatting::{chart_value, format_currency};
use sales_core::models::DailyTotal;
use sales_core::time_utils::{date_from_day_number, day_number, format_short_date};
use sales_data::aggregator::RegionSeries;

use crate::themes::Theme;

/// Headroom above the largest value, as a fraction.
const Y_HEADROOM: f64 = 0.05;

// ── Coordinates ───────────────────────────────────────────────────────────────

pub type Points = Vec<(f64, f64)>;

pub fn total_points(totals: &[DailyTotal]) -> Points {
    totals
        .iter()
        .map(|t| (day_number(t.date), chart_value(t.total_sales)))
        .collect()
}

pub fn region_points(series: &RegionSeries) -> Points {
    series
        .points
        .iter()
        .map(|(date, sales)| (day_number(*date), chart_value(*sales)))
        .collect()
}

/// Axis bounds covering every point and the cutoff date; y starts at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartBounds {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl ChartBounds {
    pub fn compute(sets: &[&[(f64, f64)]], cutoff: NaiveDate) -> Self {
        let cutoff_x = day_number(cutoff);
        let mut x_min = cutoff_x;
        let mut x_max = cutoff_x;
        let mut y_max: f64 = 0.0;

        for (x, y) in sets.iter().flat_map(|s| s.iter()) {
            x_min = x_min.min(*x);
            x_max = x_max.max(*x);
            y_max = y_max.max(*y);
        }

        if x_max <= x_min {
            x_min -= 1.0;
            x_max += 1.0;
        }
        let y_top = if y_max > 0.0 { y_max * (1.0 + Y_HEADROOM) } else { 1.0 };

        Self {
            x: [x_min, x_max],
            y: [0.0, y_top],
        }
    }

    /// Two points drawing the vertical cutoff line.
    pub fn cutoff_marker(&self, cutoff: NaiveDate) -> Points {
        let x = day_number(cutoff);
        vec![(x, self.y[0]), (x, self.y[1])]
    }

    /// First date, cutoff and last date.
    pub fn x_labels(&self, cutoff: NaiveDate) -> Vec<String> {
        [self.x[0], day_number(cutoff), self.x[1]]
            .into_iter()
            .filter_map(date_from_day_number)
            .map(format_short_date)
            .collect()
    }

    /// Zero, midpoint and top, as whole dollars.
    pub fn y_labels(&self) -> Vec<String> {
        [self.y[0], (self.y[0] + self.y[1]) / 2.0, self.y[1]]
            .into_iter()
            .map(|v| {
                let amount = Decimal::from_f64(v).unwrap_or_default().round_dp(0);
                format_currency(amount)
                    .trim_end_matches(".00")
                    .to_string()
            })
            .collect()
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Render the daily-total line for the current selection.
pub fn render_sales_chart(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    totals: &[DailyTotal],
    cutoff: NaiveDate,
    theme: &Theme,
) {
    let block = Block::bordered()
        .title(title.to_string())
        .border_style(theme.border);

    if totals.is_empty() {
        render_empty(frame, area, block, "No sales for this selection", theme);
        return;
    }

    let points = total_points(totals);
    let bounds = ChartBounds::compute(&[&points], cutoff);
    let marker = bounds.cutoff_marker(cutoff);

    let datasets = vec![
        line_dataset("Total Daily Sales", &points, theme.chart_total),
        cutoff_dataset(cutoff, &marker, theme),
    ];
    render_chart(frame, area, block, datasets, &bounds, cutoff, theme);
}

/// Render one line per region.
pub fn render_regional_chart(
    frame: &mut Frame,
    area: Rect,
    regions: &[RegionSeries],
    cutoff: NaiveDate,
    theme: &Theme,
) {
    let block = Block::bordered()
        .title("Sales by Region")
        .border_style(theme.border);

    if regions.is_empty() {
        render_empty(frame, area, block, "No regional data", theme);
        return;
    }

    let series: Vec<Points> = regions.iter().map(region_points).collect();
    let slices: Vec<&[(f64, f64)]> = series.iter().map(|s| s.as_slice()).collect();
    let bounds = ChartBounds::compute(&slices, cutoff);
    let marker = bounds.cutoff_marker(cutoff);

    let mut datasets: Vec<Dataset> = regions
        .iter()
        .zip(&series)
        .map(|(r, points)| line_dataset(r.region.label(), points, theme.region_style(r.region)))
        .collect();
    datasets.push(cutoff_dataset(cutoff, &marker, theme));

    render_chart(frame, area, block, datasets, &bounds, cutoff, theme);
}

fn line_dataset<'a>(name: &'a str, points: &'a [(f64, f64)], style: Style) -> Dataset<'a> {
    Dataset::default()
        .name(name)
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(style)
        .data(points)
}

fn cutoff_dataset<'a>(cutoff: NaiveDate, marker: &'a [(f64, f64)], theme: &Theme) -> Dataset<'a> {
    Dataset::default()
        .name(format!("Price Increase {}", format_short_date(cutoff)))
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(theme.chart_cutoff)
        .data(marker)
}

fn render_chart(
    frame: &mut Frame,
    area: Rect,
    block: Block,
    datasets: Vec<Dataset>,
    bounds: &ChartBounds,
    cutoff: NaiveDate,
    theme: &Theme,
) {
    let x_axis = Axis::default()
        .title(Span::styled("Date", theme.chart_axis))
        .style(theme.chart_axis)
        .bounds(bounds.x)
        .labels(bounds.x_labels(cutoff));
    let y_axis = Axis::default()
        .title(Span::styled("Sales ($)", theme.chart_axis))
        .style(theme.chart_axis)
        .bounds(bounds.y)
        .labels(bounds.y_labels());

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(x_axis)
        .y_axis(y_axis)
        .legend_position(Some(LegendPosition::TopLeft))
        .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)));

    frame.render_widget(chart, area);
}

fn render_empty(frame: &mut Frame, area: Rect, block: Block, message: &str, theme: &Theme) {
    let paragraph = Paragraph::new(Line::from(Span::styled(message.to_string(), theme.warning)))
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use sales_core::models::Region;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 1, d).unwrap()
    }

    fn totals() -> Vec<DailyTotal> {
        vec![
            DailyTotal { date: date(10), total_sales: Decimal::from(30) },
            DailyTotal { date: date(20), total_sales: Decimal::from(15) },
        ]
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_total_points_use_day_numbers() {
        let points = total_points(&totals());
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].0 - points[0].0, 10.0);
        assert_eq!(points[0].1, 30.0);
        assert_eq!(points[1].1, 15.0);
    }

    #[test]
    fn test_region_points() {
        let series = RegionSeries {
            region: Region::North,
            points: vec![(date(1), Decimal::new(125, 2))],
        };
        assert_eq!(region_points(&series), vec![(day_number(date(1)), 1.25)]);
    }

    #[test]
    fn test_bounds_cover_points_and_cutoff() {
        let points = total_points(&totals());
        let bounds = ChartBounds::compute(&[&points], date(25));
        assert_eq!(bounds.x, [day_number(date(10)), day_number(date(25))]);
        assert_eq!(bounds.y[0], 0.0);
        assert!((bounds.y[1] - 31.5).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_degenerate_inputs() {
        let bounds = ChartBounds::compute(&[], date(15));
        assert!(bounds.x[0] < bounds.x[1]);
        assert_eq!(bounds.y, [0.0, 1.0]);
    }

    #[test]
    fn test_cutoff_marker_spans_y_range() {
        let points = total_points(&totals());
        let bounds = ChartBounds::compute(&[&points], date(15));
        let marker = bounds.cutoff_marker(date(15));
        assert_eq!(marker[0], (day_number(date(15)), 0.0));
        assert_eq!(marker[1], (day_number(date(15)), bounds.y[1]));
    }

    #[test]
    fn test_axis_labels() {
        let points = total_points(&totals());
        let bounds = ChartBounds::compute(&[&points], date(15));
        assert_eq!(
            bounds.x_labels(date(15)),
            vec!["Jan 10, 2021", "Jan 15, 2021", "Jan 20, 2021"]
        );
        let y = bounds.y_labels();
        assert_eq!(y[0], "$0");
        assert_eq!(y.len(), 3);
    }

    #[test]
    fn test_render_sales_chart_draws_title_and_legend() {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                render_sales_chart(
                    frame,
                    frame.area(),
                    "Total Daily Sales (All Regions)",
                    &totals(),
                    date(15),
                    &theme,
                )
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Total Daily Sales (All Regions)"));
        assert!(text.contains("Price Increase"));
    }

    #[test]
    fn test_render_sales_chart_empty_selection() {
        let mut terminal = Terminal::new(TestBackend::new(60, 8)).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| render_sales_chart(frame, frame.area(), "Total", &[], date(15), &theme))
            .unwrap();
        assert!(buffer_text(&terminal).contains("No sales for this selection"));
    }

    #[test]
    fn test_render_regional_chart_names_regions() {
        let regions = vec![
            RegionSeries {
                region: Region::East,
                points: vec![(date(10), Decimal::from(5)), (date(20), Decimal::from(7))],
            },
            RegionSeries {
                region: Region::North,
                points: vec![(date(10), Decimal::from(3)), (date(20), Decimal::from(9))],
            },
        ];
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| render_regional_chart(frame, frame.area(), &regions, date(15), &theme))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Sales by Region"));
        assert!(text.contains("East"));
        assert!(text.contains("North"));
    }
}
