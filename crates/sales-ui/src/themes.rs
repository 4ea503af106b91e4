use ratatui::style::{Color, Modifier, Style};

use sales_core::models::Region;

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`. Background values
/// 0–6 are considered dark; 7–15 are considered light. Absent or unparseable
/// values are treated as dark.
pub fn detect_background() -> BackgroundType {
    background_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

fn background_from_colorfgbg(value: Option<&str>) -> BackgroundType {
    value
        .and_then(|v| v.split(';').next_back())
        .and_then(|bg| bg.parse::<u8>().ok())
        .map(|bg| {
            if bg <= 6 {
                BackgroundType::Dark
            } else {
                BackgroundType::Light
            }
        })
        .unwrap_or(BackgroundType::Dark)
}

/// All styles used by the dashboard components.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_accent: Style,
    pub subtitle: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub dim: Style,
    pub label: Style,
    pub value: Style,
    pub border: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub success: Style,
    pub warning: Style,
    pub error: Style,

    // ── Picker ───────────────────────────────────────────────────────────────
    pub picker_selected: Style,
    pub picker_option: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    pub chart_total: Style,
    pub chart_cutoff: Style,
    pub chart_axis: Style,
    pub region_north: Style,
    pub region_south: Style,
    pub region_east: Style,
    pub region_west: Style,
}

impl Theme {
    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::LightMagenta),
            subtitle: Style::default().fg(Color::Gray),
            separator: Style::default().fg(Color::DarkGray),

            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::DarkGray),

            success: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),

            picker_selected: Style::default()
                .fg(Color::LightMagenta)
                .add_modifier(Modifier::BOLD),
            picker_option: Style::default().fg(Color::Gray),

            chart_total: Style::default().fg(Color::LightMagenta),
            chart_cutoff: Style::default().fg(Color::Red),
            chart_axis: Style::default().fg(Color::Gray),
            region_north: Style::default().fg(Color::Cyan),
            region_south: Style::default().fg(Color::Yellow),
            region_east: Style::default().fg(Color::Green),
            region_west: Style::default().fg(Color::LightBlue),
        }
    }

    /// Light-background terminal theme. Avoids white/yellow foregrounds so
    /// text stays legible on a light canvas.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Red),
            subtitle: Style::default().fg(Color::DarkGray),
            separator: Style::default().fg(Color::Gray),

            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::Gray),

            success: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            warning: Style::default().fg(Color::Rgb(180, 95, 0)),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),

            picker_selected: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            picker_option: Style::default().fg(Color::DarkGray),

            chart_total: Style::default().fg(Color::Magenta),
            chart_cutoff: Style::default().fg(Color::Red),
            chart_axis: Style::default().fg(Color::DarkGray),
            region_north: Style::default().fg(Color::Blue),
            region_south: Style::default().fg(Color::Rgb(180, 95, 0)),
            region_east: Style::default().fg(Color::Green),
            region_west: Style::default().fg(Color::Magenta),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            BackgroundType::Dark => Self::dark(),
        }
    }

    /// Construct a theme by name. Unknown names (including `"auto"`) fall
    /// back to [`Theme::auto_detect`].
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "dark" => Self::dark(),
            "light" => Self::light(),
            _ => Self::auto_detect(),
        }
    }

    /// Line colour for a region's series.
    pub fn region_style(&self, region: Region) -> Style {
        match region {
            Region::North => self.region_north,
            Region::South => self.region_south,
            Region::East => self.region_east,
            Region::West => self.region_west,
        }
    }

    /// Green for an increase, red otherwise.
    pub fn change_style(&self, increase: bool) -> Style {
        if increase {
            self.success
        } else {
            self.error
        }
    }
}
