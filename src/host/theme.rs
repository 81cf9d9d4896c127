//! Theme colours supplied by a host or built in

use ratatui::style::Color;
use serde::Deserialize;

/// Theme parameters as the host sends them, hex strings keyed by role
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ThemeParams {
    pub bg_color: Option<String>,
    pub text_color: Option<String>,
    pub hint_color: Option<String>,
    pub link_color: Option<String>,
    pub button_color: Option<String>,
    pub button_text_color: Option<String>,
    pub secondary_bg_color: Option<String>,
}

/// Resolved colours used by the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub bg: Color,
    pub text: Color,
    pub hint: Color,
    pub link: Color,
    pub button: Color,
    pub button_text: Color,
    pub secondary_bg: Color,
}

impl Theme {
    /// Built-in dark theme used when no host is present
    pub fn dark() -> Self {
        Self {
            bg: Color::Reset,
            text: Color::White,
            hint: Color::DarkGray,
            link: Color::Cyan,
            button: Color::Cyan,
            button_text: Color::Black,
            secondary_bg: Color::Reset,
        }
    }

    /// Resolve host parameters, falling back to the host API defaults
    pub fn from_params(params: &ThemeParams) -> Self {
        let pick = |value: &Option<String>, default: &str| {
            value
                .as_deref()
                .and_then(parse_hex)
                .or_else(|| parse_hex(default))
                .unwrap_or(Color::Reset)
        };

        Self {
            bg: pick(&params.bg_color, "#ffffff"),
            text: pick(&params.text_color, "#000000"),
            hint: pick(&params.hint_color, "#999999"),
            link: pick(&params.link_color, "#2481cc"),
            button: pick(&params.button_color, "#2481cc"),
            button_text: pick(&params.button_text_color, "#ffffff"),
            secondary_bg: pick(&params.secondary_bg_color, "#f1f1f1"),
        }
    }

    /// Whether the background is dark
    pub fn is_dark(&self) -> bool {
        match self.bg {
            Color::Rgb(r, g, b) => {
                let luma = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
                luma < 128.0
            }
            _ => true,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Parse `#rgb` or `#rrggbb`
pub fn parse_hex(text: &str) -> Option<Color> {
    let hex = text.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color::Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Some(Color::Rgb(expand(0)?, expand(1)?, expand(2)?))
        }
        _ => None,
    }
}
