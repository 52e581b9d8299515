use std::collections::HashMap;

use ratatui::style::Color;

use crate::model::config::UiConfig;
use crate::model::task::TaskCategory;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub dim: Color,
    pub highlight: Color,
    pub today: Color,
    pub error: Color,
    pub selection_bg: Color,
    pub selection_border: Color,
    pub grid_border: Color,
    /// Per-category bar colors
    pub category_colors: HashMap<TaskCategory, Color>,
}

impl Default for Theme {
    fn default() -> Self {
        let mut category_colors = HashMap::new();
        category_colors.insert(TaskCategory::Todo, Color::Rgb(0x44, 0x88, 0xFF));
        category_colors.insert(TaskCategory::InProgress, Color::Rgb(0xFF, 0xA5, 0x00));
        category_colors.insert(TaskCategory::Review, Color::Rgb(0xCC, 0x66, 0xFF));
        category_colors.insert(TaskCategory::Completed, Color::Rgb(0x44, 0xCC, 0x77));

        Theme {
            background: Color::Rgb(0x10, 0x10, 0x1C),
            text: Color::Rgb(0xC8, 0xC8, 0xDC),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            dim: Color::Rgb(0x60, 0x60, 0x78),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            today: Color::Rgb(0xFF, 0xD7, 0x00),
            error: Color::Rgb(0xFF, 0x44, 0x44),
            selection_bg: Color::Rgb(0x2A, 0x2A, 0x48),
            selection_border: Color::Rgb(0x6A, 0x6A, 0xB0),
            grid_border: Color::Rgb(0x30, 0x30, 0x44),
            category_colors,
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from the UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "dim" => theme.dim = color,
                    "highlight" => theme.highlight = color,
                    "today" => theme.today = color,
                    "error" => theme.error = color,
                    "selection_bg" => theme.selection_bg = color,
                    "selection_border" => theme.selection_border = color,
                    "grid_border" => theme.grid_border = color,
                    _ => {}
                }
            }
        }

        // Category overrides are keyed by the display label
        for (label, value) in &ui.category_colors {
            if let (Some(category), Some(color)) =
                (TaskCategory::from_label(label), parse_hex_color(value))
            {
                theme.category_colors.insert(category, color);
            }
        }

        theme
    }

    /// Get the bar color for a category
    pub fn category_color(&self, category: TaskCategory) -> Color {
        self.category_colors
            .get(&category)
            .copied()
            .unwrap_or(self.text)
    }
}
