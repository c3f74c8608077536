//! TUI theme and styling

use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    // Background and borders
    pub background: Color,
    pub border: Color,
    pub selection: Color,
    pub row_selection: Color,

    // Text colors
    pub title: Color,
    pub text: Color,
    pub dimmed: Color,
    pub hint: Color,

    // Status colors
    pub error: Color,
    pub success: Color,
    pub key: Color,

    // UI elements
    pub filter: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::phosphor()
    }
}

impl Theme {
    pub fn phosphor() -> Self {
        Self {
            background: Color::Rgb(16, 20, 18),
            border: Color::Rgb(45, 70, 55),
            selection: Color::Rgb(30, 50, 40),
            row_selection: Color::Rgb(60, 60, 60),

            title: Color::Rgb(57, 255, 20),
            text: Color::Rgb(180, 255, 180),
            dimmed: Color::Rgb(80, 120, 90),
            hint: Color::Rgb(100, 160, 120),

            error: Color::Rgb(255, 100, 80),
            success: Color::Rgb(0, 255, 180),
            key: Color::Rgb(255, 180, 60),

            filter: Color::Rgb(180, 255, 200),
            accent: Color::Rgb(57, 255, 20),
        }
    }

    /// Color for a priority cell; 1 is the most urgent
    pub fn priority(&self, value: u8) -> Color {
        match value {
            1 => self.error,
            2 => self.key,
            3 => self.text,
            _ => self.dimmed,
        }
    }
}
