use ratatui::style::{Color, Modifier, Style};

/// Palette for the prediction form.
pub struct Theme;

impl Theme {
    pub const FG: Color = Color::Rgb(220, 220, 220);
    pub const FG_DIM: Color = Color::Rgb(130, 130, 140);
    pub const ACCENT: Color = Color::Rgb(0, 200, 255);
    pub const OK: Color = Color::Rgb(80, 220, 100);
    pub const WARN: Color = Color::Rgb(255, 200, 0);
    pub const ERROR: Color = Color::Rgb(255, 70, 70);

    pub fn text() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::FG_DIM)
    }

    /// Titles and the focused control.
    pub fn title() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn focused() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    pub fn metric() -> Style {
        Style::default().fg(Self::OK).add_modifier(Modifier::BOLD)
    }

    pub fn gauge() -> Style {
        Style::default().fg(Self::OK)
    }

    pub fn warn() -> Style {
        Style::default().fg(Self::WARN)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Self::ERROR)
            .add_modifier(Modifier::BOLD)
    }
}
