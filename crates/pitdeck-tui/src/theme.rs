use ratatui::style::{Color, Modifier, Style};

use crate::model::status::StatusLevel;

/// Color theme for the TUI.
pub struct Theme {
    pub header_fg: Color,
    pub header_bg: Color,
    pub border: Color,
    pub border_focus: Color,
    pub text: Color,
    pub dim: Color,
    pub highlight_bg: Color,
    pub accent: Color,
    pub star_filled: Color,
    pub star_empty: Color,
    pub selected: Color,
    pub danger: Color,
    pub success: Color,
    pub spinner: Color,
    pub footer_fg: Color,
    pub footer_bg: Color,
}

impl Theme {
    /// Garage theme: dark steel with amber gauges.
    pub fn garage() -> Self {
        Self {
            header_fg: Color::Black,
            header_bg: Color::Rgb(230, 168, 23),
            border: Color::DarkGray,
            border_focus: Color::Rgb(230, 168, 23),
            text: Color::White,
            dim: Color::DarkGray,
            highlight_bg: Color::Rgb(50, 42, 20),
            accent: Color::Rgb(230, 168, 23),
            star_filled: Color::Rgb(230, 168, 23),
            star_empty: Color::DarkGray,
            selected: Color::Cyan,
            danger: Color::Red,
            success: Color::Rgb(0, 210, 0),
            spinner: Color::Cyan,
            footer_fg: Color::DarkGray,
            footer_bg: Color::Reset,
        }
    }

    /// Showroom theme: white text with electric blue accents.
    pub fn showroom() -> Self {
        Self {
            header_fg: Color::White,
            header_bg: Color::Rgb(30, 60, 120),
            border: Color::Rgb(60, 60, 80),
            border_focus: Color::Rgb(60, 140, 255),
            text: Color::White,
            dim: Color::Rgb(120, 120, 140),
            highlight_bg: Color::Rgb(30, 40, 80),
            accent: Color::Rgb(60, 140, 255),
            star_filled: Color::Rgb(255, 200, 0),
            star_empty: Color::Rgb(80, 80, 100),
            selected: Color::Rgb(60, 140, 255),
            danger: Color::Rgb(255, 80, 80),
            success: Color::Rgb(0, 200, 80),
            spinner: Color::Rgb(60, 140, 255),
            footer_fg: Color::Rgb(120, 120, 140),
            footer_bg: Color::Reset,
        }
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header_fg)
            .bg(self.header_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(self.border_focus)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn highlight_style(&self) -> Style {
        Style::default()
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn star_style(&self, filled: bool) -> Style {
        if filled {
            Style::default().fg(self.star_filled)
        } else {
            Style::default().fg(self.star_empty)
        }
    }

    pub fn status_style(&self, level: StatusLevel) -> Style {
        match level {
            StatusLevel::Info => Style::default().fg(self.text),
            StatusLevel::Error => Style::default().fg(self.danger).add_modifier(Modifier::BOLD),
        }
    }

    pub fn footer_style(&self) -> Style {
        Style::default().fg(self.footer_fg).bg(self.footer_bg)
    }
}
