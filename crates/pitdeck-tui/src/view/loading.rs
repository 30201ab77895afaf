use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::theme::Theme;
use crate::view::spinner_char;

/// Startup screen shown until the template and card document arrive.
pub fn render_loading(f: &mut Frame, theme: &Theme, tick: usize, source_label: &str, area: Rect) {
    let popup = centered_rect(50, 5, area);

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!(" {} ", spinner_char(tick)),
                Style::default().fg(theme.spinner),
            ),
            Span::styled("Loading cards", Style::default().fg(theme.text)),
        ]),
        Line::from(Span::styled(
            format!("   from {source_label}"),
            Style::default().fg(theme.dim),
        )),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" pitdeck "),
    );
    f.render_widget(paragraph, popup);
}

/// Terminal state when the startup fetch failed; only quit works from here.
pub fn render_error(f: &mut Frame, theme: &Theme, message: &str, area: Rect) {
    let height = (message.lines().count() as u16 + 4).min(area.height);
    let popup = centered_rect(60.min(area.width), height, area);

    let mut lines = vec![Line::from("")];
    for text in message.lines() {
        lines.push(Line::from(Span::styled(
            text.to_string(),
            Style::default().fg(theme.danger),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "press q to quit",
        Style::default().fg(theme.dim).add_modifier(Modifier::ITALIC),
    )));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.danger))
                .title(" load failed "),
        );
    f.render_widget(paragraph, popup);
}

/// Create a centered rectangle of the given width (columns) and height (rows).
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .split(area);
    Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .split(vertical[0])[0]
}
