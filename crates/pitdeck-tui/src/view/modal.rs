use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::Modal;
use crate::theme::Theme;

/// Render the active dialog as a centered popup.
pub fn render(f: &mut Frame, theme: &Theme, modal: &Modal) {
    match modal {
        Modal::ConfirmQuit => confirm(
            f,
            theme,
            " Unsaved Changes ",
            "  Quit without saving?",
        ),
        Modal::ConfirmRemove(name) => confirm(
            f,
            theme,
            " Remove Card ",
            &format!("  Remove \"{}\"?", super::truncate(name, 30)),
        ),
        Modal::AddCard { input, error } => add_card(f, theme, &input.text, error.as_deref()),
    }
}

fn confirm(f: &mut Frame, theme: &Theme, title: &str, prompt: &str) {
    let area = f.area();
    let width = (prompt.chars().count() as u16 + 6).max(40).min(area.width);
    let popup = centered_rect(width, 5, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            prompt.to_string(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                "  y",
                Style::default()
                    .fg(theme.danger)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(": yes   ", Style::default().fg(theme.dim)),
            Span::styled(
                "n",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("/", Style::default().fg(theme.dim)),
            Span::styled(
                "Esc",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(": no", Style::default().fg(theme.dim)),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.danger))
            .title(title.to_string()),
    );

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

fn add_card(f: &mut Frame, theme: &Theme, input: &str, error: Option<&str>) {
    let area = f.area();
    let popup = centered_rect(46.min(area.width), 7, area);

    let field_width = popup.width.saturating_sub(6) as usize;
    let shown: String = input
        .chars()
        .rev()
        .take(field_width.saturating_sub(1))
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Name for the new card:",
            Style::default().fg(theme.text),
        )),
        Line::from(vec![
            Span::styled("  ", Style::default()),
            Span::styled(
                shown,
                Style::default().fg(theme.text).bg(theme.highlight_bg),
            ),
            // block cursor at the end of the field
            Span::styled(
                " ",
                Style::default()
                    .bg(theme.highlight_bg)
                    .add_modifier(Modifier::REVERSED),
            ),
        ]),
        match error {
            Some(message) => Line::from(Span::styled(
                format!("  {message}"),
                Style::default().fg(theme.danger),
            )),
            None => Line::from(""),
        },
        Line::from(vec![
            Span::styled(
                "  Enter",
                Style::default()
                    .fg(theme.success)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(": add   ", Style::default().fg(theme.dim)),
            Span::styled(
                "Esc",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(": cancel", Style::default().fg(theme.dim)),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .title(" Add Card "),
    );

    f.render_widget(Clear, popup);
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
