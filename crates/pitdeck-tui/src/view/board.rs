use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use pitdeck_core::CardFace;

use crate::app::{App, SelectAllState};
use crate::layout::{
    ADD_LABEL, CARD_WIDTH, Control, GridGeometry, PRINT_LABEL, SAVE_LABEL, control_bar_segments,
    layout_slots, measure_sections,
};

/// Render the card board: control bar on top, card grid, status footer.
/// Slot and control rects are stored on the app so mouse events resolve
/// against exactly what was drawn.
pub fn render_in(f: &mut Frame, app: &mut App, area: Rect) {
    let bar_area = Rect {
        height: 1.min(area.height),
        ..area
    };
    let footer_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1.min(area.height),
    };
    let board_area = Rect {
        x: area.x,
        y: area.y + 1,
        width: area.width,
        height: area.height.saturating_sub(2),
    };

    render_control_bar(f, app, bar_area);
    render_grid(f, app, board_area);
    render_footer(f, app, footer_area);
}

fn render_control_bar(f: &mut Frame, app: &mut App, bar_area: Rect) {
    let theme = &app.theme;
    f.render_widget(Block::default().style(theme.header_style()), bar_area);

    let select_all_label = match app.select_all_state() {
        SelectAllState::All => "[x] Select All",
        SelectAllState::Partial => "[~] Select All",
        SelectAllState::None => "[ ] Select All",
    };

    let segments = control_bar_segments(bar_area);
    for (rect, control) in &segments {
        let (label, style) = match control {
            Control::Add => (ADD_LABEL, theme.header_style().add_modifier(Modifier::BOLD)),
            Control::Save => {
                let style = if app.saving {
                    Style::default().fg(theme.dim).bg(theme.header_bg)
                } else {
                    theme.header_style().add_modifier(Modifier::BOLD)
                };
                (SAVE_LABEL, style)
            }
            Control::Print => {
                let style = if app.selected.is_empty() {
                    Style::default().fg(theme.dim).bg(theme.header_bg)
                } else {
                    theme.header_style().add_modifier(Modifier::BOLD)
                };
                (PRINT_LABEL, style)
            }
            Control::SelectAll => (
                select_all_label,
                theme.header_style().add_modifier(Modifier::BOLD),
            ),
        };
        f.render_widget(Paragraph::new(label).style(style), *rect);
    }

    // Source and unsaved marker on the right edge of the bar.
    let right = format!(
        "{}{} ",
        app.source_label,
        if app.dirty { " [+]" } else { "" }
    );
    f.render_widget(
        Paragraph::new(right)
            .alignment(Alignment::Right)
            .style(Style::default().fg(app.theme.dim).bg(app.theme.header_bg)),
        bar_area,
    );

    app.controls = segments;
}

fn render_grid(f: &mut Frame, app: &mut App, board_area: Rect) {
    if app.deck.is_empty() {
        app.slots.clear();
        app.last_grid = None;
        render_centered_note(f, app, board_area, "No cards yet. Press a to add the first one.");
        return;
    }

    let faces: Vec<CardFace> = app
        .deck
        .iter()
        .map(|(name, record)| CardFace::from_record(name, record))
        .collect();

    let heights = match app.section_heights {
        Some(h) => h,
        None => {
            let h = measure_sections(&faces, CARD_WIDTH.saturating_sub(2));
            app.section_heights = Some(h);
            h
        }
    };

    let geometry = GridGeometry::new(board_area, &heights);
    if board_area.width < CARD_WIDTH || geometry.visible_rows() == 0 {
        app.slots.clear();
        app.last_grid = Some(geometry);
        render_centered_note(f, app, board_area, "Terminal too small for the card grid");
        return;
    }

    app.scroll_row = app.scroll_row.min(geometry.max_scroll(faces.len()));
    let names = app.card_names();
    let slots = layout_slots(&names, &geometry, &heights, app.scroll_row);

    for slot in &slots {
        let Some(face) = faces.iter().find(|face| face.name == slot.name) else {
            continue;
        };
        let focused = names.get(app.focus).is_some_and(|n| *n == slot.name);
        let is_selected = app.selected.contains(&slot.name);
        super::card::render(
            f,
            &app.theme,
            slot,
            face,
            &heights,
            focused,
            is_selected,
            app.edit.as_ref(),
        );
    }

    app.slots = slots;
    app.last_grid = Some(geometry);
}

fn render_centered_note(f: &mut Frame, app: &App, board_area: Rect, note: &str) {
    if board_area.height == 0 {
        return;
    }
    let line = Rect {
        x: board_area.x,
        y: board_area.y + board_area.height / 2,
        width: board_area.width,
        height: 1,
    };
    f.render_widget(
        Paragraph::new(note)
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.dim)),
        line,
    );
}

fn render_footer(f: &mut Frame, app: &App, footer_area: Rect) {
    let footer_style = app.theme.footer_style();
    f.render_widget(Block::default().style(footer_style), footer_area);

    let left = match app.status.current() {
        Some((level, text)) => Line::from(Span::styled(
            format!(" {text}"),
            app.theme.status_style(level).bg(app.theme.footer_bg),
        )),
        None => Line::from(Span::styled(
            format!(" {} cards, {} selected", app.deck.len(), app.selected.len()),
            footer_style,
        )),
    };
    f.render_widget(Paragraph::new(left), footer_area);

    let hints = "a:add  x:remove  s:save  p:print  Space:select  ?:help  q:quit ";
    if (footer_area.width as usize) > hints.len() + 24 {
        f.render_widget(
            Paragraph::new(hints)
                .alignment(Alignment::Right)
                .style(Style::default().fg(app.theme.dim).bg(app.theme.footer_bg)),
            footer_area,
        );
    }
}
