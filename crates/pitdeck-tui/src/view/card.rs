use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use pitdeck_core::{CardFace, CostKind, STAR_MAX, StatKind};

use crate::layout::{CardSlot, STAR_RUN, SectionHeights, wrap_text};
use crate::model::edit::{EditField, EditState};
use crate::theme::Theme;

/// Draw one card into its slot. Row positions here must stay in step
/// with the region math in `layout::card_regions`, or clicks land on the
/// wrong thing.
#[allow(clippy::too_many_arguments)]
pub fn render(
    f: &mut Frame,
    theme: &Theme,
    slot: &CardSlot,
    face: &CardFace,
    heights: &SectionHeights,
    focused: bool,
    selected: bool,
    edit: Option<&EditState>,
) {
    let area = slot.area;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(focused));
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }
    let w = inner.width;

    // controls row: selection box left, remove button right
    let select_mark = if selected { "[x]" } else { "[ ]" };
    let select_style = if selected {
        Style::default().fg(theme.selected)
    } else {
        Style::default().fg(theme.dim)
    };
    f.render_widget(
        Paragraph::new(select_mark).style(select_style),
        Rect::new(inner.x, inner.y, 3.min(w), 1),
    );
    if w >= 6 {
        f.render_widget(
            Paragraph::new("[\u{00D7}]").style(Style::default().fg(theme.danger)),
            Rect::new(inner.x + w - 3, inner.y, 3, 1),
        );
    }

    // name rows
    let name_y = inner.y + 1;
    let name_edit = edit.filter(|e| e.card == slot.name && e.field == EditField::Name);
    if let Some(e) = name_edit {
        f.render_widget(
            Paragraph::new(edit_line(e, theme)),
            Rect::new(inner.x, name_y, w, 1),
        );
    } else {
        let mut rows = wrap_text(&face.name, w as usize);
        clip_rows(&mut rows, heights.name);
        for (i, row) in rows.iter().enumerate() {
            f.render_widget(
                Paragraph::new(row.clone())
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
                Rect::new(inner.x, name_y + i as u16, w, 1),
            );
        }
    }

    // year row
    let year_y = name_y + heights.name;
    let year_edit = edit.filter(|e| e.card == slot.name && e.field == EditField::Year);
    if let Some(e) = year_edit {
        f.render_widget(
            Paragraph::new(edit_line(e, theme)),
            Rect::new(inner.x, year_y, w, 1),
        );
    } else {
        f.render_widget(
            Paragraph::new(face.year.clone())
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.text)),
            Rect::new(inner.x, year_y, w, 1),
        );
    }

    // image rows show the image path, standing in for the artwork
    let image_y = year_y + 1;
    let mut rows = wrap_text(&face.image_src, w as usize);
    clip_rows(&mut rows, heights.image);
    for (i, row) in rows.iter().enumerate() {
        f.render_widget(
            Paragraph::new(row.clone())
                .style(Style::default().fg(theme.dim).add_modifier(Modifier::ITALIC)),
            Rect::new(inner.x, image_y + i as u16, w, 1),
        );
    }

    // stat rows, stars right-aligned over their click cells
    let stats_y = image_y + heights.image;
    let label_width = w.saturating_sub(STAR_RUN) as usize;
    for (row, stat) in StatKind::ALL.iter().enumerate() {
        let rating = face.stars_for(*stat);
        let mut spans = vec![Span::styled(
            format!("{:<label_width$}", stat.label()),
            Style::default().fg(theme.text),
        )];
        for value in 1..=STAR_MAX {
            let filled = value <= rating;
            spans.push(Span::styled(
                if filled { "\u{2605} " } else { "\u{2606} " },
                theme.star_style(filled),
            ));
        }
        f.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect::new(inner.x, stats_y + row as u16, w, 1),
        );
    }

    // cost rows
    let costs_y = stats_y + StatKind::ALL.len() as u16;
    for (row, kind) in CostKind::ALL.iter().enumerate() {
        let value_text = format!("{:>6}", face.cost_for(*kind));
        let cost_label_width = (w as usize).saturating_sub(value_text.len());
        let line = Line::from(vec![
            Span::styled(
                format!("{:<cost_label_width$}", kind.label()),
                Style::default().fg(theme.text),
            ),
            Span::styled(value_text, Style::default().fg(theme.accent)),
        ]);
        f.render_widget(
            Paragraph::new(line),
            Rect::new(inner.x, costs_y + row as u16, w, 1),
        );
    }
}

/// Render an active edit buffer with a block cursor. A still-selected
/// buffer renders fully reversed, like a browser input after select().
fn edit_line<'a>(edit: &'a EditState, theme: &Theme) -> Line<'a> {
    let text = &edit.input.text;
    let cursor = edit.input.cursor;
    let base = Style::default().fg(theme.text).bg(theme.highlight_bg);
    let reversed = base.add_modifier(Modifier::REVERSED);

    if edit.selection_active() {
        if text.is_empty() {
            return Line::from(Span::styled(" ", reversed));
        }
        return Line::from(Span::styled(text.as_str(), reversed));
    }

    let mut spans = vec![Span::styled(&text[..cursor], base)];
    match text[cursor..].chars().next() {
        Some(c) => {
            let end = cursor + c.len_utf8();
            spans.push(Span::styled(&text[cursor..end], reversed));
            spans.push(Span::styled(&text[end..], base));
        }
        None => spans.push(Span::styled(" ", reversed)),
    }
    Line::from(spans)
}

/// Cap wrapped rows at the shared section height, marking the cut.
fn clip_rows(rows: &mut Vec<String>, cap: u16) {
    if rows.len() > cap as usize {
        rows.truncate(cap as usize);
        if let Some(last) = rows.last_mut() {
            last.pop();
            last.push('\u{2026}');
        }
    }
}
