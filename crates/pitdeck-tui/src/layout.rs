use ratatui::layout::{Position, Rect};

use pitdeck_core::{CardFace, CostKind, STAR_MAX, StatKind};

/// Fixed card width in terminal cells; the grid fits as many columns as
/// the board allows.
pub const CARD_WIDTH: u16 = 30;

/// Five star cells of two cells each (glyph plus a gap for easier
/// clicking), right-aligned in a stat row.
pub const STAR_RUN: u16 = 2 * STAR_MAX as u16;

const STAT_ROWS: u16 = StatKind::ALL.len() as u16;
const COST_ROWS: u16 = CostKind::ALL.len() as u16;

const MAX_NAME_ROWS: u16 = 2;
const MAX_IMAGE_ROWS: u16 = 3;

pub const ADD_LABEL: &str = "[ Add Card ]";
pub const SAVE_LABEL: &str = "[ Save Changes ]";
pub const PRINT_LABEL: &str = "[ Print Selected ]";
/// "[x] Select All" / "[ ] Select All" / "[~] Select All" are equal width.
pub const SELECT_ALL_WIDTH: u16 = 14;

/// Shared per-section heights so every card's sections line up across the
/// grid, whatever each card's natural content height would be. Measured
/// from the whole deck; cached on the app and recomputed on the draw after
/// a structural change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionHeights {
    pub name: u16,
    pub image: u16,
}

impl Default for SectionHeights {
    fn default() -> Self {
        SectionHeights { name: 1, image: 1 }
    }
}

impl SectionHeights {
    /// Total card height including the border rows.
    pub fn card_height(&self) -> u16 {
        // borders + controls row + name + year + image + stats + costs
        2 + 1 + self.name + 1 + self.image + STAT_ROWS + COST_ROWS
    }
}

/// Char-chunk line wrapping. Width zero or empty text still yields one
/// (empty) line so section math never sees zero rows.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars.chunks(width).map(|c| c.iter().collect()).collect()
}

fn height_capped(text: &str, width: usize, cap: u16) -> u16 {
    (wrap_text(text, width).len() as u16).clamp(1, cap)
}

/// Take the maximum natural height of each variable section across all
/// cards, so the grid rows stay aligned.
pub fn measure_sections(faces: &[CardFace], inner_width: u16) -> SectionHeights {
    let width = inner_width.max(1) as usize;
    let mut name = 1u16;
    let mut image = 1u16;
    for face in faces {
        name = name.max(height_capped(&face.name, width, MAX_NAME_ROWS));
        image = image.max(height_capped(&face.image_src, width, MAX_IMAGE_ROWS));
    }
    SectionHeights { name, image }
}

/// A clickable piece of one rendered card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Select,
    Remove,
    Name,
    Year,
    /// One star cell; `value` is its 1-based position in the row.
    Star { stat: StatKind, value: u8 },
    Cost { kind: CostKind },
}

/// One card's on-screen footprint, kept from the last draw so events can
/// be resolved against what the user actually saw.
#[derive(Debug, Clone)]
pub struct CardSlot {
    pub name: String,
    pub area: Rect,
    pub regions: Vec<(Rect, Region)>,
}

impl CardSlot {
    pub fn region_at(&self, x: u16, y: u16) -> Option<Region> {
        let p = Position { x, y };
        self.regions
            .iter()
            .find(|(rect, _)| rect.contains(p))
            .map(|(_, region)| *region)
    }
}

/// The clickable regions of a card drawn at `area`, in the same geometry
/// the card view renders.
pub fn card_regions(area: Rect, heights: &SectionHeights) -> Vec<(Rect, Region)> {
    let inner = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    };
    let w = inner.width;
    let mut regions = Vec::new();
    if w == 0 || inner.height == 0 {
        return regions;
    }

    // controls row: selection box left, remove button right
    regions.push((Rect::new(inner.x, inner.y, 3.min(w), 1), Region::Select));
    if w >= 6 {
        regions.push((Rect::new(inner.x + w - 3, inner.y, 3, 1), Region::Remove));
    }

    let name_y = inner.y + 1;
    regions.push((Rect::new(inner.x, name_y, w, heights.name), Region::Name));

    let year_y = name_y + heights.name;
    regions.push((Rect::new(inner.x, year_y, w, 1), Region::Year));

    let stats_y = year_y + 1 + heights.image;
    if w > STAR_RUN {
        let stars_x = inner.x + w - STAR_RUN;
        for (row, stat) in StatKind::ALL.iter().enumerate() {
            let y = stats_y + row as u16;
            for value in 1..=STAR_MAX {
                regions.push((
                    Rect::new(stars_x + 2 * (value as u16 - 1), y, 2, 1),
                    Region::Star { stat: *stat, value },
                ));
            }
        }
    }

    let costs_y = stats_y + STAT_ROWS;
    for (row, kind) in CostKind::ALL.iter().enumerate() {
        regions.push((
            Rect::new(inner.x, costs_y + row as u16, w, 1),
            Region::Cost { kind: *kind },
        ));
    }

    regions
}

/// The board-wide control buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Add,
    Save,
    Print,
    SelectAll,
}

/// Button rects in the control bar, left to right. Buttons that would not
/// fit the bar width are dropped from the end.
pub fn control_bar_segments(area: Rect) -> Vec<(Rect, Control)> {
    let buttons: [(u16, Control); 4] = [
        (ADD_LABEL.len() as u16, Control::Add),
        (SAVE_LABEL.len() as u16, Control::Save),
        (PRINT_LABEL.len() as u16, Control::Print),
        (SELECT_ALL_WIDTH, Control::SelectAll),
    ];
    let mut segments = Vec::new();
    let mut x = area.x + 1;
    for (width, control) in buttons {
        if x + width > area.x + area.width {
            break;
        }
        segments.push((Rect::new(x, area.y, width, 1), control));
        x += width + 2;
    }
    segments
}

/// Grid shape for the current board area and card height, kept from the
/// last draw for scroll and focus math.
#[derive(Debug, Clone, Copy)]
pub struct GridGeometry {
    pub board: Rect,
    pub columns: usize,
    pub card_height: u16,
}

impl GridGeometry {
    pub fn new(board: Rect, heights: &SectionHeights) -> Self {
        GridGeometry {
            board,
            columns: (board.width / CARD_WIDTH).max(1) as usize,
            card_height: heights.card_height(),
        }
    }

    /// Full card rows that fit on screen. Zero means the terminal is too
    /// short for even one row.
    pub fn visible_rows(&self) -> usize {
        (self.board.height / self.card_height) as usize
    }

    pub fn total_rows(&self, cards: usize) -> usize {
        cards.div_ceil(self.columns)
    }

    pub fn max_scroll(&self, cards: usize) -> usize {
        self.total_rows(cards)
            .saturating_sub(self.visible_rows().max(1))
    }

    /// On-screen rect for the card at `index` in display order, or None
    /// when the current scroll puts it off screen.
    pub fn slot_area(&self, index: usize, scroll_row: usize) -> Option<Rect> {
        let row = index / self.columns;
        let col = index % self.columns;
        if row < scroll_row {
            return None;
        }
        let visual_row = row - scroll_row;
        if visual_row >= self.visible_rows() {
            return None;
        }
        Some(Rect::new(
            self.board.x + col as u16 * CARD_WIDTH,
            self.board.y + visual_row as u16 * self.card_height,
            CARD_WIDTH,
            self.card_height,
        ))
    }
}

/// Slots for every card currently on screen, with their clickable regions.
pub fn layout_slots(
    names: &[String],
    geometry: &GridGeometry,
    heights: &SectionHeights,
    scroll_row: usize,
) -> Vec<CardSlot> {
    let mut slots = Vec::new();
    for (i, name) in names.iter().enumerate() {
        if let Some(area) = geometry.slot_area(i, scroll_row) {
            slots.push(CardSlot {
                name: name.clone(),
                area,
                regions: card_regions(area, heights),
            });
        }
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sections_give_minimum_card_height() {
        assert_eq!(SectionHeights::default().card_height(), 14);
    }

    #[test]
    fn measure_takes_the_maximum_across_cards() {
        let short = CardFace {
            name: "A".into(),
            year: "1970".into(),
            image_src: "card_images/A.png".into(),
            stars: [0; 3],
            costs: [0; 5],
        };
        let long = CardFace {
            name: "A Very Long Card Name Indeed Yes".into(),
            year: "1970".into(),
            image_src: "card_images/A%20Very%20Long%20Card%20Name%20Indeed%20Yes.png".into(),
            stars: [0; 3],
            costs: [0; 5],
        };
        let heights = measure_sections(&[short, long], 28);
        assert_eq!(heights.name, 2);
        assert!(heights.image >= 2);
    }

    #[test]
    fn star_cells_sit_right_aligned_with_one_value_each() {
        let heights = SectionHeights::default();
        let regions = card_regions(Rect::new(0, 0, CARD_WIDTH, heights.card_height()), &heights);

        // inner area starts at (1,1), width 28; stars occupy the last 10 cells
        let speed_cells: Vec<(Rect, u8)> = regions
            .iter()
            .filter_map(|(rect, region)| match region {
                Region::Star { stat: StatKind::Speed, value } => Some((*rect, *value)),
                _ => None,
            })
            .collect();
        assert_eq!(speed_cells.len(), 5);
        assert_eq!(speed_cells[0].0.x, 1 + 28 - STAR_RUN);
        assert_eq!(speed_cells[0].1, 1);
        assert_eq!(speed_cells[4].1, 5);
        assert_eq!(speed_cells[4].0.x, speed_cells[0].0.x + 8);
    }

    #[test]
    fn region_lookup_resolves_cost_rows() {
        let heights = SectionHeights::default();
        let area = Rect::new(0, 0, CARD_WIDTH, heights.card_height());
        let slot = CardSlot {
            name: "Comet".into(),
            area,
            regions: card_regions(area, &heights),
        };
        // costs start after controls(1) + name(1) + year(1) + image(1) + stats(3)
        let first_cost_y = 1 + 1 + 1 + 1 + 1 + 3;
        assert_eq!(
            slot.region_at(5, first_cost_y),
            Some(Region::Cost { kind: CostKind::Money })
        );
        assert_eq!(
            slot.region_at(5, first_cost_y + 4),
            Some(Region::Cost { kind: CostKind::Tools })
        );
        assert_eq!(slot.region_at(1, 1), Some(Region::Select));
        assert_eq!(slot.region_at(CARD_WIDTH - 2, 1), Some(Region::Remove));
    }

    #[test]
    fn control_segments_do_not_overlap() {
        let segments = control_bar_segments(Rect::new(0, 0, 80, 1));
        assert_eq!(segments.len(), 4);
        for pair in segments.windows(2) {
            assert!(pair[0].0.x + pair[0].0.width <= pair[1].0.x);
        }
    }

    #[test]
    fn narrow_bar_drops_trailing_controls() {
        let segments = control_bar_segments(Rect::new(0, 0, 40, 1));
        assert!(segments.len() < 4);
        assert_eq!(segments[0].1, Control::Add);
    }

    #[test]
    fn slot_areas_follow_scroll() {
        let heights = SectionHeights::default();
        // two columns, two visible rows
        let board = Rect::new(0, 2, 62, 2 * heights.card_height());
        let geometry = GridGeometry::new(board, &heights);
        assert_eq!(geometry.columns, 2);
        assert_eq!(geometry.visible_rows(), 2);

        let names: Vec<String> = (0..6).map(|i| format!("Car {i}")).collect();
        let slots = layout_slots(&names, &geometry, &heights, 0);
        assert_eq!(slots.len(), 4);
        assert_eq!(slots[0].area.x, 0);
        assert_eq!(slots[1].area.x, CARD_WIDTH);
        assert_eq!(slots[2].area.y, board.y + heights.card_height());

        let scrolled = layout_slots(&names, &geometry, &heights, 1);
        assert_eq!(scrolled.len(), 4);
        assert_eq!(scrolled[0].name, "Car 2");
        assert_eq!(scrolled[0].area.y, board.y);
    }

    #[test]
    fn max_scroll_accounts_for_partial_last_row() {
        let heights = SectionHeights::default();
        let board = Rect::new(0, 0, 62, 2 * heights.card_height());
        let geometry = GridGeometry::new(board, &heights);
        assert_eq!(geometry.total_rows(5), 3);
        assert_eq!(geometry.max_scroll(5), 1);
        assert_eq!(geometry.max_scroll(3), 0);
    }
}
