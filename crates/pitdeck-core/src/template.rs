use once_cell::sync::Lazy;
use regex::Regex;

use crate::deck::CardRecord;
use crate::{CostKind, STAR_MAX, StatKind};

// The print copy drops the interactive controls. They are matched by their
// stable class names, which the shipped template guarantees.
static SELECT_CHECKBOX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<input[^>]*card-select-checkbox[^>]*>\s*").unwrap());
static REMOVE_BUTTON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<button[^>]*remove-card-btn[^>]*>.*?</button>\s*").unwrap());

/// Relative path, under the site root, of the image for a card name.
/// The name is percent-encoded so it is safe inside a URL.
pub fn image_src(name: &str) -> String {
    format!("card_images/{}.png", urlencoding::encode(name))
}

pub fn escape_html(unsafe_text: &str) -> String {
    let mut out = String::with_capacity(unsafe_text.len());
    for c in unsafe_text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Markup for one row of star cells. Exactly [`STAR_MAX`] cells; cells up
/// to the clamped rating carry the `filled` class, and every cell carries
/// its 1-based position as `data-value`.
pub fn star_row_html(rating: u8) -> String {
    let filled = rating.min(STAR_MAX);
    let mut out = String::new();
    for i in 1..=STAR_MAX {
        if i <= filled {
            out.push_str(&format!("<div class=\"star filled\" data-value=\"{i}\"></div>"));
        } else {
            out.push_str(&format!("<div class=\"star\" data-value=\"{i}\"></div>"));
        }
    }
    out
}

/// Substitutes one card's values into the card template.
///
/// `{{NAME}}` appears more than once in the template (heading and image alt
/// text); every occurrence of every token is replaced. Text values are
/// HTML-escaped, an empty year becomes "N/A", and the image path is derived
/// from the card name.
pub fn render_card_html(template: &str, name: &str, record: &CardRecord) -> String {
    let year = if record.year.is_empty() {
        "N/A".to_string()
    } else {
        escape_html(&record.year)
    };
    template
        .replace("{{NAME}}", &escape_html(name))
        .replace("{{YEAR}}", &year)
        .replace("{{IMAGE_SRC}}", &image_src(name))
        .replace("{{SPEED_STARS}}", &star_row_html(record.speed))
        .replace("{{ACCELERATION_STARS}}", &star_row_html(record.acceleration))
        .replace("{{HANDLING_STARS}}", &star_row_html(record.handling))
        .replace("{{MONEY_COST}}", &record.money.to_string())
        .replace("{{GAS_COST}}", &record.gas.to_string())
        .replace("{{TIRES_COST}}", &record.tires.to_string())
        .replace("{{PARTS_COST}}", &record.parts.to_string())
        .replace("{{TOOLS_COST}}", &record.tools.to_string())
        .trim()
        .to_string()
}

/// Removes the selection checkbox and the remove button from a rendered
/// card fragment. The print copy keeps everything else.
pub fn strip_print_controls(card_html: &str) -> String {
    let without_checkbox = SELECT_CHECKBOX_RE.replace_all(card_html, "");
    REMOVE_BUTTON_RE.replace_all(&without_checkbox, "").to_string()
}

/// A standalone HTML document wrapping already-rendered card fragments for
/// printing. Stylesheet and image paths inside the cards are relative, so
/// the document carries a `<base>` pointing back at the deck source, and it
/// opens the print dialog once loaded.
pub fn render_print_document(cards_html: &str, asset_base: &str) -> String {
    let base_href = escape_html(asset_base);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Print Cards</title>
    <base href="{base_href}">
    <link rel="stylesheet" href="templates/card_style.css">
    <link rel="stylesheet" href="css/print.css">
</head>
<body>
    <div class="print-container">
{cards_html}
    </div>
    <script>
        window.onload = () => {{
            window.focus();
            window.print();
        }};
    </script>
</body>
</html>
"#
    )
}

/// Everything the terminal view needs to draw one card, resolved from a
/// record: display strings, image path, clamped star counts, cost numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardFace {
    pub name: String,
    pub year: String,
    pub image_src: String,
    pub stars: [u8; 3],
    pub costs: [u32; 5],
}

impl CardFace {
    pub fn from_record(name: &str, record: &CardRecord) -> Self {
        CardFace {
            name: name.to_string(),
            year: if record.year.is_empty() {
                "N/A".to_string()
            } else {
                record.year.clone()
            },
            image_src: image_src(name),
            stars: [
                record.speed.min(STAR_MAX),
                record.acceleration.min(STAR_MAX),
                record.handling.min(STAR_MAX),
            ],
            costs: [record.money, record.gas, record.tires, record.parts, record.tools],
        }
    }

    pub fn stars_for(&self, stat: StatKind) -> u8 {
        self.stars[stat as usize]
    }

    pub fn cost_for(&self, kind: CostKind) -> u32 {
        self.costs[kind as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = r#"<div class="card-template">
    <input type="checkbox" class="card-select-checkbox" title="Select for printing">
    <button class="remove-card-btn" title="Remove card">&times;</button>
    <h2 class="card-name">{{NAME}}</h2>
    <span class="card-year">{{YEAR}}</span>
    <img src="{{IMAGE_SRC}}" alt="{{NAME}}">
    <div class="stars" data-stat="speed">{{SPEED_STARS}}</div>
    <div class="stars" data-stat="acceleration">{{ACCELERATION_STARS}}</div>
    <div class="stars" data-stat="handling">{{HANDLING_STARS}}</div>
    <span class="cost-value">{{MONEY_COST}}</span>
    <span class="cost-value">{{GAS_COST}}</span>
    <span class="cost-value">{{TIRES_COST}}</span>
    <span class="cost-value">{{PARTS_COST}}</span>
    <span class="cost-value">{{TOOLS_COST}}</span>
</div>"#;

    #[test]
    fn star_row_marks_first_cells_filled() {
        let row = star_row_html(3);
        assert_eq!(row.matches("star filled").count(), 3);
        assert_eq!(row.matches("data-value").count(), 5);
        assert!(row.contains("data-value=\"1\""));
        assert!(row.contains("data-value=\"5\""));
    }

    #[test]
    fn star_row_clamps_out_of_range_ratings() {
        assert_eq!(star_row_html(9).matches("star filled").count(), 5);
        assert_eq!(star_row_html(0).matches("star filled").count(), 0);
    }

    #[test]
    fn escape_html_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<Road & "Track's">"#),
            "&lt;Road &amp; &quot;Track&#039;s&quot;&gt;"
        );
    }

    #[test]
    fn image_src_percent_encodes_the_name() {
        assert_eq!(image_src("Le Mans"), "card_images/Le%20Mans.png");
        assert_eq!(image_src("A/B"), "card_images/A%2FB.png");
    }

    #[test]
    fn render_replaces_every_token() {
        let mut record = CardRecord::default();
        record.year = "1969".to_string();
        record.speed = 4;
        record.money = 2;
        let html = render_card_html(TEMPLATE, "Zephyr", &record);
        assert!(!html.contains("{{"));
        // name appears in both the heading and the image alt text
        assert_eq!(html.matches("Zephyr").count(), 3);
        assert!(html.contains("card_images/Zephyr.png"));
        assert!(html.contains("1969"));
    }

    #[test]
    fn render_defaults_empty_year_to_na() {
        let html = render_card_html(TEMPLATE, "Comet", &CardRecord::default());
        assert!(html.contains(">N/A<"));
    }

    #[test]
    fn render_escapes_the_card_name() {
        let html = render_card_html(TEMPLATE, "Fast & Loose", &CardRecord::default());
        assert!(html.contains("Fast &amp; Loose"));
        assert!(html.contains("card_images/Fast%20%26%20Loose.png"));
    }

    #[test]
    fn strip_removes_only_the_interactive_controls() {
        let html = render_card_html(TEMPLATE, "Comet", &CardRecord::default());
        let stripped = strip_print_controls(&html);
        assert!(!stripped.contains("card-select-checkbox"));
        assert!(!stripped.contains("remove-card-btn"));
        assert!(stripped.contains("card-name"));
        assert!(stripped.contains("card-year"));
        assert!(stripped.contains("data-stat=\"speed\""));
    }

    #[test]
    fn print_document_links_both_stylesheets_and_prints_on_load() {
        let doc = render_print_document(
            "<div class=\"card-template\"></div>",
            "http://localhost:8000/",
        );
        assert!(doc.contains("<base href=\"http://localhost:8000/\">"));
        assert!(doc.contains("templates/card_style.css"));
        assert!(doc.contains("css/print.css"));
        assert!(doc.contains("window.print()"));
        assert!(doc.contains("print-container"));
    }

    #[test]
    fn face_resolves_the_example_card() {
        let mut record = CardRecord::default();
        record.year = "1969".to_string();
        record.speed = 4;
        record.money = 2;
        let face = CardFace::from_record("Zephyr", &record);
        assert_eq!(face.year, "1969");
        assert_eq!(face.stars_for(StatKind::Speed), 4);
        assert_eq!(face.stars_for(StatKind::Acceleration), 0);
        assert_eq!(face.cost_for(CostKind::Money), 2);
        assert_eq!(face.cost_for(CostKind::Gas), 0);
        assert_eq!(face.cost_for(CostKind::Tools), 0);
        assert_eq!(face.image_src, "card_images/Zephyr.png");
    }

    #[test]
    fn face_clamps_stars_but_not_costs() {
        let mut record = CardRecord::default();
        record.handling = 200;
        record.tools = 99;
        let face = CardFace::from_record("Comet", &record);
        assert_eq!(face.stars_for(StatKind::Handling), 5);
        assert_eq!(face.cost_for(CostKind::Tools), 99);
    }
}
