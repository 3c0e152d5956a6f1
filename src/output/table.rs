//! Legend table rendering.
//!
//! The table maps the numeric ids printed along the event charts' x axes
//! back to event names, one row per legend entry, paginated on
//! letter-size pages.

use crate::analysis::Legend;

use super::pdf::{Canvas, Document};

/// Letter-size page, portrait.
const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;

const MARGIN: f32 = 72.0;
const ROW_HEIGHT: f32 = 18.0;
const TEXT_SIZE: f32 = 10.0;
const CELL_PADDING: f32 = 4.0;
const ID_COLUMN_WIDTH: f32 = 56.0;

/// Longest event name rendered before truncation. Keeps even the widest
/// URL inside the name column.
const NAME_LIMIT: usize = 72;

/// Render the legend as an id/event table. Chart positions are printed
/// 1-based, so row ids line up with the x tick numbers on the event
/// charts.
pub fn render(legend: &Legend) -> Vec<u8> {
    let rows_per_page = (((PAGE_HEIGHT - 2.0 * MARGIN) / ROW_HEIGHT) as usize).saturating_sub(1);
    let mut doc = Document::new(PAGE_WIDTH, PAGE_HEIGHT);

    let entries: Vec<(usize, &str)> = legend.iter().collect();
    if entries.is_empty() {
        doc.add_page(table_page(&[]));
    } else {
        for chunk in entries.chunks(rows_per_page.max(1)) {
            doc.add_page(table_page(chunk));
        }
    }
    doc.finish()
}

/// Draw one page of the table: a header row plus `rows`.
fn table_page(rows: &[(usize, &str)]) -> Canvas {
    let mut canvas = Canvas::new();
    let table_width = PAGE_WIDTH - 2.0 * MARGIN;
    let name_x = MARGIN + ID_COLUMN_WIDTH;
    let top = PAGE_HEIGHT - MARGIN;
    let bottom = top - ROW_HEIGHT * (rows.len() as f32 + 1.0);

    // Header row, lightly shaded.
    canvas.fill_color(0.9, 0.9, 0.9);
    canvas.fill_rect(MARGIN, top - ROW_HEIGHT, table_width, ROW_HEIGHT);
    canvas.fill_color(0.0, 0.0, 0.0);
    canvas.text_bold(MARGIN + CELL_PADDING, top - ROW_HEIGHT + 5.0, TEXT_SIZE, "id");
    canvas.text_bold(name_x + CELL_PADDING, top - ROW_HEIGHT + 5.0, TEXT_SIZE, "event");

    for (i, &(index, name)) in rows.iter().enumerate() {
        let y = top - ROW_HEIGHT * (i as f32 + 2.0);
        canvas.text(
            MARGIN + CELL_PADDING,
            y + 5.0,
            TEXT_SIZE,
            &(index + 1).to_string(),
        );
        canvas.text(name_x + CELL_PADDING, y + 5.0, TEXT_SIZE, &display_name(name));
    }

    // Grid.
    canvas.line_width(0.5).stroke_color(0.5, 0.5, 0.5);
    for r in 0..=rows.len() + 1 {
        let y = top - ROW_HEIGHT * r as f32;
        canvas.line(MARGIN, y, MARGIN + table_width, y);
    }
    for x in [MARGIN, name_x, MARGIN + table_width] {
        canvas.line(x, bottom, x, top);
    }

    canvas
}

/// Trim an event name for display: strip the URL scheme and cap the
/// length on a character boundary.
fn display_name(name: &str) -> String {
    let stripped = name
        .strip_prefix("https://")
        .or_else(|| name.strip_prefix("http://"))
        .unwrap_or(name);
    stripped.chars().take(NAME_LIMIT).collect()
}
