//! Minimal PDF document and canvas scaffolding.
//!
//! Reports are plain vector drawings: fixed-size pages, the built-in
//! Helvetica Type 1 fonts, and content streams of path and text
//! operators. Nothing in here knows about charts or tables.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

/// Resource name of the regular page font (Helvetica).
const FONT_REGULAR: Name<'static> = Name(b"F1");
/// Resource name of the bold page font (Helvetica-Bold).
const FONT_BOLD: Name<'static> = Name(b"F2");

/// Approximate width of `text` at `size`, using an average Helvetica
/// advance. Good enough for centering and right-aligning chart text.
pub fn text_width(text: &str, size: f32) -> f32 {
    0.55 * size * text.chars().count() as f32
}

/// A multi-page PDF document under construction. All pages share one
/// media box and the two standard fonts.
pub struct Document {
    pdf: Pdf,
    page_tree: Ref,
    font_regular: Ref,
    font_bold: Ref,
    next: i32,
    width: f32,
    height: f32,
    pages: Vec<Ref>,
}

impl Document {
    /// Start a document whose pages are `width` by `height` points.
    pub fn new(width: f32, height: f32) -> Self {
        let catalog = Ref::new(1);
        let page_tree = Ref::new(2);
        let font_regular = Ref::new(3);
        let font_bold = Ref::new(4);

        let mut pdf = Pdf::new();
        pdf.catalog(catalog).pages(page_tree);
        pdf.type1_font(font_regular).base_font(Name(b"Helvetica"));
        pdf.type1_font(font_bold).base_font(Name(b"Helvetica-Bold"));

        Self {
            pdf,
            page_tree,
            font_regular,
            font_bold,
            next: 5,
            width,
            height,
            pages: Vec::new(),
        }
    }

    fn alloc(&mut self) -> Ref {
        let id = Ref::new(self.next);
        self.next += 1;
        id
    }

    /// Append a page drawn on `canvas`.
    pub fn add_page(&mut self, canvas: Canvas) {
        let page_id = self.alloc();
        let content_id = self.alloc();

        self.pdf.stream(content_id, &canvas.content.finish());

        let mut page = self.pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, self.width, self.height));
        page.parent(self.page_tree);
        page.contents(content_id);
        {
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            fonts.pair(FONT_REGULAR, self.font_regular);
            fonts.pair(FONT_BOLD, self.font_bold);
        }
        page.finish();

        self.pages.push(page_id);
    }

    /// Finish the document and return its encoded bytes.
    pub fn finish(mut self) -> Vec<u8> {
        let count = self.pages.len() as i32;
        self.pdf
            .pages(self.page_tree)
            .kids(self.pages.iter().copied())
            .count(count);
        self.pdf.finish()
    }
}

/// Text orientation for [`Canvas`] drawing calls.
enum Rotation {
    /// Horizontal, left to right.
    None,
    /// Quarter turn clockwise; the text flows downwards.
    Clockwise,
    /// Quarter turn counter-clockwise; the text flows upwards.
    CounterClockwise,
}

/// One page's content stream with drawing helpers.
///
/// Coordinates are PDF points with the origin at the page's lower-left
/// corner.
pub struct Canvas {
    content: Content,
}

impl Canvas {
    /// Start an empty page.
    pub fn new() -> Self {
        Self {
            content: Content::new(),
        }
    }

    /// Set the stroke width for subsequent path operations.
    pub fn line_width(&mut self, width: f32) -> &mut Self {
        self.content.set_line_width(width);
        self
    }

    /// Set the stroke color for subsequent path operations.
    pub fn stroke_color(&mut self, r: f32, g: f32, b: f32) -> &mut Self {
        self.content.set_stroke_rgb(r, g, b);
        self
    }

    /// Set the fill color for subsequent path and text operations.
    pub fn fill_color(&mut self, r: f32, g: f32, b: f32) -> &mut Self {
        self.content.set_fill_rgb(r, g, b);
        self
    }

    /// Stroke a straight segment.
    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> &mut Self {
        self.content.move_to(x1, y1);
        self.content.line_to(x2, y2);
        self.content.stroke();
        self
    }

    /// Stroke the outline of a rectangle anchored at its lower-left
    /// corner.
    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32) -> &mut Self {
        self.content.rect(x, y, w, h);
        self.content.stroke();
        self
    }

    /// Fill a rectangle with the current fill color.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) -> &mut Self {
        self.content.rect(x, y, w, h);
        self.content.fill_nonzero();
        self
    }

    /// Stroke a plus marker centered on (`x`, `y`).
    pub fn plus_marker(&mut self, x: f32, y: f32, radius: f32) -> &mut Self {
        self.line(x - radius, y, x + radius, y);
        self.line(x, y - radius, x, y + radius);
        self
    }

    /// Push the graphics state and clip to a rectangle. Balance with
    /// [`Canvas::pop_clip`].
    pub fn push_clip(&mut self, x: f32, y: f32, w: f32, h: f32) -> &mut Self {
        self.content.save_state();
        self.content.rect(x, y, w, h);
        self.content.clip_nonzero();
        self.content.end_path();
        self
    }

    /// Pop the graphics state pushed by [`Canvas::push_clip`].
    pub fn pop_clip(&mut self) -> &mut Self {
        self.content.restore_state();
        self
    }

    /// Draw `text` with its left baseline end at (`x`, `y`).
    pub fn text(&mut self, x: f32, y: f32, size: f32, text: &str) -> &mut Self {
        self.draw_text(FONT_REGULAR, x, y, size, text, Rotation::None)
    }

    /// Draw bold `text` with its left baseline end at (`x`, `y`).
    pub fn text_bold(&mut self, x: f32, y: f32, size: f32, text: &str) -> &mut Self {
        self.draw_text(FONT_BOLD, x, y, size, text, Rotation::None)
    }

    /// Draw `text` rotated a quarter turn clockwise, flowing downwards
    /// from (`x`, `y`).
    pub fn text_down(&mut self, x: f32, y: f32, size: f32, text: &str) -> &mut Self {
        self.draw_text(FONT_REGULAR, x, y, size, text, Rotation::Clockwise)
    }

    /// Draw `text` rotated a quarter turn counter-clockwise, flowing
    /// upwards from (`x`, `y`).
    pub fn text_up(&mut self, x: f32, y: f32, size: f32, text: &str) -> &mut Self {
        self.draw_text(FONT_REGULAR, x, y, size, text, Rotation::CounterClockwise)
    }

    fn draw_text(
        &mut self,
        font: Name<'static>,
        x: f32,
        y: f32,
        size: f32,
        text: &str,
        rotation: Rotation,
    ) -> &mut Self {
        self.content.begin_text();
        self.content.set_font(font, size);
        match rotation {
            Rotation::None => {
                self.content.next_line(x, y);
            }
            Rotation::Clockwise => {
                self.content
                    .set_text_matrix([0.0, -1.0, 1.0, 0.0, x, y]);
            }
            Rotation::CounterClockwise => {
                self.content
                    .set_text_matrix([0.0, 1.0, -1.0, 0.0, x, y]);
            }
        }
        self.content.show(Str(&encode_text(text)));
        self.content.end_text();
        self
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode text for a PDF string literal in the standard Helvetica
/// encoding. Event names are URLs in practice, so anything outside
/// printable ASCII is replaced rather than carrying a wider encoding.
fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if (' '..='~').contains(&c) { c as u8 } else { b'?' })
        .collect()
}
