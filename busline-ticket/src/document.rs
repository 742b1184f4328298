use pdf_gen::layout::{self, Margins};
use pdf_gen::pdf_writer_crate::Content;
use pdf_gen::{Document, Font, Image, ImageLayout, Page, Pt, Rect, SpanFont, SpanLayout};

use crate::fonts::Face;
use crate::style::{FontSpec, Rgb, TicketStyle};

/// Styled pieces of one output line.
type Line = Vec<(FontSpec, String)>;

pub(crate) enum Align {
    Left,
    Center,
}

pub(crate) struct Column<'a> {
    pub title: &'a str,
    /// Share of the content width, in percent.
    pub width: f32,
}

/// A span as it was placed, kept so the layout can be inspected without
/// parsing the PDF.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlacedText {
    pub page: usize,
    pub text: String,
    pub x: f32,
    pub baseline: f32,
    pub width: f32,
}

/// Flows blocks top to bottom over as many pages as needed.
pub(crate) struct TicketDocument<'a> {
    style: &'a TicketStyle,
    doc: Document,
    page: Page,
    /// Top of the free area on the current page.
    y: f32,
    fresh_page: bool,
    placed: Vec<PlacedText>,
}

impl<'a> TicketDocument<'a> {
    pub fn new(style: &'a TicketStyle, fonts: Vec<Font>) -> Self {
        let mut doc = Document::default();
        for font in fonts {
            doc.add_font(font);
        }

        let page = blank_page(style);
        let y = *page.content_box.y2;
        Self {
            style,
            doc,
            page,
            y,
            fresh_page: true,
            placed: Vec::new(),
        }
    }

    fn left(&self) -> f32 {
        *self.page.content_box.x1
    }

    fn bottom(&self) -> f32 {
        *self.page.content_box.y1
    }

    fn font(&self, face: Face) -> &Font {
        &self.doc.fonts[face.index()]
    }

    fn text_width(&self, text: &str, font: &FontSpec) -> f32 {
        *layout::width_of_text(text, self.font(font.face), Pt(font.size))
    }

    fn line_height(&self, font: &FontSpec) -> f32 {
        *self.font(font.face).line_height(Pt(font.size))
    }

    fn ascent(&self, font: &FontSpec) -> f32 {
        *self.font(font.face).ascent(Pt(font.size))
    }

    fn line_width(&self, line: &Line) -> f32 {
        line.iter().map(|(font, text)| self.text_width(text, font)).sum()
    }

    fn new_page(&mut self) {
        let done = std::mem::replace(&mut self.page, blank_page(self.style));
        self.doc.add_page(done);
        self.y = *self.page.content_box.y2;
        self.fresh_page = true;
    }

    /// Start a new page unless `height` still fits. A block taller than a
    /// whole page is placed on a fresh page and allowed to run over.
    fn reserve(&mut self, height: f32) {
        if self.y - height < self.bottom() && !self.fresh_page {
            self.new_page();
        }
        self.fresh_page = false;
    }

    pub fn space(&mut self, amount: f32) {
        self.y = (self.y - amount).max(self.bottom());
    }

    pub fn add_image(&mut self, image: Image) -> usize {
        self.doc.add_image(image)
    }

    /// Greedy word wrap of styled runs to `max_width`. A word wider than a
    /// whole line is broken between characters. Never returns zero lines.
    fn wrap(&self, runs: &[(FontSpec, &str)], max_width: f32) -> Vec<Line> {
        let mut lines: Vec<Line> = Vec::new();
        let mut line: Line = Vec::new();
        let mut width = 0.0;

        for (font, text) in runs {
            for word in text.split_whitespace() {
                for piece in self.split_word(word, font, max_width) {
                    let gap = if line.is_empty() { 0.0 } else { self.text_width(" ", font) };
                    let piece_width = self.text_width(&piece, font);

                    if !line.is_empty() && width + gap + piece_width > max_width {
                        lines.push(std::mem::take(&mut line));
                        width = 0.0;
                    }

                    let joined = if line.is_empty() { piece } else { format!(" {}", piece) };
                    width += self.text_width(&joined, font);
                    match line.last_mut() {
                        Some((last, existing)) if last == font => existing.push_str(&joined),
                        _ => line.push((*font, joined)),
                    }
                }
            }
        }

        if !line.is_empty() || lines.is_empty() {
            lines.push(line);
        }
        lines
    }

    fn split_word(&self, word: &str, font: &FontSpec, max_width: f32) -> Vec<String> {
        if self.text_width(word, font) <= max_width {
            return vec![word.to_string()];
        }

        let mut pieces = Vec::new();
        let mut piece = String::new();
        for c in word.chars() {
            piece.push(c);
            if piece.chars().count() > 1 && self.text_width(&piece, font) > max_width {
                piece.pop();
                pieces.push(std::mem::take(&mut piece));
                piece.push(c);
            }
        }
        pieces.push(piece);
        pieces
    }

    fn show(&mut self, x: f32, baseline: f32, line: &Line) {
        let page = self.doc.pages.len();
        let mut x = x;
        for (font, text) in line {
            let width = self.text_width(text, font);
            self.page.add_span(SpanLayout {
                text: text.clone(),
                font: SpanFont {
                    index: font.face.index(),
                    size: Pt(font.size),
                },
                colour: font.color.colour(),
                coords: (Pt(x), Pt(baseline)),
            });
            self.placed.push(PlacedText {
                page,
                text: text.trim_start().to_string(),
                x,
                baseline,
                width,
            });
            x += width;
        }
    }

    /// Each entry wrapped to the content width, every line centered.
    pub fn centered_lines(&mut self, entries: &[String], font: &FontSpec, space_after: f32) {
        let content_width = self.style.content_width();
        let height = self.line_height(font);
        let ascent = self.ascent(font);

        for entry in entries {
            for line in self.wrap(&[(*font, entry.as_str())], content_width) {
                self.reserve(height);
                let x = self.left() + (content_width - self.line_width(&line)) / 2.0;
                let baseline = self.y - ascent;
                self.show(x, baseline, &line);
                self.y -= height;
            }
        }
        self.space(space_after);
    }

    /// A bold label followed by its value, wrapped to the content width.
    pub fn label_value(&mut self, label: &str, value: &str, space_after: f32) {
        let label_font = self.style.label_font;
        let value_font = self.style.value_font;
        let height = self.line_height(&label_font).max(self.line_height(&value_font));
        let ascent = self.ascent(&label_font).max(self.ascent(&value_font));

        let lines = self.wrap(
            &[(label_font, label), (value_font, value)],
            self.style.content_width(),
        );
        for line in lines {
            self.reserve(height);
            let baseline = self.y - ascent;
            let x = self.left();
            self.show(x, baseline, &line);
            self.y -= height;
        }
        self.space(space_after);
    }

    pub fn heading(&mut self, text: &str, space_before: f32, space_after: f32) {
        let font = self.style.label_font;
        let header_font = self.style.table_header_font;
        self.space(space_before);

        // Keep the heading together with at least the table's header row.
        let header_row = self.line_height(&header_font) + 2.0 * self.style.cell_padding;
        let height = self.line_height(&font);
        self.reserve(height + space_after + header_row);

        let baseline = self.y - self.ascent(&font);
        let x = self.left();
        let line: Line = vec![(font, text.to_string())];
        self.show(x, baseline, &line);
        self.y -= height + space_after;
    }

    /// Bordered table; the header row repeats at the top of every page it spans.
    pub fn table(&mut self, columns: &[Column<'_>], rows: &[Vec<String>]) {
        let total = self.style.content_width();
        let widths: Vec<f32> = columns.iter().map(|c| total * c.width / 100.0).collect();
        let header: Vec<String> = columns.iter().map(|c| c.title.to_string()).collect();
        let header_font = self.style.table_header_font;
        let cell_font = self.style.table_cell_font;
        let background = Some(self.style.header_background);

        self.row(&widths, &header, &header_font, background, Align::Center);
        for cells in rows {
            let height = self.row_height(&self.cell_lines(&widths, cells, &cell_font), &cell_font);
            if self.y - height < self.bottom() {
                self.new_page();
                self.row(&widths, &header, &header_font, background, Align::Center);
            }
            self.row(&widths, cells, &cell_font, None, Align::Left);
        }
    }

    fn cell_lines(&self, widths: &[f32], cells: &[String], font: &FontSpec) -> Vec<Vec<Line>> {
        let padding = self.style.cell_padding;
        widths
            .iter()
            .zip(cells)
            .map(|(width, text)| {
                let inner = (width - 2.0 * padding).max(font.size);
                self.wrap(&[(*font, text.as_str())], inner)
            })
            .collect()
    }

    fn row_height(&self, cells: &[Vec<Line>], font: &FontSpec) -> f32 {
        let lines = cells.iter().map(Vec::len).max().unwrap_or(1);
        lines as f32 * self.line_height(font) + 2.0 * self.style.cell_padding
    }

    fn row(
        &mut self,
        widths: &[f32],
        cells: &[String],
        font: &FontSpec,
        background: Option<Rgb>,
        align: Align,
    ) {
        let cell_lines = self.cell_lines(widths, cells, font);
        let height = self.row_height(&cell_lines, font);
        self.reserve(height);

        let top = self.y;
        let bottom = top - height;
        let padding = self.style.cell_padding;
        let line_height = self.line_height(font);
        let ascent = self.ascent(font);

        let mut frame = Content::new();
        let mut x = self.left();
        for width in widths {
            if let Some(fill) = background {
                let (r, g, b) = fill.components();
                frame.set_fill_rgb(r, g, b).rect(x, bottom, *width, height).fill_nonzero();
            }
            if self.style.border_width > 0.0 {
                frame
                    .set_stroke_rgb(0.0, 0.0, 0.0)
                    .set_line_width(self.style.border_width)
                    .rect(x, bottom, *width, height)
                    .stroke();
            }
            x += width;
        }
        self.page.add_content(frame);

        let mut x = self.left();
        for (width, lines) in widths.iter().zip(&cell_lines) {
            let mut line_top = top - padding;
            for line in lines {
                let line_x = match align {
                    Align::Left => x + padding,
                    Align::Center => x + (width - self.line_width(line)) / 2.0,
                };
                self.show(line_x, line_top - ascent, line);
                line_top -= line_height;
            }
            x += width;
        }

        self.y = bottom;
    }

    /// An embedded image, centered, drawn as a `size` x `size` square.
    pub fn centered_image(&mut self, image_index: usize, size: f32, space_after: f32) {
        self.reserve(size);
        let x = self.left() + (self.style.content_width() - size) / 2.0;
        let bottom = self.y - size;

        self.page.add_image(ImageLayout {
            image_index,
            position: Rect {
                x1: Pt(x),
                y1: Pt(bottom),
                x2: Pt(x + size),
                y2: Pt(self.y),
            },
        });

        self.y = bottom;
        self.space(space_after);
    }

    /// The finished document and every span placed in it.
    pub fn finish(mut self) -> (Document, Vec<PlacedText>) {
        self.new_page();
        (self.doc, self.placed)
    }
}

fn blank_page(style: &TicketStyle) -> Page {
    Page::new(
        (Pt(style.page_width), Pt(style.page_height)),
        Some(Margins::all(Pt(style.margin))),
    )
}
