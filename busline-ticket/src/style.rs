use busline_core::{NameOrder, TicketError, TicketResult};
use pdf_gen::Colour;

use crate::fonts::Face;

/// A4 in points.
pub const A4: (f32, f32) = (595.28, 841.89);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const DARK_GRAY: Rgb = Rgb(64, 64, 64);
    pub const GRAY: Rgb = Rgb(128, 128, 128);
    pub const LIGHT_GRAY: Rgb = Rgb(240, 240, 240);

    /// Components scaled to the 0..=1 range PDF color operators take.
    pub fn components(self) -> (f32, f32, f32) {
        (
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
        )
    }

    pub fn colour(self) -> Colour {
        Colour::new_rgb_bytes(self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub face: Face,
    pub size: f32,
    pub color: Rgb,
}

impl FontSpec {
    pub const fn new(face: Face, size: f32, color: Rgb) -> Self {
        Self { face, size, color }
    }
}

/// Everything about the ticket's look that is not booking data.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketStyle {
    pub title: String,
    pub footer: Vec<String>,
    pub currency_symbol: String,
    pub utc_offset_minutes: i32,
    pub passenger_order: NameOrder,

    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,

    pub title_font: FontSpec,
    pub label_font: FontSpec,
    pub value_font: FontSpec,
    pub table_header_font: FontSpec,
    pub table_cell_font: FontSpec,
    pub footer_font: FontSpec,

    pub header_background: Rgb,
    pub cell_padding: f32,
    pub border_width: f32,

    /// Edge length of the QR raster in pixels.
    pub qr_source_size: u32,
    /// Edge length of the QR image on the page in points.
    pub qr_display_size: f32,
}

impl Default for TicketStyle {
    fn default() -> Self {
        Self {
            title: "Bus Booking Ticket".to_string(),
            footer: vec![
                "Thank you for booking with us! Please carry a valid ID proof.".to_string(),
                "For support, contact support@yourapp.com".to_string(),
            ],
            currency_symbol: "Rs".to_string(),
            utc_offset_minutes: 0,
            passenger_order: NameOrder::CaseSensitive,

            page_width: A4.0,
            page_height: A4.1,
            margin: 36.0,

            title_font: FontSpec::new(Face::Bold, 20.0, Rgb::BLUE),
            label_font: FontSpec::new(Face::Bold, 12.0, Rgb::DARK_GRAY),
            value_font: FontSpec::new(Face::Regular, 12.0, Rgb::BLACK),
            table_header_font: FontSpec::new(Face::Bold, 11.0, Rgb::BLACK),
            table_cell_font: FontSpec::new(Face::Regular, 10.0, Rgb::BLACK),
            footer_font: FontSpec::new(Face::Italic, 10.0, Rgb::GRAY),

            header_background: Rgb::LIGHT_GRAY,
            cell_padding: 6.0,
            border_width: 0.5,

            qr_source_size: 200,
            qr_display_size: 120.0,
        }
    }
}

impl TicketStyle {
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    pub fn content_height(&self) -> f32 {
        self.page_height - 2.0 * self.margin
    }

    pub fn validate(&self) -> TicketResult<()> {
        let invalid = |msg: String| Err(TicketError::Render(msg));

        if self.margin < 0.0 || self.content_width() <= 0.0 || self.content_height() <= 0.0 {
            return invalid(format!(
                "margin {} leaves no content area on a {}x{} page",
                self.margin, self.page_width, self.page_height
            ));
        }

        let fonts = [
            ("title", &self.title_font),
            ("label", &self.label_font),
            ("value", &self.value_font),
            ("table header", &self.table_header_font),
            ("table cell", &self.table_cell_font),
            ("footer", &self.footer_font),
        ];
        for (name, font) in fonts {
            if font.size <= 0.0 {
                return invalid(format!("{} font size must be positive, got {}", name, font.size));
            }
        }

        if self.cell_padding < 0.0 || self.border_width < 0.0 {
            return invalid("cell padding and border width must not be negative".to_string());
        }

        if self.qr_source_size == 0 {
            return invalid("QR source size must be positive".to_string());
        }
        if self.qr_display_size <= 0.0
            || self.qr_display_size > self.content_width()
            || self.qr_display_size > self.content_height()
        {
            return invalid(format!(
                "QR display size {} does not fit the content area",
                self.qr_display_size
            ));
        }

        Ok(())
    }
}
