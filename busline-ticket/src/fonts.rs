//! Typefaces embedded in every ticket.

use busline_core::{TicketError, TicketResult};
use pdf_gen::Font;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Regular,
    Bold,
    Italic,
}

impl Face {
    /// In the order they are added to the document.
    pub const ALL: [Face; 3] = [Face::Regular, Face::Bold, Face::Italic];

    /// Position of the face in the document's font list.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn load(self) -> TicketResult<Font> {
        let font = match self {
            Face::Regular => Font::load(include_bytes!(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/assets/fonts/DejaVuSans.ttf"
            ))),
            Face::Bold => Font::load(include_bytes!(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/assets/fonts/DejaVuSans-Bold.ttf"
            ))),
            Face::Italic => Font::load(include_bytes!(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/assets/fonts/DejaVuSans-Oblique.ttf"
            ))),
        };

        font.map_err(|e| TicketError::Render(format!("Failed to load {:?} font: {}", self, e)))
    }
}

/// All faces, indexed by [`Face::index`].
pub fn load_all() -> TicketResult<Vec<Font>> {
    Face::ALL.iter().map(|face| face.load()).collect()
}
