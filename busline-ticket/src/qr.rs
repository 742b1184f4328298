//! QR code generation for the ticket image.

use busline_core::{TicketError, TicketResult};
use pdf_gen::image_crate::{DynamicImage, GrayImage, Luma};
use pdf_gen::{Image, ImageType, RasterImageType};
use qrcode::{Color, EcLevel, QrCode};

/// Light modules required around the symbol.
pub const QUIET_ZONE: u32 = 4;

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Encode `payload` and rasterize it into a square grayscale image.
///
/// The symbol is scaled by the largest whole factor that fits `size` pixels
/// and centered; the image is `size` wide unless the symbol needs more.
pub fn encode_payload(payload: &str, size: u32) -> TicketResult<GrayImage> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::M)
        .map_err(|e| TicketError::Encoding(e.to_string()))?;

    let modules = code.width() as u32;
    let colors = code.to_colors();

    let total = modules + 2 * QUIET_ZONE;
    let scale = (size / total).max(1);
    let side = size.max(total * scale);
    let offset = (side - total * scale) / 2 + QUIET_ZONE * scale;

    let mut img = GrayImage::from_pixel(side, side, LIGHT);

    for (i, color) in colors.iter().enumerate() {
        if *color != Color::Dark {
            continue;
        }
        let x = (i as u32) % modules;
        let y = (i as u32) / modules;

        for dy in 0..scale {
            for dx in 0..scale {
                img.put_pixel(offset + x * scale + dx, offset + y * scale + dy, DARK);
            }
        }
    }

    Ok(img)
}

/// Wrap a QR raster so the document can embed it as an image.
pub fn to_image(raster: GrayImage) -> Image {
    Image {
        width: raster.width() as f32,
        height: raster.height() as f32,
        image: ImageType::Raster(RasterImageType::Image(DynamicImage::ImageLuma8(raster))),
    }
}
