//! QR rendering of encoded tokens.
//!
//! Tokens are rendered at error correction level H, which survives roughly
//! 30% symbol damage. The matrix version is auto-sized to the data; input
//! beyond the version 40 capacity fails with [`Error::Capacity`] rather
//! than truncating.

use std::io::Cursor;

use image::{ImageOutputFormat, Rgb, RgbImage};
use qrcode::types::QrError;
use qrcode::QrCode;

pub use qrcode::EcLevel;

use crate::error::Error;

/// Pixels per QR module in the rendered image.
pub const QR_MODULE_SIZE: u32 = 10;

/// Dark module color.
pub const QR_DARK_COLOR: Rgb<u8> = Rgb([0x1a, 0x1a, 0x2e]);

/// Light module color.
pub const QR_LIGHT_COLOR: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);

/// Render `data` as a QR code image at error correction level H.
pub fn render_qr(data: &str) -> Result<RgbImage, Error> {
    render_qr_with_options(data, EcLevel::H, QR_MODULE_SIZE)
}

/// Render `data` with an explicit error correction level and module size.
///
/// The image keeps the standard four-module quiet zone around the symbol.
///
/// # Errors
///
/// Returns [`Error::Capacity`] when `data` does not fit the largest matrix
/// at `ec_level`, and [`Error::Qr`] for other encoding failures.
pub fn render_qr_with_options(
    data: &str,
    ec_level: EcLevel,
    module_size: u32,
) -> Result<RgbImage, Error> {
    let code = QrCode::with_error_correction_level(data, ec_level).map_err(|e| match e {
        QrError::DataTooLong => Error::Capacity(format!(
            "{} bytes exceed the QR symbol capacity at this error correction level",
            data.len()
        )),
        other => Error::Qr(other.to_string()),
    })?;

    Ok(code
        .render::<Rgb<u8>>()
        .module_dimensions(module_size, module_size)
        .quiet_zone(true)
        .dark_color(QR_DARK_COLOR)
        .light_color(QR_LIGHT_COLOR)
        .build())
}

/// Encode a rendered image as raster bytes in the given format.
pub fn image_to_bytes(image: &RgbImage, format: ImageOutputFormat) -> Result<Vec<u8>, Error> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, format)?;
    Ok(buffer.into_inner())
}

/// Encode a rendered image as lossless PNG bytes.
pub fn image_to_png_bytes(image: &RgbImage) -> Result<Vec<u8>, Error> {
    image_to_bytes(image, ImageOutputFormat::Png)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Byte-mode data capacity of a version 40 symbol at EC level H.
    const MAX_BYTES_V40_H: usize = 1273;

    #[test]
    fn test_render_qr() {
        let image = render_qr("hello qr").unwrap();
        // 21-module version 1 symbol plus a 4-module quiet zone on each side.
        assert_eq!(image.width(), (21 + 8) * QR_MODULE_SIZE);
        assert_eq!(image.width(), image.height());
    }

    #[test]
    fn test_render_is_dark_on_light() {
        let image = render_qr("hello qr").unwrap();
        // Quiet zone corner is light, top-left finder corner is dark.
        assert_eq!(*image.get_pixel(0, 0), QR_LIGHT_COLOR);
        assert_eq!(
            *image.get_pixel(4 * QR_MODULE_SIZE, 4 * QR_MODULE_SIZE),
            QR_DARK_COLOR
        );
    }

    #[test]
    fn test_render_at_capacity() {
        let data = "a".repeat(MAX_BYTES_V40_H);
        let image = render_qr_with_options(&data, EcLevel::H, 1).unwrap();
        // Version 40 is 177 modules.
        assert_eq!(image.width(), 177 + 8);
    }

    #[test]
    fn test_render_over_capacity() {
        let data = "a".repeat(MAX_BYTES_V40_H + 1);
        let err = render_qr_with_options(&data, EcLevel::H, 1).unwrap_err();
        assert!(matches!(err, Error::Capacity(_)));
    }

    #[test]
    fn test_lower_ec_level_fits_more() {
        let data = "a".repeat(MAX_BYTES_V40_H + 1);
        assert!(render_qr_with_options(&data, EcLevel::L, 1).is_ok());
    }

    #[test]
    fn test_image_to_png_bytes() {
        let image = render_qr("png bytes").unwrap();
        let bytes = image_to_png_bytes(&image).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), image.width());
        assert_eq!(decoded.height(), image.height());
    }
}
