//! Best-effort image dimension extraction.

use std::io::Cursor;

use folio_core::models::Dimensions;

/// Read the pixel dimensions of an in-memory image.
///
/// Returns `None` for anything that cannot be read as an image. Dimensions
/// are best-effort metadata: a `None` here must never fail an upload. Only
/// the header is decoded; the input slice is left untouched for later
/// stages.
pub fn probe_dimensions(data: &[u8]) -> Option<Dimensions> {
    let reader = image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .ok()?;
    let (width, height) = reader.into_dimensions().ok()?;
    Some(Dimensions { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([40, 90, 200]));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[test]
    fn test_probe_valid_png() {
        let data = png_bytes(640, 480);
        assert_eq!(
            probe_dimensions(&data),
            Some(Dimensions {
                width: 640,
                height: 480
            })
        );
    }

    #[test]
    fn test_probe_corrupt_data() {
        assert_eq!(probe_dimensions(b"not an image"), None);
        assert_eq!(probe_dimensions(&[]), None);
    }

    #[test]
    fn test_probe_truncated_png() {
        let data = png_bytes(640, 480);
        // Keep the signature but cut the stream mid-header.
        assert_eq!(probe_dimensions(&data[..12]), None);
    }
}
