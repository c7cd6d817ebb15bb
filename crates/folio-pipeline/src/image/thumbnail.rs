//! Thumbnail derivative ladder.
//!
//! Every image asset gets three derivatives attempted: small (150×150),
//! medium (300×300), large (600×600). Each is a scale-down-only, aspect-
//! preserving re-encode to JPEG at the configured quality. The source is
//! decoded once at native size and the decoded buffer is reused for all
//! three sizes.

use std::io::Cursor;

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};

use folio_core::models::SizeClass;

/// Failure while producing one size class.
#[derive(Debug, thiserror::Error)]
pub enum ThumbnailError {
    #[error("Image decode failed: {0}")]
    Decode(String),

    #[error("JPEG encode failed: {0}")]
    Encode(String),
}

/// One generated (not yet stored) thumbnail.
#[derive(Debug, Clone)]
pub struct GeneratedThumbnail {
    pub size_class: SizeClass,
    pub width: u32,
    pub height: u32,
    pub bytes: Bytes,
}

/// Outcome of attempting the full ladder. Generation of one size class is
/// independent of the others; failures never abort the remaining sizes, and
/// an empty `thumbnails` list is a legitimate outcome.
#[derive(Debug)]
pub struct LadderOutcome {
    pub thumbnails: Vec<GeneratedThumbnail>,
    pub failures: Vec<(SizeClass, ThumbnailError)>,
}

/// Generate all three derivative sizes from one decoded copy of `data`.
pub fn generate_ladder(data: &[u8], jpeg_quality: u8) -> LadderOutcome {
    let decoded = match decode(data) {
        Ok(img) => img,
        Err(e) => {
            tracing::warn!(error = %e, "Image decode failed, no derivatives generated");
            // Every size class was attempted and every one failed the same way.
            let failures = SizeClass::ALL
                .iter()
                .map(|s| (*s, ThumbnailError::Decode(e.to_string())))
                .collect();
            return LadderOutcome {
                thumbnails: Vec::new(),
                failures,
            };
        }
    };

    let source = flatten_to_rgb(decoded);

    let mut thumbnails = Vec::new();
    let mut failures = Vec::new();
    for size_class in SizeClass::ALL {
        match render_size(&source, size_class, jpeg_quality) {
            Ok(thumb) => thumbnails.push(thumb),
            Err(e) => {
                tracing::warn!(
                    size_class = %size_class,
                    error = %e,
                    "Thumbnail generation failed, continuing with remaining sizes"
                );
                failures.push((size_class, e));
            }
        }
    }

    LadderOutcome {
        thumbnails,
        failures,
    }
}

fn decode(data: &[u8]) -> Result<DynamicImage, ThumbnailError> {
    image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ThumbnailError::Decode(e.to_string()))?
        .decode()
        .map_err(|e| ThumbnailError::Decode(e.to_string()))
}

/// Flatten the decoded image to opaque RGB.
///
/// The output encoding cannot represent transparency, and the policy is
/// that transparent regions become white: anything carrying an alpha
/// channel is composited onto an opaque white background, everything else
/// converts straight to RGB.
fn flatten_to_rgb(img: DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.into_rgb8();
    }
    let rgba = img.into_rgba8();
    let (width, height) = rgba.dimensions();
    let mut rgb = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
    for (x, y, px) in rgba.enumerate_pixels() {
        let alpha = px[3] as u32;
        let blend = |c: u8| ((c as u32 * alpha + 255 * (255 - alpha)) / 255) as u8;
        rgb.put_pixel(x, y, Rgb([blend(px[0]), blend(px[1]), blend(px[2])]));
    }
    rgb
}

/// Dimensions fitting inside `bounds` with the aspect ratio preserved.
/// Never upscales: a source already inside the box keeps its size.
pub(crate) fn fit_within(width: u32, height: u32, bounds: (u32, u32)) -> (u32, u32) {
    let (max_width, max_height) = bounds;
    if width <= max_width && height <= max_height {
        return (width, height);
    }
    let ratio = (max_width as f64 / width as f64).min(max_height as f64 / height as f64);
    let fitted_width = ((width as f64 * ratio).round() as u32).max(1);
    let fitted_height = ((height as f64 * ratio).round() as u32).max(1);
    (fitted_width, fitted_height)
}

fn render_size(
    source: &RgbImage,
    size_class: SizeClass,
    jpeg_quality: u8,
) -> Result<GeneratedThumbnail, ThumbnailError> {
    let (source_width, source_height) = source.dimensions();
    let (width, height) = fit_within(source_width, source_height, size_class.bounding_box());

    let resized;
    let output: &RgbImage = if (width, height) == (source_width, source_height) {
        source
    } else {
        resized = imageops::resize(source, width, height, FilterType::Lanczos3);
        &resized
    };

    let mut buffer = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buffer, jpeg_quality);
    encoder
        .encode_image(output)
        .map_err(|e| ThumbnailError::Encode(e.to_string()))?;

    Ok(GeneratedThumbnail {
        size_class,
        width,
        height,
        bytes: Bytes::from(buffer),
    })
}
