// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor: resize, crop, grayscale, contrast, blur, sharpen, invert.
// Operates on in-memory images using the `image` and `imageproc` crates.

use image::{DynamicImage, GrayImage};
use imageproc::filter::{gaussian_blur_f32, sharpen3x3};
use scanwerk_core::error::ScanwerkError;
use scanwerk_core::types::Quadrant;
use tracing::{debug, info, instrument};

/// Image processing pipeline operating on a single in-memory image.
///
/// All operations are non-destructive: each method consumes `self` and returns a
/// new `ImageProcessor` wrapping the transformed image, enabling method chaining.
///
/// ```ignore
/// let luma = ImageProcessor::open("tag.jpg")?
///     .grayscale()
///     .adjust_contrast(1.4)
///     .into_luma8();
/// ```
#[derive(Debug)]
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, ScanwerkError> {
        let img = image::open(path.as_ref()).map_err(|err| {
            ScanwerkError::ImageError(format!(
                "failed to open {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        info!(width = img.width(), height = img.height(), "Image loaded");
        Ok(Self { image: img })
    }

    /// Create a processor from raw encoded bytes (JPEG, PNG, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, ScanwerkError> {
        let img = image::load_from_memory(data).map_err(|err| {
            ScanwerkError::ImageError(format!("failed to decode image: {}", err))
        })?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the underlying `DynamicImage`.
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    /// Consume the processor and return the underlying `DynamicImage`.
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    /// Consume the processor and return the image as 8-bit grayscale.
    pub fn into_luma8(self) -> GrayImage {
        self.image.into_luma8()
    }

    // -- Transformations (consume self, return new Self) -----------------------

    /// Resize the image to fit within `max_width` x `max_height`, preserving
    /// aspect ratio. Uses Lanczos3 filtering; upscales as well as downscales.
    #[instrument(skip(self), fields(max_width, max_height))]
    pub fn resize(self, max_width: u32, max_height: u32) -> Self {
        let resized = self
            .image
            .resize(max_width, max_height, image::imageops::FilterType::Lanczos3);
        debug!(
            new_w = resized.width(),
            new_h = resized.height(),
            "Resize complete"
        );
        Self { image: resized }
    }

    /// Crop a rectangular region from the image.
    ///
    /// `x` and `y` are the top-left corner; `width` and `height` define the
    /// size of the crop rectangle. Values are clamped to image bounds.
    #[instrument(skip(self), fields(x, y, width, height))]
    pub fn crop(self, x: u32, y: u32, width: u32, height: u32) -> Self {
        let img_w = self.image.width();
        let img_h = self.image.height();

        let safe_x = x.min(img_w.saturating_sub(1));
        let safe_y = y.min(img_h.saturating_sub(1));
        let safe_w = width.min(img_w - safe_x);
        let safe_h = height.min(img_h - safe_y);

        debug!(safe_x, safe_y, safe_w, safe_h, "Cropping image");

        let cropped = self.image.crop_imm(safe_x, safe_y, safe_w, safe_h);
        Self { image: cropped }
    }

    /// Crop to one of the quadrant regions (or the centre region).
    ///
    /// Quadrants are half the image on each axis; the centre region is the
    /// same size, offset by a quarter on each axis.
    pub fn crop_quadrant(self, quadrant: Quadrant) -> Self {
        let w = self.image.width();
        let h = self.image.height();
        let (half_w, half_h) = (w / 2, h / 2);

        let (x, y) = match quadrant {
            Quadrant::TopLeft => (0, 0),
            Quadrant::TopRight => (w - half_w, 0),
            Quadrant::BottomLeft => (0, h - half_h),
            Quadrant::BottomRight => (w - half_w, h - half_h),
            Quadrant::Center => (w / 4, h / 4),
        };

        self.crop(x, y, half_w, half_h)
    }

    /// Convert the image to grayscale (luma).
    pub fn grayscale(self) -> Self {
        Self {
            image: self.image.grayscale(),
        }
    }

    /// Adjust contrast by a factor. Values > 1.0 increase contrast; values
    /// < 1.0 decrease it. A value of 1.0 is a no-op.
    #[instrument(skip(self), fields(factor))]
    pub fn adjust_contrast(self, factor: f32) -> Self {
        let rgba = self.image.to_rgba8();

        let contrasted = image::ImageBuffer::from_fn(rgba.width(), rgba.height(), |x, y| {
            let pixel = rgba.get_pixel(x, y);
            let image::Rgba([r, g, b, a]) = *pixel;
            let adjust = |channel: u8| -> u8 {
                let val = factor * (channel as f32 - 128.0) + 128.0;
                val.clamp(0.0, 255.0) as u8
            };
            image::Rgba([adjust(r), adjust(g), adjust(b), a])
        });

        Self {
            image: DynamicImage::ImageRgba8(contrasted),
        }
    }

    /// Invert the image, turning light-on-dark symbols into the dark-on-light
    /// orientation the symbology decoder expects.
    pub fn invert(self) -> Self {
        let mut image = self.image;
        image.invert();
        Self { image }
    }

    /// Gaussian blur at the given sigma. Operates on the luma channel.
    #[instrument(skip(self), fields(sigma))]
    pub fn blur(self, sigma: f32) -> Self {
        let blurred = gaussian_blur_f32(&self.image.into_luma8(), sigma);
        Self {
            image: DynamicImage::ImageLuma8(blurred),
        }
    }

    /// 3x3 sharpening kernel. Operates on the luma channel.
    pub fn sharpen(self) -> Self {
        let sharpened = sharpen3x3(&self.image.into_luma8());
        Self {
            image: DynamicImage::ImageLuma8(sharpened),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    fn gradient(width: u32, height: u32) -> ImageProcessor {
        let img = GrayImage::from_fn(width, height, |x, _| Luma([(x % 256) as u8]));
        ImageProcessor::from_dynamic(DynamicImage::ImageLuma8(img))
    }

    #[test]
    fn open_missing_file_is_image_error() {
        let err = ImageProcessor::open("/nonexistent/tag.png").unwrap_err();
        assert!(matches!(err, ScanwerkError::ImageError(_)));
    }

    #[test]
    fn from_bytes_rejects_garbage() {
        let err = ImageProcessor::from_bytes(&[0u8; 16]).unwrap_err();
        assert!(matches!(err, ScanwerkError::ImageError(_)));
    }

    #[test]
    fn resize_preserves_aspect_ratio() {
        let resized = gradient(200, 100).resize(50, 50);
        assert_eq!(resized.width(), 50);
        assert_eq!(resized.height(), 25);

        let inner = resized.into_dynamic();
        assert_eq!((inner.width(), inner.height()), (50, 25));
    }

    #[test]
    fn resize_upscales_small_images() {
        let resized = gradient(40, 40).resize(80, 80);
        assert_eq!(resized.width(), 80);
        assert_eq!(resized.height(), 80);
    }

    #[test]
    fn crop_clamps_to_bounds() {
        let cropped = gradient(100, 100).crop(90, 90, 50, 50);
        assert_eq!(cropped.width(), 10);
        assert_eq!(cropped.height(), 10);
        assert_eq!(cropped.as_dynamic().width(), 10);
    }

    #[test]
    fn quadrants_cover_half_the_frame() {
        for quadrant in Quadrant::ALL {
            let cropped = gradient(100, 80).crop_quadrant(quadrant);
            assert_eq!(cropped.width(), 50, "{}", quadrant.label());
            assert_eq!(cropped.height(), 40, "{}", quadrant.label());
        }
    }

    #[test]
    fn quadrant_offsets_are_distinct() {
        let base = GrayImage::from_fn(4, 4, |x, y| Luma([(y * 4 + x) as u8]));
        let top_left = ImageProcessor::from_dynamic(DynamicImage::ImageLuma8(base.clone()))
            .crop_quadrant(Quadrant::TopLeft)
            .into_luma8();
        let bottom_right = ImageProcessor::from_dynamic(DynamicImage::ImageLuma8(base.clone()))
            .crop_quadrant(Quadrant::BottomRight)
            .into_luma8();
        let center = ImageProcessor::from_dynamic(DynamicImage::ImageLuma8(base))
            .crop_quadrant(Quadrant::Center)
            .into_luma8();

        assert_eq!(top_left.get_pixel(0, 0).0[0], 0);
        assert_eq!(bottom_right.get_pixel(0, 0).0[0], 10);
        assert_eq!(center.get_pixel(0, 0).0[0], 5);
    }

    #[test]
    fn invert_flips_luma() {
        let img = GrayImage::from_pixel(3, 3, Luma([100u8]));
        let inverted = ImageProcessor::from_dynamic(DynamicImage::ImageLuma8(img))
            .invert()
            .into_luma8();
        assert_eq!(inverted.get_pixel(0, 0).0[0], 155);
    }

    #[test]
    fn contrast_boost_pushes_away_from_midgrey() {
        let img = GrayImage::from_pixel(2, 2, Luma([160u8]));
        let boosted = ImageProcessor::from_dynamic(DynamicImage::ImageLuma8(img))
            .adjust_contrast(1.4)
            .into_luma8();
        assert!(boosted.get_pixel(0, 0).0[0] > 160);
    }

    #[test]
    fn blur_and_sharpen_preserve_dimensions() {
        let blurred = gradient(20, 30).blur(1.2);
        assert_eq!((blurred.width(), blurred.height()), (20, 30));

        let sharpened = gradient(20, 30).sharpen();
        assert_eq!((sharpened.width(), sharpened.height()), (20, 30));
    }
}
