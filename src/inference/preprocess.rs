//! Letterbox preprocessing for YOLO input tensors.

use crate::constants::yolo::PAD_VALUE;
use crate::error::{Error, Result};
use crate::inference::BoundingBox;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

/// A letterboxed image as a normalized NCHW tensor, plus the transform used.
#[derive(Debug, Clone)]
pub struct Letterbox {
    /// Planar RGB values in `[0, 1]`, length `3 * input_width * input_height`.
    pub tensor: Vec<f32>,
    /// Model input width.
    pub input_width: u32,
    /// Model input height.
    pub input_height: u32,
    /// Resize factor applied to the source image.
    pub scale: f32,
    /// Horizontal padding on the left edge.
    pub pad_x: f32,
    /// Vertical padding on the top edge.
    pub pad_y: f32,
    /// Source image width.
    pub source_width: u32,
    /// Source image height.
    pub source_height: u32,
}

impl Letterbox {
    /// Map a box from model input space back to source image pixels, clipped to the image.
    #[allow(clippy::cast_precision_loss)]
    pub fn restore(&self, bbox: BoundingBox) -> BoundingBox {
        BoundingBox::from_corners(
            (bbox.x1 - self.pad_x) / self.scale,
            (bbox.y1 - self.pad_y) / self.scale,
            (bbox.x2 - self.pad_x) / self.scale,
            (bbox.y2 - self.pad_y) / self.scale,
        )
        .clip(self.source_width as f32, self.source_height as f32)
    }
}

/// Resize `image` to fit `input_width` x `input_height` keeping its aspect
/// ratio, centering it on a gray canvas.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn letterbox(image: &RgbImage, input_width: u32, input_height: u32) -> Result<Letterbox> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 || input_width == 0 || input_height == 0 {
        return Err(Error::Inference {
            reason: format!(
                "degenerate dimensions: image {width}x{height}, model input {input_width}x{input_height}"
            ),
        });
    }

    let scale = (input_width as f32 / width as f32).min(input_height as f32 / height as f32);
    let resized_width = ((width as f32 * scale).round() as u32).clamp(1, input_width);
    let resized_height = ((height as f32 * scale).round() as u32).clamp(1, input_height);
    let pad_left = (input_width - resized_width) / 2;
    let pad_top = (input_height - resized_height) / 2;

    let mut canvas = RgbImage::from_pixel(input_width, input_height, Rgb([PAD_VALUE; 3]));
    if (resized_width, resized_height) == (width, height) {
        imageops::overlay(&mut canvas, image, i64::from(pad_left), i64::from(pad_top));
    } else {
        let resized = imageops::resize(image, resized_width, resized_height, FilterType::Triangle);
        imageops::overlay(&mut canvas, &resized, i64::from(pad_left), i64::from(pad_top));
    }

    let plane = (input_width * input_height) as usize;
    let mut tensor = vec![0.0_f32; plane * 3];
    for (x, y, pixel) in canvas.enumerate_pixels() {
        let idx = (y * input_width + x) as usize;
        for (channel, value) in pixel.0.iter().enumerate() {
            tensor[channel * plane + idx] = f32::from(*value) / 255.0;
        }
    }

    Ok(Letterbox {
        tensor,
        input_width,
        input_height,
        scale,
        pad_x: pad_left as f32,
        pad_y: pad_top as f32,
        source_width: width,
        source_height: height,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_letterbox_wide_image_pads_vertically() {
        let image = RgbImage::from_pixel(200, 100, Rgb([255, 0, 0]));
        let lb = letterbox(&image, 64, 64).unwrap();

        assert_eq!(lb.tensor.len(), 3 * 64 * 64);
        assert!((lb.scale - 0.32).abs() < 1e-6);
        assert_eq!(lb.pad_x, 0.0);
        assert_eq!(lb.pad_y, 16.0);

        // Top-left pixel is padding, center pixel is the red image.
        let plane = 64 * 64;
        assert!((lb.tensor[0] - 114.0 / 255.0).abs() < 1e-6);
        let center = 32 * 64 + 32;
        assert!(lb.tensor[center] > 0.99);
        assert!(lb.tensor[plane + center] < 0.01);
    }

    #[test]
    fn test_restore_maps_back_to_source_pixels() {
        let image = RgbImage::new(200, 100);
        let lb = letterbox(&image, 64, 64).unwrap();

        let restored = lb.restore(BoundingBox {
            x1: 0.0,
            y1: 16.0,
            x2: 64.0,
            y2: 48.0,
        });
        assert!((restored.x1 - 0.0).abs() < 1e-3);
        assert!((restored.y1 - 0.0).abs() < 1e-3);
        assert!((restored.x2 - 200.0).abs() < 1e-3);
        assert!((restored.y2 - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_restore_clips_outside_boxes() {
        let image = RgbImage::new(100, 100);
        let lb = letterbox(&image, 100, 100).unwrap();
        let restored = lb.restore(BoundingBox {
            x1: -20.0,
            y1: 50.0,
            x2: 130.0,
            y2: 40.0,
        });
        assert_eq!(restored.x1, 0.0);
        assert_eq!(restored.x2, 100.0);
        assert!(restored.y1 <= restored.y2);
    }

    #[test]
    fn test_letterbox_rejects_empty_image() {
        let image = RgbImage::new(0, 10);
        assert!(matches!(
            letterbox(&image, 64, 64),
            Err(Error::Inference { .. })
        ));
    }
}
