//! Supersampled one-channel mask for curved shapes.
//!
//! Shapes are carved into an oversized grayscale image so that, once it is
//! downsampled to the canvas size, their edges come out antialiased.

use crate::grid::Bounds;
use image::{GrayImage, Luma};

/// Supersampling factor of the mask relative to the canvas.
pub const ANTIALIAS: u32 = 8;

/// Value the mask is cleared to: nothing gets painted there.
pub const MASK_COLOR: u8 = 0;

/// Value shapes are carved with: painted with the fill color on composite.
pub const INVERSE_MASK_COLOR: u8 = 255;

pub struct SupersampledMask {
    image: GrayImage,
    factor: u32,
}

impl SupersampledMask {
    /// Creates a cleared mask covering a `pixel_size` square canvas.
    pub fn new(pixel_size: u32, factor: u32) -> Self {
        let side = pixel_size * factor;
        Self {
            image: GrayImage::from_pixel(side, side, Luma([MASK_COLOR])),
            factor,
        }
    }

    /// Mask resolution, in mask pixels per side.
    pub fn side(&self) -> u32 {
        self.image.width()
    }

    pub fn image(&self) -> &GrayImage {
        &self.image
    }

    /// Carves the ellipse inscribed in `bounds` (canvas pixels), with an edge of `width`.
    pub fn ellipse(&mut self, bounds: Bounds, width: f64) {
        for rect in self.stroke_rects(bounds, width) {
            fill_shape(&mut self.image, rect, None, INVERSE_MASK_COLOR);
        }
    }

    /// Carves a pie slice of the ellipse inscribed in `bounds`, clockwise
    /// from `start` to `end` degrees with 0 at three o'clock.
    pub fn pieslice(&mut self, bounds: Bounds, start: f64, end: f64, width: f64) {
        for rect in self.stroke_rects(bounds, width) {
            fill_shape(&mut self.image, rect, Some((start, end)), INVERSE_MASK_COLOR);
        }
    }

    // The shape is drawn grown and shrunk by half the stroke width, scaled to mask space.
    fn stroke_rects(&self, bounds: Bounds, width: f64) -> [[f64; 4]; 2] {
        let f = self.factor as f64;
        let scaled = |offset: f64| {
            [
                (bounds.x0 as f64 + offset) * f,
                (bounds.y0 as f64 + offset) * f,
                (bounds.x1 as f64 - offset) * f,
                (bounds.y1 as f64 - offset) * f,
            ]
        };
        [scaled(-width / 2.0), scaled(width / 2.0)]
    }
}

/// Clockwise sweep from `start` to `end`, in degrees within `0..=360`.
fn sweep(start: f64, end: f64) -> f64 {
    let span = (end - start).rem_euclid(360.0);
    if span == 0.0 && end != start {
        360.0
    } else {
        span
    }
}

/// Fills the ellipse inscribed in `rect` (inclusive corners, image pixels),
/// optionally restricted to an angular range.
fn fill_shape(image: &mut GrayImage, rect: [f64; 4], arc: Option<(f64, f64)>, value: u8) {
    let [left, top, right, bottom] = rect;
    // Inclusive corners: the far edge sits one pixel past `right`/`bottom`.
    let (cx, cy) = ((left + right + 1.0) / 2.0, (top + bottom + 1.0) / 2.0);
    let (rx, ry) = ((right + 1.0 - left) / 2.0, (bottom + 1.0 - top) / 2.0);
    if rx <= 0.0 || ry <= 0.0 {
        return;
    }

    let x_start = left.floor().max(0.0) as u32;
    let y_start = top.floor().max(0.0) as u32;
    let x_end = ((right + 1.0).ceil().max(0.0) as u32).min(image.width());
    let y_end = ((bottom + 1.0).ceil().max(0.0) as u32).min(image.height());

    for py in y_start..y_end {
        for px in x_start..x_end {
            let dx = px as f64 + 0.5 - cx;
            let dy = py as f64 + 0.5 - cy;
            if (dx / rx).powi(2) + (dy / ry).powi(2) > 1.0 {
                continue;
            }
            if let Some((start, end)) = arc {
                let angle = dy.atan2(dx).to_degrees().rem_euclid(360.0);
                if (angle - start).rem_euclid(360.0) > sweep(start, end) {
                    continue;
                }
            }
            image.put_pixel(px, py, Luma([value]));
        }
    }
}
