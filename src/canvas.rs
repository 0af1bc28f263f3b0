//! The raster surface the styled code is drawn on.
//!
//! `Canvas` exposes only what the pipeline needs: solid rectangle fills,
//! stencil compositing of a mask, overwrite pastes, size queries and
//! encoding. Anything else goes through [`Canvas::into_dynamic`].

use crate::error::{Result, StyleError};
use crate::grid::Bounds;
use image::codecs::jpeg::JpegEncoder;
use image::{imageops, DynamicImage, GrayImage, ImageFormat, Rgba, RgbaImage};
use std::io::{Cursor, Write};

/// Pixel layout of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Rgb,
    /// Chosen when the background is transparent.
    Rgba,
}

#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
    mode: ColorMode,
}

impl Canvas {
    /// Allocates a `width x height` canvas. A `None` background is fully
    /// transparent and only meaningful in [`ColorMode::Rgba`].
    pub fn new(width: u32, height: u32, mode: ColorMode, background: Option<[u8; 4]>) -> Self {
        let fill = match (mode, background) {
            (ColorMode::Rgb, Some([r, g, b, _])) => [r, g, b, 255],
            (ColorMode::Rgb, None) => [0, 0, 0, 255],
            (ColorMode::Rgba, Some(color)) => color,
            (ColorMode::Rgba, None) => [0, 0, 0, 0],
        };
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba(fill)),
            mode,
        }
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Pixel at `(x, y)` as RGBA. RGB canvases always report alpha 255.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    /// Fills `bounds` (inclusive corners) with a solid color, clipped to the canvas.
    pub fn fill_rectangle(&mut self, bounds: Bounds, color: [u8; 4]) {
        let color = self.normalize(color);
        let x_start = bounds.x0.max(0) as u32;
        let y_start = bounds.y0.max(0) as u32;
        let x_end = (bounds.x1 + 1).clamp(0, self.width() as i32) as u32;
        let y_end = (bounds.y1 + 1).clamp(0, self.height() as i32) as u32;
        for y in y_start..y_end {
            for x in x_start..x_end {
                self.image.put_pixel(x, y, Rgba(color));
            }
        }
    }

    /// Paints `color` through `mask`: 255 paints fully, 0 leaves the pixel,
    /// values between blend every channel linearly.
    pub fn composite_stencil(&mut self, mask: &GrayImage, color: [u8; 4]) {
        let color = self.normalize(color);
        for (x, y, pixel) in self.image.enumerate_pixels_mut() {
            if x >= mask.width() || y >= mask.height() {
                continue;
            }
            let coverage = mask.get_pixel(x, y).0[0] as u32;
            if coverage == 0 {
                continue;
            }
            for (channel, target) in pixel.0.iter_mut().zip(color) {
                let blended = (*channel as u32 * (255 - coverage) + target as u32 * coverage + 127) / 255;
                *channel = blended as u8;
            }
        }
    }

    /// Copies `other` over this canvas with its top-left at `(x, y)`,
    /// replacing pixels without blending. Out-of-bounds parts are dropped.
    pub fn paste(&mut self, other: &Canvas, x: i64, y: i64) {
        imageops::replace(&mut self.image, &other.image, x, y);
    }

    /// Copies an arbitrary image over this canvas like [`Canvas::paste`].
    pub fn paste_image(&mut self, other: &DynamicImage, x: i64, y: i64) {
        let mut source = other.to_rgba8();
        if self.mode == ColorMode::Rgb {
            for pixel in source.pixels_mut() {
                pixel.0[3] = 255;
            }
        }
        imageops::replace(&mut self.image, &source, x, y);
    }

    /// Converts to an `image` buffer in the canvas' color mode.
    pub fn into_dynamic(self) -> DynamicImage {
        match self.mode {
            ColorMode::Rgb => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(self.image).to_rgb8()),
            ColorMode::Rgba => DynamicImage::ImageRgba8(self.image),
        }
    }

    /// Encodes the canvas as `format` (`"PNG"`, `"jpeg"`, `"webp"`, ...) into `sink`.
    ///
    /// `quality` applies to JPEG. JPEG has no alpha channel, so RGBA
    /// canvases are refused for it rather than flattened.
    pub fn encode<W: Write>(&self, sink: &mut W, format: &str, quality: u8) -> Result<()> {
        let format = resolve_format(format)?;
        if self.mode == ColorMode::Rgba && format == ImageFormat::Jpeg {
            return Err(StyleError::Encoding(format!(
                "{:?} cannot store the alpha channel of a transparent canvas",
                format
            )));
        }
        let image = self.clone().into_dynamic();
        let mut buffer = Cursor::new(Vec::new());
        let encoded = match format {
            ImageFormat::Jpeg => {
                JpegEncoder::new_with_quality(&mut buffer, quality).encode_image(&image.to_rgb8())
            }
            _ => image.write_to(&mut buffer, format),
        };
        encoded.map_err(|e| StyleError::Encoding(e.to_string()))?;
        sink.write_all(buffer.get_ref())?;
        Ok(())
    }

    // RGB canvases ignore the alpha of the colors drawn on them.
    fn normalize(&self, [r, g, b, a]: [u8; 4]) -> [u8; 4] {
        match self.mode {
            ColorMode::Rgb => [r, g, b, 255],
            ColorMode::Rgba => [r, g, b, a],
        }
    }
}

/// Maps a format name such as `"PNG"` or `"jpg"` to an encoder.
pub fn resolve_format(name: &str) -> Result<ImageFormat> {
    ImageFormat::from_extension(name.trim().to_ascii_lowercase())
        .filter(|format| format.writing_enabled())
        .ok_or_else(|| StyleError::Encoding(format!("unsupported output format {:?}", name)))
}
