//! Canvas setup and final composition.
//!
//! A [`StyledImage`] is built for exactly one image: it owns the canvas,
//! the supersampled mask and the optional logo swatch. Modules are drawn
//! into it (see [`StyledImage::draw_module`]), then [`StyledImage::finalize`]
//! consumes it, so the mask is merged into the canvas exactly once.

use crate::canvas::{Canvas, ColorMode};
use crate::color::{parse_background, parse_color};
use crate::config::StyleOptions;
use crate::error::{Result, StyleError};
use crate::grid::Layout;
use crate::mask::{SupersampledMask, ANTIALIAS};
use image::imageops::{self, FilterType};
use log::debug;
use std::io::Write;
use std::path::Path;

/// Share of the canvas side covered by the logo swatch.
pub const LOGO_RATIO: f64 = 0.3;

pub struct StyledImage {
    pub(crate) layout: Layout,
    pub(crate) options: StyleOptions,
    pub(crate) fill: [u8; 4],
    pub(crate) canvas: Canvas,
    pub(crate) mask: SupersampledMask,
    pub(crate) logo: Option<Canvas>,
}

impl StyledImage {
    /// Resolves colors, allocates the canvas and mask, and prepares the logo swatch.
    ///
    /// # Errors
    ///
    /// - [`StyleError::InvalidConfig`] for unknown colors or a zero box size.
    /// - [`StyleError::Resource`] if the logo cannot be loaded.
    pub fn new(layout: Layout, options: StyleOptions) -> Result<Self> {
        options.validate()?;
        if layout.box_size == 0 || layout.module_count == 0 {
            return Err(StyleError::InvalidConfig(format!(
                "empty layout: {} modules of {} px",
                layout.module_count, layout.box_size
            )));
        }

        let background = parse_background(&options.back_color)?;
        let fill = parse_color(&options.fill_color)?;
        let mode = if background.is_none() { ColorMode::Rgba } else { ColorMode::Rgb };

        let pixel_size = layout.pixel_size();
        let canvas = Canvas::new(pixel_size, pixel_size, mode, background);
        let mask = SupersampledMask::new(pixel_size, ANTIALIAS);

        let logo = match &options.logo_path {
            Some(path) => Some(logo_swatch(path, pixel_size, mode, background)?),
            None => None,
        };

        debug!(
            "styled canvas {0}x{0} px, {1:?}, {2} modules of {3} px, logo: {4}",
            pixel_size,
            mode,
            layout.module_count,
            layout.box_size,
            logo.is_some()
        );

        Ok(Self { layout, options, fill, canvas, mask, logo })
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn options(&self) -> &StyleOptions {
        &self.options
    }

    /// Canvas drawn so far. Curved shapes only appear after [`StyledImage::finalize`].
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn mask(&self) -> &SupersampledMask {
        &self.mask
    }

    /// Downsamples the mask, paints it with the fill color, then pastes the
    /// logo swatch centered over everything.
    pub fn finalize(self) -> Canvas {
        let Self { fill, mut canvas, mask, logo, .. } = self;
        let (width, height) = canvas.dimensions();
        debug!(
            "compositing {0}x{0} mask onto {1}x{2} canvas",
            mask.side(),
            width,
            height
        );

        let stencil = imageops::resize(mask.image(), width, height, FilterType::Lanczos3);
        canvas.composite_stencil(&stencil, fill);

        if let Some(logo) = logo {
            let x = (width as i64 - logo.width() as i64).div_euclid(2);
            let y = (height as i64 - logo.height() as i64).div_euclid(2);
            canvas.paste(&logo, x, y);
        }
        canvas
    }

    /// Finalizes and encodes with the configured format and quality.
    pub fn save<W: Write>(self, sink: &mut W) -> Result<()> {
        self.save_as(sink, None, None)
    }

    /// Finalizes and encodes, overriding the configured format or quality.
    pub fn save_as<W: Write>(self, sink: &mut W, format: Option<&str>, quality: Option<u8>) -> Result<()> {
        let format = format.unwrap_or(self.options.kind()).to_string();
        let quality = quality.unwrap_or(self.options.quality);
        let canvas = self.finalize();
        debug!("encoding {}x{} image as {}", canvas.width(), canvas.height(), format);
        canvas.encode(sink, &format, quality)
    }
}

/// Loads the logo and centers it on a background-colored square swatch.
fn logo_swatch(path: &Path, pixel_size: u32, mode: ColorMode, background: Option<[u8; 4]>) -> Result<Canvas> {
    let logo = image::open(path).map_err(|source| StyleError::Resource {
        path: path.to_path_buf(),
        source,
    })?;
    let side = ((pixel_size as f64 * LOGO_RATIO) as u32).saturating_sub(1);
    let mut swatch = Canvas::new(side, side, mode, background);
    let x = (side as i64 - logo.width() as i64).div_euclid(2);
    let y = (side as i64 - logo.height() as i64).div_euclid(2);
    swatch.paste_image(&logo, x, y);
    Ok(swatch)
}
