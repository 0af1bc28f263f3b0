#![forbid(unsafe_code)]

//! # qirust-style
//!
//! A Rust library for rendering QR code module matrices as styled raster images.
//!
//! `qirust-style` takes the dark/light module grid produced by any QR encoder and draws it with
//! rounded finder patterns, round data modules and an optional logo in the middle. Curved shapes
//! are drawn into an 8x supersampled mask and downsampled with a Lanczos filter, so edges stay
//! smooth even at small module sizes.
//!
//! ## Features
//!
//! - Classify every module by its place in the symbol: finder edge, finder corner, finder
//!   center or data module.
//! - Antialiased round corners on the three finder patterns and dot-shaped data modules.
//! - Named or hex colors, including a transparent background (RGBA output).
//! - Centered logo on a background swatch covering 30% of the image.
//! - PNG, JPEG and every other format the `image` crate can write.
//! - Options loadable from TOML.
//!
//! ## Example
//!
//! ```rust
//! use qirust_style::{config::StyleOptions, grid::ModuleMatrix, helper::render_to_writer};
//!
//! // Any encoder output works; here an empty version 1 grid.
//! let grid = ModuleMatrix::new(21, vec![false; 21 * 21]).unwrap();
//! let options = StyleOptions { fill_color: "navy".into(), ..Default::default() };
//!
//! let mut png = Vec::new();
//! render_to_writer(&grid, options, &mut png).unwrap();
//! assert_eq!(&png[1..4], b"PNG");
//! ```
//!
//! ## Modules
//!
//! - [`geometry`]: Module role classification.
//! - [`mask`]: Supersampled mask with antialiased ellipse and pie slice shapes.
//! - [`render`]: Per-module drawing.
//! - [`compose`]: Canvas setup and final composition.
//! - [`helper`]: Whole-grid rendering, saving and debugging utilities.

pub mod canvas;
pub mod color;
pub mod compose;
pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod helper;
pub mod mask;
pub mod render;

pub use canvas::{Canvas, ColorMode};
pub use compose::StyledImage;
pub use config::StyleOptions;
pub use error::{Result, StyleError};
pub use geometry::{classify, ModuleRole};
pub use grid::{Bounds, Layout, ModuleGrid, ModuleMatrix};
