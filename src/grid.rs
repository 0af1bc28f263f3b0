//! Module grid input and pixel layout.
//!
//! The renderer does not encode QR symbols. It consumes any square grid of
//! dark/light modules through [`ModuleGrid`] and maps module positions to
//! pixel boxes with [`Layout`].

use crate::error::{Result, StyleError};

/// Read access to a square matrix of modules, as produced by a QR encoder.
pub trait ModuleGrid {
    /// Number of modules per side.
    fn width(&self) -> usize;

    /// Whether the module at `(row, col)` is dark.
    fn is_dark(&self, row: usize, col: usize) -> bool;
}

/// A plain row-major module matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    width: usize,
    modules: Vec<bool>,
}

impl ModuleMatrix {
    /// Builds a matrix from a flat row-major vector of `width * width` flags.
    pub fn new(width: usize, modules: Vec<bool>) -> Result<Self> {
        if width == 0 || modules.len() != width * width {
            return Err(StyleError::InvalidConfig(format!(
                "module grid needs {0}x{0} entries, got {1}",
                width,
                modules.len()
            )));
        }
        Ok(Self { width, modules })
    }

    /// Builds a matrix from rows of `'#'`/`'1'` (dark) and any other char (light).
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let width = rows.len();
        let mut modules = Vec::with_capacity(width * width);
        for row in rows {
            modules.extend(row.as_ref().chars().map(|c| c == '#' || c == '1'));
        }
        Self::new(width, modules)
    }

    pub fn set(&mut self, row: usize, col: usize, dark: bool) {
        self.modules[row * self.width + col] = dark;
    }
}

impl ModuleGrid for ModuleMatrix {
    fn width(&self) -> usize {
        self.width
    }

    fn is_dark(&self, row: usize, col: usize) -> bool {
        self.modules[row * self.width + col]
    }
}

/// Pixel box of one module. Both corners are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Bounds {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Same box moved by `(dx, dy)`.
    pub fn translate(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x0 + dx, self.y0 + dy, self.x1 + dx, self.y1 + dy)
    }
}

/// Geometry shared by every module of one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Modules per side, without the border.
    pub module_count: u32,
    /// Pixels per module.
    pub box_size: u32,
    /// Quiet zone, in modules.
    pub border: u32,
}

impl Layout {
    pub fn new(module_count: u32, box_size: u32, border: u32) -> Self {
        Self { module_count, box_size, border }
    }

    /// Side of the whole canvas in pixels, border included.
    pub fn pixel_size(&self) -> u32 {
        (self.module_count + 2 * self.border) * self.box_size
    }

    /// Side of the symbol in pixels, border excluded.
    pub fn symbol_size(&self) -> u32 {
        self.module_count * self.box_size
    }

    /// Pixel offset of the symbol's top-left corner.
    pub fn origin(&self) -> i32 {
        (self.border * self.box_size) as i32
    }

    /// Pixel box of the module at `(row, col)`.
    pub fn pixel_box(&self, row: usize, col: usize) -> Bounds {
        let size = self.box_size as i32;
        let x = (col as i32 + self.border as i32) * size;
        let y = (row as i32 + self.border as i32) * size;
        Bounds::new(x, y, x + size - 1, y + size - 1)
    }
}
