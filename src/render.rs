//! Per-module drawing.
//!
//! Straight finder edges and center squares go straight onto the canvas.
//! Finder corners and data modules are carved into the supersampled mask
//! and only show up once the image is finalized.

use crate::compose::StyledImage;
use crate::geometry::{classify_in, ModuleRole};
use crate::grid::Bounds;
use log::trace;

impl StyledImage {
    /// Draws the dark module at `(row, col)` with the shape its position calls for.
    pub fn draw_module(&mut self, row: usize, col: usize) {
        let bounds = self.layout.pixel_box(row, col);
        let role = classify_in(&self.layout, bounds);
        trace!("module ({}, {}) at {:?}: {:?}", row, col, bounds, role);
        self.draw_role(role, bounds);
    }

    /// Draws one module box as `role`. Boxes are trimmed by a pixel or two so
    /// neighbouring shapes meet without seams.
    pub fn draw_role(&mut self, role: ModuleRole, bounds: Bounds) {
        let b = self.layout.box_size as i32;
        let Bounds { x0, y0, x1, y1 } = bounds;
        match role {
            ModuleRole::RowTop => self.fill(Bounds::new(x0, y0 + 1, x1, y1)),
            ModuleRole::RowRight => self.fill(Bounds::new(x0, y0, x1 - 1, y1)),
            ModuleRole::RowBottom => self.fill(Bounds::new(x0, y0, x1, y1 - 1)),
            ModuleRole::RowLeft => self.fill(Bounds::new(x0 + 1, y0, x1, y1)),
            ModuleRole::CornerTopLeft => {
                let arc = Bounds::new(x0 + 2, y0 + 2, x1 + b - 2, y1 + b - 2);
                self.mask.pieslice(arc, 90.0, 360.0, 2.0);
            }
            ModuleRole::CornerTopRight => {
                let arc = Bounds::new(x0 - b + 2, y0 + 2, x1 - 1, y1 + b - 1);
                self.mask.pieslice(arc, 180.0, 90.0, 2.0);
            }
            ModuleRole::CornerBottomLeft => {
                let arc = Bounds::new(x0 + 2, y0 - b + 2, x1 + b - 1, y1 - 1);
                self.mask.pieslice(arc, 0.0, 270.0, 2.0);
            }
            ModuleRole::CornerBottomRight => {
                let arc = Bounds::new(x0 - b + 2, y0 - b + 2, x1 - 1, y1 - 1);
                self.mask.pieslice(arc, 270.0, 180.0, 2.0);
            }
            ModuleRole::AlignmentSquare => self.fill(bounds),
            ModuleRole::DataModule => {
                self.mask.ellipse(Bounds::new(x0 + 1, y0 + 1, x1 - 1, y1 - 1), 1.0);
            }
        }
    }

    fn fill(&mut self, bounds: Bounds) {
        self.canvas.fill_rectangle(bounds, self.fill);
    }
}
