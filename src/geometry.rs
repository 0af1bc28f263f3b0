//! Structural classification of module positions.
//!
//! A module's role is derived from its pixel position alone, never from the
//! module grid. Coordinates are relative to the symbol's top-left corner, so
//! callers with a quiet zone subtract it first (see [`classify_in`]).

use crate::grid::{Bounds, Layout};

/// What a module position is part of, which decides how it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleRole {
    RowTop,
    RowRight,
    RowBottom,
    RowLeft,
    CornerTopLeft,
    CornerTopRight,
    CornerBottomLeft,
    CornerBottomRight,
    /// The center dot of a finder pattern.
    AlignmentSquare,
    DataModule,
}

impl ModuleRole {
    pub fn is_finder_row(self) -> bool {
        matches!(self, Self::RowTop | Self::RowRight | Self::RowBottom | Self::RowLeft)
    }

    pub fn is_finder_corner(self) -> bool {
        matches!(
            self,
            Self::CornerTopLeft | Self::CornerTopRight | Self::CornerBottomLeft | Self::CornerBottomRight
        )
    }

    /// One character per role, used by the debug role map.
    pub fn symbol(self) -> char {
        match self {
            Self::RowTop => '^',
            Self::RowRight => '>',
            Self::RowBottom => 'v',
            Self::RowLeft => '<',
            Self::CornerTopLeft => 'F',
            Self::CornerTopRight => '7',
            Self::CornerBottomLeft => 'L',
            Self::CornerBottomRight => 'J',
            Self::AlignmentSquare => '#',
            Self::DataModule => 'o',
        }
    }
}

/// Thresholds of one finder ring, for both mirrored finder positions.
struct Ring {
    /// Modules on the top or left edge.
    near: [i32; 2],
    /// Modules on the bottom or right edge.
    far: [i32; 2],
    /// A coordinate is inside the ring's band if `<= reach_lo` or `>= reach_hi`.
    reach_lo: i32,
    reach_hi: i32,
}

impl Ring {
    /// `inset` is 0 for the outer 7x7 ring and 2 for the inner one.
    fn new(inset: i32, pixel_size: i32, box_size: i32) -> Self {
        let b = box_size;
        let reach = (7 - inset) * b;
        Self {
            near: [inset * b, pixel_size - reach],
            far: [(6 - inset) * b, pixel_size - (1 + inset) * b],
            reach_lo: reach,
            reach_hi: pixel_size - reach,
        }
    }

    fn in_band(&self, v: i32) -> bool {
        v <= self.reach_lo || v >= self.reach_hi
    }

    // Corners are tested before rows on the same edge.
    fn role(&self, x: i32, y: i32) -> Option<ModuleRole> {
        let near = |v: i32| self.near.contains(&v);
        let far = |v: i32| self.far.contains(&v);

        if self.in_band(x) && near(y) {
            return Some(if near(x) {
                ModuleRole::CornerTopLeft
            } else if far(x) {
                ModuleRole::CornerTopRight
            } else {
                ModuleRole::RowTop
            });
        }
        if self.in_band(x) && far(y) {
            return Some(if near(x) {
                ModuleRole::CornerBottomLeft
            } else if far(x) {
                ModuleRole::CornerBottomRight
            } else {
                ModuleRole::RowBottom
            });
        }
        if self.in_band(y) && near(x) {
            return Some(ModuleRole::RowLeft);
        }
        if self.in_band(y) && far(x) {
            return Some(ModuleRole::RowRight);
        }
        None
    }
}

/// True inside the bottom-right 7x7 area, where QR symbols have no finder.
pub fn in_ignored_finder_region(x: i32, y: i32, pixel_size: i32, box_size: i32) -> bool {
    let edge = pixel_size - 7 * box_size;
    x >= edge && y >= edge
}

/// Classifies the module whose box starts at `bounds`' top-left corner.
///
/// `pixel_size` is the symbol side in pixels and `box_size` the module side.
/// Checks run outer ring, inner ring, then center square; first match wins.
pub fn classify(bounds: Bounds, pixel_size: i32, box_size: i32) -> ModuleRole {
    let (x, y) = (bounds.x0, bounds.y0);
    if in_ignored_finder_region(x, y, pixel_size, box_size) {
        return ModuleRole::DataModule;
    }

    for inset in [0, 2] {
        if let Some(role) = Ring::new(inset, pixel_size, box_size).role(x, y) {
            return role;
        }
    }

    let center = 3 * box_size;
    let mirrored = pixel_size - 4 * box_size;
    if (x == center && y == center) || (x == mirrored && y == center) || (x == center && y == mirrored) {
        return ModuleRole::AlignmentSquare;
    }

    ModuleRole::DataModule
}

/// Classifies a canvas-space box, discounting the layout's border.
pub fn classify_in(layout: &Layout, bounds: Bounds) -> ModuleRole {
    let origin = layout.origin();
    classify(
        bounds.translate(-origin, -origin),
        layout.symbol_size() as i32,
        layout.box_size as i32,
    )
}
