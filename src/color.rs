//! Color name resolution.
//!
//! Values go through `csscolorparser`, so every CSS color name is accepted
//! along with hex (`#rgb`, `#rrggbb`, `#rrggbbaa`) and `rgb()`/`hsl()` forms.
//! Matching is case-insensitive.

use crate::error::{Result, StyleError};

/// Background value that selects an alpha canvas with a fully clear fill.
pub const TRANSPARENT: &str = "transparent";

/// Resolves a color value to RGBA. `"transparent"` is only valid as a background.
pub fn parse_color(value: &str) -> Result<[u8; 4]> {
    let name = value.trim().to_ascii_lowercase();
    if name == TRANSPARENT {
        return Err(StyleError::InvalidConfig(format!(
            "{:?} is only allowed as a background color",
            value
        )));
    }
    csscolorparser::parse(&name)
        .map(|color| color.to_rgba8())
        .map_err(|e| StyleError::InvalidConfig(format!("unknown color {:?}: {}", value, e)))
}

/// Resolves a background value. `"transparent"` yields `None`.
pub fn parse_background(value: &str) -> Result<Option<[u8; 4]>> {
    if value.trim().eq_ignore_ascii_case(TRANSPARENT) {
        return Ok(None);
    }
    parse_color(value).map(Some)
}
