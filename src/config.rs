//! Rendering options.
//!
//! [`StyleOptions`] can be built in code or loaded from a TOML file. Every
//! field has a default, so a config file only needs the keys it overrides:
//!
//! ```toml
//! back_color = "transparent"
//! fill_color = "navy"
//! logo_path = "assets/logo.png"
//! box_size = 12
//! ```

use crate::error::{Result, StyleError};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

/// Default output format when neither the options nor the caller pick one.
pub const DEFAULT_KIND: &str = "PNG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOptions {
    /// Background color name, or `"transparent"` for an RGBA canvas.
    pub back_color: String,
    /// Color of the modules and finder patterns.
    pub fill_color: String,
    /// Image centered over the code on a background swatch.
    pub logo_path: Option<PathBuf>,
    /// Output format name (`"PNG"`, `"JPEG"`, ...). `None` means [`DEFAULT_KIND`].
    pub format: Option<String>,
    /// Encoder quality, used by lossy formats.
    pub quality: u8,
    /// Pixels per module.
    pub box_size: u32,
    /// Quiet zone around the symbol, in modules.
    pub border: u32,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            back_color: "white".to_string(),
            fill_color: "black".to_string(),
            logo_path: None,
            format: None,
            quality: 95,
            box_size: 10,
            border: 0,
        }
    }
}

impl StyleOptions {
    /// Parses options from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let options: Self = toml::from_str(content)
            .map_err(|e| StyleError::InvalidConfig(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Loads options from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            StyleError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// The format the image is encoded with when no override is given.
    pub fn kind(&self) -> &str {
        self.format.as_deref().unwrap_or(DEFAULT_KIND)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.box_size == 0 {
            return Err(StyleError::InvalidConfig("box_size must be at least 1".into()));
        }
        if self.quality == 0 || self.quality > 100 {
            return Err(StyleError::InvalidConfig(format!(
                "quality must be within 1..=100, got {}",
                self.quality
            )));
        }
        Ok(())
    }
}
