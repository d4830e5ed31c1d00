//! Display and behavior configuration for a text view.
//!
//! A [`TextViewConfig`] is an immutable snapshot: each render hands the text
//! view a complete new config instead of mutating individual options.
//!
//! # Example
//!
//! ```
//! use horizon_textview::{Autocorrection, Font, FontFamily, TextAlignment, TextViewConfig};
//!
//! let config = TextViewConfig::new()
//!     .with_placeholder("Enter name")
//!     .with_alignment(TextAlignment::Center)
//!     .with_font(Font::new(FontFamily::Name("Inter".into()), 15.0))
//!     .with_autocorrection(Autocorrection::Yes)
//!     .with_wait_until_commit(true);
//!
//! assert_eq!(config.placeholder.as_deref(), Some("Enter name"));
//! ```
//!
//! Configs can also be loaded from TOML; missing keys keep their defaults:
//!
//! ```
//! use horizon_textview::{TextAlignment, TextViewConfig};
//!
//! let config = TextViewConfig::from_toml_str(r#"
//! alignment = "right"
//! placeholder = "Notes"
//! "#).unwrap();
//!
//! assert_eq!(config.alignment, TextAlignment::Right);
//! assert!(config.editable);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::style::{Autocorrection, Color, Font, Padding, PlaceholderAlignment, TextAlignment};

/// Options forwarded to the native control and the placeholder overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextViewConfig {
    /// Alignment of the edited text.
    pub alignment: TextAlignment,
    /// Text shown while the value is empty. `None` disables the placeholder.
    pub placeholder: Option<String>,
    /// Line alignment of the placeholder text.
    pub placeholder_alignment: TextAlignment,
    /// Box alignment of the placeholder text block.
    pub placeholder_position: PlaceholderAlignment,
    pub text_color: Color,
    pub placeholder_color: Color,
    pub background_color: Color,
    pub autocorrection: Autocorrection,
    pub editable: bool,
    pub selectable: bool,
    /// Do not overwrite the control's text while an input method is composing.
    pub wait_until_commit: bool,
    pub placeholder_padding: Padding,
    /// `None` means the platform default font.
    pub font: Option<Font>,
}

impl Default for TextViewConfig {
    fn default() -> Self {
        Self {
            alignment: TextAlignment::Natural,
            placeholder: None,
            placeholder_alignment: TextAlignment::Natural,
            placeholder_position: PlaceholderAlignment::TopLeading,
            text_color: Color::BLACK,
            placeholder_color: Color::from_rgb8(160, 160, 160),
            background_color: Color::TRANSPARENT,
            autocorrection: Autocorrection::Default,
            editable: true,
            selectable: true,
            wait_until_commit: false,
            placeholder_padding: Padding::default(),
            font: None,
        }
    }
}

impl TextViewConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text.
    pub fn from_toml_str(toml: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(toml)?)
    }

    /// Load a config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(target: "horizon_textview::config", path = %path.display(), "loaded text view config");
        Ok(config)
    }

    /// Serialize the config to TOML text.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Write the config to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        let text = self.to_toml_string()?;
        std::fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_placeholder_alignment(mut self, alignment: TextAlignment) -> Self {
        self.placeholder_alignment = alignment;
        self
    }

    pub fn with_placeholder_position(mut self, position: PlaceholderAlignment) -> Self {
        self.placeholder_position = position;
        self
    }

    pub fn with_placeholder_padding(mut self, horizontal: f32, vertical: f32) -> Self {
        self.placeholder_padding = Padding::new(horizontal, vertical);
        self
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn with_placeholder_color(mut self, color: Color) -> Self {
        self.placeholder_color = color;
        self
    }

    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_autocorrection(mut self, autocorrection: Autocorrection) -> Self {
        self.autocorrection = autocorrection;
        self
    }

    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    pub fn with_wait_until_commit(mut self, wait: bool) -> Self {
        self.wait_until_commit = wait;
        self
    }
}
