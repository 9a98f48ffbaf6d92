//! Menu style configuration.

use egui::Color32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::placement::DEFAULT_MARGIN;

/// Errors produced while loading a [`MenuStyle`].
#[derive(Debug, Error)]
pub enum StyleError {
    /// The TOML document could not be parsed.
    #[error("failed to parse menu style: {0}")]
    Parse(#[from] toml::de::Error),
    /// Viewport margin must be finite and not negative.
    #[error("invalid viewport margin {0}")]
    InvalidMargin(f32),
    /// Row height must be finite and positive.
    #[error("invalid item height {0}")]
    InvalidItemHeight(f32),
}

/// Visual configuration shared by every menu of a [`MenuHost`](crate::MenuHost).
///
/// All fields have defaults, so a style file only needs to list the values it
/// changes:
///
/// ```toml
/// margin = 16.0
/// item_height = 28.0
/// hover = [60, 60, 60, 255]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuStyle {
    /// Minimum distance between a menu and the viewport edges
    pub margin: f32,
    /// Height of a single row
    pub item_height: f32,
    /// Horizontal padding inside a row, also used as vertical container padding
    pub padding: f32,
    /// Font size of row text
    pub text_size: f32,
    /// Lower bound for size-to-content menus
    pub min_width: f32,
    /// Fill of the menu container
    pub background: Color32,
    /// Row text
    pub text: Color32,
    /// Text inside `<b>` and `<strong>`
    pub strong_text: Color32,
    /// Highlight behind the hovered row
    pub hover: Color32,
    /// Container outline
    pub border: Color32,
    /// Text inside `<a>`
    pub link: Color32,
}

impl Default for MenuStyle {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            item_height: 24.0,
            padding: 8.0,
            text_size: 14.0,
            min_width: 120.0,
            background: Color32::from_rgb(245, 245, 245),
            text: Color32::from_rgb(40, 40, 40),
            strong_text: Color32::BLACK,
            hover: Color32::from_rgb(220, 220, 220),
            border: Color32::from_rgb(200, 200, 200),
            link: Color32::from_rgb(0, 102, 204),
        }
    }
}

impl MenuStyle {
    /// Parse a style from a TOML document and validate it.
    pub fn from_toml_str(source: &str) -> Result<Self, StyleError> {
        let style: MenuStyle = toml::from_str(source)?;
        style.validate()?;
        Ok(style)
    }

    /// Reject values the placement and row layout cannot work with.
    pub fn validate(&self) -> Result<(), StyleError> {
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(StyleError::InvalidMargin(self.margin));
        }
        if !self.item_height.is_finite() || self.item_height <= 0.0 {
            return Err(StyleError::InvalidItemHeight(self.item_height));
        }
        Ok(())
    }

    /// Set the viewport margin
    ///
    /// # Arguments
    /// * `margin` - Distance in points kept from every viewport edge
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Set the row height
    pub fn with_item_height(mut self, height: f32) -> Self {
        self.item_height = height;
        self
    }

    /// Set the font size of row text
    pub fn with_text_size(mut self, size: f32) -> Self {
        self.text_size = size;
        self
    }

    /// Set the background color of the menu container
    pub fn with_background_color(mut self, color: Color32) -> Self {
        self.background = color;
        self
    }

    /// Set the color of row text
    pub fn with_text_color(mut self, color: Color32) -> Self {
        self.text = color;
        self
    }

    /// Set the highlight color of the hovered row
    pub fn with_hover_color(mut self, color: Color32) -> Self {
        self.hover = color;
        self
    }

    /// Set the border color of the menu container
    pub fn with_border_color(mut self, color: Color32) -> Self {
        self.border = color;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_standard_margin() {
        let style = MenuStyle::default();
        assert_eq!(style.margin, 32.0);
        assert!(style.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let style = MenuStyle::from_toml_str("margin = 16.0\nitem_height = 28.0\n").unwrap();
        assert_eq!(style.margin, 16.0);
        assert_eq!(style.item_height, 28.0);
        assert_eq!(style.padding, MenuStyle::default().padding);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            MenuStyle::from_toml_str("margin = -1.0"),
            Err(StyleError::InvalidMargin(_))
        ));
        assert!(matches!(
            MenuStyle::from_toml_str("item_height = 0.0"),
            Err(StyleError::InvalidItemHeight(_))
        ));
        assert!(matches!(
            MenuStyle::from_toml_str("margin = \"wide\""),
            Err(StyleError::Parse(_))
        ));
    }

    #[test]
    fn test_builder_setters() {
        let style = MenuStyle::default()
            .with_margin(4.0)
            .with_hover_color(Color32::RED);
        assert_eq!(style.margin, 4.0);
        assert_eq!(style.hover, Color32::RED);
    }
}
