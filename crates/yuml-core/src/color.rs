//! Color handling for yUML diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, and the [`Fill`] applied to a node that declares a
//! `{bg:...}` decoration.
//!
//! Color names are resolved against the CSS named colors first, then against a
//! small table of Graphviz (X11) names that CSS does not know. The table is
//! built once on first use and never mutated afterwards.
//!
//! # Label contrast
//!
//! The luminance of a color is computed with the Rec. 709 coefficients on
//! 0-255 channels:
//!
//! ```text
//! L = 0.2126 * R + 0.7152 * G + 0.0722 * B
//! ```
//!
//! Fills with `L < 128` get white label text, all others get black.

use std::{
    collections::HashMap,
    fmt,
    str::FromStr,
    sync::OnceLock,
};

use color::{DynamicColor, Srgb};
use log::warn;
use thiserror::Error;

/// Luminance below which a fill is considered dark.
pub const DARK_LUMINANCE_THRESHOLD: f32 = 128.0;

/// Graphviz color names missing from the CSS color list, as hex triples.
static X11_COLORS: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

fn x11_colors() -> &'static HashMap<&'static str, &'static str> {
    X11_COLORS.get_or_init(|| {
        HashMap::from([
            ("lightgoldenrod", "#eedd82"),
            ("navyblue", "#000080"),
            ("violetred", "#d02090"),
            ("lightslateblue", "#8470ff"),
            ("webgray", "#808080"),
            ("webgreen", "#008000"),
            ("webmaroon", "#800000"),
            ("webpurple", "#800080"),
        ])
    })
}

/// Error returned when a color specification cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{spec}`")]
pub struct ColorError {
    spec: String,
}

/// Label text color chosen to contrast with a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColor {
    White,
    Black,
}

impl TextColor {
    /// Returns the Graphviz color name.
    pub fn as_str(self) -> &'static str {
        match self {
            TextColor::White => "white",
            TextColor::Black => "black",
        }
    }
}

impl fmt::Display for TextColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wrapper around the `DynamicColor` type from the color crate.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a yUML color specification.
    ///
    /// Accepts `#rrggbb` hex triples, CSS color names and a few Graphviz-only
    /// names. Gray levels such as `gray40` or `grey75` are understood as well.
    /// Names are case-insensitive.
    ///
    /// # Examples
    ///
    /// ```
    /// use yuml_core::color::Color;
    ///
    /// let orange = Color::new("orange").unwrap();
    /// assert_eq!(orange.to_hex(), "#FFA500");
    ///
    /// let navy = Color::new("NavyBlue").unwrap();
    /// assert_eq!(navy.to_hex(), "#000080");
    /// ```
    pub fn new(spec: &str) -> Result<Self, ColorError> {
        let name = spec.trim().to_ascii_lowercase();
        let invalid = || ColorError {
            spec: spec.to_string(),
        };

        if let Ok(color) = DynamicColor::from_str(&name) {
            return Ok(Self { color });
        }

        let hex = match x11_colors().get(name.as_str()) {
            Some(hex) => (*hex).to_string(),
            None => gray_level(&name).ok_or_else(invalid)?,
        };

        DynamicColor::from_str(&hex)
            .map(|color| Self { color })
            .map_err(|_| invalid())
    }

    /// Returns the 8-bit sRGB channels of this color.
    pub fn rgb8(&self) -> [u8; 3] {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        [rgba.r, rgba.g, rgba.b]
    }

    /// Returns the color as an uppercase `#RRGGBB` string.
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.rgb8();
        format!("#{r:02X}{g:02X}{b:02X}")
    }

    /// Returns the Rec. 709 luminance on a 0-255 scale.
    pub fn luminance(&self) -> f32 {
        let [r, g, b] = self.rgb8();
        0.2126 * f32::from(r) + 0.7152 * f32::from(g) + 0.0722 * f32::from(b)
    }

    /// Returns `true` when labels drawn on this color should be white.
    pub fn is_dark(&self) -> bool {
        self.luminance() < DARK_LUMINANCE_THRESHOLD
    }

    /// Returns the label text color that contrasts with this color.
    pub fn contrasting_text(&self) -> TextColor {
        if self.is_dark() {
            TextColor::White
        } else {
            TextColor::Black
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Resolves X11 gray levels (`gray0` to `gray100`, also spelled `grey`).
fn gray_level(name: &str) -> Option<String> {
    let level = name
        .strip_prefix("gray")
        .or_else(|| name.strip_prefix("grey"))?
        .parse::<u8>()
        .ok()
        .filter(|level| *level <= 100)?;
    let value = (f32::from(level) * 2.55).round() as u8;
    Some(format!("#{value:02x}{value:02x}{value:02x}"))
}

/// Background fill of a node together with its label color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fill {
    color: String,
    text: Option<TextColor>,
}

impl Fill {
    /// Resolves a `{bg:...}` color specification into a fill.
    ///
    /// Unknown names are passed through verbatim so that the layout engine can
    /// still try them; no label color is derived for those.
    pub fn from_spec(spec: &str) -> Self {
        match Color::new(spec) {
            Ok(color) => Self {
                color: color.to_hex(),
                text: Some(color.contrasting_text()),
            },
            Err(err) => {
                warn!(spec; "{err}, passing it through unresolved");
                Self {
                    color: spec.trim().to_string(),
                    text: None,
                }
            }
        }
    }

    /// Returns the fill color as written to the graph description.
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Returns the contrasting label color, if the fill could be resolved.
    pub fn text_color(&self) -> Option<TextColor> {
        self.text
    }
}
