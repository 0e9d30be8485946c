//! Cell style descriptors
//!
//! A [`StyleDescriptor`] is a plain value describing borders, fill, font,
//! alignment and number format of a cell. Descriptors are hashable so a
//! workbook-scoped registry can hand out one handle per distinct descriptor.
//!
//! Colors are validated when they are constructed ([`Color::from_hex`]), so a
//! descriptor can never carry a malformed color into the serializer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ReportError;

/// Largest font size Excel accepts, in points
const MAX_FONT_SIZE: u16 = 409;

// ============================================================================
// Color
// ============================================================================

/// Invalid color literal
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("empty color")]
    Empty,

    #[error("'{0}' is not a 6-digit hex color")]
    Malformed(String),
}

/// 24-bit RGB color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const WHITE: Color = Color(0xFFFFFF);

    /// Build a color from a packed `0xRRGGBB` value
    pub const fn rgb(value: u32) -> Self {
        Self(value & 0x00FF_FFFF)
    }

    /// Parse `#RRGGBB` or `RRGGBB` (case-insensitive)
    pub fn from_hex(raw: &str) -> Result<Self, ColorError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ColorError::Empty);
        }
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::Malformed(raw.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| ColorError::Malformed(raw.to_string()))
    }

    /// Packed `0xRRGGBB` value
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

// ============================================================================
// Borders
// ============================================================================

/// Border line weight
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderLine {
    Thin,
    Medium,
}

/// One side of a cell border
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BorderEdge {
    pub line: BorderLine,
    pub color: Color,
}

impl BorderEdge {
    pub const fn thin(color: Color) -> Self {
        Self {
            line: BorderLine::Thin,
            color,
        }
    }

    pub const fn medium(color: Color) -> Self {
        Self {
            line: BorderLine::Medium,
            color,
        }
    }
}

/// Borders per side; `None` leaves the side undrawn
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BorderSet {
    pub left: Option<BorderEdge>,
    pub right: Option<BorderEdge>,
    pub top: Option<BorderEdge>,
    pub bottom: Option<BorderEdge>,
}

impl BorderSet {
    /// Same edge on all four sides
    pub const fn all(edge: BorderEdge) -> Self {
        Self {
            left: Some(edge),
            right: Some(edge),
            top: Some(edge),
            bottom: Some(edge),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none() && self.top.is_none() && self.bottom.is_none()
    }
}

// ============================================================================
// Font & Alignment
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontSpec {
    pub color: Option<Color>,
    #[serde(default)]
    pub bold: bool,
    /// Size in points
    pub size: Option<u16>,
    pub family: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Alignment {
    pub horizontal: Option<HAlign>,
    pub vertical: Option<VAlign>,
    #[serde(default)]
    pub wrap: bool,
}

// ============================================================================
// Style Descriptor
// ============================================================================

/// Complete formatting of a cell
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyleDescriptor {
    #[serde(default)]
    pub borders: BorderSet,
    /// Solid pattern fill
    pub fill: Option<Color>,
    pub font: Option<FontSpec>,
    pub alignment: Option<Alignment>,
    /// Excel number format code, e.g. `#,##0`
    pub num_format: Option<String>,
}

impl StyleDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the border set
    pub fn borders(mut self, borders: BorderSet) -> Self {
        self.borders = borders;
        self
    }

    /// Set a solid background fill
    pub fn fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn font_color(mut self, color: Color) -> Self {
        self.font.get_or_insert_with(FontSpec::default).color = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.font.get_or_insert_with(FontSpec::default).bold = true;
        self
    }

    pub fn font_size(mut self, size: u16) -> Self {
        self.font.get_or_insert_with(FontSpec::default).size = Some(size);
        self
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font.get_or_insert_with(FontSpec::default).family = Some(family.into());
        self
    }

    pub fn align(mut self, horizontal: HAlign) -> Self {
        self.alignment.get_or_insert_with(Alignment::default).horizontal = Some(horizontal);
        self
    }

    pub fn valign(mut self, vertical: VAlign) -> Self {
        self.alignment.get_or_insert_with(Alignment::default).vertical = Some(vertical);
        self
    }

    /// Center both horizontally and vertically
    pub fn centered(self) -> Self {
        self.align(HAlign::Center).valign(VAlign::Center)
    }

    pub fn wrap(mut self) -> Self {
        self.alignment.get_or_insert_with(Alignment::default).wrap = true;
        self
    }

    pub fn num_format(mut self, format: impl Into<String>) -> Self {
        self.num_format = Some(format.into());
        self
    }

    /// True when the descriptor carries no formatting at all
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    /// Reject descriptors Excel cannot represent
    pub fn validate(&self) -> Result<(), ReportError> {
        if let Some(font) = &self.font {
            if let Some(size) = font.size {
                if size == 0 || size > MAX_FONT_SIZE {
                    return Err(ReportError::InvalidStyle(format!(
                        "font size {} outside 1..={}",
                        size, MAX_FONT_SIZE
                    )));
                }
            }
            if font.family.as_deref().is_some_and(|f| f.trim().is_empty()) {
                return Err(ReportError::InvalidStyle("empty font family".into()));
            }
        }
        if self.num_format.as_deref().is_some_and(|f| f.trim().is_empty()) {
            return Err(ReportError::InvalidStyle("empty number format".into()));
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Shared presets
    // ------------------------------------------------------------------------

    /// Report header: blue fill, white bold 12pt, black thin borders, centered
    pub fn header() -> Self {
        Self::new()
            .fill(Color::rgb(0x4F81BD))
            .bold()
            .font_size(12)
            .font_color(Color::WHITE)
            .borders(BorderSet::all(BorderEdge::thin(Color::BLACK)))
            .centered()
    }

    /// Bordered data region
    pub fn data_region() -> Self {
        Self::new().borders(BorderSet::all(BorderEdge::thin(Color::BLACK)))
    }

    /// Solid divider used for the spacer column of a vertical split
    pub fn divider() -> Self {
        Self::new().fill(Color::BLACK).borders(BorderSet {
            bottom: Some(BorderEdge::medium(Color::WHITE)),
            ..BorderSet::default()
        })
    }

    /// Category separator row: black fill, white bold text, centered
    pub fn separator() -> Self {
        Self::new()
            .fill(Color::BLACK)
            .bold()
            .font_color(Color::WHITE)
            .centered()
            .borders(BorderSet::all(BorderEdge::thin(Color::BLACK)))
    }
}
