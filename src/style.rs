/*!
 * Character style model.
 *
 * A `Style` is a plain value over the eight facets the host can set on a
 * character range. Two styles are the same style iff every facet is equal;
 * the facet order below is the canonical order used for display and probing.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// RGBA color, channels in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "default_alpha")]
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// A single fill layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Paint {
    Solid {
        color: Color,
        #[serde(default = "default_alpha")]
        opacity: f32,
    },
    Image {
        image_hash: String,
        #[serde(default = "default_alpha")]
        opacity: f32,
    },
}

impl Paint {
    pub fn solid(color: Color) -> Self {
        Paint::Solid { color, opacity: 1.0 }
    }
}

/// Font family plus style name ("Inter", "Bold")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontName {
    pub family: String,
    pub style: String,
}

impl FontName {
    pub fn new(family: &str, style: &str) -> Self {
        Self {
            family: family.to_string(),
            style: style.to_string(),
        }
    }
}

impl fmt::Display for FontName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.style)
    }
}

/// Unit of a length-like facet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Pixels,
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LetterSpacing {
    pub value: f32,
    #[serde(default)]
    pub unit: Unit,
}

impl Default for LetterSpacing {
    fn default() -> Self {
        Self { value: 0.0, unit: Unit::Percent }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LineHeight {
    #[default]
    Auto,
    Fixed {
        value: f32,
        #[serde(default)]
        unit: Unit,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    Strikethrough,
}

/// The eight style facets, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleFacet {
    Fills,
    FillStyleId,
    FontName,
    FontSize,
    LetterSpacing,
    LineHeight,
    TextDecoration,
    TextStyleId,
}

impl StyleFacet {
    pub const ALL: [StyleFacet; 8] = [
        StyleFacet::Fills,
        StyleFacet::FillStyleId,
        StyleFacet::FontName,
        StyleFacet::FontSize,
        StyleFacet::LetterSpacing,
        StyleFacet::LineHeight,
        StyleFacet::TextDecoration,
        StyleFacet::TextStyleId,
    ];
}

/// Character style over the eight facets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    #[serde(default)]
    pub fills: Vec<Paint>,
    /// Shared fill style reference, empty when none
    #[serde(default)]
    pub fill_style_id: String,
    pub font_name: FontName,
    pub font_size: f32,
    #[serde(default)]
    pub letter_spacing: LetterSpacing,
    #[serde(default)]
    pub line_height: LineHeight,
    #[serde(default)]
    pub text_decoration: TextDecoration,
    /// Shared text style reference, empty when none
    #[serde(default)]
    pub text_style_id: String,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fills: vec![Paint::solid(Color::BLACK)],
            fill_style_id: String::new(),
            font_name: FontName::new("Inter", "Regular"),
            font_size: 12.0,
            letter_spacing: LetterSpacing::default(),
            line_height: LineHeight::default(),
            text_decoration: TextDecoration::default(),
            text_style_id: String::new(),
        }
    }
}

impl Style {
    pub fn with_font(mut self, family: &str, style: &str) -> Self {
        self.font_name = FontName::new(family, style);
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_fill(mut self, color: Color) -> Self {
        self.fills = vec![Paint::solid(color)];
        self
    }

    pub fn with_decoration(mut self, decoration: TextDecoration) -> Self {
        self.text_decoration = decoration;
        self
    }

    pub fn with_text_style_id(mut self, id: &str) -> Self {
        self.text_style_id = id.to_string();
        self
    }

    /// Distinct styles in order of first occurrence
    pub fn distinct<'a, I>(styles: I) -> Vec<Style>
    where
        I: IntoIterator<Item = &'a Style>,
    {
        let mut distinct: Vec<Style> = Vec::new();
        for style in styles {
            if !distinct.contains(style) {
                distinct.push(style.clone());
            }
        }
        distinct
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}px", self.font_name, self.font_size)?;
        if self.text_decoration != TextDecoration::None {
            write!(f, " {:?}", self.text_decoration)?;
        }
        if let Some(Paint::Solid { color, .. }) = self.fills.first() {
            write!(
                f,
                " #{:02x}{:02x}{:02x}",
                channel(color.r),
                channel(color.g),
                channel(color.b)
            )?;
        }
        if !self.text_style_id.is_empty() {
            write!(f, " [{}]", self.text_style_id)?;
        }
        Ok(())
    }
}

/// Answer for one facet over a range
#[derive(Debug, Clone, PartialEq)]
pub enum Facet<T> {
    Uniform(T),
    Mixed,
}

impl<T: PartialEq + Clone> Facet<T> {
    /// Fold the value of every character in a range
    pub fn of<'a, I>(values: I) -> Facet<T>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut iter = values.into_iter();
        let Some(first) = iter.next() else {
            return Facet::Mixed;
        };
        if iter.all(|value| value == first) {
            Facet::Uniform(first.clone())
        } else {
            Facet::Mixed
        }
    }

    pub fn uniform(self) -> Option<T> {
        match self {
            Facet::Uniform(value) => Some(value),
            Facet::Mixed => None,
        }
    }

    pub fn is_mixed(&self) -> bool {
        matches!(self, Facet::Mixed)
    }
}

/// Per-facet result of a style query over a sub-range
#[derive(Debug, Clone, PartialEq)]
pub struct StyleProbe {
    pub fills: Facet<Vec<Paint>>,
    pub fill_style_id: Facet<String>,
    pub font_name: Facet<FontName>,
    pub font_size: Facet<f32>,
    pub letter_spacing: Facet<LetterSpacing>,
    pub line_height: Facet<LineHeight>,
    pub text_decoration: Facet<TextDecoration>,
    pub text_style_id: Facet<String>,
}

impl StyleProbe {
    /// Probe over the styles of each character of a range
    pub fn over(styles: &[Style]) -> Self {
        Self {
            fills: Facet::of(styles.iter().map(|s| &s.fills)),
            fill_style_id: Facet::of(styles.iter().map(|s| &s.fill_style_id)),
            font_name: Facet::of(styles.iter().map(|s| &s.font_name)),
            font_size: Facet::of(styles.iter().map(|s| &s.font_size)),
            letter_spacing: Facet::of(styles.iter().map(|s| &s.letter_spacing)),
            line_height: Facet::of(styles.iter().map(|s| &s.line_height)),
            text_decoration: Facet::of(styles.iter().map(|s| &s.text_decoration)),
            text_style_id: Facet::of(styles.iter().map(|s| &s.text_style_id)),
        }
    }

    /// Facets reported as mixed, in canonical order
    pub fn mixed_facets(&self) -> Vec<StyleFacet> {
        let flags = [
            self.fills.is_mixed(),
            self.fill_style_id.is_mixed(),
            self.font_name.is_mixed(),
            self.font_size.is_mixed(),
            self.letter_spacing.is_mixed(),
            self.line_height.is_mixed(),
            self.text_decoration.is_mixed(),
            self.text_style_id.is_mixed(),
        ];
        StyleFacet::ALL
            .iter()
            .zip(flags)
            .filter(|(_, mixed)| *mixed)
            .map(|(facet, _)| *facet)
            .collect()
    }

    /// The range's style, if no facet is mixed
    pub fn into_uniform(self) -> Option<Style> {
        Some(Style {
            fills: self.fills.uniform()?,
            fill_style_id: self.fill_style_id.uniform()?,
            font_name: self.font_name.uniform()?,
            font_size: self.font_size.uniform()?,
            letter_spacing: self.letter_spacing.uniform()?,
            line_height: self.line_height.uniform()?,
            text_decoration: self.text_decoration.uniform()?,
            text_style_id: self.text_style_id.uniform()?,
        })
    }
}

fn default_alpha() -> f32 {
    1.0
}

fn channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
