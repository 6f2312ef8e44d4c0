//! CSS colour strings <-> `Hsla`, palettes and the stroke darkening rule.

use crate::error::{ChartError, Result};
use gpui::{Hsla, Rgba};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Lightness multiplier used to derive a mark's stroke from its fill.
pub const DARKEN_FACTOR: f32 = 0.7;

const NAMED_COLORS: &[(&str, u32)] = &[
    ("steelblue", 0x4682b4),
    ("black", 0x000000),
    ("white", 0xffffff),
    ("red", 0xff0000),
    ("green", 0x008000),
    ("blue", 0x0000ff),
    ("orange", 0xffa500),
    ("purple", 0x800080),
    ("gray", 0x808080),
    ("grey", 0x808080),
    ("lightgray", 0xd3d3d3),
    ("darkgray", 0xa9a9a9),
    ("gold", 0xffd700),
    ("teal", 0x008080),
    ("crimson", 0xdc143c),
    ("tomato", 0xff6347),
];

pub fn steelblue() -> Hsla {
    gpui::rgb(0x4682b4).into()
}

/// Parses `#rgb`, `#rrggbb`, `#rrggbbaa` or a basic CSS colour name.
pub fn parse_color(text: &str) -> Result<Hsla> {
    let text = text.trim();
    if let Some(hex) = text.strip_prefix('#') {
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 | 8 => hex.to_string(),
            _ => return Err(ChartError::InvalidColor(text.to_string())),
        };
        let value = u32::from_str_radix(&expanded, 16)
            .map_err(|_| ChartError::InvalidColor(text.to_string()))?;
        let rgba = if expanded.len() == 8 {
            gpui::rgba(value)
        } else {
            gpui::rgb(value)
        };
        return Ok(rgba.into());
    }

    let lower = text.to_ascii_lowercase();
    if lower == "transparent" {
        return Ok(gpui::transparent_black());
    }
    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, hex)| gpui::rgb(*hex).into())
        .ok_or_else(|| ChartError::InvalidColor(text.to_string()))
}

/// Formats as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
pub fn to_hex(color: Hsla) -> String {
    let rgba: Rgba = color.into();
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    if rgba.a >= 1.0 {
        format!("#{:02x}{:02x}{:02x}", channel(rgba.r), channel(rgba.g), channel(rgba.b))
    } else {
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            channel(rgba.r),
            channel(rgba.g),
            channel(rgba.b),
            channel(rgba.a)
        )
    }
}

pub fn darker(color: Hsla) -> Hsla {
    Hsla {
        l: color.l * DARKEN_FACTOR,
        ..color
    }
}

/// Serde helpers for a single `Hsla` stored as a CSS string.
pub mod css_color {
    use super::*;

    pub fn serialize<S>(color: &Hsla, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&to_hex(*color))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Hsla, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        parse_color(&text).map_err(serde::de::Error::custom)
    }
}

/// Ordered fill colours indexed by a record's categorical bucket.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette(Vec<Hsla>);

impl Palette {
    /// An empty list falls back to the default single-entry palette.
    pub fn new(colors: Vec<Hsla>) -> Self {
        if colors.is_empty() {
            Self::default()
        } else {
            Self(colors)
        }
    }

    pub fn parse<S: AsRef<str>>(colors: &[S]) -> Result<Self> {
        let parsed = colors
            .iter()
            .map(|c| parse_color(c.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(parsed))
    }

    pub fn colors(&self) -> &[Hsla] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `palette[bucket]`, or `palette[0]` when the bucket is missing or out of range.
    pub fn resolve(&self, bucket: Option<usize>) -> Hsla {
        bucket
            .and_then(|i| self.0.get(i))
            .or_else(|| self.0.first())
            .copied()
            .unwrap_or_else(steelblue)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self(vec![steelblue()])
    }
}

impl Serialize for Palette {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.0.iter().map(|c| to_hex(*c)))
    }
}

impl<'de> Deserialize<'de> for Palette {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Vec::<String>::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(to_hex(parse_color("#4682b4").unwrap()), "#4682b4");
        assert_eq!(to_hex(parse_color("#fff").unwrap()), "#ffffff");
        assert_eq!(to_hex(parse_color("steelblue").unwrap()), "#4682b4");
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("not-a-color").is_err());
    }

    #[test]
    fn test_palette_fallback() {
        let palette = Palette::parse(&["red", "blue"]).unwrap();
        assert_eq!(palette.resolve(Some(1)), parse_color("blue").unwrap());
        assert_eq!(palette.resolve(Some(7)), parse_color("red").unwrap());
        assert_eq!(palette.resolve(None), parse_color("red").unwrap());
        assert_eq!(Palette::new(vec![]), Palette::default());
    }

    #[test]
    fn test_darker_keeps_hue() {
        let fill = steelblue();
        let stroke = darker(fill);
        assert_eq!(stroke.h, fill.h);
        assert!((stroke.l - fill.l * DARKEN_FACTOR).abs() < 1e-6);
    }
}
