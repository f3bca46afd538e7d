//! Animatable properties
//!
//! A closed set of property kinds with typed end values. Values are
//! validated when a [`PropertyMap`] is built, so targets never see an
//! out-of-range opacity or a malformed color.

use crate::error::{AnimationError, Result};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// Axis of a dimension property
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Width,
    Height,
}

/// Kind of property an animation can drive
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimatableProperty {
    Opacity,
    Translate,
    Scale,
    Rotation,
    Color,
    Dimension(Axis),
}

impl AnimatableProperty {
    pub const ALL: [AnimatableProperty; 7] = [
        AnimatableProperty::Opacity,
        AnimatableProperty::Translate,
        AnimatableProperty::Scale,
        AnimatableProperty::Rotation,
        AnimatableProperty::Color,
        AnimatableProperty::Dimension(Axis::Width),
        AnimatableProperty::Dimension(Axis::Height),
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AnimatableProperty::Opacity => "opacity",
            AnimatableProperty::Translate => "translate",
            AnimatableProperty::Scale => "scale",
            AnimatableProperty::Rotation => "rotation",
            AnimatableProperty::Color => "color",
            AnimatableProperty::Dimension(Axis::Width) => "width",
            AnimatableProperty::Dimension(Axis::Height) => "height",
        }
    }

    /// Parse a textual value for this property
    pub fn parse_value(&self, raw: &str) -> Result<PropertyValue> {
        let raw = raw.trim();
        let property = self.name();
        let value = match self {
            AnimatableProperty::Opacity => PropertyValue::Opacity(parse_number(property, raw)?),
            AnimatableProperty::Translate => {
                let mut parts = raw
                    .split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|part| !part.is_empty());
                let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
                    return Err(invalid(property, format!("expected `x, y`, got `{raw}`")));
                };
                PropertyValue::Translate {
                    x: parse_number(property, strip_unit(x, "px"))?,
                    y: parse_number(property, strip_unit(y, "px"))?,
                }
            }
            AnimatableProperty::Scale => PropertyValue::Scale(parse_number(property, raw)?),
            AnimatableProperty::Rotation => {
                PropertyValue::Rotation(parse_number(property, strip_unit(raw, "deg"))?)
            }
            AnimatableProperty::Color => PropertyValue::Color(raw.parse()?),
            AnimatableProperty::Dimension(axis) => PropertyValue::Dimension {
                axis: *axis,
                length: Length::parse(property, raw)?,
            },
        };
        value.validate()?;
        Ok(value)
    }
}

impl FromStr for AnimatableProperty {
    type Err = AnimationError;

    fn from_str(name: &str) -> Result<Self> {
        let name = name.trim();
        AnimatableProperty::ALL
            .into_iter()
            .find(|property| property.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| AnimationError::UnknownProperty(name.to_string()))
    }
}

impl fmt::Display for AnimatableProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 8-bit RGBA color
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl FromStr for Rgba {
    type Err = AnimationError;

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`
    fn from_str(raw: &str) -> Result<Self> {
        let hex = raw.trim().strip_prefix('#').unwrap_or(raw.trim());
        let bad = || invalid("color", format!("expected a hex color, got `{raw}`"));

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        let short = |i: usize| {
            u8::from_str_radix(&hex[i..i + 1], 16)
                .map(|v| v * 17)
                .map_err(|_| bad())
        };

        match hex.len() {
            3 => Ok(Rgba::rgb(short(0)?, short(1)?, short(2)?)),
            6 => Ok(Rgba::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Rgba::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(bad()),
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Length of a dimension property
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Px(f32),
    Percent(f32),
}

impl Length {
    fn parse(property: &'static str, raw: &str) -> Result<Self> {
        if let Some(percent) = raw.strip_suffix('%') {
            Ok(Length::Percent(parse_number(property, percent)?))
        } else {
            Ok(Length::Px(parse_number(property, strip_unit(raw, "px"))?))
        }
    }

    fn amount(&self) -> f32 {
        match self {
            Length::Px(v) | Length::Percent(v) => *v,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(v) => write!(f, "{v}px"),
            Length::Percent(v) => write!(f, "{v}%"),
        }
    }
}

/// End value for one animatable property
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PropertyValue {
    /// Opacity (0.0 to 1.0)
    Opacity(f32),
    /// Translation in pixels
    Translate { x: f32, y: f32 },
    /// Uniform scale factor
    Scale(f32),
    /// Rotation in degrees
    Rotation(f32),
    Color(Rgba),
    Dimension { axis: Axis, length: Length },
}

impl PropertyValue {
    pub fn property(&self) -> AnimatableProperty {
        match self {
            PropertyValue::Opacity(_) => AnimatableProperty::Opacity,
            PropertyValue::Translate { .. } => AnimatableProperty::Translate,
            PropertyValue::Scale(_) => AnimatableProperty::Scale,
            PropertyValue::Rotation(_) => AnimatableProperty::Rotation,
            PropertyValue::Color(_) => AnimatableProperty::Color,
            PropertyValue::Dimension { axis, .. } => AnimatableProperty::Dimension(*axis),
        }
    }

    fn validate(&self) -> Result<()> {
        let property = self.property().name();
        let finite = |v: f32| {
            if v.is_finite() {
                Ok(v)
            } else {
                Err(invalid(property, format!("{v} is not finite")))
            }
        };

        match *self {
            PropertyValue::Opacity(v) => {
                if !(0.0..=1.0).contains(&finite(v)?) {
                    return Err(invalid(property, format!("{v} is outside 0..=1")));
                }
            }
            PropertyValue::Translate { x, y } => {
                finite(x)?;
                finite(y)?;
            }
            PropertyValue::Scale(v) => {
                if finite(v)? < 0.0 {
                    return Err(invalid(property, format!("{v} is negative")));
                }
            }
            PropertyValue::Rotation(v) => {
                finite(v)?;
            }
            PropertyValue::Color(_) => {}
            PropertyValue::Dimension { length, .. } => {
                let v = finite(length.amount())?;
                if v < 0.0 {
                    return Err(invalid(property, format!("{length} is negative")));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Opacity(v) => write!(f, "{v}"),
            PropertyValue::Translate { x, y } => write!(f, "translate({x}px, {y}px)"),
            PropertyValue::Scale(v) => write!(f, "scale({v})"),
            PropertyValue::Rotation(v) => write!(f, "rotate({v}deg)"),
            PropertyValue::Color(c) => write!(f, "{c}"),
            PropertyValue::Dimension { length, .. } => write!(f, "{length}"),
        }
    }
}

/// Validated set of property end values
///
/// Holds at most one value per [`AnimatableProperty`], in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyMap {
    values: SmallVec<[PropertyValue; 4]>,
}

impl PropertyMap {
    pub fn builder() -> PropertyMapBuilder {
        PropertyMapBuilder::default()
    }

    /// Build from `(name, value)` string pairs
    ///
    /// Unknown names and malformed values are rejected.
    pub fn parse<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut map = PropertyMap::default();
        for (name, raw) in pairs {
            let property: AnimatableProperty = name.parse()?;
            map.insert(property.parse_value(raw)?);
        }
        Ok(map)
    }

    /// Map from constant values known to be in range
    pub(crate) fn from_trusted<I: IntoIterator<Item = PropertyValue>>(values: I) -> Self {
        let mut map = PropertyMap::default();
        for value in values {
            debug_assert!(value.validate().is_ok(), "{value:?}");
            map.insert(value);
        }
        map
    }

    pub fn get(&self, property: AnimatableProperty) -> Option<&PropertyValue> {
        self.values.iter().find(|v| v.property() == property)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyValue> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn insert(&mut self, value: PropertyValue) {
        let property = value.property();
        match self.values.iter_mut().find(|v| v.property() == property) {
            Some(existing) => *existing = value,
            None => self.values.push(value),
        }
    }
}

/// Builder for [`PropertyMap`]; validation runs in [`build`](Self::build)
#[derive(Clone, Debug, Default)]
pub struct PropertyMapBuilder {
    values: SmallVec<[PropertyValue; 4]>,
}

impl PropertyMapBuilder {
    pub fn value(mut self, value: PropertyValue) -> Self {
        self.values.push(value);
        self
    }

    pub fn opacity(self, value: f32) -> Self {
        self.value(PropertyValue::Opacity(value))
    }

    pub fn translate(self, x: f32, y: f32) -> Self {
        self.value(PropertyValue::Translate { x, y })
    }

    pub fn scale(self, value: f32) -> Self {
        self.value(PropertyValue::Scale(value))
    }

    pub fn rotation(self, degrees: f32) -> Self {
        self.value(PropertyValue::Rotation(degrees))
    }

    pub fn color(self, color: Rgba) -> Self {
        self.value(PropertyValue::Color(color))
    }

    pub fn width(self, length: Length) -> Self {
        self.value(PropertyValue::Dimension {
            axis: Axis::Width,
            length,
        })
    }

    pub fn height(self, length: Length) -> Self {
        self.value(PropertyValue::Dimension {
            axis: Axis::Height,
            length,
        })
    }

    pub fn build(self) -> Result<PropertyMap> {
        let mut map = PropertyMap::default();
        for value in self.values {
            value.validate()?;
            map.insert(value);
        }
        Ok(map)
    }
}

fn invalid(property: &'static str, reason: String) -> AnimationError {
    AnimationError::InvalidProperty { property, reason }
}

fn strip_unit<'a>(raw: &'a str, unit: &str) -> &'a str {
    raw.trim().strip_suffix(unit).unwrap_or(raw.trim())
}

fn parse_number(property: &'static str, raw: &str) -> Result<f32> {
    raw.trim()
        .parse::<f32>()
        .map_err(|_| invalid(property, format!("`{raw}` is not a number")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_validates() {
        let map = PropertyMap::builder()
            .opacity(1.0)
            .translate(0.0, -20.0)
            .scale(0.95)
            .build()
            .unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(
            map.get(AnimatableProperty::Translate),
            Some(&PropertyValue::Translate { x: 0.0, y: -20.0 })
        );

        assert!(matches!(
            PropertyMap::builder().opacity(1.5).build(),
            Err(AnimationError::InvalidProperty { property: "opacity", .. })
        ));
        assert!(PropertyMap::builder().scale(-1.0).build().is_err());
        assert!(PropertyMap::builder().rotation(f32::NAN).build().is_err());
        assert!(PropertyMap::builder().width(Length::Px(-4.0)).build().is_err());
    }

    #[test]
    fn test_later_value_replaces_earlier() {
        let map = PropertyMap::builder()
            .scale(0.96)
            .opacity(0.0)
            .scale(1.0)
            .build()
            .unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(AnimatableProperty::Scale), Some(&PropertyValue::Scale(1.0)));
        assert_eq!(map.iter().next(), Some(&PropertyValue::Scale(1.0)));
    }

    #[test]
    fn test_parse_pairs() {
        let map = PropertyMap::parse([
            ("opacity", "0.5"),
            ("translate", "0px, -20px"),
            ("rotation", "45deg"),
            ("color", "#ff8800"),
            ("width", "50%"),
            ("height", "120px"),
        ])
        .unwrap();

        assert_eq!(map.get(AnimatableProperty::Opacity), Some(&PropertyValue::Opacity(0.5)));
        assert_eq!(
            map.get(AnimatableProperty::Color),
            Some(&PropertyValue::Color(Rgba::rgb(0xff, 0x88, 0x00)))
        );
        assert_eq!(
            map.get(AnimatableProperty::Dimension(Axis::Width)),
            Some(&PropertyValue::Dimension {
                axis: Axis::Width,
                length: Length::Percent(50.0)
            })
        );
        assert_eq!(
            map.get(AnimatableProperty::Dimension(Axis::Height)).map(ToString::to_string),
            Some("120px".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_unknown_and_malformed() {
        assert_eq!(
            PropertyMap::parse([("transform", "scale(1)")]),
            Err(AnimationError::UnknownProperty("transform".to_string()))
        );
        assert!(PropertyMap::parse([("opacity", "half")]).is_err());
        assert!(PropertyMap::parse([("translate", "10px")]).is_err());
        assert!(PropertyMap::parse([("color", "#12345")]).is_err());
    }

    #[test]
    fn test_color_formats() {
        assert_eq!("#fff".parse::<Rgba>(), Ok(Rgba::rgb(255, 255, 255)));
        assert_eq!("00000080".parse::<Rgba>(), Ok(Rgba::rgba(0, 0, 0, 128)));
        assert_eq!(Rgba::rgba(0, 0, 0, 128).to_string(), "#00000080");
        assert_eq!(Rgba::rgb(18, 52, 86).to_string(), "#123456");
        assert!("#ggg".parse::<Rgba>().is_err());
    }

    #[test]
    fn test_value_display() {
        assert_eq!(
            PropertyValue::Translate { x: 0.0, y: -20.0 }.to_string(),
            "translate(0px, -20px)"
        );
        assert_eq!(PropertyValue::Scale(0.95).to_string(), "scale(0.95)");
        assert_eq!(PropertyValue::Rotation(90.0).to_string(), "rotate(90deg)");
    }
}
