//! RGB colors and the named color table used by borders.
use crate::error::{GeometryError, Result};

/// An RGB triple with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const NAMED: [(&str, Rgb); 12] = [
    ("black", Rgb::new(0, 0, 0)),
    ("grey", Rgb::new(128, 128, 128)),
    ("grey-75%", Rgb::new(192, 192, 192)),
    ("grey-50%", Rgb::new(128, 128, 128)),
    ("grey-25%", Rgb::new(64, 64, 64)),
    ("white", Rgb::new(255, 255, 255)),
    ("red", Rgb::new(255, 0, 0)),
    ("green", Rgb::new(0, 255, 0)),
    ("blue", Rgb::new(0, 0, 255)),
    ("yellow", Rgb::new(255, 255, 0)),
    ("cyan", Rgb::new(0, 255, 255)),
    ("magenta", Rgb::new(255, 0, 255)),
];

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from wide integers; every channel must lie in 0..=255.
    pub fn from_channels(r: i64, g: i64, b: i64) -> Result<Self> {
        Ok(Self::new(channel(r)?, channel(g)?, channel(b)?))
    }

    /// Look a color up by name.
    pub fn named(name: &str) -> Result<Self> {
        NAMED
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, rgb)| *rgb)
            .ok_or_else(|| GeometryError::value_error(format!("unknown color name `{name}`")))
    }

    /// Names accepted by [`Rgb::named`], in table order.
    pub fn names() -> impl Iterator<Item = &'static str> {
        NAMED.iter().map(|(name, _)| *name)
    }
}

fn channel(value: i64) -> Result<u8> {
    u8::try_from(value).map_err(|_| {
        GeometryError::value_error(format!(
            "color channels range from 0 to 255, got {value}"
        ))
    })
}

/// Color input accepted by border constructors, resolved on use.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorSpec {
    Named(String),
    Channels([i64; 3]),
    Rgb(Rgb),
}

impl ColorSpec {
    pub fn resolve(&self) -> Result<Rgb> {
        match self {
            ColorSpec::Named(name) => Rgb::named(name),
            ColorSpec::Channels([r, g, b]) => Rgb::from_channels(*r, *g, *b),
            ColorSpec::Rgb(rgb) => Ok(*rgb),
        }
    }
}

impl From<&str> for ColorSpec {
    fn from(name: &str) -> Self {
        ColorSpec::Named(name.to_owned())
    }
}

impl From<String> for ColorSpec {
    fn from(name: String) -> Self {
        ColorSpec::Named(name)
    }
}

impl From<[i64; 3]> for ColorSpec {
    fn from(channels: [i64; 3]) -> Self {
        ColorSpec::Channels(channels)
    }
}

impl From<(i64, i64, i64)> for ColorSpec {
    fn from((r, g, b): (i64, i64, i64)) -> Self {
        ColorSpec::Channels([r, g, b])
    }
}

impl From<Rgb> for ColorSpec {
    fn from(rgb: Rgb) -> Self {
        ColorSpec::Rgb(rgb)
    }
}
