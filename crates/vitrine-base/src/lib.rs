use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;

/// 24-bit RGB color, stored as `0xRRGGBB`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct AccentColor(u32);

impl AccentColor {
    pub const BLACK: Self = Self(0x000000);

    pub const fn from_hex(value: u32) -> Self {
        Self(value & 0x00ff_ffff)
    }

    pub const fn rgb(self) -> [u8; 3] {
        [
            ((self.0 >> 16) & 0xff) as u8,
            ((self.0 >> 8) & 0xff) as u8,
            (self.0 & 0xff) as u8,
        ]
    }

    pub fn scaled(self, factor: f64) -> Self {
        let [r, g, b] = self.rgb();
        let scale = |c: u8| (c as f64 * factor).clamp(0.0, 255.0) as u32;
        Self((scale(r) << 16) | (scale(g) << 8) | scale(b))
    }
}

impl Default for AccentColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl std::fmt::Display for AccentColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

impl FromStr for AccentColor {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let digits = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .unwrap_or(trimmed);
        if digits.len() != 6 {
            return Err(Error::InvalidColor(text.to_string()));
        }
        let value =
            u32::from_str_radix(digits, 16).map_err(|_| Error::InvalidColor(text.to_string()))?;
        Ok(Self(value))
    }
}

impl Serialize for AccentColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Number(u32),
    Text(String),
}

impl<'de> Deserialize<'de> for AccentColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match ColorRepr::deserialize(deserializer)? {
            ColorRepr::Number(value) if value <= 0x00ff_ffff => Ok(Self(value)),
            ColorRepr::Number(value) => Err(serde::de::Error::custom(format!(
                "color {value:#x} exceeds 24 bits"
            ))),
            ColorRepr::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid color: {0}")]
    InvalidColor(String),
}

pub type Result<T> = std::result::Result<T, Error>;
