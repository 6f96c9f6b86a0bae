//! The standard Todoist color palette.
//!
//! Colors travel as plain numbers (30..=49) on the wire.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Color {
    BerryRed = 30,
    Red = 31,
    Orange = 32,
    Yellow = 33,
    OliveGreen = 34,
    LimeGreen = 35,
    Green = 36,
    MintGreen = 37,
    Teal = 38,
    SkyBlue = 39,
    LightBlue = 40,
    Blue = 41,
    Grape = 42,
    Violet = 43,
    Lavender = 44,
    Magenta = 45,
    Salmon = 46,
    Charcoal = 47,
    Grey = 48,
    Taupe = 49,
}

impl Color {
    pub const ALL: [Color; 20] = [
        Color::BerryRed,
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::OliveGreen,
        Color::LimeGreen,
        Color::Green,
        Color::MintGreen,
        Color::Teal,
        Color::SkyBlue,
        Color::LightBlue,
        Color::Blue,
        Color::Grape,
        Color::Violet,
        Color::Lavender,
        Color::Magenta,
        Color::Salmon,
        Color::Charcoal,
        Color::Grey,
        Color::Taupe,
    ];

    pub fn id(self) -> i64 {
        self as i64
    }

    pub fn hex(self) -> &'static str {
        match self {
            Color::BerryRed => "#b8256f",
            Color::Red => "#db4035",
            Color::Orange => "#ff9933",
            Color::Yellow => "#fad000",
            Color::OliveGreen => "#afb83b",
            Color::LimeGreen => "#7ecc49",
            Color::Green => "#299438",
            Color::MintGreen => "#6accbc",
            Color::Teal => "#158fad",
            Color::SkyBlue => "#14aaf5",
            Color::LightBlue => "#96c3eb",
            Color::Blue => "#4073ff",
            Color::Grape => "#884dff",
            Color::Violet => "#af38eb",
            Color::Lavender => "#eb96eb",
            Color::Magenta => "#e05194",
            Color::Salmon => "#ff8d85",
            Color::Charcoal => "#808080",
            Color::Grey => "#b8b8b8",
            Color::Taupe => "#ccac93",
        }
    }
}

impl From<Color> for i64 {
    fn from(color: Color) -> Self {
        color.id()
    }
}

impl TryFrom<i64> for Color {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Color::ALL
            .into_iter()
            .find(|c| c.id() == value)
            .ok_or_else(|| format!("unknown color id {value}"))
    }
}
