use derive_more::derive::{Display, Error};
use embedded_graphics::mono_font::{MonoFont, iso_8859_1};
use serde::Deserialize;

/// Names of the two built-in bitmap faces the board is drawn with
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub regular: String,
    pub bold: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            regular: "9x15".to_owned(),
            bold: "9x18_bold".to_owned(),
        }
    }
}

#[derive(Debug, Display, Error)]
#[display("Unknown font {name:?}")]
pub struct UnknownFont {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fonts {
    pub regular: FontFace,
    pub bold: FontFace,
}

impl Fonts {
    pub fn load(config: &FontConfig) -> Result<Self, UnknownFont> {
        Ok(Self {
            regular: FontFace::from_name(&config.regular)?,
            bold: FontFace::from_name(&config.bold)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    Font6x10,
    Font6x13,
    Font6x13Bold,
    Font7x13,
    Font7x13Bold,
    Font7x14,
    Font7x14Bold,
    Font8x13,
    Font8x13Bold,
    Font9x15,
    Font9x15Bold,
    Font9x18,
    Font9x18Bold,
    Font10x20,
}

impl FontFace {
    pub fn from_name(name: &str) -> Result<Self, UnknownFont> {
        let face = match name.trim().to_lowercase().as_str() {
            "6x10" => FontFace::Font6x10,
            "6x13" => FontFace::Font6x13,
            "6x13_bold" => FontFace::Font6x13Bold,
            "7x13" => FontFace::Font7x13,
            "7x13_bold" => FontFace::Font7x13Bold,
            "7x14" => FontFace::Font7x14,
            "7x14_bold" => FontFace::Font7x14Bold,
            "8x13" => FontFace::Font8x13,
            "8x13_bold" => FontFace::Font8x13Bold,
            "9x15" => FontFace::Font9x15,
            "9x15_bold" => FontFace::Font9x15Bold,
            "9x18" => FontFace::Font9x18,
            "9x18_bold" => FontFace::Font9x18Bold,
            "10x20" => FontFace::Font10x20,
            _ => {
                return Err(UnknownFont {
                    name: name.to_owned(),
                });
            }
        };

        Ok(face)
    }

    pub fn font(self) -> &'static MonoFont<'static> {
        match self {
            FontFace::Font6x10 => &iso_8859_1::FONT_6X10,
            FontFace::Font6x13 => &iso_8859_1::FONT_6X13,
            FontFace::Font6x13Bold => &iso_8859_1::FONT_6X13_BOLD,
            FontFace::Font7x13 => &iso_8859_1::FONT_7X13,
            FontFace::Font7x13Bold => &iso_8859_1::FONT_7X13_BOLD,
            FontFace::Font7x14 => &iso_8859_1::FONT_7X14,
            FontFace::Font7x14Bold => &iso_8859_1::FONT_7X14_BOLD,
            FontFace::Font8x13 => &iso_8859_1::FONT_8X13,
            FontFace::Font8x13Bold => &iso_8859_1::FONT_8X13_BOLD,
            FontFace::Font9x15 => &iso_8859_1::FONT_9X15,
            FontFace::Font9x15Bold => &iso_8859_1::FONT_9X15_BOLD,
            FontFace::Font9x18 => &iso_8859_1::FONT_9X18,
            FontFace::Font9x18Bold => &iso_8859_1::FONT_9X18_BOLD,
            FontFace::Font10x20 => &iso_8859_1::FONT_10X20,
        }
    }
}
