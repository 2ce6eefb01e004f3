//! Paint colors
//!
//! Cells store an opaque sRGB color. Colors enter the editor as CSS-style
//! hex strings (`#rrggbb` or the short `#rgb` form) from the color input and
//! the config file, and leave it as RGBA pixels (export) or `iced::Color`
//! (on-screen canvas).

use std::fmt;
use std::str::FromStr;

/// An opaque 8-bit sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const RED: Color = Color::rgb(0xff, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb` (the leading `#` is optional)
    pub fn from_hex(input: &str) -> Option<Self> {
        let hex = input.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::rgb(r, g, b))
            }
            3 => {
                // Short form: each digit is doubled (#f80 == #ff8800)
                let mut channels = [0u8; 3];
                for (slot, c) in channels.iter_mut().zip(hex.chars()) {
                    let v = c.to_digit(16)? as u8;
                    *slot = v * 17;
                }
                Some(Self::rgb(channels[0], channels[1], channels[2]))
            }
            _ => None,
        }
    }

    /// Lowercase `#rrggbb`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Fully opaque RGBA pixel
    pub fn to_rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xff]
    }
}

impl Default for Color {
    /// Matches the default value of an HTML color input
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s).ok_or_else(|| format!("invalid color: {:?}", s))
    }
}

impl From<Color> for iced::Color {
    fn from(color: Color) -> Self {
        iced::Color::from_rgb8(color.r, color.g, color.b)
    }
}

/// Quick-pick swatches shown next to the hex input
pub const PALETTE: [Color; 12] = [
    Color::rgb(0x00, 0x00, 0x00),
    Color::rgb(0xff, 0xff, 0xff),
    Color::rgb(0xc9, 0x1a, 0x09), // brick red
    Color::rgb(0xf2, 0xcd, 0x37), // bright yellow
    Color::rgb(0x05, 0x59, 0xbf), // blue
    Color::rgb(0x23, 0x78, 0x41), // green
    Color::rgb(0xfe, 0x8a, 0x18), // orange
    Color::rgb(0x81, 0x00, 0x7b), // purple
    Color::rgb(0x58, 0x2a, 0x12), // reddish brown
    Color::rgb(0xa0, 0xa5, 0xa9), // light grey
    Color::rgb(0x6c, 0x6e, 0x68), // dark grey
    Color::rgb(0xe4, 0xad, 0xc8), // pink
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_hex() {
        assert_eq!(Color::from_hex("#ff0000"), Some(Color::RED));
        assert_eq!(Color::from_hex("1A2b3C"), Some(Color::rgb(0x1a, 0x2b, 0x3c)));
    }

    #[test]
    fn test_parse_short_hex() {
        assert_eq!(Color::from_hex("#f80"), Some(Color::rgb(0xff, 0x88, 0x00)));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(Color::from_hex(""), None);
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#gg0000"), None);
        assert_eq!(Color::from_hex("#ÿÿÿ"), None);
    }

    #[test]
    fn test_hex_is_lowercase() {
        assert_eq!(Color::rgb(0xAB, 0xCD, 0xEF).to_hex(), "#abcdef");
    }
}
