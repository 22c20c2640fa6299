use std::fmt;

use gpui::{Hsla, Rgba};

use crate::LookupError;

/// One of the three channels of an RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// The label shown next to the channel controls, also used as the element id prefix.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Blue => "Blue",
        }
    }

    /// Parse the text of a channel control as a base-10 integer clamped to `0..=255`.
    ///
    /// Returns `None` for empty or non-numeric text.
    pub fn parse_value(text: &str) -> Option<u8> {
        let value = text.trim().parse::<i64>().ok()?;
        Some(value.clamp(0, u8::MAX as i64) as u8)
    }

    /// Convert a slider position to a channel value.
    pub fn slider_value(value: f32) -> u8 {
        value.round().clamp(0., u8::MAX as f32) as u8
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A color triple, each channel in `0..=255`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    pub fn channel(&self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
        }
    }

    /// Return a copy with one channel replaced.
    pub fn with_channel(mut self, channel: Channel, value: u8) -> Self {
        match channel {
            Channel::Red => self.red = value,
            Channel::Green => self.green = value,
            Channel::Blue => self.blue = value,
        }
        self
    }

    /// Decode a `#RRGGBB` string, each pair parsed as base-16.
    pub fn from_hex(input: &str) -> Result<Self, LookupError> {
        let invalid = || LookupError::InvalidHex(input.to_string());

        let value = input.trim().strip_prefix('#').ok_or_else(invalid)?;
        if value.len() != 6 || !value.is_ascii() {
            return Err(invalid());
        }

        let parse = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&value[range], 16).map_err(|_| invalid())
        };

        Ok(Self {
            red: parse(0..2)?,
            green: parse(2..4)?,
            blue: parse(4..6)?,
        })
    }

    /// The triple as sent in the `rgb` query parameter, e.g. `(0,71,171)`.
    pub fn query(&self) -> String {
        format!("({},{},{})", self.red, self.green, self.blue)
    }
}

/// Formats as a CSS color, e.g. `rgb(0, 71, 171)`.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.red, self.green, self.blue)
    }
}

impl From<Rgb> for Rgba {
    fn from(rgb: Rgb) -> Self {
        Rgba {
            r: rgb.red as f32 / 255.0,
            g: rgb.green as f32 / 255.0,
            b: rgb.blue as f32 / 255.0,
            a: 1.0,
        }
    }
}

impl From<Rgb> for Hsla {
    fn from(rgb: Rgb) -> Self {
        Rgba::from(rgb).into()
    }
}
