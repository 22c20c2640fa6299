use serde::{Deserialize, Serialize};

use crate::{LookupError, Rgb};

/// The nearest named color reported by the color service for an RGB triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedColor {
    /// Display name, e.g. `Cobalt`.
    pub value: String,
    /// The exact color of the name, as `#RRGGBB`.
    pub closest_named_hex: String,
    /// Whether the queried color is exactly the named color.
    pub exact_match_name: bool,
    /// Distance between the queried color and the named color.
    pub distance: f64,
}

#[derive(Deserialize)]
struct IdResponse {
    name: NamedColor,
}

impl NamedColor {
    /// Decode the `name` field of a `/id` response body, ignoring other fields.
    pub fn from_json(body: &[u8]) -> Result<Self, LookupError> {
        let response: IdResponse = serde_json::from_slice(body)?;
        Ok(response.name)
    }

    /// The channels of the named color.
    pub fn closest_rgb(&self) -> Result<Rgb, LookupError> {
        Rgb::from_hex(&self.closest_named_hex)
    }

    /// The text shown for this result, with a marker appended for exact matches.
    pub fn display_text(&self) -> String {
        if self.exact_match_name {
            format!("{} 🎯", self.value)
        } else {
            self.value.clone()
        }
    }
}
