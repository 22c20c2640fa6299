use std::time::Duration;

use gpui::{App, Global};

use crate::Rgb;

const DEFAULT_API_URL: &str = "https://www.thecolorapi.com";
const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// The settings for the color picker.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPickerSettings {
    /// The URL of the color naming service, default is [https://www.thecolorapi.com](https://www.thecolorapi.com/docs).
    pub api_url: String,
    /// The quiet period after the last channel change before a lookup is sent, default is 250ms.
    pub debounce: Duration,
}

impl Default for ColorPickerSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

impl Global for ColorPickerSettings {}

impl ColorPickerSettings {
    /// Returns the global settings, or the defaults if [`crate::init`] was not called.
    pub fn get(cx: &App) -> Self {
        cx.try_global::<Self>().cloned().unwrap_or_default()
    }

    /// The `/id` endpoint URL for the given color.
    pub fn lookup_url(&self, rgb: Rgb) -> String {
        format!("{}/id?rgb={}", self.api_url.trim_end_matches('/'), rgb.query())
    }
}
