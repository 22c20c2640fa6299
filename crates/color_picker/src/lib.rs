mod color;
mod color_picker;
mod error;
mod labeled_slider;
mod named_color;
mod provider;
mod settings;
mod state;

use gpui::App;

pub use color::{Channel, Rgb};
pub use color_picker::ColorPicker;
pub use error::LookupError;
pub use labeled_slider::LabeledSlider;
pub use named_color::NamedColor;
pub use provider::{ColorApiProvider, ColorNameProvider};
pub use settings::ColorPickerSettings;
pub use state::{ColorState, ColorStateEvent};

/// Initialize the color picker, installs the default [`ColorPickerSettings`] unless
/// they were already set.
///
/// This must be called after `gpui_component::init`.
pub fn init(cx: &mut App) {
    if !cx.has_global::<ColorPickerSettings>() {
        cx.set_global(ColorPickerSettings::default());
    }
}
