use gpui::{
    App, Entity, InteractiveElement as _, IntoElement, ParentElement, RenderOnce, SharedString,
    Styled, Window, div, px,
};
use gpui_component::{
    ActiveTheme as _, h_flex,
    input::{InputState, NumberInput},
    label::Label,
    slider::{Slider, SliderState},
};

use crate::Channel;

/// A range slider and a number input bound to the same color channel.
///
/// The element holds no value, both controls render from their own states which
/// the owning view keeps in sync.
#[derive(IntoElement)]
pub struct LabeledSlider {
    channel: Channel,
    slider: Entity<SliderState>,
    input: Entity<InputState>,
}

impl LabeledSlider {
    pub fn new(channel: Channel, slider: &Entity<SliderState>, input: &Entity<InputState>) -> Self {
        Self {
            channel,
            slider: slider.clone(),
            input: input.clone(),
        }
    }

    /// Element id of the slider, e.g. `Red_range`.
    pub fn range_id(channel: Channel) -> SharedString {
        format!("{}_range", channel.label()).into()
    }

    /// Element id of the number input, e.g. `Red_number`.
    pub fn number_id(channel: Channel) -> SharedString {
        format!("{}_number", channel.label()).into()
    }
}

impl RenderOnce for LabeledSlider {
    fn render(self, _: &mut Window, cx: &mut App) -> impl IntoElement {
        let label = self.channel.label();

        h_flex()
            .gap_3()
            .items_center()
            .child(
                Label::new(format!("{}:", label))
                    .w(px(56.))
                    .text_color(cx.theme().muted_foreground),
            )
            .child(
                div()
                    .id(Self::range_id(self.channel))
                    .flex_1()
                    .child(Slider::new(&self.slider)),
            )
            .child(
                div()
                    .id(Self::number_id(self.channel))
                    .w(px(112.))
                    .child(NumberInput::new(&self.input)),
            )
    }
}
