use std::rc::Rc;

use gpui::{
    App, AppContext as _, ClickEvent, Context, Entity, Hsla, InteractiveElement as _, IntoElement,
    ParentElement, Render, Styled, Subscription, Window, div, prelude::FluentBuilder as _, px,
};
use gpui_component::{
    ActiveTheme as _, Sizable as _,
    button::{Button, ButtonVariants as _},
    h_flex,
    input::{InputEvent, InputState, NumberInputEvent, StepAction},
    label::Label,
    slider::{SliderEvent, SliderState},
    v_flex,
};

use crate::{
    Channel, ColorApiProvider, ColorNameProvider, ColorPickerSettings, ColorState,
    ColorStateEvent, LabeledSlider, Rgb,
};

struct ChannelControls {
    channel: Channel,
    slider: Entity<SliderState>,
    input: Entity<InputState>,
}

impl ChannelControls {
    fn sync(&self, value: u8, window: &mut Window, cx: &mut App) {
        if Channel::slider_value(self.slider.read(cx).value().start()) != value {
            self.slider
                .update(cx, |slider, cx| slider.set_value(value as f32, window, cx));
        }
        if self.input.read(cx).value().as_ref() != value.to_string() {
            self.input
                .update(cx, |input, cx| input.set_value(value.to_string(), window, cx));
        }
    }
}

/// Three RGB channel controls, a swatch of the picked color and its nearest color name.
pub struct ColorPicker {
    state: Entity<ColorState>,
    channels: Vec<ChannelControls>,
    _subscriptions: Vec<Subscription>,
}

impl ColorPicker {
    pub fn view(window: &mut Window, cx: &mut App) -> Entity<Self> {
        cx.new(|cx| Self::new(window, cx))
    }

    /// Create a picker looking up names from the configured color service.
    pub fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
        let provider = Rc::new(ColorApiProvider::new(ColorPickerSettings::get(cx)));
        Self::with_provider(provider, window, cx)
    }

    pub fn with_provider(
        provider: Rc<dyn ColorNameProvider>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let debounce = ColorPickerSettings::get(cx).debounce;
        let state = cx.new(|cx| ColorState::new(provider, debounce, cx));

        let mut _subscriptions = vec![cx.subscribe_in(&state, window, Self::on_state_event)];
        let channels = Channel::ALL
            .into_iter()
            .map(|channel| {
                let slider = cx.new(|_| {
                    SliderState::new()
                        .min(0.)
                        .max(255.)
                        .step(1.)
                        .default_value(0.)
                });
                let input = cx.new(|cx| InputState::new(window, cx).default_value("0"));

                _subscriptions.push(cx.subscribe_in(
                    &slider,
                    window,
                    move |this, _, event: &SliderEvent, _, cx| match event {
                        SliderEvent::Change(value) => {
                            this.set_channel(channel, Channel::slider_value(value.start()), cx)
                        }
                    },
                ));
                _subscriptions.push(cx.subscribe_in(
                    &input,
                    window,
                    move |this, input, event: &InputEvent, window, cx| match event {
                        InputEvent::Change { .. } => {
                            let text = input.read(cx).value();
                            if let Some(value) = Channel::parse_value(&text) {
                                this.set_channel(channel, value, cx);
                            }
                        }
                        // Show the channel value again after e.g. "07" or an empty field.
                        InputEvent::Blur => this.sync_channel(channel, window, cx),
                        _ => {}
                    },
                ));
                _subscriptions.push(cx.subscribe_in(
                    &input,
                    window,
                    move |this, _, event: &NumberInputEvent, _, cx| match event {
                        NumberInputEvent::Step(action) => {
                            let value = this.state.read(cx).channel(channel);
                            let value = if *action == StepAction::Increment {
                                value.saturating_add(1)
                            } else {
                                value.saturating_sub(1)
                            };
                            this.set_channel(channel, value, cx);
                        }
                    },
                ));

                ChannelControls {
                    channel,
                    slider,
                    input,
                }
            })
            .collect();

        Self {
            state,
            channels,
            _subscriptions,
        }
    }

    pub fn state(&self) -> &Entity<ColorState> {
        &self.state
    }

    fn set_channel(&mut self, channel: Channel, value: u8, cx: &mut Context<Self>) {
        // Controls echo back the values they were synced to.
        if self.state.read(cx).channel(channel) == value {
            return;
        }

        self.state
            .update(cx, |state, cx| state.set_channel(channel, value, cx));
    }

    fn on_state_event(
        &mut self,
        _: &Entity<ColorState>,
        event: &ColorStateEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        match event {
            ColorStateEvent::Change(rgb) => self.sync_controls(*rgb, window, cx),
            ColorStateEvent::Named(_) => cx.notify(),
        }
    }

    /// Bring every control to the value of its channel in `rgb`.
    fn sync_controls(&mut self, rgb: Rgb, window: &mut Window, cx: &mut Context<Self>) {
        for controls in &self.channels {
            controls.sync(rgb.channel(controls.channel), window, cx);
        }
        cx.notify();
    }

    fn sync_channel(&mut self, channel: Channel, window: &mut Window, cx: &mut Context<Self>) {
        let value = self.state.read(cx).channel(channel);
        if let Some(controls) = self.channels.iter().find(|c| c.channel == channel) {
            controls.sync(value, window, cx);
        }
    }

    fn switch_to_exact_match(&mut self, cx: &mut Context<Self>) {
        let result = self
            .state
            .update(cx, |state, cx| state.switch_to_exact_match(cx));
        if let Err(err) = result {
            tracing::warn!("failed to switch to exact match: {}", err);
        }
    }

    /// The `Switch` button, only offered while the name is not an exact match.
    fn render_switch(&self, cx: &Context<Self>) -> Option<Button> {
        if !self.state.read(cx).show_switch_action() {
            return None;
        }

        Some(
            Button::new("switch-exact-match")
                .label("Switch")
                .primary()
                .small()
                .on_click(cx.listener(|this, _: &ClickEvent, _, cx| {
                    this.switch_to_exact_match(cx)
                })),
        )
    }

    fn render_name(&self, cx: &Context<Self>) -> impl IntoElement {
        h_flex()
            .id("named-color")
            .gap_3()
            .items_center()
            .min_h(px(32.))
            .when_some(self.state.read(cx).display_name(), |this, name| {
                this.child(Label::new(name))
            })
            .children(self.render_switch(cx))
    }
}

impl Render for ColorPicker {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let rgb = self.state.read(cx).rgb();
        let theme = cx.theme();

        v_flex()
            .size_full()
            .gap_4()
            .p_4()
            .child(
                div()
                    .id("swatch")
                    .w_full()
                    .h(px(120.))
                    .rounded(theme.radius)
                    .border_1()
                    .border_color(theme.border)
                    .bg(Hsla::from(rgb)),
            )
            .child(
                Label::new(rgb.to_string())
                    .text_sm()
                    .text_color(theme.muted_foreground),
            )
            .children(
                self.channels
                    .iter()
                    .map(|controls| {
                        LabeledSlider::new(controls.channel, &controls.slider, &controls.input)
                    }),
            )
            .child(self.render_name(cx))
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, time::Duration};

    use gpui::{Task, TestAppContext, VisualTestContext};

    use super::*;
    use crate::{LookupError, NamedColor};

    const COBALT: Rgb = Rgb {
        red: 0,
        green: 71,
        blue: 171,
    };

    /// Names every color "Cobalt", exact only for the cobalt triple itself.
    #[derive(Default)]
    struct CobaltProvider {
        calls: RefCell<Vec<Rgb>>,
    }

    impl ColorNameProvider for CobaltProvider {
        fn lookup(&self, rgb: Rgb, _: &mut App) -> Task<Result<NamedColor, LookupError>> {
            self.calls.borrow_mut().push(rgb);
            Task::ready(Ok(NamedColor {
                value: "Cobalt".into(),
                closest_named_hex: "#0047AB".into(),
                exact_match_name: rgb == COBALT,
                distance: 0.,
            }))
        }
    }

    fn build(
        cx: &mut TestAppContext,
    ) -> (Rc<CobaltProvider>, Entity<ColorPicker>, &mut VisualTestContext) {
        cx.update(gpui_component::init);

        let provider = Rc::new(CobaltProvider::default());
        let fake = provider.clone();
        let (picker, cx) =
            cx.add_window_view(|window, cx| ColorPicker::with_provider(fake, window, cx));
        (provider, picker, cx)
    }

    fn wait_quiet_period(cx: &mut VisualTestContext) {
        cx.executor()
            .advance_clock(ColorPickerSettings::default().debounce + Duration::from_millis(1));
        cx.run_until_parked();
    }

    fn controls(
        picker: &Entity<ColorPicker>,
        channel: Channel,
        cx: &mut VisualTestContext,
    ) -> (Entity<SliderState>, Entity<InputState>) {
        picker.read_with(cx, |picker, _| {
            let controls = &picker.channels[channel as usize];
            (controls.slider.clone(), controls.input.clone())
        })
    }

    /// The slider and input values of every channel.
    fn control_values(picker: &Entity<ColorPicker>, cx: &mut VisualTestContext) -> Vec<(u8, String)> {
        picker.read_with(cx, |picker, cx| {
            picker
                .channels
                .iter()
                .map(|controls| {
                    (
                        Channel::slider_value(controls.slider.read(cx).value().start()),
                        controls.input.read(cx).value().to_string(),
                    )
                })
                .collect()
        })
    }

    fn rgb(picker: &Entity<ColorPicker>, cx: &mut VisualTestContext) -> Rgb {
        picker.read_with(cx, |picker, cx| picker.state.read(cx).rgb())
    }

    fn slide(slider: &Entity<SliderState>, value: f32, cx: &mut VisualTestContext) {
        slider.update(cx, |_, cx| cx.emit(SliderEvent::Change(value.into())));
        cx.run_until_parked();
    }

    fn step(input: &Entity<InputState>, action: StepAction, cx: &mut VisualTestContext) {
        input.update(cx, |_, cx| cx.emit(NumberInputEvent::Step(action)));
        cx.run_until_parked();
    }

    #[gpui::test]
    fn test_slider_change_syncs_input(cx: &mut TestAppContext) {
        let (provider, picker, cx) = build(cx);
        let (slider, _) = controls(&picker, Channel::Red, cx);

        slide(&slider, 100., cx);
        assert_eq!(rgb(&picker, cx), Rgb::new(100, 0, 0));
        assert_eq!(
            control_values(&picker, cx),
            vec![(100, "100".into()), (0, "0".into()), (0, "0".into())]
        );

        wait_quiet_period(cx);
        assert_eq!(*provider.calls.borrow(), vec![Rgb::new(100, 0, 0)]);
    }

    #[gpui::test]
    fn test_input_change_syncs_slider(cx: &mut TestAppContext) {
        let (provider, picker, cx) = build(cx);
        let (_, input) = controls(&picker, Channel::Blue, cx);

        input.update_in(cx, |input, window, cx| {
            input.set_value("300", window, cx);
            cx.emit(InputEvent::Change);
        });
        cx.run_until_parked();

        assert_eq!(rgb(&picker, cx), Rgb::new(0, 0, 255));
        assert_eq!(
            control_values(&picker, cx),
            vec![(0, "0".into()), (0, "0".into()), (255, "255".into())]
        );

        wait_quiet_period(cx);
        assert_eq!(*provider.calls.borrow(), vec![Rgb::new(0, 0, 255)]);
    }

    #[gpui::test]
    fn test_steps_are_saturating(cx: &mut TestAppContext) {
        let (_, picker, cx) = build(cx);
        let (slider, input) = controls(&picker, Channel::Green, cx);

        step(&input, StepAction::Decrement, cx);
        assert_eq!(rgb(&picker, cx), Rgb::new(0, 0, 0));

        step(&input, StepAction::Increment, cx);
        assert_eq!(rgb(&picker, cx), Rgb::new(0, 1, 0));
        assert_eq!(control_values(&picker, cx)[1], (1, "1".into()));

        slide(&slider, 255., cx);
        step(&input, StepAction::Increment, cx);
        assert_eq!(rgb(&picker, cx), Rgb::new(0, 255, 0));

        step(&input, StepAction::Decrement, cx);
        assert_eq!(rgb(&picker, cx), Rgb::new(0, 254, 0));
        assert_eq!(control_values(&picker, cx)[1], (254, "254".into()));
    }

    #[gpui::test]
    fn test_events_with_current_value_are_ignored(cx: &mut TestAppContext) {
        let (provider, picker, cx) = build(cx);
        wait_quiet_period(cx);
        assert_eq!(provider.calls.borrow().len(), 1);

        let (slider, _) = controls(&picker, Channel::Red, cx);
        slide(&slider, 0., cx);
        assert!(!picker.read_with(cx, |picker, cx| picker.state.read(cx).has_pending_lookup()));

        wait_quiet_period(cx);
        assert_eq!(provider.calls.borrow().len(), 1);
    }

    #[gpui::test]
    fn test_blur_restores_channel_value(cx: &mut TestAppContext) {
        let (_, picker, cx) = build(cx);
        let (slider, input) = controls(&picker, Channel::Red, cx);
        slide(&slider, 7., cx);

        input.update_in(cx, |input, window, cx| {
            input.set_value("07", window, cx);
            cx.emit(InputEvent::Change);
        });
        cx.run_until_parked();
        assert_eq!(control_values(&picker, cx)[0], (7, "07".into()));

        input.update(cx, |_, cx| cx.emit(InputEvent::Blur));
        cx.run_until_parked();
        assert_eq!(rgb(&picker, cx), Rgb::new(7, 0, 0));
        assert_eq!(control_values(&picker, cx)[0], (7, "7".into()));
    }

    #[gpui::test]
    fn test_switch_to_exact_match(cx: &mut TestAppContext) {
        let (provider, picker, cx) = build(cx);
        assert!(picker.update(cx, |picker, cx| picker.render_switch(cx).is_none()));

        wait_quiet_period(cx);
        assert!(picker.update(cx, |picker, cx| picker.render_switch(cx).is_some()));

        picker.update(cx, |picker, cx| picker.switch_to_exact_match(cx));
        cx.run_until_parked();
        assert_eq!(rgb(&picker, cx), COBALT);
        assert_eq!(
            control_values(&picker, cx),
            vec![(0, "0".into()), (71, "71".into()), (171, "171".into())]
        );

        wait_quiet_period(cx);
        assert_eq!(provider.calls.borrow().last(), Some(&COBALT));
        assert!(picker.update(cx, |picker, cx| picker.render_switch(cx).is_none()));
        assert_eq!(
            picker.read_with(cx, |picker, cx| picker.state.read(cx).display_name()),
            Some("Cobalt 🎯".into())
        );
    }
}
