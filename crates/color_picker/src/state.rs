use std::{rc::Rc, time::Duration};

use gpui::{Context, EventEmitter, Task};

use crate::{Channel, ColorNameProvider, LookupError, NamedColor, Rgb};

pub enum ColorStateEvent {
    /// One or more channels changed.
    Change(Rgb),
    /// A lookup completed and its result was applied.
    Named(NamedColor),
}

/// The state of a color picker: the current channels and the last named color result.
///
/// Every channel change (re)arms a single debounce timer. When the timer fires without
/// being replaced, the current color is looked up through the [`ColorNameProvider`].
pub struct ColorState {
    rgb: Rgb,
    named: Option<NamedColor>,
    provider: Rc<dyn ColorNameProvider>,
    debounce: Duration,
    /// Number of lookups sent so far, used to tag results in the logs.
    lookup_count: usize,
    /// The armed debounce timer. Replacing or dropping it cancels the pending lookup.
    pending_lookup: Option<Task<()>>,
}

impl EventEmitter<ColorStateEvent> for ColorState {}

impl ColorState {
    /// Create the state with all channels at 0, a lookup for black is scheduled right away.
    pub fn new(
        provider: Rc<dyn ColorNameProvider>,
        debounce: Duration,
        cx: &mut Context<Self>,
    ) -> Self {
        let mut this = Self {
            rgb: Rgb::default(),
            named: None,
            provider,
            debounce,
            lookup_count: 0,
            pending_lookup: None,
        };
        this.schedule_lookup(cx);
        this
    }

    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    pub fn channel(&self, channel: Channel) -> u8 {
        self.rgb.channel(channel)
    }

    /// The last named color result, `None` until the first lookup succeeds.
    pub fn named(&self) -> Option<&NamedColor> {
        self.named.as_ref()
    }

    /// The name to display, with the exact match marker if any.
    pub fn display_name(&self) -> Option<String> {
        self.named.as_ref().map(NamedColor::display_text)
    }

    pub fn is_exact_match(&self) -> bool {
        self.named.as_ref().is_some_and(|named| named.exact_match_name)
    }

    /// Whether to offer switching to the exact color of the current name.
    pub fn show_switch_action(&self) -> bool {
        self.named.as_ref().is_some_and(|named| !named.exact_match_name)
    }

    /// Whether a debounce timer is armed and has not fired yet.
    pub fn has_pending_lookup(&self) -> bool {
        self.pending_lookup.is_some()
    }

    /// Set the value of one channel.
    pub fn set_channel(&mut self, channel: Channel, value: u8, cx: &mut Context<Self>) {
        self.set_rgb(self.rgb.with_channel(channel, value), cx);
    }

    /// Set all channels at once.
    ///
    /// Always reschedules the lookup, even when the color did not change.
    pub fn set_rgb(&mut self, rgb: Rgb, cx: &mut Context<Self>) {
        self.rgb = rgb;
        self.schedule_lookup(cx);
        cx.emit(ColorStateEvent::Change(rgb));
        cx.notify();
    }

    /// Switch the channels to the exact color of the current (non exact) name.
    ///
    /// Returns `false` if there is nothing to switch to.
    pub fn switch_to_exact_match(&mut self, cx: &mut Context<Self>) -> Result<bool, LookupError> {
        let Some(named) = self.named.as_ref().filter(|named| !named.exact_match_name) else {
            return Ok(false);
        };

        let rgb = named.closest_rgb()?;
        tracing::debug!("switching to {} ({})", named.value, rgb);
        self.set_rgb(rgb, cx);
        Ok(true)
    }

    fn schedule_lookup(&mut self, cx: &mut Context<Self>) {
        let debounce = self.debounce;

        self.pending_lookup = Some(cx.spawn(async move |this, cx| {
            cx.background_executor().timer(debounce).await;

            this.update(cx, |this, cx| {
                this.pending_lookup = None;
                this.lookup(cx);
            })
            .ok();
        }));
    }

    /// Send the lookup for the current color.
    ///
    /// The request is detached, so later channel changes do not cancel it. Its result is
    /// applied even if a newer lookup was sent meanwhile.
    fn lookup(&mut self, cx: &mut Context<Self>) {
        let rgb = self.rgb;
        self.lookup_count += 1;
        let lookup_id = self.lookup_count;
        tracing::debug!(lookup_id, "looking up name of {}", rgb);

        let provider = self.provider.clone();
        let task = provider.lookup(rgb, cx);

        cx.spawn(async move |this, cx| match task.await {
            Ok(named) => {
                this.update(cx, |this, cx| this.apply(lookup_id, named, cx))
                    .ok();
            }
            Err(err) if err.is_status() => {
                tracing::debug!(lookup_id, "no name for {}: {}", rgb, err);
            }
            Err(err) => {
                tracing::warn!(lookup_id, "failed to look up name of {}: {}", rgb, err);
            }
        })
        .detach();
    }

    fn apply(&mut self, lookup_id: usize, named: NamedColor, cx: &mut Context<Self>) {
        if lookup_id < self.lookup_count {
            tracing::debug!(
                lookup_id,
                latest = self.lookup_count,
                "applying result of a superseded lookup"
            );
        }

        self.named = Some(named.clone());
        cx.emit(ColorStateEvent::Named(named));
        cx.notify();
    }
}
