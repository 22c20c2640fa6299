use gpui::{App, AppContext as _, Task};
use smol::io::AsyncReadExt as _;

use crate::{ColorPickerSettings, LookupError, NamedColor, Rgb};

/// A trait for looking up the nearest named color of an RGB triple.
pub trait ColorNameProvider {
    /// Fetches the named color for `rgb`.
    ///
    /// A non-success response must resolve to [`LookupError::Status`], so callers can
    /// tell "no answer" apart from transport or decoding failures.
    fn lookup(&self, rgb: Rgb, cx: &mut App) -> Task<Result<NamedColor, LookupError>>;
}

/// Looks up color names from [The Color API](https://www.thecolorapi.com/docs) over the
/// application's [`gpui::http_client::HttpClient`].
pub struct ColorApiProvider {
    settings: ColorPickerSettings,
}

impl ColorApiProvider {
    pub fn new(settings: ColorPickerSettings) -> Self {
        Self { settings }
    }
}

impl ColorNameProvider for ColorApiProvider {
    fn lookup(&self, rgb: Rgb, cx: &mut App) -> Task<Result<NamedColor, LookupError>> {
        // Without setting `cx.http_client`, this will fail but no panic.
        let client = cx.http_client();
        let url = self.settings.lookup_url(rgb);

        cx.background_spawn(async move {
            let mut resp = client.get(&url, ().into(), true).await?;
            if !resp.status().is_success() {
                return Err(LookupError::Status(resp.status().as_u16()));
            }

            let mut body = Vec::new();
            resp.body_mut()
                .read_to_end(&mut body)
                .await
                .map_err(anyhow::Error::from)?;

            NamedColor::from_json(&body)
        })
    }
}
