use std::sync::Arc;

use color_picker::ColorPicker;
use gpui::*;
use gpui_component::Root;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("color_picker=debug".parse()?))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let http_client = Arc::new(reqwest_client::ReqwestClient::user_agent("color-picker")?);
    let app = Application::new();

    app.run(move |cx| {
        // This must be called before using any GPUI Component features.
        gpui_component::init(cx);
        color_picker::init(cx);
        cx.set_http_client(http_client);

        cx.spawn(async move |cx| {
            let options = WindowOptions {
                titlebar: Some(TitlebarOptions {
                    title: Some("Color Picker".into()),
                    ..Default::default()
                }),
                ..Default::default()
            };

            cx.open_window(options, |window, cx| {
                let view = ColorPicker::view(window, cx);
                // This first level on the window, should be a Root.
                cx.new(|cx| Root::new(view, window, cx))
            })?;

            tracing::info!("color picker window opened");
            Ok::<_, anyhow::Error>(())
        })
        .detach();
    });

    Ok(())
}
