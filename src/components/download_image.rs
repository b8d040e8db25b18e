use super::{ERROR_STYLE, PAGE_STYLE, PRIMARY_BUTTON, SECONDARY_BUTTON, SUCCESS_STYLE};
use crate::image_processing;
use crate::state::use_app_state;
use crate::Screen;
use dioxus::prelude::*;
use dioxus_i18n::t;

/// Last wizard step: show, download or start over
#[component]
pub fn ResultScreen(on_navigate: EventHandler<Screen>) -> Element {
    let state = use_app_state();
    let mut session = state.session;
    let mut saved_to = use_signal(|| None::<String>);
    let mut error = use_signal(String::new);

    let generated = session.read().generated().cloned();

    let download = move |_: MouseEvent| {
        error.set(String::new());
        let dir = state.config.read().downloads_path();
        let result = match session.read().download() {
            Ok((file_name, image)) => image_processing::save_generated_image(&dir, file_name, image),
            Err(e) => Err(e.into()),
        };
        match result {
            Ok(path) => saved_to.set(Some(path.to_string_lossy().to_string())),
            Err(e) => {
                log::error!("Error downloading the image: {}", e);
                error.set(t!("error-download-failed"));
            }
        }
    };

    rsx! {
        div { style: "{PAGE_STYLE}",
            h1 { style: "margin: 8px 0 20px; font-size: 22px; text-align: center;", {t!("result-title")} }

            if !error().is_empty() {
                div { style: "{ERROR_STYLE}", "⚠️ {error}" }
            }
            if let Some(path) = saved_to() {
                div { style: "{SUCCESS_STYLE}", "✓ " {t!("result-saved-to", path: path)} }
            }

            if let Some(image) = generated {
                img {
                    src: "{image.data_url()}",
                    style: "width: 100%; border-radius: 16px; background: white; margin-bottom: 20px;",
                }
                button {
                    style: "{PRIMARY_BUTTON} width: 100%; margin-bottom: 12px;",
                    onclick: download,
                    "⬇️ "
                    {t!("action-download")}
                }
            } else {
                p { style: "text-align: center; color: #999;", {t!("result-empty")} }
            }

            button {
                style: "{SECONDARY_BUTTON} width: 100%;",
                onclick: move |_| {
                    session.write().start_over();
                    on_navigate.call(Screen::Home);
                },
                "🔁 "
                {t!("action-start-over")}
            }
        }
    }
}
