use super::image_input::ImageInput;
use super::{image_src, preview_src, step_back, ERROR_STYLE, PAGE_STYLE, PRIMARY_BUTTON, SECONDARY_BUTTON};
use crate::camera::{CameraSession, Countdown, CountdownTick, FacingMode, SystemCamera};
use crate::models::ImageFile;
use crate::services::{self, static_catalog};
use crate::state::use_app_state;
use crate::Screen;
use dioxus::prelude::*;
use dioxus_i18n::t;
use std::time::Duration;

/// Third wizard step: a photo of the shopper from upload, camera or an example model
#[component]
pub fn HumanSelectScreen(on_navigate: EventHandler<Screen>) -> Element {
    let state = use_app_state();
    let mut session = state.session;
    let mut selected = use_signal(|| None::<ImageFile>);
    let mut error = use_signal(String::new);
    let mut busy = use_signal(|| false);

    // Released when the screen goes away
    let mut camera = use_signal(|| CameraSession::new(SystemCamera::default()));
    let mut countdown = use_signal(|| None::<u32>);

    let gender = session.read().request().gender;

    let mut stop_camera = move || {
        camera.write().stop();
        countdown.set(None);
    };

    // The session releases the stream after every capture
    let mut capture = move || match camera.write().capture() {
        Ok(image) => selected.set(Some(image)),
        Err(e) => error.set(e.user_message()),
    };
    let camera_open = camera.read().is_active();

    let facing_label = match camera.read().facing() {
        FacingMode::User => t!("camera-facing-front"),
        FacingMode::Environment => t!("camera-facing-back"),
    };

    rsx! {
        div { style: "{PAGE_STYLE}",
            div { style: "display: flex; align-items: center; gap: 12px; margin-bottom: 20px;",
                button {
                    style: "{SECONDARY_BUTTON}",
                    onclick: move |_| {
                        stop_camera();
                        match step_back(&mut session.write()) {
                            Ok(screen) => on_navigate.call(screen),
                            Err(e) => error.set(e.user_message()),
                        }
                    },
                    "←"
                }
                h1 { style: "margin: 0; font-size: 22px; flex: 1;", {t!("human-photo-title")} }
            }

            if !error().is_empty() {
                div { style: "{ERROR_STYLE}", "⚠️ {error}" }
            }

            if let Some(image) = selected() {
                div { style: "display: flex; flex-direction: column; align-items: center; background: #e6e6e6; border-radius: 24px; padding: 24px; margin-bottom: 24px;",
                    img {
                        src: "{preview_src(&image)}",
                        style: "max-width: 260px; max-height: 360px; border-radius: 12px; margin-bottom: 16px; object-fit: contain;",
                    }
                    div { style: "display: flex; gap: 8px;",
                        button {
                            style: "{SECONDARY_BUTTON}",
                            onclick: move |_| selected.set(None),
                            {t!("action-choose-another")}
                        }
                        button {
                            style: "{PRIMARY_BUTTON}",
                            onclick: move |_| {
                                let Some(image) = selected() else { return };
                                match session.write().confirm_human(image) {
                                    Ok(()) => on_navigate.call(Screen::Generating),
                                    Err(e) => error.set(e.user_message()),
                                }
                            },
                            {t!("action-continue")}
                        }
                    }
                }
            } else if camera_open {
                div { style: "background: #111111; color: white; border-radius: 24px; padding: 24px; margin-bottom: 24px; text-align: center;",
                    p { "📷 {facing_label}" }
                    if let Some(seconds) = countdown() {
                        div { style: "font-size: 64px; font-weight: 700; margin: 16px 0;", "{seconds}" }
                        p { {t!("camera-adjust-yourself")} }
                    } else {
                        div { style: "display: flex; flex-wrap: wrap; gap: 8px; justify-content: center;",
                            button {
                                style: "{SECONDARY_BUTTON}",
                                onclick: move |_| capture(),
                                {t!("action-take-photo")}
                            }
                            button {
                                style: "{SECONDARY_BUTTON}",
                                onclick: move |_| {
                                    let mut timer = Countdown::default();
                                    countdown.set(Some(timer.remaining()));
                                    spawn(async move {
                                        loop {
                                            tokio::time::sleep(Duration::from_secs(1)).await;
                                            match timer.tick() {
                                                CountdownTick::Remaining(n) => countdown.set(Some(n)),
                                                CountdownTick::Capture => break,
                                            }
                                        }
                                        countdown.set(None);
                                        capture();
                                    });
                                },
                                "⏱️ "
                                {t!("action-take-photo-timer")}
                            }
                            button {
                                style: "{SECONDARY_BUTTON}",
                                onclick: move |_| {
                                    if let Err(e) = camera.write().switch_facing() {
                                        error.set(e.user_message());
                                    }
                                },
                                "🔄 "
                                {t!("action-switch-camera")}
                            }
                            button {
                                style: "{SECONDARY_BUTTON}",
                                onclick: move |_| stop_camera(),
                                {t!("action-cancel")}
                            }
                        }
                    }
                }
            } else {
                ImageInput {
                    label: t!("upload-human-photo"),
                    file_name: "human-image.jpg".to_string(),
                    on_selected: move |image| selected.set(Some(image)),
                }
                button {
                    style: "{SECONDARY_BUTTON} width: 100%; margin-bottom: 24px;",
                    onclick: move |_| {
                        error.set(String::new());
                        if let Err(e) = camera.write().start() {
                            error.set(e.user_message());
                        }
                    },
                    "📷 "
                    {t!("action-use-camera")}
                }
            }

            if let Some(gender) = gender {
                h2 { style: "font-size: 18px; margin: 8px 0 12px;", {t!("example-models-title")} }
                div { style: "display: grid; grid-template-columns: 1fr 1fr 1fr; gap: 8px;",
                    for model in static_catalog::example_models(gender) {
                        img {
                            key: "{model}",
                            src: "{image_src(model)}",
                            style: "width: 100%; height: 160px; object-fit: cover; border-radius: 12px; cursor: pointer; background: #eeeeee;",
                            onclick: move |_| {
                                if busy() {
                                    return;
                                }
                                busy.set(true);
                                error.set(String::new());
                                spawn(async move {
                                    match services::load_image_source(model, "human-image.jpg").await {
                                        Ok(image) => selected.set(Some(image)),
                                        Err(e) => error.set(e.user_message()),
                                    }
                                    busy.set(false);
                                });
                            },
                        }
                    }
                }
            }
        }
    }
}
