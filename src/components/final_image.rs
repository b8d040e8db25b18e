use super::{preview_src, step_back, ERROR_STYLE, INPUT_STYLE, PAGE_STYLE, PRIMARY_BUTTON, SECONDARY_BUTTON};
use crate::models::GenerationParams;
use crate::services::generate_for;
use crate::state::use_app_state;
use crate::wizard::{SubmissionOutcome, WizardStep};
use crate::Screen;
use dioxus::core::spawn_forever;
use dioxus::prelude::*;
use dioxus_i18n::t;
use tryon_client::GenerationService;

/// Fourth wizard step: review both images and send them to the generation service
#[component]
pub fn GeneratingScreen(on_navigate: EventHandler<Screen>) -> Element {
    let state = use_app_state();
    let mut session = state.session;
    let mut local_error = use_signal(String::new);
    let mut description = use_signal(|| session.read().request().garment_description.clone());
    let mut denoise_steps = use_signal(|| session.read().request().params.denoise_steps.to_string());
    let mut seed = use_signal(|| session.read().request().params.seed.to_string());

    use_effect(move || {
        if session.read().step() == WizardStep::Result {
            on_navigate.call(Screen::Result);
        }
    });

    let submitting = session.read().is_submitting();
    let session_error = session.read().last_error().map(str::to_string);
    let garment = session.read().request().garment_image.clone();
    let human = session.read().request().human_image.clone();

    let submit = move |_: MouseEvent| {
        local_error.set(String::new());
        let defaults = state.config.read().generation_params();
        let params = GenerationParams {
            denoise_steps: denoise_steps().trim().parse().unwrap_or(defaults.denoise_steps),
            seed: seed().trim().parse().unwrap_or(defaults.seed),
            number_of_images: defaults.number_of_images,
        };

        let prepared = session.with_mut(|s| {
            s.set_description(description());
            s.set_params(params);
            s.prepare_submission()
        });
        let submission = match prepared {
            Ok(submission) => submission,
            Err(e) => {
                local_error.set(e.user_message());
                return;
            }
        };

        let endpoint = state.config.read().generation_endpoint.clone();
        // Outlives the screen so the ticket is always settled
        spawn_forever(async move {
            let result = match GenerationService::new(endpoint) {
                Ok(service) => generate_for(&service, &submission).await,
                Err(e) => Err(e.into()),
            };
            match session.write().complete_submission(submission.ticket, result) {
                SubmissionOutcome::Stored => log::info!("Try-on image stored"),
                SubmissionOutcome::Failed(msg) => log::warn!("Try-on failed: {}", msg),
                SubmissionOutcome::Ignored => {}
            }
        });
    };

    rsx! {
        div { style: "{PAGE_STYLE}",
            div { style: "display: flex; align-items: center; gap: 12px; margin-bottom: 20px;",
                button {
                    style: "{SECONDARY_BUTTON}",
                    disabled: submitting,
                    onclick: move |_| {
                        match step_back(&mut session.write()) {
                            Ok(screen) => on_navigate.call(screen),
                            Err(e) => local_error.set(e.user_message()),
                        }
                    },
                    "←"
                }
                h1 { style: "margin: 0; font-size: 22px; flex: 1;", {t!("generate-title")} }
            }

            if !local_error().is_empty() {
                div { style: "{ERROR_STYLE}", "⚠️ {local_error}" }
            } else if let Some(message) = session_error {
                div { style: "{ERROR_STYLE}", "⚠️ {message}" }
            }

            div { style: "display: grid; grid-template-columns: 1fr 1fr; gap: 12px; margin-bottom: 16px;",
                for (label, image) in [(t!("label-garment"), garment), (t!("label-you"), human)] {
                    div { style: "background: white; border-radius: 16px; padding: 8px; text-align: center;",
                        if let Some(image) = image {
                            img {
                                src: "{preview_src(&image)}",
                                style: "width: 100%; height: 200px; object-fit: contain;",
                            }
                        } else {
                            div { style: "height: 200px; display: flex; align-items: center; justify-content: center; color: #999;",
                                {t!("label-missing-image")}
                            }
                        }
                        div { style: "font-size: 14px; color: #666;", "{label}" }
                    }
                }
            }

            div { style: "margin-bottom: 16px;",
                label { style: "display: block; margin-bottom: 8px; font-weight: 600; font-size: 14px;",
                    {t!("field-garment-description")}
                }
                input {
                    style: "{INPUT_STYLE}",
                    r#type: "text",
                    placeholder: "{t!(\"field-garment-description-placeholder\")}",
                    value: "{description}",
                    oninput: move |e| description.set(e.value()),
                }
            }

            div { style: "display: grid; grid-template-columns: 1fr 1fr; gap: 12px; margin-bottom: 24px;",
                div {
                    label { style: "display: block; margin-bottom: 8px; font-weight: 600; font-size: 14px;",
                        {t!("field-denoise-steps")}
                    }
                    input {
                        style: "{INPUT_STYLE}",
                        r#type: "number",
                        min: "1",
                        value: "{denoise_steps}",
                        oninput: move |e| denoise_steps.set(e.value()),
                    }
                }
                div {
                    label { style: "display: block; margin-bottom: 8px; font-weight: 600; font-size: 14px;",
                        {t!("field-seed")}
                    }
                    input {
                        style: "{INPUT_STYLE}",
                        r#type: "number",
                        value: "{seed}",
                        oninput: move |e| seed.set(e.value()),
                    }
                }
            }

            button {
                style: "{PRIMARY_BUTTON} width: 100%;",
                disabled: submitting,
                onclick: submit,
                if submitting { {t!("generate-processing")} } else { {t!("action-generate")} }
            }
        }
    }
}
