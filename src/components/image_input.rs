use super::{ERROR_STYLE, INPUT_STYLE, SECONDARY_BUTTON};
use crate::error::AppError;
use crate::image_processing;
use crate::models::ImageFile;
use crate::picker::{self, PickerError};
use crate::services;
use dioxus::prelude::*;
use dioxus_i18n::t;
use std::path::PathBuf;

/// What a gallery pick or camera capture ended in
#[derive(Debug)]
enum PickOutcome {
    Selected(ImageFile),
    /// No system picker here; show the path input instead
    Unsupported,
    PickerFailed(PickerError),
    ReadFailed(AppError),
}

fn picked_image(result: Result<PathBuf, PickerError>, file_name: &str) -> PickOutcome {
    match result {
        Ok(path) => match image_processing::image_file_from_path(&path) {
            Ok(mut image) => {
                image.name = file_name.to_string();
                PickOutcome::Selected(image)
            }
            Err(e) => PickOutcome::ReadFailed(e),
        },
        Err(e) if e.is_unsupported() => PickOutcome::Unsupported,
        Err(e) => PickOutcome::PickerFailed(e),
    }
}

/// Gallery picker and camera capture, with a path/URL input where no system
/// picker exists
#[component]
pub fn ImageInput(label: String, file_name: String, on_selected: EventHandler<ImageFile>) -> Element {
    let mut show_path_input = use_signal(|| !cfg!(target_os = "android"));
    let mut path = use_signal(String::new);
    let mut busy = use_signal(|| false);
    let mut error = use_signal(String::new);

    let load_path = {
        let file_name = file_name.clone();
        move |_: MouseEvent| {
            let source = path();
            if source.trim().is_empty() {
                error.set(t!("error-image-path-required"));
                return;
            }
            let file_name = file_name.clone();
            busy.set(true);
            error.set(String::new());
            spawn(async move {
                match services::load_image_source(&source, &file_name).await {
                    Ok(image) => on_selected.call(image),
                    Err(e) => error.set(t!("error-image-load-failed", error: e.to_string())),
                }
                busy.set(false);
            });
        }
    };

    // Runs the blocking system picker or camera and hands the result on
    let mut launch = move |source: fn() -> Result<PathBuf, PickerError>, file_name: String| {
        busy.set(true);
        error.set(String::new());
        spawn(async move {
            match picked_image(source(), &file_name) {
                PickOutcome::Selected(image) => on_selected.call(image),
                PickOutcome::Unsupported => show_path_input.set(true),
                PickOutcome::PickerFailed(e) => {
                    error.set(t!("error-picker-failed", error: e.to_string()))
                }
                PickOutcome::ReadFailed(e) => error.set(e.user_message()),
            }
            busy.set(false);
        });
    };

    let gallery_name = file_name.clone();
    let camera_name = file_name.clone();

    rsx! {
        div {
            style: "background: #ffffff; padding: 16px; border: 2px dashed #cccccc; border-radius: 12px; margin-bottom: 16px;",
            p { style: "margin: 0 0 12px; font-weight: 600; text-align: center;", "⬆️ {label}" }

            div { style: "display: flex; gap: 8px; margin-bottom: 8px;",
                button {
                    style: "{SECONDARY_BUTTON} flex: 1;",
                    disabled: busy(),
                    onclick: move |_| launch(picker::pick_image, gallery_name.clone()),
                    if busy() { "⏳" } else { {t!("action-choose-from-gallery")} }
                }
                button {
                    style: "{SECONDARY_BUTTON} flex: 1;",
                    disabled: busy(),
                    onclick: move |_| launch(picker::capture_photo, camera_name.clone()),
                    "📷 "
                    {t!("action-take-photo")}
                }
            }

            if show_path_input() {
                div { style: "display: flex; gap: 8px;",
                    input {
                        style: "{INPUT_STYLE}",
                        r#type: "text",
                        placeholder: "{t!(\"field-image-path-placeholder\")}",
                        value: "{path}",
                        oninput: move |e| path.set(e.value()),
                    }
                    button {
                        style: "{SECONDARY_BUTTON}",
                        disabled: busy(),
                        onclick: load_path,
                        {t!("action-load")}
                    }
                }
            }

            if !error().is_empty() {
                div { style: "{ERROR_STYLE} margin-top: 12px;", "⚠️ {error}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_processing::tests::tiny_png;

    #[test]
    fn test_captured_photo_becomes_named_image() {
        let dir = std::env::temp_dir().join(format!("vv-pick-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let photo = dir.join("IMG_0001.png");
        std::fs::write(&photo, tiny_png()).unwrap();

        match picked_image(Ok(photo), "garment-image.jpg") {
            PickOutcome::Selected(image) => {
                assert_eq!(image.name, "garment-image.jpg");
                assert_eq!(image.mime, "image/png");
                assert_eq!(image.bytes, tiny_png());
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unsupported_platform_falls_back_to_path_input() {
        let result = Err(PickerError::PlatformNotSupported("desktop".to_string()));
        assert!(matches!(
            picked_image(result, "garment-image.jpg"),
            PickOutcome::Unsupported
        ));

        #[cfg(not(target_os = "android"))]
        assert!(matches!(
            picked_image(picker::capture_photo(), "garment-image.jpg"),
            PickOutcome::Unsupported
        ));
    }

    #[test]
    fn test_picker_and_read_failures_are_reported() {
        let cancelled = Err(PickerError::Cancelled("no photo".to_string()));
        assert!(matches!(
            picked_image(cancelled, "x.jpg"),
            PickOutcome::PickerFailed(PickerError::Cancelled(_))
        ));

        let missing = Ok(PathBuf::from("/nonexistent/vv/photo.jpg"));
        assert!(matches!(
            picked_image(missing, "x.jpg"),
            PickOutcome::ReadFailed(_)
        ));
    }
}
