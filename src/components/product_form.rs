use super::{ERROR_STYLE, INPUT_STYLE, PAGE_STYLE, PRIMARY_BUTTON, SECONDARY_BUTTON};
use crate::models::{ProductCategory, ProductInput, ProductPatch};
use crate::state::use_app_state;
use crate::Screen;
use dioxus::prelude::*;
use dioxus_i18n::t;

const LABEL_STYLE: &str =
    "display: block; margin-bottom: 8px; font-weight: 600; color: #333; font-size: 14px;";

/// Add (`product_id == None`) or edit one of the admin's products
#[component]
pub fn ProductFormScreen(product_id: Option<String>, on_navigate: EventHandler<Screen>) -> Element {
    let state = use_app_state();
    let mut category = use_signal(String::new);
    let mut name = use_signal(String::new);
    let mut price = use_signal(String::new);
    let mut image = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut error = use_signal(String::new);
    let mut saving = use_signal(|| false);

    let editing = product_id.is_some();

    // Load the product being edited
    use_effect({
        let product_id = product_id.clone();
        move || {
            let Some(id) = product_id.clone() else {
                return;
            };
            spawn(async move {
                let result = match state.catalog() {
                    Ok(catalog) => catalog.get_product(&id).await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(p) => {
                        category.set(p.category.to_string());
                        name.set(p.name);
                        price.set(p.price.to_string());
                        image.set(p.image);
                        description.set(p.description);
                    }
                    Err(e) => error.set(t!("error-load-failed", error: e.user_message())),
                }
            });
        }
    });

    let handle_submit = move |_: MouseEvent| {
        let Some(email) = state.user_email() else {
            error.set(t!("unauthorized-text"));
            return;
        };
        let parsed_price = if price().trim().is_empty() {
            0.0
        } else {
            match price().trim().parse::<f64>() {
                Ok(p) => p,
                Err(_) => {
                    error.set(t!("error-price-invalid"));
                    return;
                }
            }
        };
        let parsed_category = category().parse::<ProductCategory>().ok();
        let product_id = product_id.clone();

        saving.set(true);
        error.set(String::new());
        spawn(async move {
            let catalog = match state.catalog() {
                Ok(catalog) => catalog,
                Err(e) => {
                    error.set(e.user_message());
                    saving.set(false);
                    return;
                }
            };

            let result = match product_id {
                None => {
                    let input = ProductInput {
                        category: parsed_category,
                        name: name(),
                        price: parsed_price,
                        image: image(),
                        description: description(),
                    };
                    catalog.create_product(&input, &email).await.map(|_| ())
                }
                Some(id) => {
                    let patch = ProductPatch {
                        category: parsed_category,
                        name: Some(name().trim().to_string()),
                        price: Some(parsed_price),
                        image: Some(image().trim().to_string()),
                        description: Some(description().trim().to_string()),
                    };
                    catalog.update_product(&id, &patch, &email).await.map(|_| ())
                }
            };

            saving.set(false);
            match result {
                Ok(()) => on_navigate.call(Screen::Admin),
                Err(e) => error.set(t!("error-save-failed", error: e.user_message())),
            }
        });
    };

    if !state.is_admin() {
        return rsx! {
            super::admin_dashboard::UnauthorizedView { on_navigate }
        };
    }

    rsx! {
        div { style: "{PAGE_STYLE}",
            div { style: "display: flex; align-items: center; gap: 12px; margin-bottom: 20px;",
                button {
                    style: "{SECONDARY_BUTTON}",
                    onclick: move |_| on_navigate.call(Screen::Admin),
                    "←"
                }
                h1 { style: "margin: 0; font-size: 24px; flex: 1;",
                    if editing { {t!("product-edit-title")} } else { {t!("product-add-title")} }
                }
            }

            if !error().is_empty() {
                div { style: "{ERROR_STYLE}", "⚠️ {error}" }
            }

            div {
                div { style: "margin-bottom: 20px;",
                    label { style: "{LABEL_STYLE}", {t!("field-category-required")} }
                    select {
                        style: "{INPUT_STYLE}",
                        onchange: move |e| category.set(e.value()),
                        option { value: "", selected: category().is_empty(), {t!("field-category-placeholder")} }
                        for c in ProductCategory::all().iter().copied() {
                            option {
                                value: "{c}",
                                selected: category() == c.to_string(),
                                "{c.title()}"
                            }
                        }
                    }
                }

                div { style: "margin-bottom: 20px;",
                    label { style: "{LABEL_STYLE}", {t!("field-name-required")} }
                    input {
                        style: "{INPUT_STYLE}",
                        r#type: "text",
                        value: "{name}",
                        oninput: move |e| name.set(e.value()),
                    }
                }

                div { style: "margin-bottom: 20px;",
                    label { style: "{LABEL_STYLE}", {t!("field-price")} }
                    input {
                        style: "{INPUT_STYLE}",
                        r#type: "number",
                        min: "0",
                        step: "0.01",
                        value: "{price}",
                        oninput: move |e| price.set(e.value()),
                    }
                }

                div { style: "margin-bottom: 20px;",
                    label { style: "{LABEL_STYLE}", {t!("field-image-url")} }
                    input {
                        style: "{INPUT_STYLE}",
                        r#type: "text",
                        placeholder: "https://…",
                        value: "{image}",
                        oninput: move |e| image.set(e.value()),
                    }
                }

                div { style: "margin-bottom: 24px;",
                    label { style: "{LABEL_STYLE}", {t!("field-description")} }
                    textarea {
                        style: "{INPUT_STYLE} min-height: 100px;",
                        value: "{description}",
                        oninput: move |e| description.set(e.value()),
                    }
                }

                button {
                    style: "{PRIMARY_BUTTON} width: 100%;",
                    disabled: saving(),
                    onclick: handle_submit,
                    if saving() { "⏳" } else { {t!("action-save")} }
                }
            }
        }
    }
}
