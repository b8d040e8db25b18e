use super::{image_src, ERROR_STYLE, PAGE_STYLE, PRIMARY_BUTTON, SECONDARY_BUTTON};
use crate::models::ProductCategory;
use crate::services;
use crate::state::use_app_state;
use crate::wizard::WizardStep;
use crate::Screen;
use dioxus::prelude::*;
use dioxus_i18n::t;

#[component]
pub fn ProductDetailScreen(
    category: ProductCategory,
    id: String,
    on_navigate: EventHandler<Screen>,
) -> Element {
    let state = use_app_state();
    let mut session = state.session;
    let mut busy = use_signal(|| false);
    let mut error = use_signal(String::new);

    let product = use_resource({
        let id = id.clone();
        move || {
            let id = id.clone();
            async move {
                let user = state.user.read().clone();
                match state.catalog() {
                    Ok(catalog) => catalog.find_for_detail(user.as_ref(), category, &id).await,
                    Err(e) => {
                        log::warn!("Catalog unavailable: {}", e);
                        services::static_catalog::find(category, &id)
                    }
                }
            }
        }
    });

    let loaded = product.read().clone();
    let Some(loaded) = loaded else {
        return rsx! {
            div { style: "{PAGE_STYLE} text-align: center; padding-top: 80px; color: #999;", "⏳" }
        };
    };

    let Some(product) = loaded else {
        return rsx! {
            div { style: "{PAGE_STYLE} display: flex; flex-direction: column; align-items: center; justify-content: center; text-align: center;",
                h1 { style: "font-size: 24px; color: #444;", {t!("product-not-found-title")} }
                p { style: "color: #777;", {t!("product-not-found-text")} }
                button {
                    style: "{PRIMARY_BUTTON} margin-top: 16px;",
                    onclick: move |_| on_navigate.call(Screen::Garments),
                    {t!("action-go-back")}
                }
            }
        };
    };

    let price = format!("${:.2}", product.price);
    let image = product.image.clone();
    let description = product.description.clone();

    rsx! {
        div { style: "{PAGE_STYLE}",
            div { style: "display: flex; align-items: center; gap: 12px; margin-bottom: 20px;",
                button {
                    style: "{SECONDARY_BUTTON}",
                    onclick: move |_| on_navigate.call(Screen::Garments),
                    "←"
                }
                h1 { style: "margin: 0; font-size: 22px; text-transform: uppercase;",
                    {t!("action-go-back")}
                }
            }

            img {
                src: "{image_src(&product.image)}",
                style: "width: 100%; max-height: 420px; object-fit: contain; border-radius: 16px; background: white;",
            }
            h2 { style: "margin: 16px 0 4px;", "{product.name}" }
            div { style: "font-size: 18px; color: #333; margin-bottom: 8px;", "{price}" }
            p { style: "color: #555;", "{product.description}" }

            if !error().is_empty() {
                div { style: "{ERROR_STYLE}", "⚠️ {error}" }
            }

            button {
                style: "{PRIMARY_BUTTON} width: 100%; margin-top: 16px;",
                disabled: busy(),
                onclick: move |_| {
                    let image = image.clone();
                    let description = description.clone();
                    busy.set(true);
                    error.set(String::new());
                    spawn(async move {
                        match services::load_image_source(&image, "garment-image.jpg").await {
                            Ok(garment) => {
                                let result = session.with_mut(|s| {
                                    if s.step() == WizardStep::SelectCategory {
                                        s.select_category(category)?;
                                    }
                                    s.choose_garment(garment, Some(description))
                                });
                                match result {
                                    Ok(()) => on_navigate.call(Screen::HumanPhoto),
                                    Err(e) => error.set(e.user_message()),
                                }
                            }
                            Err(e) => error.set(e.user_message()),
                        }
                        busy.set(false);
                    });
                },
                if busy() { "⏳" } else { {t!("action-try-it-on")} }
            }
        }
    }
}
