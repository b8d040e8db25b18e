use super::image_input::ImageInput;
use super::{image_src, preview_src, step_back, ERROR_STYLE, PAGE_STYLE, PRIMARY_BUTTON, SECONDARY_BUTTON};
use crate::models::{ImageFile, Product};
use crate::state::use_app_state;
use crate::Screen;
use dioxus::prelude::*;
use dioxus_i18n::t;

/// Second wizard step: upload a garment or pick one from the catalog
#[component]
pub fn GarmentSelectScreen(on_navigate: EventHandler<Screen>) -> Element {
    let state = use_app_state();
    let mut session = state.session;
    let mut selected = use_signal(|| None::<ImageFile>);
    let mut error = use_signal(String::new);

    let category = session.read().request().product_category();

    let products = use_resource(move || async move {
        let Some(category) = session.read().request().product_category() else {
            return Vec::<Product>::new();
        };
        let user = state.user.read().clone();
        match state.catalog() {
            Ok(catalog) => catalog.garment_listing(user.as_ref(), category).await,
            Err(e) => {
                log::warn!("Catalog unavailable: {}", e);
                Vec::new()
            }
        }
    });

    let Some(category) = category else {
        return rsx! {
            div { style: "{PAGE_STYLE}",
                p { {t!("wizard-choose-category-first")} }
                button {
                    style: "{SECONDARY_BUTTON}",
                    onclick: move |_| on_navigate.call(Screen::Home),
                    {t!("action-go-back")}
                }
            }
        };
    };

    rsx! {
        div { style: "{PAGE_STYLE}",
            div { style: "display: flex; align-items: center; gap: 12px; margin-bottom: 20px;",
                button {
                    style: "{SECONDARY_BUTTON}",
                    onclick: move |_| {
                        match step_back(&mut session.write()) {
                            Ok(screen) => on_navigate.call(screen),
                            Err(e) => error.set(e.user_message()),
                        }
                    },
                    "←"
                }
                h1 { style: "margin: 0; font-size: 22px; text-transform: uppercase; flex: 1;",
                    "{category.title()}"
                }
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
                                match session.write().choose_garment(image, None) {
                                    Ok(()) => on_navigate.call(Screen::HumanPhoto),
                                    Err(e) => error.set(e.user_message()),
                                }
                            },
                            {t!("action-continue")}
                        }
                    }
                }
            } else {
                ImageInput {
                    label: t!("upload-garment"),
                    file_name: "garment-image.jpg".to_string(),
                    on_selected: move |image| selected.set(Some(image)),
                }
            }

            h2 { style: "font-size: 18px; margin: 24px 0 12px;", {t!("garment-catalog-title")} }

            match &*products.read() {
                None => rsx! {
                    div { style: "text-align: center; padding: 40px; color: #999;", "⏳" }
                },
                Some(list) if list.is_empty() => rsx! {
                    div { style: "text-align: center; padding: 40px; color: #999;",
                        {t!("garment-catalog-empty")}
                    }
                },
                Some(list) => rsx! {
                    div { style: "display: grid; grid-template-columns: 1fr 1fr; gap: 12px;",
                        for product in list.iter().cloned() {
                            ProductCard {
                                key: "{product.id}",
                                product: product.clone(),
                                on_click: move |_| {
                                    on_navigate.call(Screen::ProductDetail {
                                        category: product.category,
                                        id: product.id.clone(),
                                    })
                                },
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
pub fn ProductCard(product: Product, on_click: EventHandler<()>) -> Element {
    let price = format!("${:.2}", product.price);

    rsx! {
        div {
            style: "background: white; border-radius: 16px; padding: 12px; cursor: pointer; box-shadow: 0 1px 3px rgba(0,0,0,0.1);",
            onclick: move |_| on_click.call(()),
            img {
                src: "{image_src(&product.image)}",
                style: "width: 100%; height: 180px; object-fit: cover; border-radius: 12px; background: #eeeeee;",
            }
            div { style: "font-weight: 600; margin-top: 8px;", "{product.name}" }
            div { style: "color: #666;", "{price}" }
        }
    }
}
