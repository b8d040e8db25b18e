use super::{image_src, ERROR_STYLE, INPUT_STYLE, PAGE_STYLE, PRIMARY_BUTTON, SECONDARY_BUTTON};
use crate::models::{Product, ProductCategory};
use crate::services::reconcile_deleted;
use crate::state::use_app_state;
use crate::Screen;
use dioxus::prelude::*;
use dioxus_i18n::t;

/// Shown to anybody who is not an admin
#[component]
pub fn UnauthorizedView(on_navigate: EventHandler<Screen>) -> Element {
    rsx! {
        div { style: "{PAGE_STYLE} text-align: center; padding-top: 80px;",
            h1 { style: "font-size: 24px; color: #cc0000;", "🚫 " {t!("unauthorized-title")} }
            p { style: "color: #666;", {t!("unauthorized-text")} }
            button {
                style: "{PRIMARY_BUTTON} margin-top: 16px;",
                onclick: move |_| on_navigate.call(Screen::Home),
                {t!("action-go-home")}
            }
        }
    }
}

#[component]
pub fn AdminDashboardScreen(on_navigate: EventHandler<Screen>) -> Element {
    let state = use_app_state();
    // Cached list of the last fetch; deletes are reconciled locally
    let mut groups = use_signal(Vec::<(ProductCategory, Vec<Product>)>::new);
    let mut filter = use_signal(|| None::<ProductCategory>);
    let mut loading = use_signal(|| false);
    let mut error = use_signal(String::new);
    let mut confirm_delete = use_signal(|| None::<Product>);

    // Reruns when the filter or the signed-in user changes
    use_effect(move || {
        let Some(email) = state.user_email().filter(|_| state.is_admin()) else {
            return;
        };
        let category = filter();
        loading.set(true);
        error.set(String::new());
        spawn(async move {
            let result = match state.catalog() {
                Ok(catalog) => catalog.list_grouped(Some(&email), category).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(list) => groups.set(list),
                Err(e) => {
                    log::error!("Error fetching products: {}", e);
                    error.set(t!("error-load-products-failed", error: e.user_message()));
                }
            }
            loading.set(false);
        });
    });

    let mut delete = move |product: Product| {
        let Some(email) = state.user_email() else {
            return;
        };
        confirm_delete.set(None);
        spawn(async move {
            let result = match state.catalog() {
                Ok(catalog) => catalog.delete_product(&product.id, &email).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(removed) => {
                    if !removed {
                        log::debug!("Product {} was already gone", product.id);
                    }
                    groups.with_mut(|groups| {
                        for (_, products) in groups.iter_mut() {
                            reconcile_deleted(products, &product);
                        }
                        groups.retain(|(_, products)| !products.is_empty());
                    });
                }
                Err(e) => error.set(t!("error-delete-failed", error: e.user_message())),
            }
        });
    };

    if !state.is_admin() {
        return rsx! {
            UnauthorizedView { on_navigate }
        };
    }

    rsx! {
        div { style: "{PAGE_STYLE}",
            div { style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 12px;",
                h1 { style: "margin: 0; font-size: 24px;", {t!("admin-title")} }
                button {
                    style: "{PRIMARY_BUTTON}",
                    onclick: move |_| on_navigate.call(Screen::ProductForm(None)),
                    "+ "
                    {t!("action-add-product")}
                }
            }

            select {
                style: "{INPUT_STYLE} margin-bottom: 16px;",
                onchange: move |e| {
                    filter.set(e.value().parse::<ProductCategory>().ok());
                },
                option { value: "", selected: filter().is_none(), {t!("filter-all-categories")} }
                for category in ProductCategory::all().iter().copied() {
                    option {
                        value: "{category}",
                        selected: filter() == Some(category),
                        "{category.title()}"
                    }
                }
            }

            if !error().is_empty() {
                div { style: "{ERROR_STYLE}", "⚠️ {error}" }
            }

            if let Some(product) = confirm_delete() {
                div { style: "padding: 16px; background: #fff3cd; border-radius: 12px; margin-bottom: 16px;",
                    p { style: "margin: 0 0 12px;", "⚠️ {t!(\"confirm-delete-product\")} {product.name}" }
                    div { style: "display: flex; gap: 8px;",
                        button {
                            style: "{SECONDARY_BUTTON}",
                            onclick: move |_| confirm_delete.set(None),
                            {t!("action-cancel")}
                        }
                        button {
                            style: "{SECONDARY_BUTTON} background: #cc0000; color: white;",
                            onclick: move |_| delete(product.clone()),
                            {t!("action-delete")}
                        }
                    }
                }
            }

            if loading() {
                div { style: "text-align: center; padding: 40px; color: #999;", "⏳" }
            } else if groups().is_empty() {
                div { style: "text-align: center; padding: 40px; color: #999;", {t!("admin-no-products")} }
            } else {
                for (category, products) in groups() {
                    div { key: "{category}", style: "margin-bottom: 24px;",
                        h2 { style: "font-size: 18px; margin-bottom: 12px;", "{category.title()}" }
                        div { style: "display: grid; grid-template-columns: 1fr 1fr; gap: 12px;",
                            for product in products {
                                AdminProductCard {
                                    key: "{product.id}",
                                    product: product.clone(),
                                    on_edit: move |id| on_navigate.call(Screen::ProductForm(Some(id))),
                                    on_delete: move |p| confirm_delete.set(Some(p)),
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn AdminProductCard(
    product: Product,
    on_edit: EventHandler<String>,
    on_delete: EventHandler<Product>,
) -> Element {
    let price = format!("${:.2}", product.price);
    let id = product.id.clone();
    let to_delete = product.clone();

    rsx! {
        div { style: "background: white; border-radius: 16px; padding: 12px; box-shadow: 0 1px 3px rgba(0,0,0,0.1);",
            img {
                src: "{image_src(&product.image)}",
                style: "width: 100%; height: 160px; object-fit: cover; border-radius: 12px; background: #eeeeee;",
            }
            div { style: "font-weight: 600; margin-top: 8px;", "{product.name}" }
            div { style: "color: #666; margin-bottom: 8px;", "{price}" }
            div { style: "display: flex; gap: 8px;",
                button {
                    style: "{SECONDARY_BUTTON} flex: 1;",
                    onclick: move |_| on_edit.call(id.clone()),
                    "✏️"
                }
                button {
                    style: "{SECONDARY_BUTTON} flex: 1;",
                    onclick: move |_| on_delete.call(to_delete.clone()),
                    "🗑️"
                }
            }
        }
    }
}
