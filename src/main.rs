use dioxus::prelude::*;
use dioxus_i18n::prelude::use_init_i18n;

mod camera;
mod components;
mod config;
mod database;
mod error;
mod filesystem;
mod i18n;
mod image_processing;
mod models;
mod picker;
mod services;
mod state;
mod wizard;

use components::{
    AccountScreen, AdminDashboardScreen, CategorySelectScreen, GarmentSelectScreen,
    GeneratingScreen, HumanSelectScreen, NavigationBar, ProductDetailScreen, ProductFormScreen,
    ResultScreen,
};
use config::AppConfig;
use models::ProductCategory;
use state::AppState;
use wizard::WizardStep;

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    init_logging();
    dioxus::launch(App);
}

#[cfg(target_os = "android")]
fn init_logging() {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Debug)
            .with_tag("virtual-vogue"),
    );
}

#[cfg(not(target_os = "android"))]
fn init_logging() {
    env_logger::init();
}

/// Screen navigation for the app
#[derive(Clone, PartialEq, Debug)]
pub enum Screen {
    Home,
    Garments,
    ProductDetail { category: ProductCategory, id: String },
    HumanPhoto,
    Generating,
    Result,
    Admin,
    ProductForm(Option<String>), // None adds a new product
    Account,
}

impl Screen {
    /// Screen showing the given wizard step
    pub fn for_step(step: WizardStep) -> Self {
        match step {
            WizardStep::SelectCategory => Screen::Home,
            WizardStep::SelectGarment => Screen::Garments,
            WizardStep::SelectHuman => Screen::HumanPhoto,
            WizardStep::Generating => Screen::Generating,
            WizardStep::Result => Screen::Result,
        }
    }

    pub fn is_wizard(&self) -> bool {
        matches!(
            self,
            Screen::Home
                | Screen::Garments
                | Screen::ProductDetail { .. }
                | Screen::HumanPhoto
                | Screen::Generating
                | Screen::Result
        )
    }
}

#[component]
fn App() -> Element {
    use_init_i18n(i18n::init_i18n);
    AppState::provide(load_config);
    let mut current_screen = use_signal(|| Screen::Home);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        div { style: "display: flex; flex-direction: column; height: 100vh; font-family: sans-serif;",

            // Main Content
            div { style: "flex: 1; overflow-y: auto;",
                match current_screen() {
                    Screen::Home => rsx! {
                        CategorySelectScreen { on_navigate: move |s| current_screen.set(s) }
                    },
                    Screen::Garments => rsx! {
                        GarmentSelectScreen { on_navigate: move |s| current_screen.set(s) }
                    },
                    Screen::ProductDetail { category, id } => rsx! {
                        ProductDetailScreen {
                            category,
                            id,
                            on_navigate: move |s| current_screen.set(s),
                        }
                    },
                    Screen::HumanPhoto => rsx! {
                        HumanSelectScreen { on_navigate: move |s| current_screen.set(s) }
                    },
                    Screen::Generating => rsx! {
                        GeneratingScreen { on_navigate: move |s| current_screen.set(s) }
                    },
                    Screen::Result => rsx! {
                        ResultScreen { on_navigate: move |s| current_screen.set(s) }
                    },
                    Screen::Admin => rsx! {
                        AdminDashboardScreen { on_navigate: move |s| current_screen.set(s) }
                    },
                    Screen::ProductForm(product_id) => rsx! {
                        ProductFormScreen { product_id, on_navigate: move |s| current_screen.set(s) }
                    },
                    Screen::Account => rsx! {
                        AccountScreen { on_navigate: move |s| current_screen.set(s) }
                    },
                }
            }

            // Bottom Navigation Bar
            NavigationBar {
                current_screen: current_screen(),
                on_navigate: move |screen| current_screen.set(screen),
            }
        }
    }
}

fn load_config() -> AppConfig {
    match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration, using defaults: {}", e);
            AppConfig::default()
        }
    }
}
