use crate::state::use_app_state;
use crate::Screen;
use dioxus::prelude::*;
use dioxus_i18n::t;

const TAB_STYLE: &str = "flex: 1; padding: 12px; margin: 0 5px; border: none; border-radius: 8px; cursor: pointer; font-size: 14px; text-align: center;";

fn tab_style(active: bool) -> String {
    if active {
        format!("{} background: #111111; color: #ffffff;", TAB_STYLE)
    } else {
        format!("{} background: #ffffff; color: #333;", TAB_STYLE)
    }
}

#[component]
pub fn NavigationBar(current_screen: Screen, on_navigate: EventHandler<Screen>) -> Element {
    let state = use_app_state();
    let nav_style = "display: flex; justify-content: space-around; padding: 10px; background: #f0f0f0; border-top: 1px solid #ddd;";

    let in_wizard = current_screen.is_wizard();
    let in_admin = matches!(current_screen, Screen::Admin | Screen::ProductForm(_));

    rsx! {
        div {
            style: "{nav_style}",

            button {
                style: tab_style(in_wizard),
                onclick: move |_| on_navigate.call(Screen::Home),
                "👗 "
                {t!("nav-try-on")}
            }

            if state.is_admin() {
                button {
                    style: tab_style(in_admin),
                    onclick: move |_| on_navigate.call(Screen::Admin),
                    "🗂️ "
                    {t!("nav-admin")}
                }
            }

            button {
                style: tab_style(matches!(current_screen, Screen::Account)),
                onclick: move |_| on_navigate.call(Screen::Account),
                "👤 "
                {t!("nav-account")}
            }
        }
    }
}
