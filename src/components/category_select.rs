use super::{ERROR_STYLE, PAGE_STYLE, SECONDARY_BUTTON};
use crate::models::{Gender, ProductCategory};
use crate::state::use_app_state;
use crate::wizard::WizardStep;
use crate::Screen;
use dioxus::prelude::*;
use dioxus_i18n::t;

/// First wizard step: pick gender and body region
#[component]
pub fn CategorySelectScreen(on_navigate: EventHandler<Screen>) -> Element {
    let state = use_app_state();
    let mut session = state.session;
    let mut error = use_signal(String::new);

    let step = session.read().step();
    let in_progress = !matches!(step, WizardStep::SelectCategory | WizardStep::SelectGarment);

    let mut choose = move |category: ProductCategory| {
        let result = session.with_mut(|s| {
            // A finished or half-done pass starts over with the new category
            if !matches!(s.step(), WizardStep::SelectCategory | WizardStep::SelectGarment) {
                s.start_over();
            }
            s.select_category(category)
        });
        match result {
            Ok(()) => on_navigate.call(Screen::Garments),
            Err(e) => error.set(e.user_message()),
        }
    };

    rsx! {
        div { style: "{PAGE_STYLE}",
            h1 { style: "margin: 8px 0 4px; font-size: 28px; letter-spacing: 2px; text-align: center;",
                "VIRTUAL VOGUE"
            }
            p { style: "text-align: center; color: #666; margin-bottom: 24px;",
                {t!("home-subtitle")}
            }

            if in_progress {
                button {
                    style: "{SECONDARY_BUTTON} width: 100%; margin-bottom: 16px;",
                    onclick: move |_| on_navigate.call(Screen::for_step(session.read().step())),
                    "↩️ "
                    {t!("action-continue-try-on")}
                }
            }

            if !error().is_empty() {
                div { style: "{ERROR_STYLE}", "⚠️ {error}" }
            }

            for gender in [Gender::Male, Gender::Female] {
                div { style: "margin-bottom: 24px;",
                    h2 { style: "font-size: 18px; margin-bottom: 12px; text-transform: uppercase;",
                        if gender == Gender::Male {
                            {t!("gender-male")}
                        } else {
                            {t!("gender-female")}
                        }
                    }
                    div { style: "display: grid; grid-template-columns: 1fr 1fr; gap: 12px;",
                        for category in ProductCategory::all().iter().copied().filter(move |c| c.gender == gender) {
                            button {
                                key: "{category}",
                                style: "padding: 32px 12px; background: #d9d9d9; border: none; border-radius: 24px; font-size: 18px; font-weight: 600; cursor: pointer;",
                                onclick: move |_| choose(category),
                                "{category.title()}"
                            }
                        }
                    }
                }
            }
        }
    }
}
