use super::{ERROR_STYLE, INPUT_STYLE, PAGE_STYLE, PRIMARY_BUTTON, SECONDARY_BUTTON};
use crate::error::AppError;
use crate::models::User;
use crate::state::use_app_state;
use crate::Screen;
use dioxus::prelude::*;
use dioxus_i18n::t;

/// Parses the identity provider's claims into a user
fn sign_in(claims_json: &str, roles_claim: &str) -> Result<User, AppError> {
    let claims: serde_json::Value = serde_json::from_str(claims_json.trim())
        .map_err(|e| AppError::Validation(format!("Invalid claims: {}", e)))?;
    User::from_claims(&claims, roles_claim)
}

#[component]
pub fn AccountScreen(on_navigate: EventHandler<Screen>) -> Element {
    let mut state = use_app_state();
    let mut claims = use_signal(String::new);
    let mut error = use_signal(String::new);

    let current = state.user.read().clone();

    rsx! {
        div { style: "{PAGE_STYLE}",
            h1 { style: "margin: 0 0 20px 0; font-size: 24px;", {t!("account-title")} }

            if !error().is_empty() {
                div { style: "{ERROR_STYLE}", "⚠️ {error}" }
            }

            match current {
                Some(user) => {
                    let name = user.name.clone().unwrap_or_default();
                    rsx! {
                        div { style: "padding: 16px; background: white; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); margin-bottom: 20px;",
                            p { style: "margin: 4px 0; font-weight: 600;", "{user.email}" }
                            if !name.is_empty() {
                                p { style: "margin: 4px 0; color: #666;", "{name}" }
                            }
                            p { style: "margin: 4px 0; color: #666;",
                                {t!("account-role")} ": " "{user.role.as_str()}"
                            }
                        }
                        button {
                            style: "{SECONDARY_BUTTON} width: 100%;",
                            onclick: move |_| {
                                log::info!("Signed out");
                                state.user.set(None);
                                on_navigate.call(Screen::Home);
                            },
                            {t!("action-sign-out")}
                        }
                    }
                }
                None => rsx! {
                    p { style: "color: #666;", {t!("account-signed-out")} }
                    textarea {
                        style: "{INPUT_STYLE} min-height: 140px; font-family: monospace;",
                        placeholder: "{{\"email\": \"…\"}}",
                        value: "{claims}",
                        oninput: move |e| claims.set(e.value()),
                    }
                    button {
                        style: "{PRIMARY_BUTTON} width: 100%; margin-top: 12px;",
                        onclick: move |_| {
                            let roles_claim = state.config.read().roles_claim.clone();
                            match sign_in(&claims(), &roles_claim) {
                                Ok(user) => {
                                    log::info!("Signed in as {} ({})", user.email, user.role.as_str());
                                    error.set(String::new());
                                    claims.set(String::new());
                                    state.user.set(Some(user));
                                }
                                Err(e) => error.set(e.user_message()),
                            }
                        },
                        {t!("action-sign-in")}
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, DEFAULT_ROLES_CLAIM};

    #[test]
    fn test_sign_in_with_admin_claims() {
        let json = format!(
            r#"{{"email": "admin@example.com", "{}": ["admin"]}}"#,
            DEFAULT_ROLES_CLAIM
        );
        let user = sign_in(&json, DEFAULT_ROLES_CLAIM).unwrap();
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn test_sign_in_rejects_malformed_json() {
        assert!(matches!(
            sign_in("{not json", DEFAULT_ROLES_CLAIM),
            Err(AppError::Validation(_))
        ));
    }
}
