use crate::config::AppConfig;
use crate::error::AppError;
use crate::models::User;
use crate::services::Catalog;
use crate::wizard::TryOnSession;
use dioxus::prelude::*;

/// Session state shared by every screen through the context
#[derive(Clone, Copy)]
pub struct AppState {
    pub session: Signal<TryOnSession>,
    /// Set on sign-in, cleared on sign-out, never persisted
    pub user: Signal<Option<User>>,
    pub config: Signal<AppConfig>,
}

impl AppState {
    /// `load_config` runs once, on the first render
    pub fn provide(load_config: impl FnOnce() -> AppConfig) -> Self {
        use_context_provider(|| AppState {
            session: Signal::new(TryOnSession::new()),
            user: Signal::new(None),
            config: Signal::new(load_config()),
        })
    }

    pub fn is_admin(&self) -> bool {
        self.user.read().as_ref().is_some_and(|u| u.is_admin())
    }

    /// Catalog backend for the current configuration
    pub fn catalog(&self) -> Result<Catalog, AppError> {
        Catalog::from_config(&self.config.read())
    }

    pub fn user_email(&self) -> Option<String> {
        self.user.read().as_ref().map(|u| u.email.clone())
    }
}

pub fn use_app_state() -> AppState {
    use_context::<AppState>()
}
