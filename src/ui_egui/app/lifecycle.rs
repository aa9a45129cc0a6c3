use super::state::AppState;
use super::toast::ToastManager;
use super::BookingApp;
use crate::models::settings::Settings;
use crate::services::api::ApiClient;
use crate::services::session::SessionManager;

impl BookingApp {
    /// Build the app with injected settings and session; the session is initialised here.
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: Settings, session: SessionManager) -> Self {
        Self::with_parts(settings, session)
    }

    pub(super) fn with_parts(settings: Settings, mut session: SessionManager) -> Self {
        let mut toasts = ToastManager::new();

        let api = match ApiClient::new(&settings) {
            Ok(client) => {
                log::info!("Using marketplace API at {}", client.base_url());
                Some(client)
            }
            Err(e) => {
                toasts.api_error("HTTP client unavailable", &e);
                None
            }
        };

        if let Some(restored) = session.init() {
            toasts.info(format!("Welcome back, {}", display_name(restored)));
        }

        Self {
            settings,
            api,
            session,
            toasts,
            state: AppState::default(),
        }
    }

    pub(super) fn handle_update(&mut self, ctx: &egui::Context) {
        self.poll_requests(ctx);

        self.render_top_bar(ctx);
        self.render_side_panel(ctx);
        self.render_central_panel(ctx);
        self.render_item_picker(ctx);

        // Last, so toasts sit above everything else
        self.toasts.render(ctx);
    }
}

fn display_name(session: &crate::models::session::Session) -> &str {
    if session.user.name.trim().is_empty() {
        &session.user.email
    } else {
        &session.user.name
    }
}
