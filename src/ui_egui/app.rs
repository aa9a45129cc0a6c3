mod actions;
mod lifecycle;
mod panels;
mod requests;
mod state;
mod toast;

use self::state::AppState;
use self::toast::ToastManager;
use crate::models::settings::Settings;
use crate::services::api::ApiClient;
use crate::services::session::SessionManager;
use crate::utils::date::today_in;
use chrono::NaiveDate;

pub struct BookingApp {
    /// Loaded once at start-up
    settings: Settings,
    /// `None` when the HTTP client could not be built; requests then fail with a toast
    api: Option<ApiClient>,
    session: SessionManager,
    toasts: ToastManager,
    state: AppState,
}

impl eframe::App for BookingApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_update(ctx);
    }
}

impl BookingApp {
    fn today(&self) -> NaiveDate {
        today_in(self.settings.time_zone())
    }
}
