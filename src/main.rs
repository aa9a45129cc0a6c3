// Wedding Booking
// Desktop entry point

use std::path::PathBuf;

use anyhow::{anyhow, Result};
#[cfg(not(debug_assertions))]
use directories::ProjectDirs;

use wedding_booking::services::session::{FileSessionStore, SessionManager};
use wedding_booking::services::settings::SettingsService;
use wedding_booking::ui_egui::BookingApp;

fn main() -> Result<()> {
    env_logger::init();

    log::info!("Starting Wedding Booking");

    let settings = SettingsService::from_default_location().get_or_default();
    let session = SessionManager::new(Box::new(FileSessionStore::new(session_path())));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([980.0, 680.0])
            .with_min_inner_size([720.0, 480.0])
            .with_title("Wedding Booking"),
        ..Default::default()
    };

    eframe::run_native(
        "Wedding Booking",
        options,
        Box::new(|cc| Ok(Box::new(BookingApp::new(cc, settings, session)))),
    )
    .map_err(|e| anyhow!("{e}"))
}

/// Where the signed-in session is remembered between runs
fn session_path() -> PathBuf {
    #[cfg(debug_assertions)]
    {
        PathBuf::from("session.json")
    }

    #[cfg(not(debug_assertions))]
    {
        ProjectDirs::from("com", "WeddingPlanner", "WeddingBooking")
            .map(|dirs| dirs.data_dir().join("session.json"))
            .unwrap_or_else(|| PathBuf::from("session.json"))
    }
}
