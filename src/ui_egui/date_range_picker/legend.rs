use egui::{Color32, RichText, Sense, Vec2};

use crate::services::summary::BookingSummary;
use crate::ui_egui::palette::parse_hex_color;

/// List of booked intervals with their colour swatch, label and dates.
pub fn render_booking_legend(ui: &mut egui::Ui, summary: &BookingSummary) {
    if summary.is_empty() {
        ui.label(RichText::new("No bookings").weak());
        return;
    }

    ui.label(RichText::new("Booked").small().strong());
    for entry in &summary.entries {
        ui.horizontal(|ui| {
            let (rect, _) = ui.allocate_exact_size(Vec2::splat(10.0), Sense::hover());
            let color = parse_hex_color(&entry.color).unwrap_or(Color32::GRAY);
            ui.painter().rect_filled(rect, 2.0, color);

            ui.label(format!("{} {}", entry.item_type.icon(), entry.label));
            ui.label(RichText::new(entry.date_label()).weak());
            let unit = if entry.days == 1 { "day" } else { "days" };
            ui.label(RichText::new(format!("({} {})", entry.days, unit)).small().weak());
        });
    }
}
