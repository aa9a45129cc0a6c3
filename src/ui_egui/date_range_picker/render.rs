//! egui rendering for the date range picker.
//!
//! `render_date_range_picker` shows the interactive floating window;
//! `render_booking_calendar` embeds the read-only grid and legend inline.

use chrono::{Datelike, NaiveDate};
use egui::{Align2, FontId, RichText, Sense, Stroke, Vec2};

use super::legend::render_booking_legend;
use super::state::{DateRangePickerAction, DateRangePickerState};
use crate::services::availability::DayState;
use crate::services::calendar_grid::GridCell;
use crate::ui_egui::palette::DayCellPalette;

const CELL_SIZE: Vec2 = Vec2::new(30.0, 26.0);

/// Render the picker as a floating window. Does nothing while it is closed.
pub fn render_date_range_picker(
    ctx: &egui::Context,
    state: &mut DateRangePickerState,
) -> DateRangePickerAction {
    if !state.is_open() {
        return DateRangePickerAction::None;
    }

    let palette = DayCellPalette::from_visuals(&ctx.style().visuals);
    let title = format!("📅 {}", state.options().title);
    let window_id = egui::Id::new(("date_range_picker", state.options().id_salt.clone()));

    let mut is_open = true;
    let mut action = DateRangePickerAction::None;
    egui::Window::new(title)
        .id(window_id)
        .collapsible(false)
        .resizable(false)
        .auto_sized()
        .open(&mut is_open)
        .show(ctx, |ui| {
            ui.set_max_width(260.0);
            render_month_header(ui, state);
            ui.separator();
            render_grid(ui, state, &palette);
            ui.separator();
            render_selection_summary(ui, state);

            if state.options().show_legend && !state.availability().intervals().is_empty() {
                ui.separator();
                render_booking_legend(ui, &state.summary());
            }

            ui.separator();
            action = render_buttons(ui, state);
        });

    if !is_open && action == DateRangePickerAction::None {
        state.close();
        action = DateRangePickerAction::Closed;
    }

    action
}

/// Inline, non-interactive calendar with its booking legend
pub fn render_booking_calendar(ui: &mut egui::Ui, state: &mut DateRangePickerState) {
    let palette = DayCellPalette::from_visuals(ui.visuals());

    ui.vertical(|ui| {
        ui.label(RichText::new(&state.options().title).strong());
        render_month_header(ui, state);
        ui.separator();
        render_grid(ui, state, &palette);

        if state.options().show_legend {
            ui.separator();
            render_booking_legend(ui, &state.summary());
        }
    });
}

/// Month title with previous/next arrows.
fn render_month_header(ui: &mut egui::Ui, state: &mut DateRangePickerState) {
    ui.horizontal(|ui| {
        if ui
            .small_button("◀")
            .on_hover_text("Previous month")
            .clicked()
        {
            state.previous_month();
        }

        ui.with_layout(
            egui::Layout::centered_and_justified(egui::Direction::LeftToRight),
            |ui| {
                ui.label(RichText::new(state.displayed_month().title()).strong());
            },
        );

        if ui.small_button("▶").on_hover_text("Next month").clicked() {
            state.next_month();
        }
    });
}

/// Weekday headers and the month's day cells.
fn render_grid(ui: &mut egui::Ui, state: &mut DateRangePickerState, palette: &DayCellPalette) {
    let grid = state.grid();
    let mut clicked: Option<NaiveDate> = None;

    egui::Grid::new(("date_range_picker_grid", state.options().id_salt.as_str()))
        .num_columns(7)
        .spacing([2.0, 2.0])
        .min_col_width(CELL_SIZE.x)
        .show(ui, |ui| {
            for name in grid.weekday_headers() {
                ui.label(RichText::new(name).small().strong());
            }
            ui.end_row();

            for week in &grid.weeks {
                for cell in week {
                    match cell {
                        GridCell::Blank => {
                            ui.allocate_exact_size(CELL_SIZE, Sense::hover());
                        }
                        GridCell::Day(day) => {
                            let sense = if day.clickable {
                                Sense::click()
                            } else {
                                Sense::hover()
                            };
                            let (rect, response) = ui.allocate_exact_size(CELL_SIZE, sense);
                            let bookings = state.availability().bookings_on(day.date);

                            let fill = match (day.state, bookings.first()) {
                                (DayState::Booked, Some(first)) => {
                                    palette.booked_fill(first.display_color())
                                }
                                _ => palette.fill(day.state),
                            };
                            ui.painter().rect_filled(rect, 3.0, fill);
                            let border = if day.clickable && response.hovered() {
                                palette.hover_border
                            } else {
                                palette.border
                            };
                            ui.painter().rect_stroke(rect, 3.0, Stroke::new(1.0, border));
                            ui.painter().text(
                                rect.center(),
                                Align2::CENTER_CENTER,
                                day.date.day().to_string(),
                                FontId::proportional(13.0),
                                palette.text_color(day.state),
                            );

                            let response = if bookings.is_empty() {
                                response
                            } else {
                                let names: Vec<String> = bookings
                                    .iter()
                                    .map(|b| format!("{} {}", b.item_type.icon(), b.item_name))
                                    .collect();
                                response.on_hover_text(format!("Booked:\n{}", names.join("\n")))
                            };

                            if day.clickable {
                                let response =
                                    response.on_hover_cursor(egui::CursorIcon::PointingHand);
                                if response.clicked() {
                                    clicked = Some(day.date);
                                }
                            }
                        }
                    }
                }
                ui.end_row();
            }
        });

    if let Some(date) = clicked {
        state.click(date);
    }
}

fn render_selection_summary(ui: &mut egui::Ui, state: &DateRangePickerState) {
    let range = state.selection();
    let fmt = |d: Option<NaiveDate>| {
        d.map(|d| d.format("%a %b %-d, %Y").to_string())
            .unwrap_or_else(|| "—".to_string())
    };

    egui::Grid::new(("date_range_picker_selection", state.options().id_salt.as_str()))
        .num_columns(2)
        .show(ui, |ui| {
            ui.label("From:");
            ui.label(fmt(range.start));
            ui.end_row();
            ui.label("Till:");
            ui.label(fmt(range.end));
            ui.end_row();
        });

    if range.start.is_some() && range.end.is_none() {
        ui.label(RichText::new("Pick the last day").small().weak());
    }
}

fn render_buttons(ui: &mut egui::Ui, state: &mut DateRangePickerState) -> DateRangePickerAction {
    let mut action = DateRangePickerAction::None;
    ui.horizontal(|ui| {
        if ui.button("Cancel").clicked() {
            state.cancel();
            action = DateRangePickerAction::Closed;
        }

        let confirm = ui.add_enabled(state.can_confirm(), egui::Button::new("Confirm"));
        if confirm.clicked() {
            if let Some(range) = state.confirm() {
                action = DateRangePickerAction::Confirmed(range);
            }
        }
    });
    action
}
