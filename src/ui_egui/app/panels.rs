//! Top bar, side panel and central area of the booking window.

use egui::{Color32, RichText};

use super::state::LookupKind;
use super::BookingApp;
use crate::models::catalog::BookableItem;
use crate::ui_egui::date_range_picker::{render_booking_calendar, render_date_range_picker};

const SIDE_PANEL_WIDTH: f32 = 240.0;

fn secondary_text_color(is_dark: bool) -> Color32 {
    if is_dark {
        Color32::from_gray(160)
    } else {
        Color32::from_gray(100)
    }
}

impl BookingApp {
    pub(super) fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("💍 Wedding Booking");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let cart_label = format!("🛒 {}", self.state.cart.len());
                    ui.label(RichText::new(cart_label).strong())
                        .on_hover_text("Items added to your cart this session");

                    match self.session.current() {
                        Some(session) if session.is_admin() => {
                            ui.label(format!("{} (admin)", session.user.email));
                        }
                        Some(session) => {
                            ui.label(session.user.email.as_str());
                        }
                        None => {
                            ui.label("Not signed in");
                        }
                    }

                    if let Some(label) = self.busy_label() {
                        ui.add_space(12.0);
                        ui.label(RichText::new(label).color(secondary_text_color(ui.visuals().dark_mode)));
                        ui.spinner();
                    }
                });
            });
        });
    }

    pub(super) fn render_side_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("side_panel")
            .default_width(SIDE_PANEL_WIDTH)
            .resizable(false)
            .show(ctx, |ui| {
                ui.vertical(|ui| {
                    self.render_account_section(ui);
                    ui.add_space(8.0);
                    ui.separator();
                    ui.add_space(8.0);
                    self.render_lookup_section(ui);

                    if self.session.is_admin() {
                        ui.add_space(8.0);
                        ui.separator();
                        ui.add_space(8.0);
                        self.render_order_section(ui);
                    }
                });
            });
    }

    fn render_account_section(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("Account").strong());

        if let Some(session) = self.session.current() {
            let name = if session.user.name.is_empty() {
                session.user.email.clone()
            } else {
                session.user.name.clone()
            };
            ui.label(format!("Signed in as {}", name));
            if ui.add_enabled(!self.is_busy(), egui::Button::new("Sign out")).clicked() {
                self.sign_out();
            }
            return;
        }

        egui::Grid::new("login_form").num_columns(2).show(ui, |ui| {
            ui.label("Email");
            ui.text_edit_singleline(&mut self.state.forms.login_email);
            ui.end_row();
            ui.label("Password");
            ui.add(egui::TextEdit::singleline(&mut self.state.forms.login_password).password(true));
            ui.end_row();
        });

        let can_submit = !self.is_busy()
            && !self.state.forms.login_email.trim().is_empty()
            && !self.state.forms.login_password.is_empty();
        if ui.add_enabled(can_submit, egui::Button::new("Sign in")).clicked() {
            self.sign_in();
        }
    }

    fn render_lookup_section(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("Availability").strong());
        ui.horizontal(|ui| {
            ui.radio_value(&mut self.state.forms.lookup_kind, LookupKind::Venue, "Venue");
            ui.radio_value(&mut self.state.forms.lookup_kind, LookupKind::Studio, "Studio");
        });
        ui.horizontal(|ui| {
            ui.label("ID");
            ui.text_edit_singleline(&mut self.state.forms.lookup_id);
        });

        let can_submit = !self.is_busy() && !self.state.forms.lookup_id.trim().is_empty();
        if ui.add_enabled(can_submit, egui::Button::new("Check availability")).clicked() {
            self.load_item();
        }
    }

    fn render_order_section(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("Inspect order").strong());
        ui.horizontal(|ui| {
            ui.label("Order");
            ui.text_edit_singleline(&mut self.state.forms.order_id);
        });

        let can_submit = !self.is_busy() && !self.state.forms.order_id.trim().is_empty();
        if ui.add_enabled(can_submit, egui::Button::new("Show bookings")).clicked() {
            self.inspect_order();
        }
    }

    pub(super) fn render_central_panel(&mut self, ctx: &egui::Context) {
        let is_dark = ctx.style().visuals.dark_mode;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_item_view(ui, is_dark);
                self.render_cart(ui, is_dark);
                self.render_order_view(ui, is_dark);
            });
        });
    }

    fn render_item_view(&mut self, ui: &mut egui::Ui, is_dark: bool) {
        let Some(view) = self.state.item_view.as_mut() else {
            ui.label(
                RichText::new("Look up a venue or studio to check its availability.")
                    .color(secondary_text_color(is_dark)),
            );
            return;
        };

        let item_type = view.item.item_type();
        ui.heading(format!("{} {}", item_type.icon(), view.item.name()));
        match &view.item {
            BookableItem::Venue(venue) => {
                if let Some(location) = &venue.location {
                    ui.label(format!("📍 {}", location));
                }
                if let Some(price) = venue.price {
                    ui.label(format!("{:.2} per day", price));
                }
            }
            BookableItem::Studio(studio) => {
                if let Some(price) = studio.price {
                    ui.label(format!("{:.2} per day", price));
                }
            }
        }

        let booked = view.picker.availability().intervals().len();
        ui.label(
            RichText::new(format!("{} existing booking(s)", booked)).color(secondary_text_color(is_dark)),
        );

        let label = if view.picker.is_open() { "Picking dates…" } else { "📅 Pick dates" };
        if ui.add_enabled(!view.picker.is_open(), egui::Button::new(label)).clicked() {
            view.picker.open();
        }
        ui.add_space(12.0);
    }

    fn render_cart(&mut self, ui: &mut egui::Ui, is_dark: bool) {
        if self.state.cart.is_empty() {
            return;
        }

        ui.separator();
        ui.label(RichText::new("Cart").strong());
        egui::Grid::new("cart_items").striped(true).num_columns(3).show(ui, |ui| {
            for item in &self.state.cart {
                ui.label(format!("{} {}", item.item_type.icon(), item.item_type.label()));
                ui.label(format!("{} → {}", short_date(&item.from), short_date(&item.till)));
                match item.price {
                    Some(price) => ui.label(format!("{:.2}", price)),
                    None => ui.label(RichText::new("-").color(secondary_text_color(is_dark))),
                };
                ui.end_row();
            }
        });
        ui.add_space(12.0);
    }

    fn render_order_view(&mut self, ui: &mut egui::Ui, is_dark: bool) {
        let Some(view) = self.state.order_view.as_mut() else {
            return;
        };

        ui.separator();
        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("Order {}", view.order.id)).strong());
            if !view.order.status.is_empty() {
                ui.label(RichText::new(&view.order.status).color(secondary_text_color(is_dark)));
            }
            if let Some(total) = view.order.total {
                ui.label(format!("Total {:.2}", total));
            }
        });

        if view.calendar.availability().intervals().is_empty() {
            ui.label("This order has no bookings.");
            return;
        }
        render_booking_calendar(ui, &mut view.calendar);
    }

    /// Floating picker for the current item; confirmed ranges go to the cart
    pub(super) fn render_item_picker(&mut self, ctx: &egui::Context) {
        let Some(view) = self.state.item_view.as_mut() else {
            return;
        };
        let action = render_date_range_picker(ctx, &mut view.picker);
        self.handle_picker_action(action);
    }
}

/// "2024-06-10T00:00:00.000Z" → "2024-06-10"
fn short_date(iso: &str) -> &str {
    iso.get(..10).unwrap_or(iso)
}
