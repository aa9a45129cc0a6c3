//! Request handling behind the panels: sign-in, item lookup, cart and order inspection.
//!
//! Each action starts a background request; the matching `finish_*` method
//! applies its result once [`BookingApp::poll_requests`] receives it.

use std::thread;

use chrono::Utc;

use super::requests::{with_token, Completed, Outcome};
use super::state::{ItemView, LookupKind, OrderView};
use super::BookingApp;
use crate::models::catalog::{BookableItem, CartItem, CartRequest, Order};
use crate::models::selection::ConfirmedRange;
use crate::models::session::Session;
use crate::services::api::{ApiClient, ApiError};
use crate::services::availability::Availability;
use crate::services::calendar_grid::DisplayedMonth;
use crate::services::session::{SessionError, TokenState};
use crate::ui_egui::date_range_picker::{DateRangePickerAction, DateRangePickerState, PickerOptions};

impl BookingApp {
    /// A handle to move onto a worker thread
    fn api(&mut self) -> Option<ApiClient> {
        if self.api.is_none() {
            self.toasts.error("No connection to the marketplace server");
        }
        self.api.clone()
    }

    pub(super) fn sign_in(&mut self) {
        let email = self.state.forms.login_email.clone();
        let password = std::mem::take(&mut self.state.forms.login_password);
        let Some(api) = self.api() else { return };

        self.start_request("Signing in…", move || {
            Completed::new(Outcome::SignedIn(api.login(&email, &password)))
        });
    }

    pub(super) fn finish_sign_in(&mut self, result: Result<Session, ApiError>) {
        match result {
            Ok(session) => {
                let greeting = format!("Signed in as {}", session.user.email);
                self.session.login(session);
                self.toasts.success(greeting);
            }
            Err(e) => self.toasts.api_error("Sign-in failed", &e),
        }
    }

    /// Sign out at once; the logout call goes out in the background and its failure is only logged
    pub(super) fn sign_out(&mut self) {
        if let (Some(api), Some(session)) = (self.api.clone(), self.session.current()) {
            let token = session.tokens.access_token.clone();
            thread::spawn(move || {
                if let Err(e) = api.logout(&token) {
                    log::warn!("Logout request failed: {}", e);
                }
            });
        }
        self.session.clear();
        self.state.order_view = None;
        self.state.cart.clear();
        self.toasts.info("Signed out");
    }

    /// Fetch the venue or studio named in the lookup form
    pub(super) fn load_item(&mut self) {
        let id = self.state.forms.lookup_id.trim().to_string();
        let kind = self.state.forms.lookup_kind;
        let Some(api) = self.api() else { return };

        let label = format!("Loading {}…", kind.item_type().label());
        self.start_request(label, move || {
            let result = match kind {
                LookupKind::Venue => api.get_venue(&id).map(BookableItem::Venue),
                LookupKind::Studio => api.get_studio(&id).map(BookableItem::Studio),
            };
            Completed::new(Outcome::ItemLoaded { kind, result })
        });
    }

    pub(super) fn finish_load_item(&mut self, kind: LookupKind, result: Result<BookableItem, ApiError>) {
        match result {
            Ok(item) => {
                log::info!(
                    "Loaded {} '{}' with {} booking(s)",
                    item.item_type().label(),
                    item.name(),
                    item.booked_dates().len()
                );
                let picker = self.build_item_picker(&item);
                self.state.item_view = Some(ItemView { item, picker });
            }
            Err(e) => self
                .toasts
                .api_error(&format!("Could not load {}", kind.item_type().label()), &e),
        }
    }

    fn build_item_picker(&mut self, item: &BookableItem) -> DateRangePickerState {
        let availability = Availability::from_raw(
            &item.booked_dates(),
            self.settings.invalid_interval_policy,
            self.today(),
            false,
        );
        if availability.is_blocking_all() {
            self.toasts
                .warning("Some bookings could not be read; dates are blocked until the data is fixed");
        }

        let options = PickerOptions {
            title: format!("Book {}", item.name()),
            id_salt: format!("item_{}", item.id()),
            show_legend: self.settings.show_legend,
            week_starts_on_monday: self.settings.week_starts_on_monday(),
            ..PickerOptions::default()
        };
        let mut picker = DateRangePickerState::from_availability(availability, options);
        picker.close();
        picker
    }

    pub(super) fn handle_picker_action(&mut self, action: DateRangePickerAction) {
        match action {
            DateRangePickerAction::None => {}
            DateRangePickerAction::Closed => log::debug!("Date picker dismissed"),
            DateRangePickerAction::Confirmed(range) => self.add_to_cart(range),
        }
    }

    fn add_to_cart(&mut self, range: ConfirmedRange) {
        let Some(view) = self.state.item_view.as_ref() else {
            return;
        };

        if let Some((from, till)) = range.days() {
            let conflicts = view.picker.availability().conflicts(from, till);
            if !conflicts.is_empty() {
                let names: Vec<&str> = conflicts.iter().map(|c| c.item_name.as_str()).collect();
                self.toasts.warning(format!(
                    "Those dates overlap an existing booking ({})",
                    names.join(", ")
                ));
                return;
            }
        }

        let request = CartRequest {
            item_id: view.item.id().to_string(),
            item_type: view.item.item_type(),
            from: range.from,
            till: range.till,
        };
        let item_name = view.item.name().to_string();

        let Some(token) = self.token_state() else { return };
        let Some(api) = self.api() else { return };

        self.start_request("Adding to cart…", move || {
            with_token(&api, token, |access| Outcome::AddedToCart {
                item_name,
                result: api.add_to_cart(&request, access),
            })
        });
    }

    pub(super) fn finish_add_to_cart(&mut self, item_name: &str, result: Result<CartItem, ApiError>) {
        match result {
            Ok(cart_item) => {
                self.state.cart.push(cart_item);
                self.toasts.success(format!("{} added to cart", item_name));
            }
            Err(ApiError::Unauthorized) => {
                self.session.clear();
                self.toasts.error("Your session has expired, please sign in again");
            }
            Err(e) => self.toasts.api_error("Could not add to cart", &e),
        }
    }

    /// Admin-only: fetch an order and show its bookings read-only
    pub(super) fn inspect_order(&mut self) {
        if !self.session.is_admin() {
            self.toasts.warning("Only administrators can inspect orders");
            return;
        }

        let id = self.state.forms.order_id.trim().to_string();
        let Some(token) = self.token_state() else { return };
        let Some(api) = self.api() else { return };

        self.start_request("Loading order…", move || {
            with_token(&api, token, |access| Outcome::OrderLoaded(api.get_order(&id, access)))
        });
    }

    pub(super) fn finish_inspect_order(&mut self, result: Result<Order, ApiError>) {
        let order = match result {
            Ok(order) => order,
            Err(e) => {
                self.toasts.api_error("Could not load order", &e);
                return;
            }
        };

        let availability = Availability::from_raw(
            &order.booking_intervals(),
            self.settings.invalid_interval_policy,
            self.today(),
            true,
        );
        let mut calendar = DateRangePickerState::from_availability(
            availability,
            PickerOptions {
                title: format!("Order {} bookings", order.id),
                id_salt: format!("order_{}", order.id),
                show_legend: true,
                week_starts_on_monday: self.settings.week_starts_on_monday(),
                ..PickerOptions::read_only("")
            },
        );
        // Open on the first booked month rather than today
        let first_booking = calendar.summary().entries.first().map(|entry| entry.from);
        if let Some(from) = first_booking {
            calendar.show_month(DisplayedMonth::containing(from));
        }
        self.state.order_view = Some(OrderView { order, calendar });
    }

    fn token_state(&mut self) -> Option<TokenState> {
        match self.session.token_state(Utc::now()) {
            Ok(state) => Some(state),
            Err(SessionError::NotSignedIn) => {
                self.toasts.warning("Please sign in first");
                None
            }
            Err(e) => {
                log::warn!("No usable access token: {}", e);
                self.toasts.error("Your session has expired, please sign in again");
                None
            }
        }
    }
}
