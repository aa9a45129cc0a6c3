//! Background HTTP requests.
//!
//! Every call to the backend runs on a worker thread and reports back over a
//! channel that [`BookingApp::poll_requests`] drains once per frame. Only one
//! request runs at a time; the panels disable their buttons while it does.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use super::state::LookupKind;
use super::BookingApp;
use crate::models::catalog::{BookableItem, CartItem, Order};
use crate::models::session::{AuthTokens, Session};
use crate::services::api::ApiError;
use crate::services::session::{TokenRefresher, TokenState};

/// Repaint interval while a request is outstanding
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub enum Outcome {
    SignedIn(Result<Session, ApiError>),
    ItemLoaded {
        kind: LookupKind,
        result: Result<BookableItem, ApiError>,
    },
    AddedToCart {
        item_name: String,
        result: Result<CartItem, ApiError>,
    },
    OrderLoaded(Result<Order, ApiError>),
    /// The token refresh failed so the request itself was never sent
    RefreshFailed,
}

/// What a worker thread sends back
pub struct Completed {
    /// Present when the worker had to refresh the access token first
    pub refresh: Option<Result<AuthTokens, ApiError>>,
    pub outcome: Outcome,
}

impl Completed {
    pub fn new(outcome: Outcome) -> Self {
        Self {
            refresh: None,
            outcome,
        }
    }
}

pub struct PendingRequest {
    pub label: String,
    rx: Receiver<Completed>,
}

impl PendingRequest {
    /// Run `work` on its own thread
    pub fn spawn<F>(label: impl Into<String>, work: F) -> Self
    where
        F: FnOnce() -> Completed + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(work());
        });
        Self {
            label: label.into(),
            rx,
        }
    }
}

/// Run `call` with a usable access token, exchanging the refresh token first
/// when the session asked for it.
pub fn with_token<R, F>(refresher: &R, token: TokenState, call: F) -> Completed
where
    R: TokenRefresher + ?Sized,
    F: FnOnce(&str) -> Outcome,
{
    match token {
        TokenState::Valid(access) => Completed::new(call(&access)),
        TokenState::NeedsRefresh(refresh_token) => match refresher.refresh(&refresh_token) {
            Ok(tokens) => {
                let outcome = call(&tokens.access_token);
                Completed {
                    refresh: Some(Ok(tokens)),
                    outcome,
                }
            }
            Err(e) => Completed {
                refresh: Some(Err(e)),
                outcome: Outcome::RefreshFailed,
            },
        },
    }
}

impl BookingApp {
    pub(super) fn is_busy(&self) -> bool {
        self.state.pending.is_some()
    }

    pub(super) fn busy_label(&self) -> Option<&str> {
        self.state.pending.as_ref().map(|p| p.label.as_str())
    }

    /// Start `work` in the background unless another request is running
    pub(super) fn start_request<F>(&mut self, label: impl Into<String>, work: F)
    where
        F: FnOnce() -> Completed + Send + 'static,
    {
        let label = label.into();
        if let Some(pending) = &self.state.pending {
            log::debug!("Ignoring '{}' while '{}' is running", label, pending.label);
            self.toasts.info("Please wait for the current request to finish");
            return;
        }
        log::debug!("Starting request: {}", label);
        self.state.pending = Some(PendingRequest::spawn(label, work));
    }

    /// Apply a finished request, and keep frames coming while one is running
    pub(super) fn poll_requests(&mut self, ctx: &egui::Context) {
        if let Some(completed) = self.take_completed() {
            self.apply_completed(completed);
        }
        if self.is_busy() {
            ctx.request_repaint_after(POLL_INTERVAL);
        }
    }

    fn take_completed(&mut self) -> Option<Completed> {
        let pending = self.state.pending.as_ref()?;
        match pending.rx.try_recv() {
            Ok(completed) => {
                self.state.pending = None;
                Some(completed)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                log::error!("Request '{}' ended without a result", pending.label);
                self.state.pending = None;
                self.toasts.error("The request stopped unexpectedly");
                None
            }
        }
    }

    fn apply_completed(&mut self, completed: Completed) {
        if let Some(result) = completed.refresh {
            if let Err(e) = self.session.apply_refresh(result) {
                log::warn!("No usable access token: {}", e);
                self.toasts.error("Your session has expired, please sign in again");
            }
        }

        match completed.outcome {
            Outcome::SignedIn(result) => self.finish_sign_in(result),
            Outcome::ItemLoaded { kind, result } => self.finish_load_item(kind, result),
            Outcome::AddedToCart { item_name, result } => self.finish_add_to_cart(&item_name, result),
            Outcome::OrderLoaded(result) => self.finish_inspect_order(result),
            Outcome::RefreshFailed => {}
        }
    }
}
