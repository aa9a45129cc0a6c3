use crate::models::booked_interval::ItemType;
use crate::models::catalog::{BookableItem, CartItem, Order};
use super::requests::PendingRequest;
use crate::ui_egui::date_range_picker::DateRangePickerState;

/// Text fields and choices of the side panel
#[derive(Debug, Default)]
pub struct FormState {
    pub login_email: String,
    pub login_password: String,
    pub lookup_kind: LookupKind,
    pub lookup_id: String,
    pub order_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupKind {
    #[default]
    Venue,
    Studio,
}

impl LookupKind {
    pub fn item_type(self) -> ItemType {
        match self {
            LookupKind::Venue => ItemType::Venue,
            LookupKind::Studio => ItemType::Studio,
        }
    }
}

/// The item currently shown, with its booking picker
pub struct ItemView {
    pub item: BookableItem,
    pub picker: DateRangePickerState,
}

/// Admin inspection of one order's booking calendar
pub struct OrderView {
    pub order: Order,
    pub calendar: DateRangePickerState,
}

#[derive(Default)]
pub struct AppState {
    pub forms: FormState,
    pub item_view: Option<ItemView>,
    pub order_view: Option<OrderView>,
    pub cart: Vec<CartItem>,
    /// The request currently running in the background
    pub pending: Option<PendingRequest>,
}
