// Catalog module
// Typed marketplace payloads: venues, studios, cart lines and orders

use serde::{Deserialize, Serialize};

use super::booked_interval::{ItemType, RawBookedInterval};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub booked_dates: Vec<RawBookedInterval>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Studio {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub booked_dates: Vec<RawBookedInterval>,
}

/// Anything the picker can be opened for
#[derive(Debug, Clone, PartialEq)]
pub enum BookableItem {
    Venue(Venue),
    Studio(Studio),
}

impl BookableItem {
    pub fn id(&self) -> &str {
        match self {
            BookableItem::Venue(v) => &v.id,
            BookableItem::Studio(s) => &s.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            BookableItem::Venue(v) => &v.name,
            BookableItem::Studio(s) => &s.name,
        }
    }

    pub fn item_type(&self) -> ItemType {
        match self {
            BookableItem::Venue(_) => ItemType::Venue,
            BookableItem::Studio(_) => ItemType::Studio,
        }
    }

    /// Booked dates, with the item's own name and type filled in where the backend left them blank
    pub fn booked_dates(&self) -> Vec<RawBookedInterval> {
        let raw = match self {
            BookableItem::Venue(v) => &v.booked_dates,
            BookableItem::Studio(s) => &s.booked_dates,
        };
        raw.iter()
            .cloned()
            .map(|mut entry| {
                if entry.item_name.trim().is_empty() {
                    entry.item_name = self.name().to_string();
                }
                if entry.item_type == ItemType::Other {
                    entry.item_type = self.item_type();
                }
                entry
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRequest {
    pub item_id: String,
    pub item_type: ItemType,
    pub from: String,
    pub till: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(alias = "_id")]
    pub id: String,
    pub item_id: String,
    #[serde(default)]
    pub item_type: ItemType,
    #[serde(alias = "bookedFrom")]
    pub from: String,
    #[serde(alias = "bookedTill")]
    pub till: String,
    #[serde(default)]
    pub price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub item_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub item_type: ItemType,
    #[serde(default)]
    pub booked_from: Option<String>,
    #[serde(default)]
    pub booked_till: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub booked_dates: Vec<RawBookedInterval>,
    #[serde(default)]
    pub total: Option<f64>,
}

impl Order {
    /// Explicit booked dates plus every line item that carries a date pair
    pub fn booking_intervals(&self) -> Vec<RawBookedInterval> {
        let mut intervals = self.booked_dates.clone();
        intervals.extend(self.items.iter().filter_map(|item| {
            let (from, till) = (item.booked_from.as_ref()?, item.booked_till.as_ref()?);
            Some(RawBookedInterval {
                booked_from: from.clone(),
                booked_till: till.clone(),
                item_name: item.name.clone(),
                item_type: item.item_type,
                color: None,
            })
        }));
        intervals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_venue_from_wire() {
        let venue: Venue = serde_json::from_str(
            r#"{
                "_id": "v-17",
                "name": "Rose Garden Hall",
                "price": 4200.0,
                "bookedDates": [
                    {"bookedFrom": "2024-06-10", "bookedTill": "2024-06-12"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(venue.id, "v-17");
        assert_eq!(venue.booked_dates.len(), 1);
        assert!(venue.location.is_none());
    }

    #[test]
    fn test_bookable_item_fills_missing_labels() {
        let item = BookableItem::Venue(Venue {
            id: "v-1".to_string(),
            name: "Rose Garden Hall".to_string(),
            location: None,
            price: None,
            booked_dates: vec![RawBookedInterval {
                booked_from: "2024-06-10".to_string(),
                booked_till: "2024-06-12".to_string(),
                ..Default::default()
            }],
        });

        let dates = item.booked_dates();
        assert_eq!(dates[0].item_name, "Rose Garden Hall");
        assert_eq!(dates[0].item_type, ItemType::Venue);
    }

    #[test]
    fn test_order_booking_intervals_include_items() {
        let order: Order = serde_json::from_str(
            r#"{
                "id": "o-1",
                "status": "paid",
                "items": [
                    {"itemId": "v-1", "name": "Hall", "itemType": "venue",
                     "bookedFrom": "2024-06-10", "bookedTill": "2024-06-12"},
                    {"itemId": "d-9", "name": "Cake", "itemType": "dish"}
                ],
                "bookedDates": [
                    {"bookedFrom": "2024-06-11", "bookedTill": "2024-06-11",
                     "itemName": "Lumen", "itemType": "studio"}
                ]
            }"#,
        )
        .unwrap();

        let intervals = order.booking_intervals();
        assert_eq!(intervals.len(), 2);
        assert_eq!(intervals[0].item_name, "Lumen");
        assert_eq!(intervals[1].item_name, "Hall");
        assert_eq!(order.items[1].item_type, ItemType::Other);
    }

    #[test]
    fn test_cart_request_wire_shape() {
        let request = CartRequest {
            item_id: "v-1".to_string(),
            item_type: ItemType::Venue,
            from: "2024-06-09T00:00:00.000Z".to_string(),
            till: "2024-06-15T00:00:00.000Z".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["itemId"], "v-1");
        assert_eq!(json["itemType"], "venue");
        assert_eq!(json["till"], "2024-06-15T00:00:00.000Z");
    }
}
