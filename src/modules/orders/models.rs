use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::store::Record;

/// Delivery progress of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OutForDelivery => "out-for-delivery",
            OrderStatus::Delivered => "delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownStatus(value.to_string()))
    }
}

/// One dish in an order with how many of it were ordered.
///
/// Everything besides `quantity` (dish id, name, price, ...) is kept as sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub quantity: u64,
    #[serde(flatten)]
    pub dish: Map<String, Value>,
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique identifier for the order, fixed at creation
    pub id: String,
    pub deliver_to: String,
    pub mobile_number: String,
    #[serde(default)]
    pub status: OrderStatus,
    pub dishes: Vec<LineItem>,
}

/// Validated order fields shared by create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub deliver_to: String,
    pub mobile_number: String,
    pub dishes: Vec<LineItem>,
}

impl Order {
    pub fn from_draft(id: String, draft: OrderDraft, status: OrderStatus) -> Self {
        Self {
            id,
            deliver_to: draft.deliver_to,
            mobile_number: draft.mobile_number,
            status,
            dishes: draft.dishes,
        }
    }
}

impl Record for Order {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_round_trips_through_kebab_case() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
            assert_eq!(serde_json::to_value(status).unwrap(), json!(status.as_str()));
        }
        let err = "shipped".parse::<OrderStatus>().unwrap_err();
        assert_eq!(err.to_string(), "unknown order status 'shipped'");
    }

    #[test]
    fn order_serializes_camel_case_with_flat_line_items() {
        let order = Order {
            id: "o1".to_string(),
            deliver_to: "123 Main".to_string(),
            mobile_number: "555-0100".to_string(),
            status: OrderStatus::OutForDelivery,
            dishes: vec![LineItem {
                quantity: 2,
                dish: json!({ "id": "d1", "name": "Taco" })
                    .as_object()
                    .unwrap()
                    .clone(),
            }],
        };

        assert_eq!(
            serde_json::to_value(&order).unwrap(),
            json!({
                "id": "o1",
                "deliverTo": "123 Main",
                "mobileNumber": "555-0100",
                "status": "out-for-delivery",
                "dishes": [{ "quantity": 2, "id": "d1", "name": "Taco" }]
            })
        );
    }
}
