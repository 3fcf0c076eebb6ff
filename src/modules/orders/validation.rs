//! Lookup, validation, and status rules for order requests.

use grubdash_http::AppError;
use serde_json::{Map, Value};

use super::models::{LineItem, Order, OrderDraft, OrderStatus};
use crate::modules::fields::{self, CONTAINS_DIGIT, CONTAINS_LETTER};
use crate::store::Collection;

const STATUS_MESSAGE: &str =
    "Order must have a status of pending, preparing, out-for-delivery, delivered";

/// Resolve the route id to a stored order.
pub fn lookup(orders: &dyn Collection<Order>, order_id: &str) -> Result<Order, AppError> {
    orders
        .find(order_id)?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id} does not exist")))
}

/// Check the order fields in order, reporting the first failure.
pub fn validate(data: &Map<String, Value>) -> Result<OrderDraft, AppError> {
    let deliver_to = fields::text_matching(data, "deliverTo", &CONTAINS_LETTER)
        .ok_or_else(|| AppError::bad_request("Order must include a deliverTo"))?;

    let mobile_number = fields::text_matching(data, "mobileNumber", &CONTAINS_DIGIT)
        .ok_or_else(|| AppError::bad_request("Order must include a mobileNumber"))?;

    let dishes = fields::supplied(data, "dishes")
        .ok_or_else(|| AppError::bad_request("Order must include a dish"))?;
    let dishes = match dishes {
        Value::Array(items) if !items.is_empty() => items,
        _ => return Err(AppError::bad_request("Order must include at least one dish")),
    };

    let dishes = dishes
        .iter()
        .enumerate()
        .map(|(index, item)| line_item(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(OrderDraft {
        deliver_to,
        mobile_number,
        dishes,
    })
}

fn line_item(index: usize, item: &Value) -> Result<LineItem, AppError> {
    let invalid = || {
        AppError::bad_request(format!(
            "Dish {index} must have a quantity that is an integer greater than 0"
        ))
    };

    let Value::Object(entry) = item else {
        return Err(invalid());
    };
    let quantity = entry
        .get("quantity")
        .and_then(fields::positive_integer)
        .ok_or_else(invalid)?;

    let mut dish = entry.clone();
    dish.remove("quantity");
    Ok(LineItem { quantity, dish })
}

/// Status for a new order; `pending` unless one is supplied.
pub fn initial_status(data: &Map<String, Value>) -> Result<OrderStatus, AppError> {
    match fields::supplied(data, "status") {
        None => Ok(OrderStatus::Pending),
        Some(value) => parse_status(value),
    }
}

/// Rules for replacing an existing order, returning the new status.
pub fn transition(
    data: &Map<String, Value>,
    order_id: &str,
    current: &Order,
) -> Result<OrderStatus, AppError> {
    fields::ensure_route_id(data, order_id, "Order")?;

    let status = fields::supplied(data, "status")
        .ok_or_else(|| AppError::bad_request(STATUS_MESSAGE))
        .and_then(parse_status)?;

    if current.status == OrderStatus::Delivered {
        return Err(AppError::bad_request("A delivered order cannot be changed"));
    }

    Ok(status)
}

/// Only pending orders may be deleted.
pub fn ensure_deletable(order: &Order) -> Result<(), AppError> {
    if order.status != OrderStatus::Pending {
        return Err(AppError::bad_request(
            "An order cannot be deleted unless it is pending",
        ));
    }
    Ok(())
}

fn parse_status(value: &Value) -> Result<OrderStatus, AppError> {
    value
        .as_str()
        .and_then(|status| status.parse().ok())
        .ok_or_else(|| AppError::bad_request(STATUS_MESSAGE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryCollection;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    fn order_payload() -> Value {
        json!({
            "deliverTo": "123 Main",
            "mobileNumber": "555-0100",
            "dishes": [{ "id": "d1", "quantity": 2 }]
        })
    }

    fn stored(status: OrderStatus) -> Order {
        Order {
            id: "o1".to_string(),
            deliver_to: "123 Main".to_string(),
            mobile_number: "555-0100".to_string(),
            status,
            dishes: Vec::new(),
        }
    }

    fn rejection(value: Value) -> String {
        validate(&payload(value)).unwrap_err().message()
    }

    #[test]
    fn valid_payload_becomes_draft() {
        let draft = validate(&payload(order_payload())).unwrap();
        assert_eq!(draft.deliver_to, "123 Main");
        assert_eq!(draft.mobile_number, "555-0100");
        assert_eq!(draft.dishes.len(), 1);
        assert_eq!(draft.dishes[0].quantity, 2);
        assert_eq!(draft.dishes[0].dish, payload(json!({ "id": "d1" })));
    }

    #[test]
    fn contact_fields_are_checked_in_order() {
        assert_eq!(rejection(json!({})), "Order must include a deliverTo");

        let mut order = order_payload();
        order["mobileNumber"] = json!("call me");
        assert_eq!(rejection(order), "Order must include a mobileNumber");
    }

    #[test]
    fn dishes_must_be_a_non_empty_array() {
        let mut order = order_payload();
        order.as_object_mut().unwrap().remove("dishes");
        assert_eq!(rejection(order.clone()), "Order must include a dish");

        order["dishes"] = json!([]);
        assert_eq!(rejection(order.clone()), "Order must include at least one dish");

        order["dishes"] = json!({ "quantity": 1 });
        assert_eq!(rejection(order), "Order must include at least one dish");
    }

    #[test]
    fn first_invalid_quantity_is_reported() {
        let mut order = order_payload();
        order["dishes"] = json!([
            { "quantity": 1 },
            { "quantity": 0 },
            { "quantity": "2" },
            7
        ]);
        assert_eq!(
            rejection(order),
            "Dish 1 must have a quantity that is an integer greater than 0"
        );
    }

    #[test]
    fn status_defaults_to_pending_on_create() {
        assert_eq!(initial_status(&payload(json!({}))).unwrap(), OrderStatus::Pending);
        assert_eq!(
            initial_status(&payload(json!({ "status": "preparing" }))).unwrap(),
            OrderStatus::Preparing
        );
        assert_eq!(
            initial_status(&payload(json!({ "status": "lost" })))
                .unwrap_err()
                .message(),
            STATUS_MESSAGE
        );
    }

    #[test]
    fn transition_checks_id_before_status() {
        let err = transition(
            &payload(json!({ "id": "o2", "status": "bogus" })),
            "o1",
            &stored(OrderStatus::Pending),
        )
        .unwrap_err();
        assert_eq!(
            err.message(),
            "Order id does not match route id. Order: o2, Route: o1"
        );
    }

    #[test]
    fn transition_requires_known_status() {
        for body in [json!({}), json!({ "status": "" }), json!({ "status": "invalid" })] {
            let err = transition(&payload(body), "o1", &stored(OrderStatus::Pending)).unwrap_err();
            assert_eq!(err.message(), STATUS_MESSAGE);
        }
    }

    #[test]
    fn delivered_orders_are_frozen() {
        let next = transition(
            &payload(json!({ "status": "delivered" })),
            "o1",
            &stored(OrderStatus::OutForDelivery),
        )
        .unwrap();
        assert_eq!(next, OrderStatus::Delivered);

        let err = transition(
            &payload(json!({ "status": "pending" })),
            "o1",
            &stored(OrderStatus::Delivered),
        )
        .unwrap_err();
        assert_eq!(err.message(), "A delivered order cannot be changed");
    }

    #[test]
    fn only_pending_orders_are_deletable() {
        assert!(ensure_deletable(&stored(OrderStatus::Pending)).is_ok());
        for status in [
            OrderStatus::Preparing,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
        ] {
            assert_eq!(
                ensure_deletable(&stored(status)).unwrap_err().message(),
                "An order cannot be deleted unless it is pending"
            );
        }
    }

    #[test]
    fn lookup_reports_missing_order() {
        let orders = InMemoryCollection::with_records(vec![stored(OrderStatus::Pending)]);
        assert_eq!(lookup(&orders, "o1").unwrap().id, "o1");
        assert_eq!(
            lookup(&orders, "o9").unwrap_err().message(),
            "Order o9 does not exist"
        );
    }
}
