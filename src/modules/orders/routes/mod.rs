use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use grubdash_http::{method_not_allowed, AppError, Data, Payload};

use super::{
    models::{Order, OrderStatus},
    validation,
};
use crate::store::Collection;
use crate::utils;

/// Shared state for the order handlers
#[derive(Clone)]
pub struct OrderState {
    pub orders: Arc<dyn Collection<Order>>,
}

/// Order routes, relative to the module mount point
pub fn router(state: OrderState) -> Router {
    Router::new()
        .route("/", get(list).post(create).fallback(method_not_allowed))
        .route(
            "/{order_id}",
            get(read)
                .put(update)
                .delete(destroy)
                .fallback(method_not_allowed),
        )
        .with_state(state)
}

fn missing(order_id: &str) -> AppError {
    AppError::not_found(format!("Order {order_id} does not exist"))
}

async fn list(State(state): State<OrderState>) -> Result<Data<Vec<Order>>, AppError> {
    let orders = state.orders.list()?;
    tracing::debug!(count = orders.len(), "listing orders");
    Ok(Data::new(orders))
}

async fn create(
    State(state): State<OrderState>,
    Payload(data): Payload,
) -> Result<(StatusCode, Data<Order>), AppError> {
    let draft = validation::validate(&data)?;
    let status = validation::initial_status(&data)?;
    let order = state
        .orders
        .append(Order::from_draft(utils::next_id(), draft, status))?;

    tracing::info!(
        order_id = %order.id,
        status = %order.status,
        line_items = order.dishes.len(),
        "order created"
    );
    Ok((StatusCode::CREATED, Data::new(order)))
}

async fn read(
    State(state): State<OrderState>,
    Path(order_id): Path<String>,
) -> Result<Data<Order>, AppError> {
    let order = validation::lookup(state.orders.as_ref(), &order_id)?;
    tracing::debug!(order_id = %order.id, "order read");
    Ok(Data::new(order))
}

async fn update(
    State(state): State<OrderState>,
    Path(order_id): Path<String>,
    Payload(data): Payload,
) -> Result<Data<Order>, AppError> {
    let mut from = None;
    let order = state
        .orders
        .update_with(&order_id, &mut |current| {
            let draft = validation::validate(&data)?;
            let status = validation::transition(&data, &order_id, current)?;
            from = Some(current.status);
            Ok(Order::from_draft(current.id.clone(), draft, status))
        })?
        .ok_or_else(|| missing(&order_id))?;

    tracing::info!(
        order_id = %order.id,
        from = from.map(OrderStatus::as_str),
        to = %order.status,
        "order updated"
    );
    Ok(Data::new(order))
}

async fn destroy(
    State(state): State<OrderState>,
    Path(order_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let order = state
        .orders
        .remove_if(&order_id, &mut validation::ensure_deletable)?
        .ok_or_else(|| missing(&order_id))?;

    tracing::info!(order_id = %order.id, "order deleted");
    Ok(StatusCode::NO_CONTENT)
}
