use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use grubdash_http::{method_not_allowed, AppError, Data, Payload};

use super::{models::Dish, validation};
use crate::store::Collection;
use crate::utils;

/// Shared state for the dish handlers
#[derive(Clone)]
pub struct DishState {
    pub dishes: Arc<dyn Collection<Dish>>,
}

/// Dish routes, relative to the module mount point
pub fn router(state: DishState) -> Router {
    Router::new()
        .route("/", get(list).post(create).fallback(method_not_allowed))
        .route(
            "/{dish_id}",
            get(read).put(update).fallback(method_not_allowed),
        )
        .with_state(state)
}

async fn list(State(state): State<DishState>) -> Result<Data<Vec<Dish>>, AppError> {
    let dishes = state.dishes.list()?;
    tracing::debug!(count = dishes.len(), "listing dishes");
    Ok(Data::new(dishes))
}

async fn create(
    State(state): State<DishState>,
    Payload(data): Payload,
) -> Result<(StatusCode, Data<Dish>), AppError> {
    let draft = validation::validate(&data)?;
    let dish = state
        .dishes
        .append(Dish::from_draft(utils::next_id(), draft))?;

    tracing::info!(dish_id = %dish.id, price = dish.price, "dish created");
    Ok((StatusCode::CREATED, Data::new(dish)))
}

async fn read(
    State(state): State<DishState>,
    Path(dish_id): Path<String>,
) -> Result<Data<Dish>, AppError> {
    let dish = validation::lookup(state.dishes.as_ref(), &dish_id)?;
    tracing::debug!(dish_id = %dish.id, "dish read");
    Ok(Data::new(dish))
}

async fn update(
    State(state): State<DishState>,
    Path(dish_id): Path<String>,
    Payload(data): Payload,
) -> Result<Data<Dish>, AppError> {
    let dish = state
        .dishes
        .update_with(&dish_id, &mut |current| {
            let draft = validation::validate(&data)?;
            validation::ensure_matching_id(&data, &dish_id)?;

            let mut dish = current.clone();
            dish.apply(draft);
            Ok(dish)
        })?
        .ok_or_else(|| AppError::not_found(format!("Dish id does not exist: {dish_id}")))?;

    tracing::info!(dish_id = %dish.id, "dish updated");
    Ok(Data::new(dish))
}
