//! Lookup and validation stages for dish requests.

use grubdash_http::AppError;
use serde_json::{Map, Value};

use super::models::{Dish, DishDraft};
use crate::modules::fields::{self, CONTAINS_LETTER};
use crate::store::Collection;

/// Resolve the route id to a stored dish.
pub fn lookup(dishes: &dyn Collection<Dish>, dish_id: &str) -> Result<Dish, AppError> {
    dishes
        .find(dish_id)?
        .ok_or_else(|| AppError::not_found(format!("Dish id does not exist: {dish_id}")))
}

/// Check the dish fields in order, reporting the first failure.
pub fn validate(data: &Map<String, Value>) -> Result<DishDraft, AppError> {
    let name = fields::text_matching(data, "name", &CONTAINS_LETTER)
        .ok_or_else(|| AppError::bad_request("A Dish must include a name"))?;

    let description = fields::text_matching(data, "description", &CONTAINS_LETTER)
        .ok_or_else(|| AppError::bad_request("Dish must include a description"))?;

    let price = fields::supplied(data, "price")
        .ok_or_else(|| AppError::bad_request("Dish must include a price"))?;
    let price = fields::positive_integer(price).ok_or_else(|| {
        AppError::bad_request("Dish must have a price that is an integer greater than 0")
    })?;

    let image_url = fields::text_matching(data, "image_url", &CONTAINS_LETTER)
        .ok_or_else(|| AppError::bad_request("Dish must include a image_url"))?;

    Ok(DishDraft {
        name,
        description,
        price,
        image_url,
    })
}

/// A payload `id`, when given, must name the routed dish.
pub fn ensure_matching_id(data: &Map<String, Value>, dish_id: &str) -> Result<(), AppError> {
    fields::ensure_route_id(data, dish_id, "Dish")
}
