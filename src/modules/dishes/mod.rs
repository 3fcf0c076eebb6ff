pub mod models;
pub mod routes;
pub mod validation;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use grubdash_kernel::{InitCtx, Module};
use serde_json::json;

use crate::store::Collection;
use crate::utils;
use models::Dish;
use routes::DishState;

/// Dishes resource: list, create, read, and update menu items
pub struct DishesModule {
    state: DishState,
}

impl DishesModule {
    pub fn new(dishes: Arc<dyn Collection<Dish>>) -> Self {
        Self {
            state: DishState { dishes },
        }
    }
}

#[async_trait]
impl Module for DishesModule {
    fn name(&self) -> &'static str {
        "dishes"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            prefix = %utils::log_prefix(self.name()),
            environment = ?ctx.settings.environment,
            dishes = self.state.dishes.list()?.len(),
            "dishes module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = |description: &str| {
            json!({
                "description": description,
                "content": { "application/json": { "schema": { "$ref": "#/components/schemas/ErrorResponse" } } }
            })
        };
        let dish = |description: &str| {
            json!({
                "description": description,
                "content": { "application/json": { "schema": {
                    "type": "object",
                    "properties": { "data": { "$ref": "#/components/schemas/Dish" } },
                    "required": ["data"]
                } } }
            })
        };
        let body = json!({
            "required": true,
            "content": { "application/json": { "schema": {
                "type": "object",
                "properties": { "data": { "$ref": "#/components/schemas/DishInput" } },
                "required": ["data"]
            } } }
        });
        let dish_id = json!([{
            "name": "dishId",
            "in": "path",
            "required": true,
            "schema": { "type": "string" }
        }]);

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List dishes",
                        "tags": ["Dishes"],
                        "responses": {
                            "200": {
                                "description": "Every dish on the menu",
                                "content": { "application/json": { "schema": {
                                    "type": "object",
                                    "properties": { "data": {
                                        "type": "array",
                                        "items": { "$ref": "#/components/schemas/Dish" }
                                    } }
                                } } }
                            }
                        }
                    },
                    "post": {
                        "summary": "Create a dish",
                        "tags": ["Dishes"],
                        "requestBody": body,
                        "responses": {
                            "201": dish("Created dish"),
                            "400": error("Validation failed")
                        }
                    }
                },
                "/{dishId}": {
                    "get": {
                        "summary": "Read a dish",
                        "tags": ["Dishes"],
                        "parameters": dish_id,
                        "responses": {
                            "200": dish("The dish"),
                            "404": error("No dish with this id")
                        }
                    },
                    "put": {
                        "summary": "Update a dish",
                        "tags": ["Dishes"],
                        "parameters": dish_id,
                        "requestBody": body,
                        "responses": {
                            "200": dish("Updated dish"),
                            "400": error("Validation failed or id mismatch"),
                            "404": error("No dish with this id")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Dish": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string", "description": "Unique identifier for the dish" },
                            "name": { "type": "string" },
                            "description": { "type": "string" },
                            "price": { "type": "integer", "minimum": 1 },
                            "image_url": { "type": "string" }
                        },
                        "required": ["id", "name", "description", "price", "image_url"]
                    },
                    "DishInput": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string", "description": "Must match the route id when present" },
                            "name": { "type": "string" },
                            "description": { "type": "string" },
                            "price": { "type": "integer", "minimum": 1 },
                            "image_url": { "type": "string" }
                        },
                        "required": ["name", "description", "price", "image_url"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "dishes module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "dishes module stopped");
        Ok(())
    }
}

/// Create a new instance of the dishes module over the given collection
pub fn create_module(dishes: Arc<dyn Collection<Dish>>) -> Arc<dyn Module> {
    Arc::new(DishesModule::new(dishes))
}
