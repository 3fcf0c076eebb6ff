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
use models::{Order, OrderStatus};
use routes::OrderState;

/// Orders resource: the full order lifecycle from pending to delivered
pub struct OrdersModule {
    state: OrderState,
}

impl OrdersModule {
    pub fn new(orders: Arc<dyn Collection<Order>>) -> Self {
        Self {
            state: OrderState { orders },
        }
    }
}

#[async_trait]
impl Module for OrdersModule {
    fn name(&self) -> &'static str {
        "orders"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let orders = self.state.orders.list()?;
        let pending = orders
            .iter()
            .filter(|order| order.status == OrderStatus::Pending)
            .count();

        tracing::info!(
            module = self.name(),
            prefix = %utils::log_prefix(self.name()),
            environment = ?ctx.settings.environment,
            orders = orders.len(),
            pending,
            "orders module initialized"
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
        let order = |description: &str| {
            json!({
                "description": description,
                "content": { "application/json": { "schema": {
                    "type": "object",
                    "properties": { "data": { "$ref": "#/components/schemas/Order" } },
                    "required": ["data"]
                } } }
            })
        };
        let body = json!({
            "required": true,
            "content": { "application/json": { "schema": {
                "type": "object",
                "properties": { "data": { "$ref": "#/components/schemas/OrderInput" } },
                "required": ["data"]
            } } }
        });
        let order_id = json!([{
            "name": "orderId",
            "in": "path",
            "required": true,
            "schema": { "type": "string" }
        }]);
        let statuses: Vec<&str> = OrderStatus::ALL.iter().map(|s| s.as_str()).collect();

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List orders",
                        "tags": ["Orders"],
                        "responses": {
                            "200": {
                                "description": "Every order",
                                "content": { "application/json": { "schema": {
                                    "type": "object",
                                    "properties": { "data": {
                                        "type": "array",
                                        "items": { "$ref": "#/components/schemas/Order" }
                                    } }
                                } } }
                            }
                        }
                    },
                    "post": {
                        "summary": "Place an order",
                        "tags": ["Orders"],
                        "requestBody": body,
                        "responses": {
                            "201": order("Created order, pending unless a status was given"),
                            "400": error("Validation failed")
                        }
                    }
                },
                "/{orderId}": {
                    "get": {
                        "summary": "Read an order",
                        "tags": ["Orders"],
                        "parameters": order_id,
                        "responses": {
                            "200": order("The order"),
                            "404": error("No order with this id")
                        }
                    },
                    "put": {
                        "summary": "Replace an order",
                        "tags": ["Orders"],
                        "parameters": order_id,
                        "requestBody": body,
                        "responses": {
                            "200": order("Updated order"),
                            "400": error("Validation failed, id mismatch, or order already delivered"),
                            "404": error("No order with this id")
                        }
                    },
                    "delete": {
                        "summary": "Cancel a pending order",
                        "tags": ["Orders"],
                        "parameters": order_id,
                        "responses": {
                            "204": { "description": "Order removed" },
                            "400": error("Order is no longer pending"),
                            "404": error("No order with this id")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "OrderStatus": {
                        "type": "string",
                        "enum": statuses
                    },
                    "LineItem": {
                        "type": "object",
                        "description": "A dish reference plus the quantity ordered",
                        "properties": {
                            "quantity": { "type": "integer", "minimum": 1 }
                        },
                        "required": ["quantity"],
                        "additionalProperties": true
                    },
                    "Order": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string", "description": "Unique identifier for the order" },
                            "deliverTo": { "type": "string" },
                            "mobileNumber": { "type": "string" },
                            "status": { "$ref": "#/components/schemas/OrderStatus" },
                            "dishes": { "type": "array", "items": { "$ref": "#/components/schemas/LineItem" } }
                        },
                        "required": ["id", "deliverTo", "mobileNumber", "status", "dishes"]
                    },
                    "OrderInput": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string", "description": "Must match the route id when present" },
                            "deliverTo": { "type": "string" },
                            "mobileNumber": { "type": "string" },
                            "status": { "$ref": "#/components/schemas/OrderStatus" },
                            "dishes": {
                                "type": "array",
                                "minItems": 1,
                                "items": { "$ref": "#/components/schemas/LineItem" }
                            }
                        },
                        "required": ["deliverTo", "mobileNumber", "dishes"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "orders module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "orders module stopped");
        Ok(())
    }
}

/// Create a new instance of the orders module over the given collection
pub fn create_module(orders: Arc<dyn Collection<Order>>) -> Arc<dyn Module> {
    Arc::new(OrdersModule::new(orders))
}
