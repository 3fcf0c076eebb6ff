use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::modules::{dishes::models::Dish, orders::models::Order};

/// Initial collection contents read from a JSON file.
#[derive(Debug, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub dishes: Vec<Dish>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl Seed {
    /// Read the seed file, or start empty when no path is configured.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            tracing::info!("no seed file configured; starting with empty collections");
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read seed file {}", path.display()))?;
        let seed: Seed = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse seed file {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            dishes = seed.dishes.len(),
            orders = seed.orders.len(),
            "seed data loaded"
        );
        Ok(seed)
    }
}
