use serde::{Deserialize, Serialize};

use crate::store::Record;

/// A menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    /// Unique identifier for the dish, fixed at creation
    pub id: String,
    pub name: String,
    pub description: String,
    /// Price in whole currency units
    pub price: u64,
    pub image_url: String,
}

/// Validated dish fields from a create or update payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishDraft {
    pub name: String,
    pub description: String,
    pub price: u64,
    pub image_url: String,
}

impl Dish {
    pub fn from_draft(id: String, draft: DishDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            image_url: draft.image_url,
        }
    }

    /// Overwrite every field but `id`
    pub fn apply(&mut self, draft: DishDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.price = draft.price;
        self.image_url = draft.image_url;
    }
}

impl Record for Dish {
    fn id(&self) -> &str {
        &self.id
    }
}
