pub mod dishes;
pub mod fields;
pub mod orders;

use std::sync::Arc;

use grubdash_kernel::{settings::Settings, ModuleRegistry};

use crate::store::{InMemoryCollection, Seed};

/// Register the dishes and orders modules, seeding their collections from settings
pub fn register_all(registry: &mut ModuleRegistry, settings: &Settings) -> anyhow::Result<()> {
    let seed = Seed::load(settings.store.seed_path.as_deref())?;

    registry.register(dishes::create_module(Arc::new(
        InMemoryCollection::with_records(seed.dishes),
    )));
    registry.register(orders::create_module(Arc::new(
        InMemoryCollection::with_records(seed.orders),
    )));

    Ok(())
}
