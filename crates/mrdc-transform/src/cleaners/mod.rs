//! Per-entity cleaning pipelines.
//!
//! Each entity has a pure function (`clean_user_data`, `clean_card_data`, ...)
//! that takes a frame plus its allow-list and returns the cleaned frame. The
//! [`EntityCleaner`] trait wraps those functions with the allow-list bound at
//! construction so the orchestration layer can look cleaners up by kind.
//!
//! | Entity | Key operations |
//! |--------|----------------|
//! | user | row index, `NULL` surnames, country code, two dates, address |
//! | card | provider, payment date, compound number/expiry, fresh index |
//! | store | row index, country code, continent, opening date, staff count, address |
//! | product | row index, category, price, date added, weight |
//! | order | placeholder columns, row index |
//! | date_time | month, composite timestamp |

mod card;
mod date_time;
mod order;
mod product;
mod store;
mod user;

pub use card::{COMPOUND_CARD_COLUMN, CardCleaner, clean_card_data, reconcile_card_fields};
pub use date_time::{DateTimeCleaner, clean_date_time_data};
pub use order::{OrderCleaner, clean_order_data};
pub use product::{ProductCleaner, clean_product_data};
pub use store::{StoreCleaner, clean_store_data};
pub use user::{UserCleaner, clean_user_data};

use std::collections::HashMap;

use mrdc_model::{CleaningOptions, EntityKind};
use polars::prelude::DataFrame;

use crate::error::Result;

/// Cleaning logic for one entity.
///
/// Implementors own their allow-list; `clean` has no side effects beyond
/// logging.
pub trait EntityCleaner: Send + Sync {
    /// Entity handled by this cleaner.
    fn kind(&self) -> EntityKind;

    /// Human-readable summary of the steps.
    fn description(&self) -> &'static str {
        "Entity cleaner"
    }

    /// Run every cleaning step in order, consuming the input frame.
    fn clean(&self, df: DataFrame) -> Result<DataFrame>;
}

/// Cleaners indexed by entity kind.
pub struct CleanerRegistry {
    cleaners: HashMap<EntityKind, Box<dyn EntityCleaner>>,
}

impl CleanerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            cleaners: HashMap::new(),
        }
    }

    /// Builds a registry with one cleaner per entity, bound to `options`.
    pub fn from_options(options: &CleaningOptions) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(UserCleaner::new(options.user.clone())));
        registry.register(Box::new(CardCleaner::new(options.card.clone())));
        registry.register(Box::new(StoreCleaner::new(options.store.clone())));
        registry.register(Box::new(ProductCleaner::new(options.product.clone())));
        registry.register(Box::new(OrderCleaner));
        registry.register(Box::new(DateTimeCleaner::new(options.date_time.clone())));
        registry
    }

    /// Registers a cleaner, replacing any previous one for the same entity.
    pub fn register(&mut self, cleaner: Box<dyn EntityCleaner>) {
        self.cleaners.insert(cleaner.kind(), cleaner);
    }

    pub fn get(&self, kind: EntityKind) -> Option<&dyn EntityCleaner> {
        self.cleaners.get(&kind).map(|c| c.as_ref())
    }

    pub fn len(&self) -> usize {
        self.cleaners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cleaners.is_empty()
    }

    /// Registered entities in pipeline order.
    pub fn kinds(&self) -> Vec<EntityKind> {
        let mut kinds: Vec<EntityKind> = self.cleaners.keys().copied().collect();
        kinds.sort();
        kinds
    }
}

impl Default for CleanerRegistry {
    fn default() -> Self {
        Self::from_options(&CleaningOptions::default())
    }
}

/// Clean a frame for the given entity using the allow-lists in `options`.
pub fn clean_entity(kind: EntityKind, df: DataFrame, options: &CleaningOptions) -> Result<DataFrame> {
    match kind {
        EntityKind::User => clean_user_data(df, &options.user),
        EntityKind::Card => clean_card_data(df, &options.card),
        EntityKind::Store => clean_store_data(df, &options.store),
        EntityKind::Product => clean_product_data(df, &options.product),
        EntityKind::Order => clean_order_data(df),
        EntityKind::DateTime => clean_date_time_data(df, &options.date_time),
    }
}
