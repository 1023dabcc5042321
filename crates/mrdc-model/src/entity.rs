//! Business entities handled by the pipeline.
//!
//! Each entity arrives from its own source system and is loaded into a single
//! dimension or fact table in the target store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of record set flowing through one extract → clean → load run.
///
/// The kind is passed explicitly to steps whose behaviour differs per entity
/// (for example address splitting), so nothing has to be inferred from which
/// columns happen to be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Registered customers (legacy users table).
    User,
    /// Payment cards (exported from the card details PDF).
    Card,
    /// Physical and web stores (store REST API).
    Store,
    /// Product catalogue (object store CSV).
    Product,
    /// Order facts (orders table).
    Order,
    /// Sale date/time events (object store JSON).
    DateTime,
}

impl EntityKind {
    /// All entities, in the order the pipeline processes them.
    pub const ALL: [EntityKind; 6] = [
        EntityKind::User,
        EntityKind::Card,
        EntityKind::Store,
        EntityKind::Product,
        EntityKind::Order,
        EntityKind::DateTime,
    ];

    /// Returns the short configuration name (`user`, `date_time`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Card => "card",
            EntityKind::Store => "store",
            EntityKind::Product => "product",
            EntityKind::Order => "order",
            EntityKind::DateTime => "date_time",
        }
    }

    /// Returns the name of the table the cleaned data is loaded into.
    pub fn target_table(&self) -> &'static str {
        match self {
            EntityKind::User => "dim_users",
            EntityKind::Card => "dim_card_details",
            EntityKind::Store => "dim_store_details",
            EntityKind::Product => "dim_products",
            EntityKind::Order => "orders_table",
            EntityKind::DateTime => "dim_date_times",
        }
    }

    /// Returns a human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            EntityKind::User => "Customer accounts",
            EntityKind::Card => "Payment card details",
            EntityKind::Store => "Store details",
            EntityKind::Product => "Product catalogue",
            EntityKind::Order => "Orders",
            EntityKind::DateTime => "Sale date/time events",
        }
    }

    /// Whether source addresses for this entity end with a `, <locality>`
    /// segment that must be removed before line splitting.
    pub fn address_has_locality(&self) -> bool {
        matches!(self, EntityKind::Card)
    }

    /// Whether the last address line ends with `, <town>`. Only that line's
    /// trailing segment is removed; earlier lines keep their commas.
    pub fn address_last_line_has_town(&self) -> bool {
        matches!(self, EntityKind::Store)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    /// Parse an entity name (case-insensitive, `-` and `_` interchangeable).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "user" | "users" => Ok(EntityKind::User),
            "card" | "cards" => Ok(EntityKind::Card),
            "store" | "stores" => Ok(EntityKind::Store),
            "product" | "products" => Ok(EntityKind::Product),
            "order" | "orders" => Ok(EntityKind::Order),
            "date_time" | "date_times" | "datetime" => Ok(EntityKind::DateTime),
            _ => Err(format!("unknown entity: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_entity_names() {
        assert_eq!("user".parse::<EntityKind>(), Ok(EntityKind::User));
        assert_eq!("Date-Time".parse::<EntityKind>(), Ok(EntityKind::DateTime));
        assert_eq!("orders".parse::<EntityKind>(), Ok(EntityKind::Order));
        assert!("invoice".parse::<EntityKind>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.to_string().parse::<EntityKind>(), Ok(kind));
        }
    }

    #[test]
    fn only_cards_strip_locality() {
        assert!(EntityKind::Card.address_has_locality());
        assert!(!EntityKind::Store.address_has_locality());
        assert!(!EntityKind::User.address_has_locality());
        assert!(EntityKind::Store.address_last_line_has_town());
        assert!(!EntityKind::User.address_last_line_has_town());
    }
}
