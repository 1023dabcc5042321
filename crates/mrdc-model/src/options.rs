//! Cleaning configuration: the per-entity allow-lists.
//!
//! Allow-lists are plain immutable values. They are built once (from defaults
//! or a TOML file) and handed to each cleaner when it is constructed.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;

/// Country codes accepted for users and stores.
pub const DEFAULT_COUNTRY_CODES: &[&str] = &["GB", "DE", "US"];

/// Card providers accepted for card details.
pub const DEFAULT_CARD_PROVIDERS: &[&str] = &[
    "Diners Club / Carte Blanche",
    "American Express",
    "JCB 16 digit",
    "JCB 15 digit",
    "Maestro",
    "Mastercard",
    "Discover",
    "VISA 19 digit",
    "VISA 16 digit",
    "VISA 13 digit",
];

/// Product categories accepted for the catalogue.
pub const DEFAULT_PRODUCT_CATEGORIES: &[&str] = &[
    "toys-and-games",
    "sports-and-leisure",
    "pets",
    "homeware",
    "health-and-beauty",
    "food-and-drink",
    "diy",
];

/// Month values accepted for date/time events (not zero padded).
pub const DEFAULT_MONTHS: &[&str] = &[
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12",
];

/// A column name plus the exact string values permitted in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidEntries {
    /// Column the allow-list applies to.
    pub column: String,
    /// Permitted values (exact, case-sensitive).
    pub entries: BTreeSet<String>,
}

impl ValidEntries {
    pub fn new<I, S>(column: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            column: column.into(),
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true when `value` is on the allow-list. Missing values never are.
    pub fn contains(&self, value: Option<&str>) -> bool {
        value.is_some_and(|v| self.entries.contains(v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Allow-lists for every entity that filters rows.
///
/// Orders have no allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningOptions {
    pub user: ValidEntries,
    pub card: ValidEntries,
    pub store: ValidEntries,
    pub product: ValidEntries,
    pub date_time: ValidEntries,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            user: ValidEntries::new("country_code", DEFAULT_COUNTRY_CODES.iter().copied()),
            card: ValidEntries::new("card_provider", DEFAULT_CARD_PROVIDERS.iter().copied()),
            store: ValidEntries::new("country_code", DEFAULT_COUNTRY_CODES.iter().copied()),
            product: ValidEntries::new("category", DEFAULT_PRODUCT_CATEGORIES.iter().copied()),
            date_time: ValidEntries::new("month", DEFAULT_MONTHS.iter().copied()),
        }
    }
}

impl CleaningOptions {
    /// Returns the allow-list for an entity, or `None` for entities that do
    /// not filter rows.
    pub fn for_entity(&self, kind: EntityKind) -> Option<&ValidEntries> {
        match kind {
            EntityKind::User => Some(&self.user),
            EntityKind::Card => Some(&self.card),
            EntityKind::Store => Some(&self.store),
            EntityKind::Product => Some(&self.product),
            EntityKind::DateTime => Some(&self.date_time),
            EntityKind::Order => None,
        }
    }

    /// Parse options from TOML text. Sections that are absent keep their defaults.
    pub fn from_toml_str(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_are_never_valid() {
        let entries = ValidEntries::new("country_code", ["GB"]);
        assert!(entries.contains(Some("GB")));
        assert!(!entries.contains(Some("gb")));
        assert!(!entries.contains(None));
    }

    #[test]
    fn orders_have_no_allow_list() {
        let options = CleaningOptions::default();
        assert!(options.for_entity(EntityKind::Order).is_none());
        assert_eq!(
            options.for_entity(EntityKind::Product).map(|e| e.column.as_str()),
            Some("category")
        );
        assert_eq!(options.date_time.len(), 12);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let options = CleaningOptions::from_toml_str(
            r#"
            [user]
            column = "country_code"
            entries = ["GB"]
            "#,
        )
        .unwrap();
        assert_eq!(options.user.len(), 1);
        assert_eq!(options.card, CleaningOptions::default().card);
    }
}
