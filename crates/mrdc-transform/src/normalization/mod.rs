//! Column-level normalization shared by the entity cleaners.
//!
//! - **date**: date layout detection and calendar parsing
//! - **weight**: weight expressions to kilograms
//! - **address**: multi-line address splitting
//! - **numeric**: stripping and parsing of dirty numeric strings

pub mod address;
pub mod date;
pub mod numeric;
pub mod weight;

pub use address::{ADDRESS_COLUMNS, split_address, split_address_lines};
pub use date::{normalize_date, normalize_timestamp, parse_date, parse_timestamp};
pub use numeric::{digits_only, parse_f64, parse_i64, strip_chars};
pub use weight::{WeightUnit, normalize_weight, weight_to_kg};
