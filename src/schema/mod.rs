//! Schema definitions
//!
//! A [`Schema`] is the ordered, pre-compiled set of per-variable [`Rule`]s a
//! caller validates an env file against. Schemas are built in memory, either
//! through [`SchemaBuilder`] or from the one-line rule notation in
//! [`notation`].

pub mod notation;
pub mod rule;

pub use notation::{parse_rule, parse_schema};
pub use rule::{Rule, Schema, SchemaBuilder, ValueType};
