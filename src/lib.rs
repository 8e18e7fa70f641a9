//! `envschema` - validate `.env` files against a declarative schema
//!
//! Parses a flat `KEY=value` file, then resolves defaults, enforces
//! requiredness, allowed values and patterns, and casts each variable to its
//! declared type.
//!
//! ```
//! use envschema::env_file::parse_str;
//! use envschema::schema::{Rule, Schema, ValueType};
//!
//! let schema = Schema::builder()
//!     .var("PORT", Rule::new().of_type(ValueType::Int).required())
//!     .var("DEBUG", Rule::new().of_type(ValueType::Bool).default_value(false))
//!     .build()
//!     .unwrap();
//!
//! let env = schema.validate(&parse_str("PORT=8080\n")).unwrap();
//! assert_eq!(env.get_int("PORT"), Some(8080));
//! assert_eq!(env.get_bool("DEBUG"), Some(false));
//! ```

pub mod cli;
pub mod env_file;
pub mod error;
pub mod observability;
pub mod schema;
pub mod validation;
pub mod value;

pub use env_file::RawEnv;
pub use error::{ErrorKind, SchemaError, ValidationError};
pub use schema::{Rule, Schema, SchemaBuilder, ValueType};
pub use validation::{validate, validate_file};
pub use value::{ValidatedEnv, Value};
