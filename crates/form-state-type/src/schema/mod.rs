//! Schema AST module.

pub mod builder;
pub mod schema;
pub mod validate;

pub use builder::SchemaBuilder;
pub use schema::*;
pub use validate::validate_schema;
