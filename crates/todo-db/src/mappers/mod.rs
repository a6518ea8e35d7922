//! Entity to model mappers
//!
//! Conversions from database rows to domain objects. Writes bind entity
//! fields directly, so there are no insert/update structs.

mod todo;
mod user;
