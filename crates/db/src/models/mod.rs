//! Row structs and request DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` struct matching the database row, convertible into the
//!   core entity
//! - A `Deserialize` create DTO for inserts

pub mod goal;
pub mod sleep_log;
