//! Domain entities and value objects exposed by the directory service layer.

pub mod dates;
pub mod employee;
pub mod query;
pub mod types;
