//! DTO modules that bridge services with the presentation layer.

pub mod directory;
pub mod employee;
