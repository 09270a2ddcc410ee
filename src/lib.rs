//! Client for the remote employee directory service.
//!
//! The [`services::coordinator::SearchCoordinator`] owns the search state and
//! the last fetched listing; [`services::employees`] holds the mutations that
//! refresh it. The `console` feature adds a line-oriented front end.

pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod services;

#[cfg(feature = "console")]
pub mod console;
