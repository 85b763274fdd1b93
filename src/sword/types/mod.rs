//! Foundational data structures, error types, and the work catalog.

pub mod catalog;
pub mod error;
pub mod models;
