//! Core types and trait definitions for the padron person registry.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod error;
pub mod geography;
pub mod person;
pub mod sql;
pub mod validation;

pub use error::{Error, Result};
