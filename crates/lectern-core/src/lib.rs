//! Core types and trait definitions for the lectern lecture store.
//!
//! This crate is deliberately free of parsing and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod attachment;
pub mod error;
pub mod lecture;
pub mod store;
pub mod subject;

pub use error::{Error, Result};
