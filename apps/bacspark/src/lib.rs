//! # BAC Spark Library
//!
//! This library exposes the BAC Spark modules for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;

pub use error::AppError;

// Re-export bacspark_core for convenience
pub use bacspark_core;
