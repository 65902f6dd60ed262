//! Backends module - Data source integrations
//!
//! Provides:
//! - fetch: Organizations API client (blocking reqwest) and local document loading

pub mod fetch;
