//! Core module - Data model, transformation and output plumbing
//!
//! This module provides:
//! - API entities with parse-time defaults (model)
//! - Record flattening and filtering (filter)
//! - Rendering to csv/jsonl/json (render)
//! - Output file naming (paths)
//! - Interactive prompts (prompt)
//! - Error types and common utilities

pub mod error;
pub mod filter;
pub mod model;
pub mod paths;
pub mod prompt;
pub mod render;
pub mod util;
