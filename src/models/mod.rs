//! Core data models for the phrase console.
//!
//! Phrases map to the `phrases` table via `sqlx::FromRow` and serialize as
//! camelCase JSON; upload and clip types only live for a single request.

pub mod clip;
pub mod outcome;
pub mod phrase;
pub mod upload;
