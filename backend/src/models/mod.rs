//! Data models for the Air Quality Dashboard backend
//!
//! Re-exports the shared data model

pub use shared::models::*;
pub use shared::types::*;
