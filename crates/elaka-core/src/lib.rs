//! elaka/crates/elaka-core/src/lib.rs
//!
//! The central domain logic and interface definitions for Elaka, a
//! localized community-information service for Bangladesh.

pub mod error;
pub mod models;
pub mod taxonomy;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;
