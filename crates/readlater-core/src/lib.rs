//! # readlater-core
//!
//! Core types, traits, and abstractions for the ReadLater data layer.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the storage, remote channel, and backup crates depend on.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod traits;
pub mod uuid_utils;
pub mod views;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use traits::*;
pub use uuid_utils::{extract_timestamp_millis, new_v7};
pub use views::{filter_by_tag, priority_first, TaggedItem};
