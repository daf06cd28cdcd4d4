//! Core response shaping for the upstream mock server
//!
//! This crate holds everything a handler composes to build a response,
//! with no knowledge of HTTP:
//! - random payload generation over `[a-zA-Z]`
//! - human readable size parsing ("6G", "512KB")
//! - the header driven delay simulator (fixed, probabilistic and slowdown)
//! - the seeded, read-only resource store

pub mod delay;
pub mod duration;
pub mod error;
pub mod payload;
pub mod resource;
pub mod size;

// Re-export commonly used types at the crate root
pub use delay::{DelayDirective, DelayPlan, DelaySimulator, DelayStage};
pub use duration::parse_duration;
pub use error::{CoreError, CoreResult, FormatKind};
pub use payload::{random_letters, random_letters_with};
pub use resource::{index_page, resolve_limit, Resource, ResourceStore};
pub use size::{format_size, parse_size, ByteUnit};
