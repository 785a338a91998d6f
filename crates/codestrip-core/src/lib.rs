//! Codestrip Core
//!
//! Shared types, the exclusion configuration and the error type used by the
//! codestrip engine and command line.

pub mod config;
pub mod error;
pub mod types;

pub use config::{guard_root, ExclusionConfig, StripOptions};
pub use error::{Error, Result};
pub use types::*;
