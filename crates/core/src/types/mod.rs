//! Core types for BizGenie.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod role;
pub mod score;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use role::Role;
pub use score::LeadScore;
pub use status::*;
