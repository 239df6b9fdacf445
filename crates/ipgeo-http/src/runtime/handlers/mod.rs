//! HTTP request handlers
//!
//! This module contains all the HTTP endpoint handlers organized by functionality.

pub mod health;
pub mod metrics;
pub mod skill;

pub use health::*;
pub use metrics::*;
pub use skill::*;
