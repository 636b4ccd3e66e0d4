//! # User Interface
//!
//! Colored terminal status lines and match formatting.

pub mod log;

pub use log::{debug, ellipsize, error, header, info, score, success, warn, Log};
