//! # Command Implementations
//!
//! Each submodule handles one CLI command (build, predict, inspect, demo).

pub mod build;
pub mod demo;
pub mod inspect;
pub mod predict;
