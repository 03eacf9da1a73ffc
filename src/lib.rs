//! Bountyboard - Terminal dashboard for a bounty workspace
//!
//! This library crate exposes internal modules for integration testing.

pub mod config;
pub mod data;
pub mod store;
pub mod tui;
