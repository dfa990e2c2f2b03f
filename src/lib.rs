//! Star Wars character browser
//!
//! This library exposes the app's modules for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod effect;
pub mod favorites;
pub mod persist;
pub mod reducer;
pub mod state;
