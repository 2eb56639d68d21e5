//! Core types, item model and errors for the greeter theme engine.
//!
//! This crate provides the foundational types used by the parser and the
//! layout crates:
//! - the arena-owned item tree and its per-tree id table
//! - value types (colors, anchors, position and size requests, boxes)
//! - visual states and per-state style variants
//! - show predicates and the configuration accessor
//! - error types

pub mod config;
pub mod errors;
pub mod item;
pub mod show;
pub mod state;
pub mod tree;
pub mod types;

pub use config::*;
pub use errors::*;
pub use item::*;
pub use show::*;
pub use state::*;
pub use tree::*;
pub use types::*;
