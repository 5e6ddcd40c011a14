// src/graph/mod.rs

//! Graph storage and loading.
//!
//! - [`store`] holds the dense adjacency relation and static in-degrees.
//! - [`loader`] parses the text edge-list format into a [`GraphStore`].

pub mod loader;
pub mod store;

pub use loader::{load, load_from_path};
pub use store::{GraphStore, NodeIndex};
