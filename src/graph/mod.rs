// src/graph/mod.rs
//! Dependency graph model: immutable CSR adjacency plus a removal overlay.

pub mod builder;
pub mod mask;
pub mod model;
pub mod random;

pub use builder::GraphBuilder;
pub use mask::AliveMask;
pub use model::DepGraph;

/// Dense node handle. Labels are interned at build time; everything past the
/// builder speaks ids.
pub type NodeId = u32;
