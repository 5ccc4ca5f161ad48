//! Scoring modules.
//!
//! Pure aggregation from raw answers to category, pillar and overall
//! scores. Nothing here touches the network or the filesystem.

pub mod engine;

pub use engine::*;
