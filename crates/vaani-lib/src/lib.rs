//! vaani-lib — Recitation companion engine.
//!
//! Scripture fetching, Devanagari speech synthesis, and the HTTP API.
//! Depends on vaani-core for pure types and phonetics.

pub mod scripture;
pub mod server;
pub mod synth;

// Re-export vaani-core for convenience
pub use vaani_core;
