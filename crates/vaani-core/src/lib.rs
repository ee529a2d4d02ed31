//! vaani-core — Pure types, canon data, and phonetics.
//!
//! No async runtime, no I/O, no platform dependencies.

pub mod canon;
pub mod phonetics;
pub mod types;
pub mod wav;
