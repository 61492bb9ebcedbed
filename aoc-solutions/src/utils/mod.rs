//! Helpers shared between days

pub mod dp_cache;
pub mod grid;
pub mod math;
pub mod parse;
