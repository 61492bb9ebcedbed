//! Advent of Code 2020 puzzle solutions with automatic registration
//!
//! Each day lives in its own module and registers itself with the solver
//! framework through the `AutoRegisterSolver` derive macro, so linking this
//! crate is enough for a runner to find every day.

pub mod utils;

#[cfg(feature = "year-2020")]
pub mod year_2020;
