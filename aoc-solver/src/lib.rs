//! Advent of Code Solver Library
//!
//! A small framework for writing Advent of Code solutions as independent
//! days: each day parses its own input, answers its parts, and registers
//! itself so a runner can find it by year and day.
//!
//! # Overview
//!
//! - [`AocParser`]: parse an input string into the day's shared data
//! - [`PartSolver<N>`]: answer part `N` from (and optionally into) that data
//! - [`Solver`]: dispatch a runtime part number to the right `PartSolver`
//! - [`DynSolver`]: object-safe, timed view of a parsed day
//! - [`SolverRegistryBuilder`] / [`SolverRegistry`]: flat year/day lookup
//! - [`SolverPlugin`]: `inventory`-based self-registration
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! struct ReportRepair;
//!
//! impl AocParser for ReportRepair {
//!     type SharedData<'a> = Vec<u32>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .lines()
//!             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for ReportRepair {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().sum::<u32>().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for ReportRepair {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.len().to_string())
//!     }
//! }
//!
//! let registry = SolverRegistryBuilder::new()
//!     .register_solver::<ReportRepair>(2020, 1)
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2020, 1, "1721\n299").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "2020");
//! assert_eq!(solver.solve(2).unwrap().answer, "2");
//! ```
//!
//! # Part Dependencies
//!
//! Parts share one mutable `SharedData`. A part that produces something a
//! later part needs stores it there (typically in an `Option` field), and the
//! later part recomputes it when run alone.
//!
//! # Self-registration
//!
//! ```ignore
//! #[derive(AocSolver, AutoRegisterSolver)]
//! #[aoc_solver(max_parts = 2)]
//! #[aoc(year = 2020, day = 1, tags = ["2020", "search"])]
//! pub struct Solver;
//! ```

mod error;
mod instance;
mod registry;
mod solver;

// Re-export public API
pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    FactoryInfo, RegisterableSolver, SolverFactory, SolverFactoryStorage, SolverPlugin,
    SolverRegistry, SolverRegistryBuilder, BASE_YEAR, CAPACITY, DAYS_PER_YEAR, MAX_YEARS,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Re-export inventory for use by the derive macro
pub use inventory;

// Re-export the derive macros
pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
