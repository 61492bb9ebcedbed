//! Core solver traits

use crate::error::{ParseError, SolveError};

/// Parses a puzzle input into the data every part of a day works on.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct Expenses;
///
/// impl AocParser for Expenses {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
///             .collect()
///     }
/// }
///
/// assert_eq!(Expenses::parse("1721\n979").unwrap(), vec![1721, 979]);
/// ```
pub trait AocParser {
    /// Parsed input plus anything the parts want to hand to each other.
    ///
    /// Owned types are the common case; the lifetime allows borrowing
    /// straight from the input when no transformation is needed.
    type SharedData<'a>;

    /// Parse the input string into the shared data structure.
    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Solves part `N` of a puzzle.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
///
/// struct Expenses;
///
/// impl AocParser for Expenses {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
///             .collect()
///     }
/// }
///
/// impl PartSolver<1> for Expenses {
///     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
///         shared
///             .iter()
///             .max()
///             .map(|m| m.to_string())
///             .ok_or_else(|| SolveError::failed("no expenses"))
///     }
/// }
/// ```
pub trait PartSolver<const N: u8>: AocParser {
    /// Solve this part of the puzzle, possibly leaving results in `shared`
    /// for later parts.
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// A complete day: parsing plus a dispatcher over its parts.
///
/// Usually generated by `#[derive(AocSolver)]` from the `PartSolver` impls,
/// but it can be written by hand:
///
/// ```
/// use aoc_solver::{AocParser, ParseError, SolveError, Solver};
///
/// struct Groups;
///
/// impl AocParser for Groups {
///     type SharedData<'a> = Vec<&'a str>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(input.split("\n\n").collect())
///     }
/// }
///
/// impl Solver for Groups {
///     const PARTS: u8 = 2;
///
///     fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
///         match part {
///             1 => Ok(shared.len().to_string()),
///             2 => Ok(shared.iter().map(|g| g.lines().count()).sum::<usize>().to_string()),
///             _ => Err(SolveError::PartNotImplemented(part)),
///         }
///     }
/// }
///
/// let mut groups = Groups::parse("a\nb\n\nc").unwrap();
/// assert_eq!(Groups::solve_part(&mut groups, 1).unwrap(), "2");
/// assert_eq!(Groups::solve_part(&mut groups, 2).unwrap(), "3");
/// ```
pub trait Solver: AocParser {
    /// Number of parts this solver implements
    const PARTS: u8;

    /// Solve a specific part of the problem
    ///
    /// # Returns
    /// * `Ok(String)` - The answer for this part
    /// * `Err(SolveError::PartNotImplemented)` - The part is not implemented
    /// * `Err(SolveError::SolveFailed)` - An error occurred while solving
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

/// Range-checked entry point used by the runtime.
pub trait SolverExt: Solver {
    /// Like [`Solver::solve_part`], but parts outside `1..=PARTS` are
    /// rejected with [`SolveError::PartOutOfRange`] before dispatch.
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
