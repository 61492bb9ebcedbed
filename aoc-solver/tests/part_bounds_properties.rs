//! Property-based tests for part bounds validation

use aoc_solver::{AocParser, ParseError, SolveError, Solver, SolverExt};
use proptest::prelude::*;

/// Echo solver with a configurable number of parts
struct EchoSolver<const N: u8>;

impl<const N: u8> AocParser for EchoSolver<N> {
    type SharedData<'a> = ();

    fn parse(_input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(())
    }
}

impl<const N: u8> Solver for EchoSolver<N> {
    const PARTS: u8 = N;

    fn solve_part(_shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
        Ok(format!("part{}", part))
    }
}

fn checked(max_parts: u8, part: u8) -> Result<String, SolveError> {
    match max_parts {
        1 => EchoSolver::<1>::solve_part_checked_range(&mut (), part),
        2 => EchoSolver::<2>::solve_part_checked_range(&mut (), part),
        _ => EchoSolver::<3>::solve_part_checked_range(&mut (), part),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Part 0 and parts above PARTS never reach `solve_part`
    #[test]
    fn prop_out_of_range_rejection(max_parts in 1u8..=3, part in 0u8..=255) {
        let result = checked(max_parts, part);

        if part == 0 || part > max_parts {
            match result {
                Err(SolveError::PartOutOfRange(p)) => prop_assert_eq!(p, part),
                other => prop_assert!(false, "Expected PartOutOfRange, got {:?}", other),
            }
        } else {
            prop_assert_eq!(result.unwrap(), format!("part{}", part));
        }
    }

    /// In-range parts are delegated unchanged
    #[test]
    fn prop_valid_range_delegation(part in 1u8..=2) {
        let checked_result = EchoSolver::<2>::solve_part_checked_range(&mut (), part);
        let direct_result = EchoSolver::<2>::solve_part(&mut (), part);

        prop_assert_eq!(checked_result.unwrap(), direct_result.unwrap());
    }
}

#[test]
fn test_part_zero_rejected() {
    assert!(matches!(
        EchoSolver::<2>::solve_part_checked_range(&mut (), 0),
        Err(SolveError::PartOutOfRange(0))
    ));
}

#[test]
fn test_single_part_solver_rejects_part_two() {
    // Day 25 style solvers only have one part
    assert!(matches!(
        EchoSolver::<1>::solve_part_checked_range(&mut (), 2),
        Err(SolveError::PartOutOfRange(2))
    ));
}
