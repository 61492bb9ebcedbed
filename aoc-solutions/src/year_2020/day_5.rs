use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 5, tags = ["2020", "binary"])]
pub struct Solver;

impl AocParser for Solver {
    /// Seat IDs, sorted ascending
    type SharedData<'a> = Vec<u16>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let mut ids = parse_lines(input, seat_id)?;
        ids.sort_unstable();
        Ok(ids)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .last()
            .map(u16::to_string)
            .ok_or_else(|| SolveError::failed("no boarding passes"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .windows(2)
            .find(|pair| pair[1] == pair[0] + 2)
            .map(|pair| (pair[0] + 1).to_string())
            .ok_or_else(|| SolveError::failed("no gap between occupied seats"))
    }
}

/// The pass is a 10-bit number: F/L are zeros, B/R are ones, so the seat ID
/// `row * 8 + col` falls out directly.
fn seat_id(pass: &str) -> anyhow::Result<u16> {
    if pass.len() != 10 {
        anyhow::bail!("boarding pass {:?} must have 10 characters", pass);
    }
    pass.chars().enumerate().try_fold(0u16, |id, (idx, c)| {
        let bit = match (idx < 7, c) {
            (true, 'F') | (false, 'L') => 0,
            (true, 'B') | (false, 'R') => 1,
            _ => anyhow::bail!("unexpected {:?} at position {}", c, idx + 1),
        };
        Ok(id << 1 | bit)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2020::solve_example;
    use proptest::prelude::*;

    #[test]
    fn test_seat_ids() {
        assert_eq!(seat_id("FBFBBFFRLR").unwrap(), 357);
        assert_eq!(seat_id("BFFFBBFRRR").unwrap(), 567);
        assert_eq!(seat_id("FFFBBBFRRR").unwrap(), 119);
        assert_eq!(seat_id("BBFFBBFRLL").unwrap(), 820);
    }

    #[test]
    fn test_highest_seat() {
        let input = "FBFBBFFRLR\nBFFFBBFRRR\nFFFBBBFRRR\nBBFFBBFRLL\n";
        assert_eq!(solve_example::<Solver>(input, 1), "820");
    }

    fn encode(id: u16) -> String {
        (0..10)
            .rev()
            .map(|bit| {
                let one = id >> bit & 1 == 1;
                match (bit >= 3, one) {
                    (true, false) => 'F',
                    (true, true) => 'B',
                    (false, false) => 'L',
                    (false, true) => 'R',
                }
            })
            .collect()
    }

    #[test]
    fn test_missing_seat() {
        // IDs 8..=20 with 13 removed
        let input: String = (8..=20)
            .filter(|&id| id != 13)
            .map(|id| encode(id) + "\n")
            .collect();
        assert_eq!(solve_example::<Solver>(&input, 2), "13");
    }

    proptest! {
        #[test]
        fn prop_seat_id_is_row_times_eight_plus_column(row in 0u16..128, col in 0u16..8) {
            let pass = encode(row * 8 + col);
            prop_assert_eq!(seat_id(&pass).unwrap(), row * 8 + col);
            prop_assert!(pass[..7].chars().all(|c| c == 'F' || c == 'B'));
            prop_assert!(pass[7..].chars().all(|c| c == 'L' || c == 'R'));
        }
    }

    #[test]
    fn test_invalid_pass() {
        assert!(seat_id("FBFBBFFRL").is_err());
        assert!(seat_id("FBFBBFFRLF").is_err());
        assert!(seat_id("LBFBBFFRLR").is_err());
    }
}
