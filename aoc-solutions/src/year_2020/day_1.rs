use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::{number, parse_lines};

const TARGET: u32 = 2020;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 1, tags = ["2020", "search"])]
pub struct Solver;

impl AocParser for Solver {
    /// Sorted expenses, without entries that could never reach the target
    type SharedData<'a> = Vec<u32>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let mut expenses = parse_lines(input, |line| number::<u32>(line, "expense"))?;
        expenses.retain(|&expense| expense <= TARGET);
        expenses.sort_unstable();
        Ok(expenses)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        pair_summing_to(shared, TARGET)
            .map(|(a, b)| (a as u64 * b as u64).to_string())
            .ok_or_else(|| SolveError::failed("no two entries sum to 2020"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        (0..shared.len())
            .find_map(|i| {
                let first = shared[i];
                pair_summing_to(&shared[i + 1..], TARGET - first)
                    .map(|(b, c)| first as u64 * b as u64 * c as u64)
            })
            .map(|product| product.to_string())
            .ok_or_else(|| SolveError::failed("no three entries sum to 2020"))
    }
}

/// Two-pointer search over a sorted slice.
fn pair_summing_to(sorted: &[u32], target: u32) -> Option<(u32, u32)> {
    if sorted.len() < 2 {
        return None;
    }
    let (mut lo, mut hi) = (0, sorted.len() - 1);
    while lo < hi {
        let sum = sorted[lo] + sorted[hi];
        match sum.cmp(&target) {
            std::cmp::Ordering::Equal => return Some((sorted[lo], sorted[hi])),
            std::cmp::Ordering::Less => lo += 1,
            std::cmp::Ordering::Greater => hi -= 1,
        }
    }
    None
}
