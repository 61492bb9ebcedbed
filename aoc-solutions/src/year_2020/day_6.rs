use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::blocks;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 6, tags = ["2020", "sets"])]
pub struct Solver;

impl AocParser for Solver {
    /// One bit set per answered question (`a` is bit 0), one mask per person
    type SharedData<'a> = Vec<Vec<u32>>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        blocks(input)
            .into_iter()
            .map(|group| {
                group
                    .iter()
                    .map(|person| {
                        person.bytes().try_fold(0u32, |mask, b| match b {
                            b'a'..=b'z' => Ok(mask | 1u32 << (b - b'a')),
                            _ => Err(ParseError::InvalidFormat(format!(
                                "unexpected answer {:?} in {:?}",
                                b as char, person
                            ))),
                        })
                    })
                    .collect()
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sum_groups(shared, 0, |a, b| a | b).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sum_groups(shared, u32::MAX, |a, b| a & b).to_string())
    }
}

fn sum_groups(groups: &[Vec<u32>], init: u32, combine: impl Fn(u32, u32) -> u32) -> u32 {
    groups
        .iter()
        .map(|group| group.iter().copied().fold(init, &combine).count_ones())
        .sum()
}
