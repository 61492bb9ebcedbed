use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::dp_cache::{DpCache, DpProblem, VecBackend};
use crate::utils::parse::{number, parse_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 10, tags = ["2020", "dp"])]
pub struct Solver;

impl AocParser for Solver {
    /// The whole chain, sorted: outlet (0), adapters, then the device (max + 3)
    type SharedData<'a> = Vec<u64>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let mut chain = parse_lines(input, |line| number::<u64>(line, "joltage"))?;
        chain.push(0);
        chain.sort_unstable();
        let device = chain.last().copied().unwrap_or_default() + 3;
        chain.push(device);
        Ok(chain)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut counts = [0u64; 4];
        for pair in shared.windows(2) {
            let diff = pair[1] - pair[0];
            let slot = counts.get_mut(diff as usize).ok_or_else(|| {
                SolveError::failed(format!("gap of {} between {} and {}", diff, pair[0], pair[1]))
            })?;
            *slot += 1;
        }
        Ok((counts[1] * counts[3]).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let cache = DpCache::with_problem(
            VecBackend::with_capacity(shared.len()),
            Arrangements { chain: shared.as_slice() },
        );
        Ok(cache.get(&(shared.len() - 1)).to_string())
    }
}

/// Ways to reach `chain[idx]` from the outlet
struct Arrangements<'c> {
    chain: &'c [u64],
}

impl DpProblem<usize, u64> for Arrangements<'_> {
    fn deps(&self, idx: &usize) -> Vec<usize> {
        let joltage = self.chain[*idx];
        (idx.saturating_sub(3)..*idx)
            .filter(|&prev| joltage - self.chain[prev] <= 3)
            .collect()
    }

    fn compute(&self, idx: &usize, deps: Vec<u64>) -> u64 {
        if *idx == 0 { 1 } else { deps.iter().sum() }
    }
}
