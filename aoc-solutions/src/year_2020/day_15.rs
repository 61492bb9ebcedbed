use std::collections::HashMap;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::number;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 15, tags = ["2020", "simulation"])]
pub struct Solver;

impl AocParser for Solver {
    /// Starting numbers
    type SharedData<'a> = Vec<u32>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let numbers = input
            .trim()
            .split(',')
            .filter(|n| !n.trim().is_empty())
            .map(|n| number(n, "starting number").map_err(|e| ParseError::InvalidFormat(e.to_string())))
            .collect::<Result<Vec<u32>, _>>()?;
        if numbers.is_empty() {
            return Err(ParseError::MissingData("no starting numbers".to_string()));
        }
        Ok(numbers)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(spoken_at(shared, 2020).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(spoken_at(shared, 30_000_000).to_string())
    }
}

/// The number spoken on turn `turn` (1-based) of the memory game.
fn spoken_at(start: &[u32], turn: u32) -> u32 {
    let turn = turn as usize;
    if turn <= start.len() {
        return start[turn - 1];
    }

    // Every spoken number after the start is an age, so it is below `turn`.
    // Only starting numbers can be larger; those go in `beyond`.
    let mut seen = LastSeen {
        table: vec![0; turn],
        beyond: HashMap::new(),
    };
    for (idx, &n) in start[..start.len() - 1].iter().enumerate() {
        seen.replace(n, idx as u32 + 1);
    }

    let mut current = start[start.len() - 1];
    for now in start.len() as u32..turn as u32 {
        let previous = seen.replace(current, now);
        current = if previous == 0 { 0 } else { now - previous };
    }
    current
}

/// Turn each number was last spoken on, 0 for never
struct LastSeen {
    table: Vec<u32>,
    beyond: HashMap<u32, u32>,
}

impl LastSeen {
    /// Record `n` as spoken on `now`, returning the turn it was spoken before
    fn replace(&mut self, n: u32, now: u32) -> u32 {
        match self.table.get_mut(n as usize) {
            Some(slot) => std::mem::replace(slot, now),
            None => self.beyond.insert(n, now).unwrap_or(0),
        }
    }
}
