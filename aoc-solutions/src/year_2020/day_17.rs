use std::collections::{HashMap, HashSet};

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::grid::Grid;

const CYCLES: usize = 6;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 17, tags = ["2020", "cellular-automaton"])]
pub struct Solver;

/// `[x, y, z, w]`; the 3D variant keeps `w` at zero
type Cube = [i32; 4];

impl AocParser for Solver {
    type SharedData<'a> = HashSet<Cube>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let slice = Grid::parse(input, |c| match c {
            '#' => Some(true),
            '.' => Some(false),
            _ => None,
        })?;
        Ok(slice
            .positions()
            .filter(|(_, active)| **active)
            .map(|((y, x), _)| [x as i32, y as i32, 0, 0])
            .collect())
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(boot(shared, 3).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(boot(shared, 4).to_string())
    }
}

fn neighbor_offsets(dimensions: usize) -> Vec<Cube> {
    (0..4)
        .map(|axis| if axis < dimensions { -1..=1 } else { 0..=0 })
        .multi_cartesian_product()
        .filter(|offset| offset.iter().any(|&d| d != 0))
        .map(|offset| [offset[0], offset[1], offset[2], offset[3]])
        .collect()
}

/// Active cubes left after the boot cycles
fn boot(initial: &HashSet<Cube>, dimensions: usize) -> usize {
    let offsets = neighbor_offsets(dimensions);
    let mut active = initial.clone();

    for _ in 0..CYCLES {
        let mut counts: HashMap<Cube, u8> = HashMap::new();
        for cube in &active {
            for offset in &offsets {
                let neighbor = std::array::from_fn(|i| cube[i] + offset[i]);
                *counts.entry(neighbor).or_default() += 1;
            }
        }
        active = counts
            .into_iter()
            .filter(|(cube, count)| *count == 3 || (*count == 2 && active.contains(cube)))
            .map(|(cube, _)| cube)
            .collect();
    }
    active.len()
}
