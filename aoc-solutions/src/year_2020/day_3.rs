use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::Grid;

const SLOPES: [(usize, usize); 5] = [(1, 1), (3, 1), (5, 1), (7, 1), (1, 2)];

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 3, tags = ["2020", "grid"])]
pub struct Solver;

impl AocParser for Solver {
    /// `true` where a tree stands
    type SharedData<'a> = Grid<bool>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Grid::parse(input, |c| match c {
            '#' => Some(true),
            '.' => Some(false),
            _ => None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(trees_on_slope(shared, 3, 1).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let product: u64 = SLOPES
            .iter()
            .map(|&(right, down)| trees_on_slope(shared, right, down))
            .product();
        Ok(product.to_string())
    }
}

/// The map repeats to the right, so columns wrap around.
fn trees_on_slope(map: &Grid<bool>, right: usize, down: usize) -> u64 {
    (0..map.height())
        .step_by(down)
        .enumerate()
        .filter(|&(step, row)| map.get(row, step * right % map.width()) == Some(&true))
        .count() as u64
}
