use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Grid, NEIGHBORS_8};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 11, tags = ["2020", "grid", "simulation"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Floor,
    Empty,
    Occupied,
}

impl AocParser for Solver {
    type SharedData<'a> = Grid<Cell>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Grid::parse(input, |c| match c {
            '.' => Some(Cell::Floor),
            'L' => Some(Cell::Empty),
            '#' => Some(Cell::Occupied),
            _ => None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(settle(shared, Visibility::Adjacent, 4).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(settle(shared, Visibility::LineOfSight, 5).to_string())
    }
}

#[derive(Debug, Clone, Copy)]
enum Visibility {
    Adjacent,
    LineOfSight,
}

/// Index of every seat, plus for each seat the indices of the seats it watches.
fn seat_graph(layout: &Grid<Cell>, visibility: Visibility) -> Vec<Vec<usize>> {
    let width = layout.width() as isize;
    let seat_at = |row: isize, col: isize| {
        layout
            .get_signed(row, col)
            .map(|&cell| (cell != Cell::Floor, (row * width + col) as usize))
    };

    layout
        .positions()
        .map(|((row, col), _)| {
            NEIGHBORS_8
                .iter()
                .filter_map(|&(dr, dc)| {
                    let (mut r, mut c) = (row as isize + dr, col as isize + dc);
                    loop {
                        let (is_seat, idx) = seat_at(r, c)?;
                        if is_seat {
                            return Some(idx);
                        }
                        if let Visibility::Adjacent = visibility {
                            return None;
                        }
                        r += dr;
                        c += dc;
                    }
                })
                .collect()
        })
        .collect()
}

/// Run the seating rules until nothing changes; returns the occupied count.
fn settle(layout: &Grid<Cell>, visibility: Visibility, tolerance: usize) -> usize {
    let watched = seat_graph(layout, visibility);
    let seats: Vec<usize> = layout
        .positions()
        .enumerate()
        .filter(|(_, (_, cell))| **cell != Cell::Floor)
        .map(|(idx, _)| idx)
        .collect();
    let mut occupied: Vec<bool> = layout.positions().map(|(_, &cell)| cell == Cell::Occupied).collect();

    loop {
        let next: Vec<(usize, bool)> = seats
            .iter()
            .filter_map(|&idx| {
                let around = watched[idx].iter().filter(|&&n| occupied[n]).count();
                match (occupied[idx], around) {
                    (false, 0) => Some((idx, true)),
                    (true, n) if n >= tolerance => Some((idx, false)),
                    _ => None,
                }
            })
            .collect();

        if next.is_empty() {
            return occupied.iter().filter(|&&o| o).count();
        }
        for (idx, state) in next {
            occupied[idx] = state;
        }
    }
}
