use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::{number, parse_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 12, tags = ["2020", "simulation"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move by `(east, north)`
    Move(i64, i64),
    /// Quarter turns counter-clockwise
    Turn(u8),
    Forward(i64),
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Action>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_lines(input, |line| {
            let (kind, value) = line.split_at_checked(1).unwrap_or((line, ""));
            let value: i64 = number(value, "amount")?;
            let quarter_turns = |degrees: i64| -> anyhow::Result<u8> {
                if degrees % 90 != 0 {
                    anyhow::bail!("turns must be multiples of 90, got {}", degrees);
                }
                Ok((degrees / 90).rem_euclid(4) as u8)
            };
            Ok(match kind {
                "N" => Action::Move(0, value),
                "S" => Action::Move(0, -value),
                "E" => Action::Move(value, 0),
                "W" => Action::Move(-value, 0),
                "L" => Action::Turn(quarter_turns(value)?),
                "R" => Action::Turn(quarter_turns(-value)?),
                "F" => Action::Forward(value),
                _ => anyhow::bail!("unknown action {:?}", kind),
            })
        })
    }
}

fn rotate((east, north): (i64, i64), quarter_turns: u8) -> (i64, i64) {
    (0..quarter_turns).fold((east, north), |(e, n), _| (-n, e))
}

/// Sail through `actions`. With `move_waypoint` the cardinal moves shift the
/// waypoint instead of the ship, which is the only difference between parts.
fn sail(actions: &[Action], waypoint: (i64, i64), move_waypoint: bool) -> i64 {
    let mut ship = (0, 0);
    let mut waypoint = waypoint;
    for &action in actions {
        match action {
            Action::Move(de, dn) if move_waypoint => waypoint = (waypoint.0 + de, waypoint.1 + dn),
            Action::Move(de, dn) => ship = (ship.0 + de, ship.1 + dn),
            Action::Turn(quarter_turns) => waypoint = rotate(waypoint, quarter_turns),
            Action::Forward(times) => {
                ship = (ship.0 + waypoint.0 * times, ship.1 + waypoint.1 * times)
            }
        }
    }
    ship.0.abs() + ship.1.abs()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // The heading is a unit waypoint facing east
        Ok(sail(shared, (1, 0), false).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sail(shared, (10, 1), true).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2020::solve_example;

    const EXAMPLE: &str = "F10\nN3\nF7\nR90\nF11\n";

    #[test]
    fn test_example() {
        assert_eq!(solve_example::<Solver>(EXAMPLE, 1), "25");
        assert_eq!(solve_example::<Solver>(EXAMPLE, 2), "286");
    }

    #[test]
    fn test_turns() {
        let actions = Solver::parse("L90\nR90\nR270\nL180").unwrap();
        assert_eq!(
            actions,
            vec![Action::Turn(1), Action::Turn(3), Action::Turn(1), Action::Turn(2)]
        );
        assert_eq!(rotate((10, 4), 3), (4, -10));
        assert!(Solver::parse("R45").is_err());
        assert!(Solver::parse("X10").is_err());
    }
}
