use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 23, tags = ["2020", "linked-list"])]
pub struct Solver;

const MILLION: u32 = 1_000_000;

impl AocParser for Solver {
    /// Cup labels in clockwise order, a permutation of `1..=n`
    type SharedData<'a> = Vec<u32>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let labels = input
            .trim()
            .chars()
            .map(|c| {
                c.to_digit(10)
                    .ok_or_else(|| ParseError::InvalidFormat(format!("cup label {:?} is not a digit", c)))
            })
            .collect::<Result<Vec<u32>, _>>()?;

        if labels.len() < 4 {
            return Err(ParseError::MissingData("at least four cups are needed".to_string()));
        }
        let mut seen = vec![false; labels.len() + 1];
        for &label in &labels {
            match seen.get_mut(label as usize) {
                Some(slot) if label != 0 && !*slot => *slot = true,
                _ => {
                    return Err(ParseError::InvalidFormat(format!(
                        "labels must be 1 to {} without repeats",
                        labels.len()
                    )));
                }
            }
        }
        Ok(labels)
    }
}

/// Play `moves` rounds with `total` cups (labels beyond the input continue
/// upwards). Returns the ring as a successor table: `next[label]` is the cup
/// clockwise of `label`.
fn play(labels: &[u32], total: u32, moves: usize) -> Vec<u32> {
    let order: Vec<u32> = labels
        .iter()
        .copied()
        .chain(labels.len() as u32 + 1..=total)
        .collect();

    let mut next = vec![0u32; total as usize + 1];
    for pair in order.windows(2) {
        next[pair[0] as usize] = pair[1];
    }
    let (first, last) = (order[0], order[order.len() - 1]);
    next[last as usize] = first;

    let below = |label: u32| if label == 1 { total } else { label - 1 };
    let mut current = first;
    for _ in 0..moves {
        let a = next[current as usize];
        let b = next[a as usize];
        let c = next[b as usize];
        next[current as usize] = next[c as usize];

        let mut destination = below(current);
        while destination == a || destination == b || destination == c {
            destination = below(destination);
        }
        next[c as usize] = next[destination as usize];
        next[destination as usize] = a;

        current = next[current as usize];
    }
    next
}

/// Labels clockwise after cup 1, as a string
fn labels_after_one(labels: &[u32], moves: usize) -> String {
    let next = play(labels, labels.len() as u32, moves);
    std::iter::successors(Some(next[1]), |&label| Some(next[label as usize]))
        .take_while(|&label| label != 1)
        .map(|label| label.to_string())
        .collect()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(labels_after_one(shared, 100))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let next = play(shared, MILLION, 10 * MILLION as usize);
        let first = next[1];
        let second = next[first as usize];
        Ok((first as u64 * second as u64).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2020::solve_example;

    const EXAMPLE: &str = "389125467";

    #[test]
    fn test_ten_moves() {
        let labels = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(labels_after_one(&labels, 10), "92658374");
    }

    #[test]
    fn test_hundred_moves() {
        assert_eq!(solve_example::<Solver>(EXAMPLE, 1), "67384529");
    }

    #[test]
    fn test_million_cups() {
        assert_eq!(solve_example::<Solver>(EXAMPLE, 2), "149245887792");
    }

    #[test]
    fn test_invalid_labels() {
        assert!(Solver::parse("12").is_err());
        assert!(Solver::parse("1123").is_err());
        assert!(Solver::parse("1235").is_err());
        assert!(Solver::parse("0123").is_err());
        assert!(Solver::parse("12a4").is_err());
    }
}
