use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::{number, parse_lines};

/// Preamble length of the real puzzle input
pub const PREAMBLE: usize = 25;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 9, tags = ["2020", "sliding-window"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    numbers: Vec<u64>,
    preamble: usize,
    invalid: Option<u64>,
}

impl SharedData {
    pub fn new(numbers: Vec<u64>, preamble: usize) -> Self {
        Self {
            numbers,
            preamble,
            invalid: None,
        }
    }

    /// First number that isn't a sum of two different values in the window
    /// before it; remembered for part 2.
    fn invalid_number(&mut self) -> Result<u64, SolveError> {
        if let Some(invalid) = self.invalid {
            return Ok(invalid);
        }
        let preamble = self.preamble;
        let invalid = self
            .numbers
            .iter()
            .enumerate()
            .skip(preamble)
            .find(|&(idx, &value)| !is_pair_sum(&self.numbers[idx - preamble..idx], value))
            .map(|(_, &value)| value)
            .ok_or_else(|| SolveError::failed("every number follows the rule"))?;
        self.invalid = Some(invalid);
        Ok(invalid)
    }
}

fn is_pair_sum(window: &[u64], target: u64) -> bool {
    window.iter().enumerate().any(|(i, &a)| {
        window[i + 1..]
            .iter()
            .any(|&b| a != b && a.checked_add(b) == Some(target))
    })
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let numbers = parse_lines(input, |line| number(line, "number"))?;
        Ok(SharedData::new(numbers, PREAMBLE))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.invalid_number().map(|n| n.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let target = shared.invalid_number()?;
        let numbers = &shared.numbers;

        // All values are non-negative, so a shrinking/growing window finds every run.
        // The window sum stays below `target + u64::MAX`, which fits a u128.
        let target_sum = u128::from(target);
        let (mut start, mut sum) = (0, 0u128);
        for end in 0..numbers.len() {
            sum += u128::from(numbers[end]);
            while sum > target_sum && start < end {
                sum -= u128::from(numbers[start]);
                start += 1;
            }
            if sum == target_sum && end > start {
                let run = &numbers[start..=end];
                let min = run.iter().min().copied().unwrap_or_default();
                let max = run.iter().max().copied().unwrap_or_default();
                return Ok((min + max).to_string());
            }
        }
        Err(SolveError::failed(format!(
            "no contiguous run sums to {}",
            target
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "35\n20\n15\n25\n47\n40\n62\n55\n65\n95\n102\n117\n150\n182\n127\n219\n299\n277\n309\n576\n";

    fn example() -> SharedData {
        let numbers = EXAMPLE.lines().map(|l| l.parse().unwrap()).collect();
        SharedData::new(numbers, 5)
    }

    #[test]
    fn test_example() {
        let mut shared = example();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "127");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "62");
    }

    #[test]
    fn test_part_2_alone() {
        let mut shared = example();
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "62");
        assert_eq!(shared.invalid, Some(127));
    }

    #[test]
    fn test_pair_must_differ() {
        assert!(!is_pair_sum(&[5, 5, 1], 10));
        assert!(is_pair_sum(&[5, 4, 6], 10));
    }

    #[test]
    fn test_huge_values_do_not_overflow() {
        assert!(!is_pair_sum(&[u64::MAX - 1, u64::MAX - 2], 3));

        let numbers = vec![u64::MAX - 1, u64::MAX - 2, 3, u64::MAX, 1, 2];
        let mut shared = SharedData::new(numbers, 2);
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "3");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "3");
    }

    #[test]
    fn test_registered_preamble() {
        let shared = Solver::parse("1\n2\n").unwrap();
        assert_eq!(shared.preamble, PREAMBLE);
    }
}
