use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;

use crate::utils::parse::{invalid_line, number};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 2, tags = ["2020", "strings"])]
pub struct Solver;

#[derive(Debug)]
pub struct Policy<'a> {
    lo: usize,
    hi: usize,
    letter: char,
    password: &'a str,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Policy<'a>>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let re = Regex::new(r"^(\d+)-(\d+) (.): (\S*)$")
            .map_err(|e| ParseError::Other(e.to_string()))?;

        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| parse_policy(&re, line_idx, line.trim_end()))
            .collect()
    }
}

fn parse_policy<'a>(re: &Regex, line_idx: usize, line: &'a str) -> Result<Policy<'a>, ParseError> {
    let caps = re
        .captures(line)
        .ok_or_else(|| invalid_line(line_idx, "expected `lo-hi c: password`"))?;
    let bound = |i: usize| number::<usize>(&caps[i], "bound").map_err(|e| invalid_line(line_idx, e));

    Ok(Policy {
        lo: bound(1)?,
        hi: bound(2)?,
        letter: caps[3].chars().next().unwrap_or_default(),
        password: caps.get(4).map_or("", |m| m.as_str()),
    })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let valid = shared
            .iter()
            .filter(|policy| {
                let count = policy.password.chars().filter(|&c| c == policy.letter).count();
                (policy.lo..=policy.hi).contains(&count)
            })
            .count();
        Ok(valid.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let valid = shared
            .iter()
            .filter(|policy| {
                let at = |pos: usize| {
                    pos.checked_sub(1)
                        .and_then(|idx| policy.password.chars().nth(idx))
                        == Some(policy.letter)
                };
                at(policy.lo) != at(policy.hi)
            })
            .count();
        Ok(valid.to_string())
    }
}
