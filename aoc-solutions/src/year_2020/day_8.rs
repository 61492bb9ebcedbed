use std::str::FromStr;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::{number, parse_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 8, tags = ["2020", "vm"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Acc,
    Jmp,
    Nop,
}

impl FromStr for Op {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "acc" => Ok(Op::Acc),
            "jmp" => Ok(Op::Jmp),
            "nop" => Ok(Op::Nop),
            _ => Err(anyhow::anyhow!("unknown operation {:?}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    op: Op,
    arg: i64,
}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    /// Stopped right before executing an instruction for the second time
    Looped(i64),
    /// Ran to the instruction just past the end
    Terminated(i64),
    /// Jumped somewhere outside the program other than its end
    OutOfBounds,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Instruction>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_lines(input, |line| {
            let (op, arg) = line
                .split_once(' ')
                .ok_or_else(|| anyhow::anyhow!("expected `<op> <arg>`"))?;
            Ok(Instruction {
                op: op.parse()?,
                arg: number(arg, "argument")?,
            })
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        match run(shared)? {
            Outcome::Looped(acc) => Ok(acc.to_string()),
            other => Err(SolveError::failed(format!(
                "program never repeats an instruction: {:?}",
                other
            ))),
        }
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut program = shared.clone();
        for idx in 0..program.len() {
            let original = program[idx].op;
            program[idx].op = match original {
                Op::Jmp => Op::Nop,
                Op::Nop => Op::Jmp,
                Op::Acc => continue,
            };
            let outcome = run(&program)?;
            program[idx].op = original;

            if let Outcome::Terminated(acc) = outcome {
                return Ok(acc.to_string());
            }
        }
        Err(SolveError::failed("no single jmp/nop swap terminates the program"))
    }
}

fn run(program: &[Instruction]) -> Result<Outcome, SolveError> {
    let mut visited = vec![false; program.len()];
    let mut acc: i64 = 0;
    let mut pc: i64 = 0;

    loop {
        if pc == program.len() as i64 {
            return Ok(Outcome::Terminated(acc));
        }
        let Ok(idx) = usize::try_from(pc) else {
            return Ok(Outcome::OutOfBounds);
        };
        if idx >= program.len() {
            return Ok(Outcome::OutOfBounds);
        }
        if std::mem::replace(&mut visited[idx], true) {
            return Ok(Outcome::Looped(acc));
        }

        let Instruction { op, arg } = program[idx];
        let step = match op {
            Op::Acc => {
                acc = acc.checked_add(arg).ok_or_else(|| {
                    SolveError::failed(format!("accumulator overflows at instruction {}", idx + 1))
                })?;
                1
            }
            Op::Jmp => arg,
            Op::Nop => 1,
        };
        // A jump past i64 is outside the program either way
        match pc.checked_add(step) {
            Some(next) => pc = next,
            None => return Ok(Outcome::OutOfBounds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2020::solve_example;

    const EXAMPLE: &str = "\
nop +0
acc +1
jmp +4
acc +3
jmp -3
acc -99
acc +1
jmp -4
acc +6
";

    #[test]
    fn test_example() {
        assert_eq!(solve_example::<Solver>(EXAMPLE, 1), "5");
        assert_eq!(solve_example::<Solver>(EXAMPLE, 2), "8");
    }

    #[test]
    fn test_out_of_bounds_jump() {
        let program = Solver::parse("acc +1\njmp -5").unwrap();
        assert_eq!(run(&program).unwrap(), Outcome::OutOfBounds);
        let program = Solver::parse("acc +2\njmp +1").unwrap();
        assert_eq!(run(&program).unwrap(), Outcome::Terminated(2));
    }

    #[test]
    fn test_extreme_arguments() {
        let program = Solver::parse("acc +9223372036854775807\nacc +1\njmp -2").unwrap();
        assert!(run(&program).is_err());

        let program = Solver::parse("nop +0\njmp +9223372036854775807").unwrap();
        assert_eq!(run(&program).unwrap(), Outcome::OutOfBounds);
        let program = Solver::parse("jmp -9223372036854775808").unwrap();
        assert_eq!(run(&program).unwrap(), Outcome::OutOfBounds);
    }

    #[test]
    fn test_unknown_op() {
        let err = Solver::parse("nop +0\nmul +2").unwrap_err();
        assert!(err.to_string().contains("(line 2)"));
    }
}
