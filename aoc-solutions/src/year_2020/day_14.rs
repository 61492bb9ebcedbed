use std::collections::HashMap;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::{number, parse_lines};

const WORD_BITS: usize = 36;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 14, tags = ["2020", "bits"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mask {
    ones: u64,
    floating: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    SetMask(Mask),
    Write { address: u64, value: u64 },
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Instruction>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_lines(input, |line| {
            let (target, value) = line
                .split_once(" = ")
                .ok_or_else(|| anyhow::anyhow!("expected `<target> = <value>`"))?;
            if target == "mask" {
                return parse_mask(value).map(Instruction::SetMask);
            }
            let address = target
                .strip_prefix("mem[")
                .and_then(|rest| rest.strip_suffix(']'))
                .ok_or_else(|| anyhow::anyhow!("unknown target {:?}", target))?;
            Ok(Instruction::Write {
                address: number(address, "address")?,
                value: number(value, "value")?,
            })
        })
    }
}

fn parse_mask(mask: &str) -> anyhow::Result<Mask> {
    if mask.len() != WORD_BITS {
        anyhow::bail!("mask must have {} bits, got {}", WORD_BITS, mask.len());
    }
    mask.bytes()
        .try_fold(Mask { ones: 0, floating: 0 }, |m, b| {
            let (one, float) = match b {
                b'0' => (0, 0),
                b'1' => (1, 0),
                b'X' => (0, 1),
                _ => anyhow::bail!("unexpected mask bit {:?}", b as char),
            };
            Ok(Mask {
                ones: m.ones << 1 | one,
                floating: m.floating << 1 | float,
            })
        })
}

/// Run the program; `write` expands one memory write into stores.
///
/// `initial` is the mask in effect before the first `mask =` line.
fn run(
    program: &[Instruction],
    initial: Mask,
    mut write: impl FnMut(Mask, u64, u64, &mut HashMap<u64, u64>),
) -> u64 {
    let mut memory = HashMap::new();
    let mut mask = initial;
    for &instruction in program {
        match instruction {
            Instruction::SetMask(m) => mask = m,
            Instruction::Write { address, value } => write(mask, address, value, &mut memory),
        }
    }
    memory.values().sum()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let passthrough = Mask {
            ones: 0,
            floating: (1u64 << WORD_BITS) - 1,
        };
        let sum = run(shared, passthrough, |mask, address, value, memory| {
            memory.insert(address, value & mask.floating | mask.ones);
        });
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let passthrough = Mask { ones: 0, floating: 0 };
        let sum = run(shared, passthrough, |mask, address, value, memory| {
            let base = (address | mask.ones) & !mask.floating;
            // Walk every subset of the floating bits
            let mut subset = mask.floating;
            loop {
                memory.insert(base | subset, value);
                if subset == 0 {
                    break;
                }
                subset = (subset - 1) & mask.floating;
            }
        });
        Ok(sum.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2020::solve_example;

    const VALUE_MASKS: &str = "\
mask = XXXXXXXXXXXXXXXXXXXXXXXXXXXXX1XXXX0X
mem[8] = 11
mem[7] = 101
mem[8] = 0
";

    const ADDRESS_MASKS: &str = "\
mask = 000000000000000000000000000000X1001X
mem[42] = 100
mask = 00000000000000000000000000000000X0XX
mem[26] = 1
";

    #[test]
    fn test_value_masks() {
        assert_eq!(solve_example::<Solver>(VALUE_MASKS, 1), "165");
    }

    #[test]
    fn test_address_masks() {
        assert_eq!(solve_example::<Solver>(ADDRESS_MASKS, 2), "208");
    }

    #[test]
    fn test_parse_mask() {
        let mask = parse_mask("XXXXXXXXXXXXXXXXXXXXXXXXXXXXX1XXXX0X").unwrap();
        assert_eq!(mask.ones, 0b100_0000);
        assert_eq!(mask.floating.count_ones(), 34);
        assert!(parse_mask("X1").is_err());
        assert!(parse_mask("XXXXXXXXXXXXXXXXXXXXXXXXXXXXX1XXXX2X").is_err());
    }

    #[test]
    fn test_bad_target() {
        let err = Solver::parse("mask = 000000000000000000000000000000X1001X\nreg[1] = 2").unwrap_err();
        assert!(err.to_string().contains("(line 2)"));
    }
}
