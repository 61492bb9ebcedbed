use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::math::mod_pow;
use crate::utils::parse::{number, parse_lines};

const MODULUS: u64 = 20201227;
const SUBJECT: u64 = 7;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2020, day = 25, tags = ["2020", "number-theory"])]
pub struct Solver;

impl AocParser for Solver {
    /// Card and door public keys
    type SharedData<'a> = (u64, u64);

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let keys = parse_lines(input, |line| {
            let key: u64 = number(line, "public key")?;
            if key == 0 || key >= MODULUS {
                anyhow::bail!("public key {} is outside 1..{}", key, MODULUS);
            }
            Ok(key)
        })?;
        match keys.as_slice() {
            &[card, door] => Ok((card, door)),
            _ => Err(ParseError::InvalidFormat(format!(
                "expected 2 public keys, found {}",
                keys.len()
            ))),
        }
    }
}

/// Loop size that transforms the subject number into `key`, trying both keys
/// at once and returning whichever is found first along with the other key.
fn crack(card: u64, door: u64) -> Option<(u64, u64)> {
    let mut value = 1;
    for loop_size in 1..MODULUS {
        value = value * SUBJECT % MODULUS;
        if value == card {
            return Some((loop_size, door));
        }
        if value == door {
            return Some((loop_size, card));
        }
    }
    None
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (card, door) = *shared;
        let (loop_size, other) =
            crack(card, door).ok_or_else(|| SolveError::failed("neither key is a power of 7"))?;
        Ok(mod_pow(other, loop_size, MODULUS).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2020::solve_example;

    #[test]
    fn test_example() {
        assert_eq!(solve_example::<Solver>("5764801\n17807724\n", 1), "14897079");
    }

    #[test]
    fn test_loop_sizes() {
        assert_eq!(crack(5764801, 17807724), Some((8, 17807724)));
        assert_eq!(crack(17807724, 5764801), Some((8, 17807724)));
        assert_eq!(mod_pow(SUBJECT, 11, MODULUS), 17807724);
    }

    #[test]
    fn test_single_part() {
        let mut keys = Solver::parse("5764801\n17807724").unwrap();
        assert!(matches!(
            <Solver as aoc_solver::Solver>::solve_part(&mut keys, 2),
            Err(SolveError::PartNotImplemented(2))
        ));
    }

    #[test]
    fn test_key_count() {
        assert!(Solver::parse("5764801").is_err());
        assert!(Solver::parse("1\n2\n3").is_err());
        assert!(Solver::parse("0\n2").is_err());
    }
}
