use std::collections::HashMap;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::blocks;

const REQUIRED_FIELDS: [&str; 7] = ["byr", "iyr", "eyr", "hgt", "hcl", "ecl", "pid"];
const EYE_COLORS: [&str; 7] = ["amb", "blu", "brn", "gry", "grn", "hzl", "oth"];

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 4, tags = ["2020", "validation"])]
pub struct Solver;

pub type Passport<'a> = HashMap<&'a str, &'a str>;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Passport<'a>>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        blocks(input)
            .into_iter()
            .enumerate()
            .map(|(idx, lines)| {
                lines
                    .iter()
                    .flat_map(|line| line.split_whitespace())
                    .map(|field| {
                        field.split_once(':').ok_or_else(|| {
                            ParseError::InvalidFormat(format!(
                                "(passport {}) field {:?} is not `key:value`",
                                idx + 1,
                                field
                            ))
                        })
                    })
                    .collect()
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().filter(|p| has_required_fields(p)).count().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let valid = shared
            .iter()
            .filter(|p| has_required_fields(p) && p.iter().all(|(key, value)| field_is_valid(key, value)))
            .count();
        Ok(valid.to_string())
    }
}

fn has_required_fields(passport: &Passport) -> bool {
    REQUIRED_FIELDS.iter().all(|field| passport.contains_key(field))
}

fn year_in(value: &str, lo: u32, hi: u32) -> bool {
    value.len() == 4 && value.parse().is_ok_and(|year: u32| (lo..=hi).contains(&year))
}

fn field_is_valid(key: &str, value: &str) -> bool {
    match key {
        "byr" => year_in(value, 1920, 2002),
        "iyr" => year_in(value, 2010, 2020),
        "eyr" => year_in(value, 2020, 2030),
        "hgt" => {
            if let Some(cm) = value.strip_suffix("cm") {
                cm.parse().is_ok_and(|h: u32| (150..=193).contains(&h))
            } else if let Some(inches) = value.strip_suffix("in") {
                inches.parse().is_ok_and(|h: u32| (59..=76).contains(&h))
            } else {
                false
            }
        }
        "hcl" => value.strip_prefix('#').is_some_and(|hex| {
            hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        }),
        "ecl" => EYE_COLORS.contains(&value),
        "pid" => value.len() == 9 && value.bytes().all(|b| b.is_ascii_digit()),
        // cid and unknown fields are ignored
        _ => true,
    }
}
