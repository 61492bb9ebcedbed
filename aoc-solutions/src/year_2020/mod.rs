//! Advent of Code 2020

pub mod day_1;
pub mod day_2;
pub mod day_3;
pub mod day_4;
pub mod day_5;
pub mod day_6;
pub mod day_7;
pub mod day_8;
pub mod day_9;
pub mod day_10;
pub mod day_11;
pub mod day_12;
pub mod day_13;
pub mod day_14;
pub mod day_15;
pub mod day_16;
pub mod day_17;
pub mod day_18;
pub mod day_19;
pub mod day_20;
pub mod day_21;
pub mod day_22;
pub mod day_23;
pub mod day_24;
pub mod day_25;

/// Parse `input` with `S` and solve `part`, panicking on any error.
#[cfg(test)]
pub(crate) fn solve_example<S: aoc_solver::Solver>(input: &str, part: u8) -> String {
    let mut shared = S::parse(input).expect("example input should parse");
    S::solve_part(&mut shared, part).expect("example part should solve")
}
