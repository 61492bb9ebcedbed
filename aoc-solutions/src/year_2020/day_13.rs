use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::math::chinese_remainder;
use crate::utils::parse::number;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 13, tags = ["2020", "number-theory"])]
pub struct Solver;

#[derive(Debug)]
pub struct Notes {
    earliest: u64,
    /// Bus IDs by list position; `None` for `x`
    buses: Vec<Option<u64>>,
}

impl AocParser for Solver {
    type SharedData<'a> = Notes;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let mut lines = input.lines().map(str::trim).filter(|line| !line.is_empty());
        let (Some(earliest), Some(schedule)) = (lines.next(), lines.next()) else {
            return Err(ParseError::MissingData(
                "expected a timestamp line and a bus line".to_string(),
            ));
        };

        let earliest = number(earliest, "timestamp")
            .map_err(|e| ParseError::InvalidFormat(format!("(line 1) {}", e)))?;
        let buses = schedule
            .split(',')
            .map(|id| match id {
                "x" => Ok(None),
                _ => match number::<u64>(id, "bus ID") {
                    Ok(0) => Err(ParseError::InvalidFormat("(line 2) bus ID 0".to_string())),
                    Ok(bus) => Ok(Some(bus)),
                    Err(e) => Err(ParseError::InvalidFormat(format!("(line 2) {}", e))),
                },
            })
            .collect::<Result<Vec<_>, _>>()?;

        if buses.iter().all(Option::is_none) {
            return Err(ParseError::MissingData("no buses in service".to_string()));
        }
        Ok(Notes { earliest, buses })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .buses
            .iter()
            .flatten()
            .map(|&bus| (bus, (bus - shared.earliest % bus) % bus))
            .min_by_key(|&(_, wait)| wait)
            .map(|(bus, wait)| (bus * wait).to_string())
            .ok_or_else(|| SolveError::failed("no buses in service"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // Bus at position i departs at t + i, i.e. t ≡ -i (mod bus)
        let congruences: Vec<(i128, i128)> = shared
            .buses
            .iter()
            .enumerate()
            .filter_map(|(offset, bus)| bus.map(|bus| (bus as i128, offset as i128)))
            .map(|(bus, offset)| ((-offset).rem_euclid(bus), bus))
            .collect();

        chinese_remainder(&congruences)
            .map(|(t, _)| t.to_string())
            .ok_or_else(|| SolveError::failed("bus offsets have no common timestamp"))
    }
}
