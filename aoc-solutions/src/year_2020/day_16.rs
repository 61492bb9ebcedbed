use std::ops::RangeInclusive;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::{blocks, number};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 16, tags = ["2020", "constraints"])]
pub struct Solver;

#[derive(Debug)]
pub struct Rule<'a> {
    name: &'a str,
    ranges: Vec<RangeInclusive<u64>>,
}

impl Rule<'_> {
    fn accepts(&self, value: u64) -> bool {
        self.ranges.iter().any(|range| range.contains(&value))
    }
}

#[derive(Debug)]
pub struct Notes<'a> {
    rules: Vec<Rule<'a>>,
    mine: Vec<u64>,
    nearby: Vec<Vec<u64>>,
}

impl Notes<'_> {
    fn is_possible(&self, value: u64) -> bool {
        self.rules.iter().any(|rule| rule.accepts(value))
    }
}

fn parse_error(e: impl std::fmt::Display) -> ParseError {
    ParseError::InvalidFormat(e.to_string())
}

fn parse_rule(line: &str) -> anyhow::Result<Rule<'_>> {
    let (name, ranges) = line
        .split_once(": ")
        .ok_or_else(|| anyhow::anyhow!("rule {:?} has no `: `", line))?;
    let ranges = ranges
        .split(" or ")
        .map(|range| -> anyhow::Result<RangeInclusive<u64>> {
            let (lo, hi) = range
                .split_once('-')
                .ok_or_else(|| anyhow::anyhow!("range {:?} has no `-`", range))?;
            Ok(number(lo, "range start")?..=number(hi, "range end")?)
        })
        .collect::<anyhow::Result<_>>()?;
    Ok(Rule { name, ranges })
}

fn parse_ticket(line: &str) -> anyhow::Result<Vec<u64>> {
    line.split(',').map(|value| number(value, "ticket value")).collect()
}

/// The ticket lines of a block that starts with `header`
fn tickets(block: Option<&Vec<&str>>, header: &str) -> Result<Vec<Vec<u64>>, ParseError> {
    let block = block.ok_or_else(|| ParseError::MissingData(format!("missing `{}`", header)))?;
    match block.split_first() {
        Some((&first, rest)) if first == header => rest
            .iter()
            .map(|line| parse_ticket(line).map_err(parse_error))
            .collect(),
        _ => Err(ParseError::InvalidFormat(format!("expected `{}`", header))),
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Notes<'a>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let sections = blocks(input);
        let rules = sections
            .first()
            .ok_or_else(|| ParseError::MissingData("no rules".to_string()))?
            .iter()
            .map(|line| parse_rule(line).map_err(parse_error))
            .collect::<Result<Vec<_>, _>>()?;
        if rules.len() > 64 {
            return Err(ParseError::InvalidFormat("at most 64 rules are supported".to_string()));
        }

        let mine = tickets(sections.get(1), "your ticket:")?
            .pop()
            .ok_or_else(|| ParseError::MissingData("your ticket has no values".to_string()))?;
        let nearby = tickets(sections.get(2), "nearby tickets:")?;

        Ok(Notes { rules, mine, nearby })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let error_rate: u64 = shared
            .nearby
            .iter()
            .flatten()
            .filter(|&&value| !shared.is_possible(value))
            .sum();
        Ok(error_rate.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let fields = resolve_fields(shared)?;
        let departures: Vec<u64> = fields
            .iter()
            .zip(&shared.mine)
            .filter(|(rule, _)| shared.rules[**rule].name.starts_with("departure"))
            .map(|(_, &value)| value)
            .collect();
        if departures.is_empty() {
            return Err(SolveError::failed("no departure fields"));
        }
        Ok(departures.iter().product::<u64>().to_string())
    }
}

/// Rule index for each ticket position.
fn resolve_fields(notes: &Notes) -> Result<Vec<usize>, SolveError> {
    let positions = notes.mine.len();
    if notes.rules.len() != positions {
        return Err(SolveError::failed(format!(
            "{} rules for {} ticket fields",
            notes.rules.len(),
            positions
        )));
    }

    // candidates[pos] has bit r set while rule r may describe position pos
    let all_rules = u64::MAX >> (64 - notes.rules.len());
    let mut candidates = vec![all_rules; positions];
    let valid = notes
        .nearby
        .iter()
        .filter(|ticket| ticket.len() == positions && ticket.iter().all(|&v| notes.is_possible(v)))
        .chain(std::iter::once(&notes.mine));
    for ticket in valid {
        for (pos, &value) in ticket.iter().enumerate() {
            for (r, rule) in notes.rules.iter().enumerate() {
                if !rule.accepts(value) {
                    candidates[pos] &= !(1u64 << r);
                }
            }
        }
    }

    let mut fields = vec![None; positions];
    while let Some(pos) = (0..positions).find(|&p| fields[p].is_none() && candidates[p].count_ones() == 1) {
        let rule = candidates[pos].trailing_zeros() as usize;
        fields[pos] = Some(rule);
        for other in candidates.iter_mut() {
            *other &= !(1u64 << rule);
        }
    }

    let fields = fields
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| SolveError::failed("ticket fields are ambiguous"))?;
    log::debug!(
        "ticket field order: {:?}",
        fields.iter().map(|&r| notes.rules[r].name).collect::<Vec<_>>()
    );
    Ok(fields)
}
