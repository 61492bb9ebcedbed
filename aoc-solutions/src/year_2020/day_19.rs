use std::collections::HashMap;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::{blocks, number};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 19, tags = ["2020", "grammar"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Literal(u8),
    /// Alternatives, each a sequence of rule numbers
    Either(Vec<Vec<u32>>),
}

#[derive(Debug)]
pub struct Puzzle<'a> {
    rules: HashMap<u32, Rule>,
    messages: Vec<&'a str>,
}

fn parse_rule(line: &str) -> anyhow::Result<(u32, Rule)> {
    let (id, body) = line
        .split_once(':')
        .ok_or_else(|| anyhow::anyhow!("rule {:?} has no `:`", line))?;
    let id = number(id, "rule number")?;
    let body = body.trim();

    if let Some(literal) = body.strip_prefix('"').and_then(|b| b.strip_suffix('"')) {
        return match literal.as_bytes() {
            [c] => Ok((id, Rule::Literal(*c))),
            _ => Err(anyhow::anyhow!("literal {:?} must be one character", literal)),
        };
    }

    let alternatives = body
        .split('|')
        .map(|seq| {
            seq.split_whitespace()
                .map(|r| number(r, "rule reference"))
                .collect::<anyhow::Result<Vec<u32>>>()
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    if alternatives.iter().any(Vec::is_empty) {
        anyhow::bail!("rule {} has an empty alternative", id);
    }
    Ok((id, Rule::Either(alternatives)))
}

impl AocParser for Solver {
    type SharedData<'a> = Puzzle<'a>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let mut sections = blocks(input).into_iter();
        let rules = sections
            .next()
            .ok_or_else(|| ParseError::MissingData("no rules".to_string()))?
            .into_iter()
            .enumerate()
            .map(|(idx, line)| {
                parse_rule(line)
                    .map_err(|e| ParseError::InvalidFormat(format!("(rule line {}) {}", idx + 1, e)))
            })
            .collect::<Result<HashMap<_, _>, _>>()?;
        if !rules.contains_key(&0) {
            return Err(ParseError::MissingData("rule 0".to_string()));
        }
        if let Some(rule) = left_recursive(&rules) {
            return Err(ParseError::InvalidFormat(format!(
                "rule {} can refer to itself before matching anything",
                rule
            )));
        }
        let messages = sections.next().unwrap_or_default();
        Ok(Puzzle { rules, messages })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_matching(&shared.rules, &shared.messages).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut rules = shared.rules.clone();
        rules.insert(8, Rule::Either(vec![vec![42], vec![42, 8]]));
        rules.insert(11, Rule::Either(vec![vec![42, 31], vec![42, 11, 31]]));
        if let Some(rule) = left_recursive(&rules) {
            return Err(SolveError::failed(format!(
                "rule {} is left-recursive once rules 8 and 11 loop",
                rule
            )));
        }
        Ok(count_matching(&rules, &shared.messages).to_string())
    }
}

fn count_matching(rules: &HashMap<u32, Rule>, messages: &[&str]) -> usize {
    messages
        .iter()
        .filter(|message| {
            let message = message.as_bytes();
            ends_after(rules, 0, message, 0).contains(&message.len())
        })
        .count()
}

/// A rule that can reach itself without consuming input.
///
/// No rule matches the empty string, so only the first reference of each
/// alternative can recurse in place.
fn left_recursive(rules: &HashMap<u32, Rule>) -> Option<u32> {
    fn visit(rules: &HashMap<u32, Rule>, rule: u32, on_path: &mut HashMap<u32, bool>) -> Option<u32> {
        match on_path.get(&rule) {
            Some(true) => return Some(rule),
            Some(false) => return None,
            None => {}
        }
        on_path.insert(rule, true);
        if let Some(Rule::Either(alternatives)) = rules.get(&rule) {
            for &first in alternatives.iter().filter_map(|sequence| sequence.first()) {
                if let Some(found) = visit(rules, first, on_path) {
                    return Some(found);
                }
            }
        }
        on_path.insert(rule, false);
        None
    }

    let mut on_path = HashMap::new();
    let mut ids: Vec<u32> = rules.keys().copied().collect();
    ids.sort_unstable();
    ids.into_iter().find_map(|id| visit(rules, id, &mut on_path))
}

/// Every position where a match of `rule` starting at `start` can end.
///
/// Tracking all end positions lets sequences backtrack into alternatives,
/// so self-referencing rules like `8: 42 | 42 8` work as long as each
/// recursion consumes input.
fn ends_after(rules: &HashMap<u32, Rule>, rule: u32, message: &[u8], start: usize) -> Vec<usize> {
    match rules.get(&rule) {
        None => Vec::new(),
        Some(Rule::Literal(c)) => {
            if message.get(start) == Some(c) {
                vec![start + 1]
            } else {
                Vec::new()
            }
        }
        Some(Rule::Either(alternatives)) => {
            let mut ends: Vec<usize> = alternatives
                .iter()
                .flat_map(|sequence| {
                    sequence.iter().fold(vec![start], |positions, &next| {
                        positions
                            .into_iter()
                            .filter(|&pos| pos < message.len())
                            .flat_map(|pos| ends_after(rules, next, message, pos))
                            .collect()
                    })
                })
                .collect();
            ends.sort_unstable();
            ends.dedup();
            ends
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2020::solve_example;

    const EXAMPLE: &str = "\
0: 4 1 5
1: 2 3 | 3 2
2: 4 4 | 5 5
3: 4 5 | 5 4
4: \"a\"
5: \"b\"

ababbb
bababa
abbbab
aaabbb
aaaabbb
";

    // 8 and 11 are the rules that become self-referencing
    const LOOPING: &str = "\
0: 8 11
8: 42
11: 42 31
42: \"a\"
31: \"b\"

aab
ab
aaab
aabb
abb
aaabb
";

    #[test]
    fn test_example() {
        assert_eq!(solve_example::<Solver>(EXAMPLE, 1), "2");
    }

    #[test]
    fn test_example_with_loops() {
        let input = include_str!("testdata/day_19_example.txt");
        assert_eq!(solve_example::<Solver>(input, 1), "3");
        assert_eq!(solve_example::<Solver>(input, 2), "12");
    }

    #[test]
    fn test_looping_rules() {
        assert_eq!(solve_example::<Solver>(LOOPING, 1), "1");
        // a^n b^m with n > m >= 1
        assert_eq!(solve_example::<Solver>(LOOPING, 2), "3");
    }

    #[test]
    fn test_parse_rules() {
        let puzzle = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(puzzle.rules[&4], Rule::Literal(b'a'));
        assert_eq!(puzzle.rules[&1], Rule::Either(vec![vec![2, 3], vec![3, 2]]));
        assert_eq!(puzzle.messages.len(), 5);
        assert!(Solver::parse("1: \"a\"\n\na").is_err());
        assert!(Solver::parse("0: \"ab\"").is_err());
    }

    #[test]
    fn test_left_recursive_rule_rejected() {
        let grammar = "0: 0 1 | 1\n1: \"a\"\n\naa\n";
        let err = Solver::parse(grammar).unwrap_err();
        assert!(err.to_string().contains("rule 0"));

        // Indirect: 0 -> 2 -> 0 without consuming
        assert!(Solver::parse("0: 2 1\n2: 0 | 1\n1: \"a\"\n\na\n").is_err());
        // Right recursion is fine
        assert!(Solver::parse("0: 1 0 | 1\n1: \"a\"\n\naa\n").is_ok());
    }

    #[test]
    fn test_looping_rules_that_become_left_recursive() {
        // 42 -> 8 is harmless until 8 starts with 42
        let grammar = "0: 8 11\n8: 1\n11: 42 31\n42: 8 | 1\n31: 1\n1: \"a\"\n\naaa\n";
        let mut puzzle = Solver::parse(grammar).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut puzzle).unwrap(), "1");
        assert!(<Solver as PartSolver<2>>::solve(&mut puzzle).is_err());
    }
}
