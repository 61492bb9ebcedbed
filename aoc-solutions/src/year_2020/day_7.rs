use std::collections::{HashMap, HashSet};

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
use crate::utils::parse::{invalid_line, number};

const TARGET: &str = "shiny gold";

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 7, tags = ["2020", "graph", "dp"])]
pub struct Solver;

/// Outer colour to the `(count, colour)` pairs it directly contains
pub type Rules<'a> = HashMap<&'a str, Vec<(u64, &'a str)>>;

impl AocParser for Solver {
    type SharedData<'a> = Rules<'a>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let mut rules = Rules::new();
        for (line_idx, line) in input.lines().enumerate() {
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            let (outer, contents) = line
                .split_once(" bags contain ")
                .ok_or_else(|| invalid_line(line_idx, "expected `<colour> bags contain ...`"))?;
            let contents = contents.trim_end_matches('.');
            let inner = if contents == "no other bags" {
                Vec::new()
            } else {
                contents
                    .split(", ")
                    .map(|item| parse_item(item).map_err(|e| invalid_line(line_idx, e)))
                    .collect::<Result<_, _>>()?
            };
            if rules.insert(outer, inner).is_some() {
                return Err(invalid_line(line_idx, format!("duplicate rule for {:?}", outer)));
            }
        }
        if let Some(colour) = find_cycle(&rules) {
            return Err(ParseError::InvalidFormat(format!(
                "bag rules contain a cycle through {:?}",
                colour
            )));
        }
        Ok(rules)
    }
}

/// A colour that ends up containing itself, if any
fn find_cycle<'a>(rules: &Rules<'a>) -> Option<&'a str> {
    // `true` while the colour is on the current path, `false` once finished
    fn visit<'a>(
        rules: &Rules<'a>,
        colour: &'a str,
        on_path: &mut HashMap<&'a str, bool>,
    ) -> Option<&'a str> {
        match on_path.get(colour) {
            Some(true) => return Some(colour),
            Some(false) => return None,
            None => {}
        }
        on_path.insert(colour, true);
        for &(_, inner) in rules.get(colour).into_iter().flatten() {
            if let Some(found) = visit(rules, inner, on_path) {
                return Some(found);
            }
        }
        on_path.insert(colour, false);
        None
    }

    let mut on_path = HashMap::new();
    let mut colours: Vec<&'a str> = rules.keys().copied().collect();
    colours.sort_unstable();
    colours
        .into_iter()
        .find_map(|colour| visit(rules, colour, &mut on_path))
}

fn parse_item(item: &str) -> anyhow::Result<(u64, &str)> {
    let (count, rest) = item
        .split_once(' ')
        .ok_or_else(|| anyhow::anyhow!("expected `<n> <colour> bag(s)`, found {:?}", item))?;
    let colour = rest
        .strip_suffix(" bags")
        .or_else(|| rest.strip_suffix(" bag"))
        .ok_or_else(|| anyhow::anyhow!("missing `bag(s)` in {:?}", item))?;
    Ok((number(count, "bag count")?, colour))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut containers: HashMap<&str, Vec<&str>> = HashMap::new();
        for (&outer, inner) in shared.iter() {
            for &(_, colour) in inner {
                containers.entry(colour).or_default().push(outer);
            }
        }

        let mut seen = HashSet::new();
        let mut stack = vec![TARGET];
        while let Some(colour) = stack.pop() {
            for &outer in containers.get(colour).into_iter().flatten() {
                if seen.insert(outer) {
                    stack.push(outer);
                }
            }
        }
        Ok(seen.len().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let cache = DpCache::with_problem(HashMapBackend::new(), BagsInside { rules: &*shared });
        Ok(cache.get(&TARGET).to_string())
    }
}

/// Number of bags nested anywhere inside one bag of a colour
struct BagsInside<'r, 'a> {
    rules: &'r Rules<'a>,
}

impl<'a> DpProblem<&'a str, u64> for BagsInside<'_, 'a> {
    fn deps(&self, colour: &&'a str) -> Vec<&'a str> {
        self.rules
            .get(colour)
            .map(|inner| inner.iter().map(|&(_, c)| c).collect())
            .unwrap_or_default()
    }

    fn compute(&self, colour: &&'a str, deps: Vec<u64>) -> u64 {
        self.rules
            .get(colour)
            .map(|inner| {
                inner
                    .iter()
                    .zip(deps)
                    .map(|(&(count, _), nested)| count * (1 + nested))
                    .sum()
            })
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2020::solve_example;

    const EXAMPLE: &str = "\
light red bags contain 1 bright white bag, 2 muted yellow bags.
dark orange bags contain 3 bright white bags, 4 muted yellow bags.
bright white bags contain 1 shiny gold bag.
muted yellow bags contain 2 shiny gold bags, 9 faded blue bags.
shiny gold bags contain 1 dark olive bag, 2 vibrant plum bags.
dark olive bags contain 3 faded blue bags, 4 dotted black bags.
vibrant plum bags contain 5 faded blue bags, 6 dotted black bags.
faded blue bags contain no other bags.
dotted black bags contain no other bags.
";

    const DEEP: &str = "\
shiny gold bags contain 2 dark red bags.
dark red bags contain 2 dark orange bags.
dark orange bags contain 2 dark yellow bags.
dark yellow bags contain 2 dark green bags.
dark green bags contain 2 dark blue bags.
dark blue bags contain 2 dark violet bags.
dark violet bags contain no other bags.
";

    #[test]
    fn test_example() {
        assert_eq!(solve_example::<Solver>(EXAMPLE, 1), "4");
        assert_eq!(solve_example::<Solver>(EXAMPLE, 2), "32");
    }

    #[test]
    fn test_deep_nesting() {
        assert_eq!(solve_example::<Solver>(DEEP, 2), "126");
        assert_eq!(solve_example::<Solver>(DEEP, 1), "0");
    }

    #[test]
    fn test_parsed_rule() {
        let rules = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(
            rules["muted yellow"],
            vec![(2, "shiny gold"), (9, "faded blue")]
        );
        assert!(rules["faded blue"].is_empty());
    }

    #[test]
    fn test_malformed_rule() {
        let err = Solver::parse("light red bags hold 1 bright white bag.").unwrap_err();
        assert!(err.to_string().contains("(line 1)"));
        assert!(Solver::parse("light red bags contain one bright white bag.").is_err());
    }

    #[test]
    fn test_cyclic_rules_rejected() {
        let cycle = "\
shiny gold bags contain 1 dark red bag.
dark red bags contain 1 shiny gold bag.
";
        let err = Solver::parse(cycle).unwrap_err();
        assert!(err.to_string().contains("cycle"));

        let self_loop = "faded blue bags contain 2 faded blue bags.";
        assert!(Solver::parse(self_loop).is_err());
    }
}
