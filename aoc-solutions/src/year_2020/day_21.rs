use std::collections::{BTreeMap, BTreeSet, HashSet};

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 21, tags = ["2020", "sets", "constraints"])]
pub struct Solver;

#[derive(Debug)]
pub struct Food<'a> {
    ingredients: Vec<&'a str>,
    allergens: Vec<&'a str>,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Food<'a>>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_lines(input, |line| {
            let (ingredients, allergens) = match line.split_once(" (contains ") {
                Some((ingredients, rest)) => {
                    let allergens = rest
                        .strip_suffix(')')
                        .ok_or_else(|| anyhow::anyhow!("unclosed allergen list"))?;
                    (ingredients, allergens.split(", ").collect())
                }
                None => (line, Vec::new()),
            };
            let ingredients: Vec<&str> = ingredients.split_whitespace().collect();
            if ingredients.is_empty() {
                anyhow::bail!("food without ingredients");
            }
            Ok(Food {
                ingredients,
                allergens,
            })
        })
    }
}

/// Ingredients that may contain each allergen: those present in every food
/// listing it.
fn candidates<'a>(foods: &[Food<'a>]) -> BTreeMap<&'a str, BTreeSet<&'a str>> {
    let mut candidates: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for food in foods {
        let ingredients: BTreeSet<&str> = food.ingredients.iter().copied().collect();
        for &allergen in &food.allergens {
            candidates
                .entry(allergen)
                .and_modify(|set| set.retain(|i| ingredients.contains(i)))
                .or_insert_with(|| ingredients.clone());
        }
    }
    candidates
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let suspicious: HashSet<&str> = candidates(shared).into_values().flatten().collect();
        let safe = shared
            .iter()
            .flat_map(|food| &food.ingredients)
            .filter(|ingredient| !suspicious.contains(*ingredient))
            .count();
        Ok(safe.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut open = candidates(shared);
        let mut resolved: BTreeMap<&str, &str> = BTreeMap::new();

        while !open.is_empty() {
            let (allergen, ingredient) = open
                .iter()
                .find_map(|(&allergen, set)| match set.iter().exactly_one() {
                    Ok(&ingredient) => Some((allergen, ingredient)),
                    Err(_) => None,
                })
                .ok_or_else(|| SolveError::failed("allergens cannot be pinned to single ingredients"))?;
            open.remove(allergen);
            for set in open.values_mut() {
                set.remove(ingredient);
            }
            resolved.insert(allergen, ingredient);
        }

        // BTreeMap iterates allergens alphabetically
        Ok(resolved.into_values().join(","))
    }
}
