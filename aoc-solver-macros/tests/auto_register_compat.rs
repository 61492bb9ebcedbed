use aoc_solver::{AocParser, ParseError, PartSolver, SolveError, SolverRegistryBuilder};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2019, day = 24, tags = ["test", "registered"])]
struct RegisteredSolver;

impl AocParser for RegisteredSolver {
    type SharedData<'a> = Vec<u32>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .split(',')
            .map(|s| {
                s.trim()
                    .parse()
                    .map_err(|_| ParseError::InvalidFormat(format!("not a number: {s}")))
            })
            .collect()
    }
}

impl PartSolver<1> for RegisteredSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().sum::<u32>().to_string())
    }
}

impl PartSolver<2> for RegisteredSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().product::<u32>().to_string())
    }
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2019, day = 25)]
struct UntaggedSolver;

impl AocParser for UntaggedSolver {
    type SharedData<'a> = &'a str;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input.trim())
    }
}

impl PartSolver<1> for UntaggedSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.chars().rev().collect())
    }
}

#[test]
fn test_plugins_register_automatically() {
    let registry = SolverRegistryBuilder::new()
        .register_all_plugins()
        .expect("Failed to register plugins")
        .build();

    let mut solver = registry
        .create_solver(2019, 24, "2, 3, 4")
        .expect("Failed to create solver - was it registered?");
    assert_eq!(solver.parts(), 2);
    assert_eq!(solver.solve(1).unwrap().answer, "9");
    assert_eq!(solver.solve(2).unwrap().answer, "24");

    let mut solver = registry.create_solver(2019, 25, " abc ").unwrap();
    assert_eq!(solver.parts(), 1);
    assert_eq!(solver.solve(1).unwrap().answer, "cba");
}

#[test]
fn test_tag_filtering() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"registered"))
        .unwrap()
        .build();

    assert!(registry.storage().contains(2019, 24));
    assert!(!registry.storage().contains(2019, 25));
}

#[test]
fn test_plugin_metadata() {
    let plugin = aoc_solver::inventory::iter::<aoc_solver::SolverPlugin>()
        .find(|p| p.year == 2019 && p.day == 24)
        .expect("plugin submitted");
    assert_eq!(plugin.tags, &["test", "registered"]);
    assert_eq!(plugin.solver.parts(), 2);
}
