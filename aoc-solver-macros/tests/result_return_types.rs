use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};

#[derive(AocSolver)]
#[aoc_solver(max_parts = 4)]
struct FourParts;

impl AocParser for FourParts {
    type SharedData<'a> = Vec<&'a str>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input.split(',').filter(|s| !s.is_empty()).collect())
    }
}

impl PartSolver<1> for FourParts {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.len().to_string())
    }
}

impl PartSolver<2> for FourParts {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total = shared
            .iter()
            .map(|s| s.parse::<i64>().map_err(|e| SolveError::SolveFailed(Box::new(e))))
            .sum::<Result<i64, _>>()?;
        Ok(total.to_string())
    }
}

impl PartSolver<3> for FourParts {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.sort_unstable();
        Ok(shared.join(","))
    }
}

impl PartSolver<4> for FourParts {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .first()
            .map(|s| s.to_string())
            .ok_or_else(|| SolveError::failed("nothing to report"))
    }
}

#[test]
fn test_borrowed_shared_data() {
    let input = String::from("7,13,x,59");
    let mut shared = FourParts::parse(&input).unwrap();
    assert_eq!(FourParts::solve_part(&mut shared, 1).unwrap(), "4");
}

#[test]
fn test_solve_error_carries_source() {
    let mut shared = FourParts::parse("7,13,x,59").unwrap();
    match FourParts::solve_part(&mut shared, 2) {
        Err(SolveError::SolveFailed(source)) => assert!(source.to_string().contains("invalid digit")),
        other => panic!("expected SolveFailed, got {:?}", other),
    }

    let mut shared = FourParts::parse("7,13,59").unwrap();
    assert_eq!(FourParts::solve_part(&mut shared, 2).unwrap(), "79");
}

#[test]
fn test_mutation_visible_to_later_parts() {
    let mut shared = FourParts::parse("c,a,b").unwrap();
    assert_eq!(FourParts::solve_part(&mut shared, 4).unwrap(), "c");
    assert_eq!(FourParts::solve_part(&mut shared, 3).unwrap(), "a,b,c");
    assert_eq!(FourParts::solve_part(&mut shared, 4).unwrap(), "a");
}

#[test]
fn test_message_only_failure() {
    let mut shared = FourParts::parse("").unwrap();
    let err = FourParts::solve_part(&mut shared, 4).unwrap_err();
    assert_eq!(err.to_string(), "Solve failed: nothing to report");
}

#[test]
fn test_all_parts_dispatch() {
    assert_eq!(<FourParts as Solver>::PARTS, 4);
    let mut shared = FourParts::parse("1,2").unwrap();
    for part in 1..=4 {
        assert!(FourParts::solve_part(&mut shared, part).is_ok(), "part {part}");
    }
    assert!(matches!(
        FourParts::solve_part(&mut shared, 5),
        Err(SolveError::PartNotImplemented(5))
    ));
}
