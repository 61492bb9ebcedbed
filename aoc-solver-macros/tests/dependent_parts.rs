use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};

/// XMAS-style data: part 1 finds a target, part 2 reuses it
#[derive(Debug, Clone)]
struct SharedData {
    numbers: Vec<u64>,
    largest: Option<u64>,
}

#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct LargestThenRange;

impl AocParser for LargestThenRange {
    type SharedData<'a> = SharedData;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let numbers = input
            .lines()
            .map(|line| {
                line.trim()
                    .parse::<u64>()
                    .map_err(|_| ParseError::InvalidFormat(format!("Expected integer: {line}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SharedData {
            numbers,
            largest: None,
        })
    }
}

fn largest(shared: &mut SharedData) -> Result<u64, SolveError> {
    if let Some(largest) = shared.largest {
        return Ok(largest);
    }
    let largest = shared
        .numbers
        .iter()
        .copied()
        .max()
        .ok_or_else(|| SolveError::failed("empty input"))?;
    shared.largest = Some(largest);
    Ok(largest)
}

impl PartSolver<1> for LargestThenRange {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        largest(shared).map(|n| n.to_string())
    }
}

impl PartSolver<2> for LargestThenRange {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let largest = largest(shared)?;
        let smallest = shared.numbers.iter().copied().min().unwrap_or(largest);
        Ok((largest - smallest).to_string())
    }
}

#[test]
fn test_part1_stores_data() {
    let mut shared = LargestThenRange::parse("35\n20\n15\n127").unwrap();

    let result = LargestThenRange::solve_part(&mut shared, 1).unwrap();
    assert_eq!(result, "127");
    assert_eq!(shared.largest, Some(127));
}

#[test]
fn test_part2_uses_part1_data() {
    let mut shared = LargestThenRange::parse("35\n20\n15\n127").unwrap();
    LargestThenRange::solve_part(&mut shared, 1).unwrap();

    // Tamper with the cache to prove part 2 reads it instead of recomputing
    shared.largest = Some(100);
    assert_eq!(LargestThenRange::solve_part(&mut shared, 2).unwrap(), "85");
}

#[test]
fn test_part2_solves_independently() {
    let mut shared = LargestThenRange::parse("35\n20\n15\n127").unwrap();

    assert_eq!(LargestThenRange::solve_part(&mut shared, 2).unwrap(), "112");
    assert_eq!(shared.largest, Some(127));
}

#[test]
fn test_empty_input_fails_to_solve() {
    let mut shared = LargestThenRange::parse("").unwrap();
    assert!(matches!(
        LargestThenRange::solve_part(&mut shared, 1),
        Err(SolveError::SolveFailed(_))
    ));
}
