use std::collections::{HashMap, HashSet};

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::parse_lines;

const DAYS: usize = 100;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 24, tags = ["2020", "hex-grid", "cellular-automaton"])]
pub struct Solver;

/// Axial hex coordinates `(q, r)`
type Hex = (i32, i32);

const DIRECTIONS: [(&str, Hex); 6] = [
    ("e", (1, 0)),
    ("w", (-1, 0)),
    ("ne", (1, -1)),
    ("nw", (0, -1)),
    ("se", (0, 1)),
    ("sw", (-1, 1)),
];

/// Follow one line of steps from the reference tile.
fn walk(line: &str) -> anyhow::Result<Hex> {
    let (mut q, mut r) = (0, 0);
    let mut rest = line;
    while !rest.is_empty() {
        let (step, (dq, dr)) = DIRECTIONS
            .iter()
            .find(|(name, _)| rest.starts_with(name))
            .ok_or_else(|| anyhow::anyhow!("unknown step at {:?}", rest))?;
        q += dq;
        r += dr;
        rest = &rest[step.len()..];
    }
    Ok((q, r))
}

impl AocParser for Solver {
    /// Tiles left black side up after following every line
    type SharedData<'a> = HashSet<Hex>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let mut black = HashSet::new();
        for tile in parse_lines(input, walk)? {
            if !black.remove(&tile) {
                black.insert(tile);
            }
        }
        Ok(black)
    }
}

/// One day of the exhibit: black tiles with 0 or more than 2 black
/// neighbours flip to white, white tiles with exactly 2 flip to black.
fn next_day(black: &HashSet<Hex>) -> HashSet<Hex> {
    let mut neighbors: HashMap<Hex, u8> = HashMap::new();
    for &(q, r) in black {
        for (_, (dq, dr)) in DIRECTIONS {
            *neighbors.entry((q + dq, r + dr)).or_default() += 1;
        }
    }
    neighbors
        .into_iter()
        .filter(|(tile, count)| *count == 2 || (*count == 1 && black.contains(tile)))
        .map(|(tile, _)| tile)
        .collect()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.len().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let floor = (0..DAYS).fold(shared.clone(), |black, _| next_day(&black));
        Ok(floor.len().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2020::solve_example;

    const EXAMPLE: &str = "\
sesenwnenenewseeswwswswwnenewsewsw
neeenesenwnwwswnenewnwwsewnenwseswesw
seswneswswsenwwnwse
nwnwneseeswswnenewneswwnewseswneseene
swweswneswnenwsewnwneneseenw
eesenwseswswnenwswnwnwsewwnwsene
sewnenenenesenwsewnenwwwse
wenwwweseeeweswwwnwwe
wsweesenenewnwwnwsenewsenwwsesesenwne
neeswseenwwswnwswswnw
nenwswwsewswnenenewsenwsenwnesesenew
enewnwewneswsewnwswenweswnenwsenwsw
sweneswneswneneenwnewenewwneswswnese
swwesenesewenwneswnwwneseswwne
enesenwswwswneneswsenwnewswseenwsese
wnwnesenesenenwwnenwsewesewsesesew
nenewswnwewswnenesenwnesewesw
eneswnwswnwsenenwnwnwwseeswneewsenese
neswnwewnwnwseenwseesewsenwsweewe
wseweeenwnesenwwwswnew
";

    #[test]
    fn test_example() {
        assert_eq!(solve_example::<Solver>(EXAMPLE, 1), "10");
        assert_eq!(solve_example::<Solver>(EXAMPLE, 2), "2208");
    }

    #[test]
    fn test_walk() {
        assert_eq!(walk("esew").unwrap(), (0, 1));
        assert_eq!(walk("nwwswee").unwrap(), (0, 0));
        assert!(walk("enx").is_err());
    }

    #[test]
    fn test_flipping_twice_restores_white() {
        assert_eq!(solve_example::<Solver>("esew\nesew\n", 1), "0");
        assert_eq!(solve_example::<Solver>("esew\nnwwswee\ne\n", 1), "3");
    }

    #[test]
    fn test_daily_flips() {
        let pair: HashSet<Hex> = [(0, 0), (1, 0)].into();
        let sizes: Vec<usize> = std::iter::successors(Some(pair), |black| Some(next_day(black)))
            .skip(1)
            .take(4)
            .map(|black| black.len())
            .collect();
        assert_eq!(sizes, vec![4, 6, 12, 12]);

        let lonely: HashSet<Hex> = [(3, -2)].into();
        assert!(next_day(&lonely).is_empty());
    }
}
