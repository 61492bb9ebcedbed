use std::collections::{HashMap, HashSet};

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::Grid;
use crate::utils::parse::{blocks, number};

const SEA_MONSTER: [&str; 3] = [
    "                  # ",
    "#    ##    ##    ###",
    " #  #  #  #  #  #   ",
];

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 20, tags = ["2020", "jigsaw"])]
pub struct Solver;

#[derive(Debug, Clone)]
pub struct Tile {
    id: u64,
    pixels: Grid<bool>,
}

type Edge = Vec<bool>;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Tile>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let tiles = blocks(input)
            .into_iter()
            .map(|block| -> Result<Tile, ParseError> {
                let (header, rows) = block
                    .split_first()
                    .ok_or_else(|| ParseError::MissingData("empty tile".to_string()))?;
                let id = header
                    .strip_prefix("Tile ")
                    .and_then(|rest| rest.strip_suffix(':'))
                    .ok_or_else(|| ParseError::InvalidFormat(format!("bad tile header {:?}", header)))
                    .and_then(|id| {
                        number(id, "tile ID").map_err(|e| ParseError::InvalidFormat(e.to_string()))
                    })?;
                let pixels = Grid::parse(&rows.join("\n"), |c| match c {
                    '#' => Some(true),
                    '.' => Some(false),
                    _ => None,
                })
                .map_err(|e| ParseError::InvalidFormat(format!("tile {}: {}", id, e)))?;
                Ok(Tile { id, pixels })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let size = tiles
            .first()
            .map(|tile| tile.pixels.width())
            .ok_or_else(|| ParseError::MissingData("no tiles".to_string()))?;
        if size < 3 {
            return Err(ParseError::InvalidFormat("tiles must be at least 3x3".to_string()));
        }
        if let Some(odd) = tiles
            .iter()
            .find(|tile| tile.pixels.width() != size || tile.pixels.height() != size)
        {
            return Err(ParseError::InvalidFormat(format!(
                "tile {} is not {}x{}",
                odd.id, size, size
            )));
        }
        Ok(tiles)
    }
}

/// Apply one of the eight symmetries of the square; `0` is the identity.
fn orient(grid: &Grid<bool>, orientation: u8) -> Grid<bool> {
    let n = grid.width();
    Grid::from_fn(n, n, |row, col| {
        let (mut r, mut c) = (row, col);
        if orientation >= 4 {
            c = n - 1 - c;
        }
        for _ in 0..orientation % 4 {
            (r, c) = (n - 1 - c, r);
        }
        grid.get(r, c).copied().unwrap_or_default()
    })
}

fn top(grid: &Grid<bool>) -> Edge {
    grid.row(0).to_vec()
}

fn bottom(grid: &Grid<bool>) -> Edge {
    grid.row(grid.height() - 1).to_vec()
}

fn left(grid: &Grid<bool>) -> Edge {
    grid.rows().map(|row| row[0]).collect()
}

fn right(grid: &Grid<bool>) -> Edge {
    grid.rows().map(|row| row[row.len() - 1]).collect()
}

/// An edge and its reverse are the same edge once a tile may flip.
fn canonical(edge: &[bool]) -> Edge {
    let reversed: Edge = edge.iter().rev().copied().collect();
    if reversed.as_slice() < edge { reversed } else { edge.to_vec() }
}

fn edges(grid: &Grid<bool>) -> [Edge; 4] {
    [top(grid), bottom(grid), left(grid), right(grid)]
}

struct EdgeIndex {
    /// Canonical edge to the tiles that have it
    tiles: HashMap<Edge, Vec<usize>>,
}

impl EdgeIndex {
    fn new(tiles: &[Tile]) -> Self {
        let mut index: HashMap<Edge, Vec<usize>> = HashMap::new();
        for (idx, tile) in tiles.iter().enumerate() {
            for edge in edges(&tile.pixels) {
                index.entry(canonical(&edge)).or_default().push(idx);
            }
        }
        Self { tiles: index }
    }

    fn is_unmatched(&self, edge: &[bool]) -> bool {
        self.tiles.get(&canonical(edge)).is_none_or(|owners| owners.len() == 1)
    }

    fn unmatched_count(&self, grid: &Grid<bool>) -> usize {
        edges(grid).iter().filter(|edge| self.is_unmatched(edge)).count()
    }
}

fn corners(tiles: &[Tile], index: &EdgeIndex) -> Vec<usize> {
    (0..tiles.len())
        .filter(|&idx| index.unmatched_count(&tiles[idx].pixels) == 2)
        .collect()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let index = EdgeIndex::new(shared);
        let corners = corners(shared, &index);
        if corners.len() != 4 {
            return Err(SolveError::failed(format!("found {} corner tiles", corners.len())));
        }
        Ok(corners.iter().map(|&idx| shared[idx].id).product::<u64>().to_string())
    }
}

/// Lay the tiles out in a square, row by row, starting from a corner.
fn assemble(tiles: &[Tile]) -> Result<Vec<Grid<bool>>, SolveError> {
    let side = tiles.len().isqrt();
    if side * side != tiles.len() {
        return Err(SolveError::failed(format!("{} tiles do not form a square", tiles.len())));
    }
    let index = EdgeIndex::new(tiles);
    let &first = corners(tiles, &index)
        .first()
        .ok_or_else(|| SolveError::failed("no corner tile"))?;

    let start = (0..8)
        .map(|o| orient(&tiles[first].pixels, o))
        .find(|g| index.is_unmatched(&top(g)) && index.is_unmatched(&left(g)))
        .ok_or_else(|| SolveError::failed("corner tile cannot face outwards"))?;

    let mut used = vec![false; tiles.len()];
    used[first] = true;
    let mut placed = vec![start];

    for pos in 1..side * side {
        let (row, col) = (pos / side, pos % side);
        // Match against the left neighbour, or the tile above at a row start
        let (want, side_of): (Edge, fn(&Grid<bool>) -> Edge) = if col > 0 {
            (right(&placed[pos - 1]), left)
        } else {
            (bottom(&placed[pos - side]), top)
        };

        let candidates = index.tiles.get(&canonical(&want)).into_iter().flatten();
        let (idx, grid) = candidates
            .filter(|&&idx| !used[idx])
            .find_map(|&idx| {
                (0..8)
                    .map(|o| orient(&tiles[idx].pixels, o))
                    .find(|g| side_of(g) == want)
                    .map(|g| (idx, g))
            })
            .ok_or_else(|| SolveError::failed(format!("no tile fits at row {} column {}", row, col)))?;
        used[idx] = true;
        placed.push(grid);
    }
    log::debug!("assembled {}x{} tiles starting from tile {}", side, side, tiles[first].id);
    Ok(placed)
}

/// Join the assembled tiles into one image, dropping every tile border.
fn stitch(placed: &[Grid<bool>]) -> Grid<bool> {
    let side = placed.len().isqrt();
    let inner = placed[0].width() - 2;
    Grid::from_fn(side * inner, side * inner, |row, col| {
        let tile = &placed[(row / inner) * side + col / inner];
        tile.get(row % inner + 1, col % inner + 1).copied().unwrap_or_default()
    })
}

/// Pixels covered by sea monsters, in the first orientation that has any.
fn monster_pixels(image: &Grid<bool>) -> Option<HashSet<(usize, usize)>> {
    let mut shape = Vec::new();
    for (r, line) in SEA_MONSTER.iter().enumerate() {
        for (c, ch) in line.char_indices() {
            if ch == '#' {
                shape.push((r, c));
            }
        }
    }
    let height = SEA_MONSTER.len();
    let width = SEA_MONSTER[0].len();

    (0..8).find_map(|o| {
        let view = orient(image, o);
        let mut covered = HashSet::new();
        for row in 0..view.height().saturating_sub(height - 1) {
            for col in 0..view.width().saturating_sub(width - 1) {
                if shape.iter().all(|&(dr, dc)| view.get(row + dr, col + dc) == Some(&true)) {
                    covered.extend(shape.iter().map(|&(dr, dc)| (row + dr, col + dc)));
                }
            }
        }
        (!covered.is_empty()).then_some(covered)
    })
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let image = stitch(&assemble(shared)?);
        let monsters = monster_pixels(&image).ok_or_else(|| SolveError::failed("no sea monsters found"))?;
        log::debug!("sea monsters cover {} pixels", monsters.len());
        let rough = image.positions().filter(|(_, pixel)| **pixel).count() - monsters.len();
        Ok(rough.to_string())
    }
}
