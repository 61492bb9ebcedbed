//! Dense row-major 2D grid used by the map and seating puzzles

use aoc_solver::ParseError;

/// Offsets of the eight cells surrounding a position, as `(row, col)` deltas.
pub const NEIGHBORS_8: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Build a grid from character rows, mapping each cell with `cell`.
    ///
    /// Every row must have the same width. Blank lines are skipped.
    ///
    /// ```
    /// use aoc_solutions::utils::grid::Grid;
    ///
    /// let grid = Grid::parse("#.\n.#", |c| match c {
    ///     '#' => Some(true),
    ///     '.' => Some(false),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(grid.width(), 2);
    /// assert_eq!(grid.get(1, 1), Some(&true));
    /// ```
    pub fn parse(input: &str, mut cell: impl FnMut(char) -> Option<T>) -> Result<Self, ParseError> {
        let mut width = None;
        let mut height = 0;
        let mut cells = Vec::new();

        for (line_idx, line) in input.lines().enumerate() {
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            let row_width = line.chars().count();
            match width {
                None => width = Some(row_width),
                Some(w) if w != row_width => {
                    return Err(ParseError::InvalidFormat(format!(
                        "(line {}) expected {} cells, found {}",
                        line_idx + 1,
                        w,
                        row_width
                    )));
                }
                Some(_) => {}
            }
            for c in line.chars() {
                let value = cell(c).ok_or_else(|| {
                    ParseError::InvalidFormat(format!(
                        "(line {}) unexpected character {:?}",
                        line_idx + 1,
                        c
                    ))
                })?;
                cells.push(value);
            }
            height += 1;
        }

        let width = width.ok_or_else(|| ParseError::MissingData("empty grid".to_string()))?;
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Build a grid by evaluating `f(row, col)` for every position.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let cells = (0..height)
            .flat_map(|row| (0..width).map(move |col| (row, col)))
            .map(|(row, col)| f(row, col))
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        (row < self.height && col < self.width).then(|| &self.cells[row * self.width + col])
    }

    /// Like [`Grid::get`], but for positions reached by signed offsets.
    pub fn get_signed(&self, row: isize, col: isize) -> Option<&T> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        self.get(row, col)
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) {
        if row < self.height && col < self.width {
            self.cells[row * self.width + col] = value;
        }
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.width)
    }

    /// All cells with their `(row, col)` position, row by row.
    pub fn positions(&self) -> impl Iterator<Item = ((usize, usize), &T)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, value)| ((i / self.width, i % self.width), value))
    }

    /// The cells at the eight surrounding positions that fall inside the grid.
    pub fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = &T> {
        NEIGHBORS_8.iter().filter_map(move |&(dr, dc)| {
            self.get_signed(row as isize + dr, col as isize + dc)
        })
    }
}
