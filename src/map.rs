//! Static occupancy grid the rays march through.
//!
//! The grid is immutable once built and answers point-in-wall queries for
//! continuous world coordinates. One cell is one world unit; anything outside
//! the grid counts as wall.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

/// Built-in layout used when no map file is given.
const DEFAULT_LAYOUT: &str = "\
####################
#..................#
#..................#
#...###......###...#
#...#..........#...#
#...#..........#...#
#..................#
#..................#
#..................#
#..................#
#.............##...#
#.............##...#
#.............##...#
#..................#
#...#..........#...#
#...#..........#...#
#...###......###...#
#..................#
#..................#
####################
";

/// State of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Open,
    Wall,
}

impl Cell {
    /// Parse a layout character (`#` = wall, `.` or space = open)
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '#' => Some(Cell::Wall),
            '.' | ' ' => Some(Cell::Open),
            _ => None,
        }
    }

    pub fn is_wall(self) -> bool {
        self == Cell::Wall
    }
}

/// Errors raised while building a map from a layout
#[derive(Debug)]
pub enum MapError {
    Io(io::Error),
    /// Layout contains no rows
    Empty,
    /// A row differs in length from the first row
    Ragged { line: usize, expected: usize, found: usize },
    /// Unknown layout character
    InvalidCell { line: usize, column: usize, ch: char },
    /// Cell buffer does not match the declared dimensions
    SizeMismatch { width: usize, height: usize, cells: usize },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Io(e) => write!(f, "failed to read map: {}", e),
            MapError::Empty => write!(f, "map layout is empty"),
            MapError::Ragged { line, expected, found } => write!(
                f,
                "map row {} has {} cells, expected {}",
                line, found, expected
            ),
            MapError::InvalidCell { line, column, ch } => write!(
                f,
                "invalid map cell {:?} at row {}, column {}",
                ch, line, column
            ),
            MapError::SizeMismatch { width, height, cells } => write!(
                f,
                "map of {}x{} needs {} cells, got {}",
                width,
                height,
                width * height,
                cells
            ),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for MapError {
    fn from(e: io::Error) -> Self {
        MapError::Io(e)
    }
}

/// Rectangular grid of cells, row-major: index = y * width + x
#[derive(Debug, Clone, PartialEq)]
pub struct GridMap {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl GridMap {
    /// Build a map from a row-major cell buffer.
    pub fn new(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self, MapError> {
        if width == 0 || height == 0 {
            return Err(MapError::Empty);
        }
        if cells.len() != width * height {
            return Err(MapError::SizeMismatch {
                width,
                height,
                cells: cells.len(),
            });
        }
        Ok(Self { width, height, cells })
    }

    /// Parse a textual layout, one row per line.
    ///
    /// Rows must all have the same length. Trailing blank lines are ignored.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let mut rows: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
        while rows.last().is_some_and(|r| r.is_empty()) {
            rows.pop();
        }
        if rows.is_empty() {
            return Err(MapError::Empty);
        }

        let width = rows[0].chars().count();
        if width == 0 {
            return Err(MapError::Empty);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (line, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(MapError::Ragged {
                    line: line + 1,
                    expected: width,
                    found,
                });
            }
            for (column, ch) in row.chars().enumerate() {
                let cell = Cell::from_char(ch).ok_or(MapError::InvalidCell {
                    line: line + 1,
                    column: column + 1,
                    ch,
                })?;
                cells.push(cell);
            }
        }

        let height = rows.len();
        Self::new(width, height, cells)
    }

    /// Read and parse a layout file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MapError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// The built-in 20x20 layout
    pub fn default_layout() -> Self {
        // Covered by test_default_layout_parses
        Self::parse(DEFAULT_LAYOUT).unwrap_or_else(|_| Self::bordered(20, 20))
    }

    /// Empty interior surrounded by a one-cell wall border.
    pub fn bordered(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let mut cells = vec![Cell::Open; width * height];
        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                    cells[y * width + x] = Cell::Wall;
                }
            }
        }
        Self { width, height, cells }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at integer indices; anything outside the grid is a wall.
    #[inline]
    pub fn cell(&self, ix: i64, iy: i64) -> Cell {
        if ix < 0 || iy < 0 || ix >= self.width as i64 || iy >= self.height as i64 {
            return Cell::Wall;
        }
        self.cells[iy as usize * self.width + ix as usize]
    }

    #[inline]
    pub fn is_wall_cell(&self, ix: i64, iy: i64) -> bool {
        self.cell(ix, iy).is_wall()
    }

    /// Whether the integer cell lies inside the grid
    #[inline]
    pub fn contains_cell(&self, ix: i64, iy: i64) -> bool {
        ix >= 0 && iy >= 0 && ix < self.width as i64 && iy < self.height as i64
    }

    /// Point-in-wall query for world coordinates.
    ///
    /// Coordinates are floored, so (-0.5, 3.0) lands in cell (-1, 3) and is
    /// a wall rather than aliasing onto column 0.
    #[inline]
    pub fn is_wall(&self, x: f32, y: f32) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return true;
        }
        self.is_wall_cell(x.floor() as i64, y.floor() as i64)
    }

    /// Iterate `(x, y, cell)` in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (i % width, i / width, cell))
    }
}

impl FromStr for GridMap {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for GridMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let ch = if self.cells[y * self.width + x].is_wall() { '#' } else { '.' };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
