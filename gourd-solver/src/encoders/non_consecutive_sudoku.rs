//! Non-consecutive Sudoku: a Sudoku in which orthogonally adjacent cells never hold consecutive
//! values.
//!
//! A puzzle of size `N` (with `N` a perfect square) uses the variable `var(r, c, v) = r·N² + c·N
//! + v` for "cell `(r, c)` holds `v`", with `r, c ∈ 0..N` and `v ∈ 1..=N`, so the formula has
//! exactly `N³` variables.
use std::fmt::Display;
use std::str::FromStr;

use itertools::Itertools;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PuzzleParseError {
    #[error("the puzzle contains no cells")]
    Empty,

    #[error("{num_cells} cells do not form an N x N grid with N a perfect square")]
    NotSquare { num_cells: usize },

    #[error("'{0}' is not a value or an empty cell")]
    InvalidToken(String),

    #[error("value {value} does not fit in a puzzle of size {size}")]
    ValueOutOfRange { value: usize, size: usize },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("the model has {actual} literals, but a puzzle of this size needs {expected}")]
    ModelTooShort { expected: usize, actual: usize },

    #[error("cell ({row}, {column}) holds no value in the model")]
    NoValue { row: usize, column: usize },

    #[error("cell ({row}, {column}) holds more than one value in the model")]
    MultipleValues { row: usize, column: usize },
}

/// A partially filled grid, read row by row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Puzzle {
    size: usize,
    /// Row-major; `None` marks an empty cell.
    cells: Vec<Option<usize>>,
}

impl Puzzle {
    pub fn size(&self) -> usize {
        self.size
    }

    /// The side of the boxes, i.e. the square root of the size.
    pub fn box_size(&self) -> usize {
        box_size(self.size)
    }

    pub fn clue(&self, row: usize, column: usize) -> Option<usize> {
        self.cells[row * self.size + column]
    }

    /// The given cells as `(row, column, value)`.
    pub fn clues(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(index, cell)| cell.map(|value| (index / self.size, index % self.size, value)))
    }
}

/// Tokens are separated by whitespace, `0` and `.` mark empty cells and lines starting with `#`
/// are comments. The size follows from the number of cells.
impl FromStr for Puzzle {
    type Err = PuzzleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = s
            .lines()
            .filter(|line| !line.trim_start().starts_with('#'))
            .flat_map(str::split_whitespace)
            .collect::<Vec<_>>();

        if tokens.is_empty() {
            return Err(PuzzleParseError::Empty);
        }

        let num_cells = tokens.len();
        let size = integer_sqrt(num_cells)
            .filter(|&size| integer_sqrt(size).is_some())
            .ok_or(PuzzleParseError::NotSquare { num_cells })?;

        let cells = tokens
            .into_iter()
            .map(|token| parse_cell(token, size))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Puzzle { size, cells })
    }
}

fn parse_cell(token: &str, size: usize) -> Result<Option<usize>, PuzzleParseError> {
    if token == "." {
        return Ok(None);
    }

    let value = token
        .parse::<usize>()
        .map_err(|_| PuzzleParseError::InvalidToken(token.to_owned()))?;

    match value {
        0 => Ok(None),
        value if value <= size => Ok(Some(value)),
        value => Err(PuzzleParseError::ValueOutOfRange { value, size }),
    }
}

fn integer_sqrt(n: usize) -> Option<usize> {
    let root = (n as f64).sqrt().round() as usize;
    (root * root == n).then_some(root)
}

fn box_size(size: usize) -> usize {
    integer_sqrt(size).unwrap_or(size)
}

/// The clauses of a puzzle together with the number of variables they range over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedFormula {
    pub clauses: Vec<Vec<i32>>,
    pub num_vars: usize,
}

/// The DIMACS variable stating that the cell `(row, column)` holds `value`.
pub fn variable(size: usize, row: usize, column: usize, value: usize) -> i32 {
    (row * size * size + column * size + value) as i32
}

pub fn encode(puzzle: &Puzzle) -> EncodedFormula {
    let size = puzzle.size;
    let box_size = puzzle.box_size();
    let var = |row: usize, column: usize, value: usize| variable(size, row, column, value);

    let mut clauses = Vec::new();

    for row in 0..size {
        for column in 0..size {
            let values = (1..=size).map(|value| var(row, column, value)).collect_vec();
            exactly_one(&mut clauses, &values);
        }
    }

    for value in 1..=size {
        for row in 0..size {
            let cells = (0..size).map(|column| var(row, column, value)).collect_vec();
            exactly_one(&mut clauses, &cells);
        }

        for column in 0..size {
            let cells = (0..size).map(|row| var(row, column, value)).collect_vec();
            exactly_one(&mut clauses, &cells);
        }

        for (box_row, box_column) in (0..box_size).cartesian_product(0..box_size) {
            let cells = (0..box_size)
                .cartesian_product(0..box_size)
                .map(|(row, column)| {
                    var(
                        box_row * box_size + row,
                        box_column * box_size + column,
                        value,
                    )
                })
                .collect_vec();
            exactly_one(&mut clauses, &cells);
        }
    }

    for (row, column) in (0..size).cartesian_product(0..size) {
        let neighbours = [(row, column + 1), (row + 1, column)];
        for (neighbour_row, neighbour_column) in neighbours {
            if neighbour_row >= size || neighbour_column >= size {
                continue;
            }

            for value in 1..size {
                clauses.push(vec![
                    -var(row, column, value),
                    -var(neighbour_row, neighbour_column, value + 1),
                ]);
                clauses.push(vec![
                    -var(row, column, value + 1),
                    -var(neighbour_row, neighbour_column, value),
                ]);
            }
        }
    }

    for (row, column, value) in puzzle.clues() {
        clauses.push(vec![var(row, column, value)]);
    }

    EncodedFormula {
        clauses,
        num_vars: size * size * size,
    }
}

/// One at-least-one clause and a binary at-most-one clause for every pair.
fn exactly_one(clauses: &mut Vec<Vec<i32>>, variables: &[i32]) {
    clauses.push(variables.to_vec());
    clauses.extend(
        variables
            .iter()
            .tuple_combinations()
            .map(|(&first, &second)| vec![-first, -second]),
    );
}

/// Read the grid of a puzzle of the given size from a DIMACS model of its encoding.
pub fn decode(size: usize, model: &[i32]) -> Result<Grid, DecodeError> {
    let expected = size * size * size;
    if model.len() < expected {
        return Err(DecodeError::ModelTooShort {
            expected,
            actual: model.len(),
        });
    }

    let is_true = |code: i32| model[code as usize - 1] == code;

    let mut values = Vec::with_capacity(size * size);
    for (row, column) in (0..size).cartesian_product(0..size) {
        let mut held = (1..=size).filter(|&value| is_true(variable(size, row, column, value)));

        let value = held.next().ok_or(DecodeError::NoValue { row, column })?;
        if held.next().is_some() {
            return Err(DecodeError::MultipleValues { row, column });
        }
        values.push(value);
    }

    Ok(Grid { size, values })
}

/// A completely filled grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    values: Vec<usize>,
}

impl Grid {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn value(&self, row: usize, column: usize) -> usize {
        self.values[row * self.size + column]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[usize]> {
        self.values.chunks(self.size)
    }

    /// Whether the grid solves `puzzle`: it keeps the clues, every row, column and box holds
    /// every value once, and no two orthogonal neighbours are consecutive.
    pub fn is_valid_non_consecutive(&self, puzzle: &Puzzle) -> bool {
        let size = self.size;
        if size != puzzle.size {
            return false;
        }

        let is_permutation = |cells: Vec<(usize, usize)>| {
            let mut values = cells
                .into_iter()
                .map(|(row, column)| self.value(row, column))
                .collect_vec();
            values.sort_unstable();
            values.into_iter().eq(1..=size)
        };

        let rows_are_valid =
            (0..size).all(|row| is_permutation((0..size).map(|column| (row, column)).collect()));
        let columns_are_valid =
            (0..size).all(|column| is_permutation((0..size).map(|row| (row, column)).collect()));

        let box_size = puzzle.box_size();
        let boxes_are_valid = (0..box_size)
            .cartesian_product(0..box_size)
            .all(|(box_row, box_column)| {
                is_permutation(
                    (0..box_size)
                        .cartesian_product(0..box_size)
                        .map(|(row, column)| {
                            (box_row * box_size + row, box_column * box_size + column)
                        })
                        .collect(),
                )
            });

        let is_consecutive = |first: usize, second: usize| first.abs_diff(second) == 1;
        let neighbours_are_valid = (0..size).cartesian_product(0..size).all(|(row, column)| {
            let right = column + 1 < size
                && is_consecutive(self.value(row, column), self.value(row, column + 1));
            let down =
                row + 1 < size && is_consecutive(self.value(row, column), self.value(row + 1, column));
            !right && !down
        });

        let clues_are_kept = puzzle
            .clues()
            .all(|(row, column, value)| self.value(row, column) == value);

        rows_are_valid && columns_are_valid && boxes_are_valid && neighbours_are_valid && clues_are_kept
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            writeln!(f, "{}", row.iter().join(" "))?;
        }
        Ok(())
    }
}
