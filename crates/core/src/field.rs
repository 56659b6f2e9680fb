//! Field module - the 10x24 page grid and the garbage staging line
//!
//! The field uses a flat array for cache locality and cheap snapshots.
//! Coordinates: (x, y) where x ranges 0..9 (left to right) and y ranges
//! 0..23 (bottom to top). Rows 0..22 are playable; row 23 is the ceiling row.

use serde::{Deserialize, Serialize};

use crate::error::{FumenError, Result};
use crate::pieces::absolute_cells;
use crate::types::{Coordinate, Piece, Rotation, FIELD_BLOCKS, FIELD_HEIGHT, FIELD_WIDTH};

/// Largest cell value (Gray)
const MAX_CELL_VALUE: i32 = Piece::Gray as i32;

fn add_to_cell(cell: &mut Piece, delta: i32) -> Result<()> {
    let value = cell.value() as i32 + delta;
    if !(0..=MAX_CELL_VALUE).contains(&value) {
        return Err(FumenError::UnsupportedPiece(value));
    }
    // In range 0..=8, so the lookup cannot miss.
    *cell = Piece::from_value(value as u8).unwrap_or_default();
    Ok(())
}

/// A page field - 10 columns x 24 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    /// Flat array of cells, row-major order (y * WIDTH + x), bottom row first
    cells: [Piece; FIELD_BLOCKS],
}

impl Field {
    /// Create a new empty field
    pub fn new() -> Self {
        Self {
            cells: [Piece::Empty; FIELD_BLOCKS],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= FIELD_WIDTH as i8 || y < 0 || y >= FIELD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * FIELD_WIDTH + (x as usize))
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Piece> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, piece: Piece) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = piece;
                true
            }
            None => false,
        }
    }

    /// Add a numeric delta to the cell value at (x, y)
    ///
    /// Out-of-bounds positions are ignored. Fails when the resulting value is
    /// not a piece.
    pub fn add(&mut self, x: i8, y: i8, delta: i32) -> Result<()> {
        match Self::index(x, y) {
            Some(idx) => add_to_cell(&mut self.cells[idx], delta),
            None => Ok(()),
        }
    }

    /// Write a piece into its four absolute cells
    ///
    /// Cells outside the field are skipped. Empty and Gray are a no-op.
    /// Returns the number of cells written.
    pub fn place(&mut self, piece: Piece, rotation: Rotation, coordinate: Coordinate) -> usize {
        let Some(cells) = absolute_cells(piece, rotation, coordinate) else {
            return 0;
        };
        cells
            .iter()
            .filter(|c| self.set(c.x, c.y, piece))
            .count()
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= FIELD_HEIGHT {
            return false;
        }
        let start = y * FIELD_WIDTH;
        self.cells[start..start + FIELD_WIDTH]
            .iter()
            .all(|&cell| cell != Piece::Empty)
    }

    /// Clear all full rows and return how many were removed
    ///
    /// Remaining rows keep their order and move down; empty rows fill the top.
    pub fn clear_filled_rows(&mut self) -> usize {
        let mut write_y = 0;

        for read_y in 0..FIELD_HEIGHT {
            if self.is_row_full(read_y) {
                continue;
            }
            if write_y != read_y {
                let src = read_y * FIELD_WIDTH;
                self.cells
                    .copy_within(src..src + FIELD_WIDTH, write_y * FIELD_WIDTH);
            }
            write_y += 1;
        }

        self.cells[write_y * FIELD_WIDTH..].fill(Piece::Empty);
        FIELD_HEIGHT - write_y
    }

    /// Rise: shift every row up by one and insert `line` as the bottom row
    ///
    /// The top row falls off the field.
    pub fn up(&mut self, line: &FieldLine) {
        self.cells
            .copy_within(0..FIELD_BLOCKS - FIELD_WIDTH, FIELD_WIDTH);
        self.cells[..FIELD_WIDTH].copy_from_slice(&line.cells);
    }

    /// Reverse every row left to right
    pub fn mirror(&mut self) {
        for row in self.cells.chunks_exact_mut(FIELD_WIDTH) {
            row.reverse();
        }
    }

    /// Independent copy of this field
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Number of non-empty cells
    pub fn block_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Piece::Empty).count()
    }

    /// Cells of row `y`
    pub fn row(&self, y: usize) -> Option<&[Piece]> {
        (y < FIELD_HEIGHT).then(|| &self.cells[y * FIELD_WIDTH..(y + 1) * FIELD_WIDTH])
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Piece] {
        &self.cells
    }

    /// Clear the entire field
    pub fn clear(&mut self) {
        self.cells.fill(Piece::Empty);
    }

    /// Create from rows given top row first, using piece letters
    ///
    /// Rows shorter than the field are the bottom rows; missing cells are empty.
    /// Returns None for unknown letters, rows longer than 10 or more than 24 rows.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        if rows.len() > FIELD_HEIGHT {
            return None;
        }
        let mut field = Self::new();
        for (i, row) in rows.iter().enumerate() {
            let y = rows.len() - 1 - i;
            let line = FieldLine::from_row(row)?;
            field.cells[y * FIELD_WIDTH..(y + 1) * FIELD_WIDTH].copy_from_slice(&line.cells);
        }
        Some(field)
    }

    /// Rows as letter strings, top row first
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .chunks_exact(FIELD_WIDTH)
            .rev()
            .map(|row| row.iter().map(|p| p.as_char()).collect())
            .collect()
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}

/// A single 10-cell row staging pending garbage before it rises into a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FieldLine {
    cells: [Piece; FIELD_WIDTH],
}

impl FieldLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, x: i8) -> Option<Piece> {
        usize::try_from(x).ok().and_then(|x| self.cells.get(x).copied())
    }

    pub fn set(&mut self, x: i8, piece: Piece) -> bool {
        match usize::try_from(x).ok().and_then(|x| self.cells.get_mut(x)) {
            Some(cell) => {
                *cell = piece;
                true
            }
            None => false,
        }
    }

    /// Add a numeric delta to the cell value at `x`
    pub fn add(&mut self, x: i8, delta: i32) -> Result<()> {
        match usize::try_from(x).ok().and_then(|x| self.cells.get_mut(x)) {
            Some(cell) => add_to_cell(cell, delta),
            None => Ok(()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == Piece::Empty)
    }

    pub fn clear(&mut self) {
        self.cells.fill(Piece::Empty);
    }

    pub fn cells(&self) -> &[Piece] {
        &self.cells
    }

    /// Parse a row of up to 10 piece letters (missing cells are empty)
    pub fn from_row(row: &str) -> Option<Self> {
        let mut line = Self::new();
        for (x, ch) in row.chars().enumerate() {
            let cell = line.cells.get_mut(x)?;
            *cell = Piece::from_char(ch)?;
        }
        Some(line)
    }

    pub fn to_row(&self) -> String {
        self.cells.iter().map(|p| p.as_char()).collect()
    }
}

impl Serialize for Field {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let rows = self.to_rows();
        let mut seq = serializer.serialize_seq(Some(rows.len()))?;
        for row in &rows {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct V;
        impl<'de> serde::de::Visitor<'de> for V {
            type Value = Field;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "an array of at most 24 row strings, top row first")
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut rows: Vec<String> = Vec::with_capacity(FIELD_HEIGHT);
                while let Some(row) = seq.next_element::<String>()? {
                    rows.push(row);
                }
                let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
                Field::from_rows(&rows).ok_or_else(|| serde::de::Error::custom("invalid field rows"))
            }
        }

        deserializer.deserialize_seq(V)
    }
}

impl Serialize for FieldLine {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_row())
    }
}

impl<'de> Deserialize<'de> for FieldLine {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let row = String::deserialize(deserializer)?;
        FieldLine::from_row(&row).ok_or_else(|| serde::de::Error::custom("invalid field line"))
    }
}
