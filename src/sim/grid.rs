//! Staggered grid geometry
//!
//! Rows are spaced `row_spacing_factor * R` apart; odd rows are shifted right
//! by half a bubble, giving the classic hexagonal-like packing. Pure functions,
//! no state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A (row, column) cell address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
}

impl GridCell {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    #[inline]
    pub fn is_odd_row(&self) -> bool {
        self.row % 2 == 1
    }
}

/// Pixel centre of a cell
///
/// `x = col*2R + (R if odd row) + R`, `y = row*spacing*R + R`
#[inline]
pub fn cell_center(cell: GridCell, radius: f32, row_spacing_factor: f32) -> Vec2 {
    let stagger = if cell.is_odd_row() { radius } else { 0.0 };
    Vec2::new(
        cell.col as f32 * radius * 2.0 + stagger + radius,
        cell.row as f32 * radius * row_spacing_factor + radius,
    )
}

/// Iterate cells row-major over `rows x cols`
pub fn cells(rows: u32, cols: u32) -> impl Iterator<Item = GridCell> {
    (0..rows).flat_map(move |row| (0..cols).map(move |col| GridCell::new(row, col)))
}
