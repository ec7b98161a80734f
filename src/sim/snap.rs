//! Snapping the projectile onto the grid
//!
//! Nearest-free-cell search: every cell in rows `0..snap_rows` that has no
//! bubble sitting (almost) exactly on it is a candidate, and the one closest to
//! the projectile wins. This is not a drop simulation; a nearer free cell is
//! taken even if occupied cells lie between it and the projectile.

use glam::Vec2;

use super::SimError;
use super::bubble::{Bubble, BubbleId};
use super::field::BubbleField;
use super::grid::{GridCell, cell_center, cells};
use super::projectile::Projectile;
use crate::tuning::Tuning;

/// Closest unoccupied cell to `pos`
///
/// Ties go to the first cell in row-major order.
pub fn nearest_free_cell(field: &BubbleField, pos: Vec2, tuning: &Tuning) -> Option<(GridCell, Vec2)> {
    let mut best: Option<(GridCell, Vec2, f32)> = None;
    for cell in cells(tuning.snap_rows(), tuning.cols) {
        let center = cell_center(cell, tuning.bubble_radius, tuning.row_spacing_factor);
        if field.is_occupied(center, tuning.occupancy_epsilon) {
            continue;
        }
        let dist = pos.distance(center);
        match best {
            Some((_, _, best_dist)) if dist >= best_dist => {}
            _ => best = Some((cell, center, dist)),
        }
    }
    best.map(|(cell, center, _)| (cell, center))
}

/// Settle `projectile` into the field as bubble `id`
pub fn commit(
    field: &mut BubbleField,
    projectile: &Projectile,
    id: BubbleId,
    tuning: &Tuning,
) -> Result<GridCell, SimError> {
    let (cell, center) = nearest_free_cell(field, projectile.pos, tuning).ok_or(SimError::NoFreeCell {
        x: projectile.pos.x,
        y: projectile.pos.y,
    })?;
    field.insert(Bubble::settled(id, center, projectile.color));
    log::debug!(
        "Snapped {:?} bubble {:?} to row {} col {}",
        projectile.color,
        id,
        cell.row,
        cell.col
    );
    Ok(cell)
}
