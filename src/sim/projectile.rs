//! The in-flight projectile
//!
//! Moves in a straight line at a fixed per-tick speed, bounces elastically off
//! the side walls and stops at the ceiling or on first contact with a settled
//! bubble. There is no sliding or rolling.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bubble::{BubbleColor, BubbleId};
use super::field::BubbleField;
use crate::direction_from_angle;

/// What the projectile ran into this tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Contact {
    /// Still travelling
    None,
    /// Top edge reached y = 0 (position already clamped)
    Ceiling,
    /// Centre came within collision distance of a settled bubble
    Bubble(BubbleId),
}

impl Contact {
    pub fn stops(&self) -> bool {
        !matches!(self, Contact::None)
    }
}

/// The single moving bubble
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: BubbleColor,
    pub radius: f32,
}

impl Projectile {
    /// Launch from `pos` along `angle` at `speed` pixels per tick
    pub fn launch(pos: Vec2, color: BubbleColor, radius: f32, angle: f32, speed: f32) -> Self {
        Self {
            pos,
            vel: direction_from_angle(angle) * speed,
            color,
            radius,
        }
    }

    /// Integrate position by one tick
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// Side-wall bounce: negate horizontal velocity when the bubble pokes past
    /// either wall. No positional correction, so slight overlap is tolerated.
    pub fn bounce_walls(&mut self, field_width: f32) -> bool {
        if self.pos.x - self.radius < 0.0 || self.pos.x + self.radius > field_width {
            self.vel.x = -self.vel.x;
            true
        } else {
            false
        }
    }

    /// Clamp to the ceiling if the top edge crossed y = 0
    pub fn hit_ceiling(&mut self) -> bool {
        if self.pos.y - self.radius < 0.0 {
            self.pos.y = self.radius;
            true
        } else {
            false
        }
    }

    /// First settled bubble (by id) within `collision_distance`
    pub fn hit_field(&self, field: &BubbleField, collision_distance: f32) -> Option<BubbleId> {
        field.first_within(self.pos, collision_distance)
    }

    /// Advance one tick and resolve walls, ceiling and field in that order
    pub fn step(&mut self, field: &BubbleField, field_width: f32, collision_distance: f32) -> Contact {
        self.advance();
        self.bounce_walls(field_width);
        if self.hit_ceiling() {
            return Contact::Ceiling;
        }
        match self.hit_field(field, collision_distance) {
            Some(id) => Contact::Bubble(id),
            None => Contact::None,
        }
    }
}
