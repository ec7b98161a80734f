//! Bubble entities and the color palette

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable bubble identifier (arena slot key, never reused within a run)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BubbleId(pub u32);

/// The fixed six-color palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BubbleColor {
    Blue,
    Red,
    Green,
    Yellow,
    Purple,
    Teal,
}

impl BubbleColor {
    pub const ALL: [BubbleColor; 6] = [
        BubbleColor::Blue,
        BubbleColor::Red,
        BubbleColor::Green,
        BubbleColor::Yellow,
        BubbleColor::Purple,
        BubbleColor::Teal,
    ];

    /// Display color for the render layer (0xRRGGBB)
    pub fn rgb(&self) -> u32 {
        match self {
            BubbleColor::Blue => 0x3498db,
            BubbleColor::Red => 0xe74c3c,
            BubbleColor::Green => 0x2ecc71,
            BubbleColor::Yellow => 0xf1c40f,
            BubbleColor::Purple => 0x9b59b6,
            BubbleColor::Teal => 0x1abc9c,
        }
    }
}

/// A settled (static) bubble
///
/// Static bubbles only move during a field-wide row shift. The moving bubble
/// is a [`super::projectile::Projectile`] until it snaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    pub id: BubbleId,
    pub pos: Vec2,
    pub color: BubbleColor,
}

impl Bubble {
    pub fn settled(id: BubbleId, pos: Vec2, color: BubbleColor) -> Self {
        Self { id, pos, color }
    }
}
