use glam::Vec2;

use crate::renderer::target::VisualTarget;

/// Sprite component: the texture window a quad shows from its sheet.
///
/// The simplest [`VisualTarget`]. Hosts copy `uv_offset`/`uv_scale` into
/// their own render instances each frame.
#[derive(Debug, Clone)]
pub struct SpriteComponent {
    /// Bottom-left corner of the visible cell, in UV units.
    pub uv_offset: Vec2,
    /// Size of one cell, in UV units.
    pub uv_scale: Vec2,
    /// Cleared when the owning node is destroyed.
    pub alive: bool,
    /// Number of offset updates received.
    pub updates: u32,
}

impl Default for SpriteComponent {
    fn default() -> Self {
        Self {
            uv_offset: Vec2::ZERO,
            uv_scale: Vec2::ONE,
            alive: true,
            updates: 0,
        }
    }
}

impl SpriteComponent {
    /// Mark as destroyed. Attached players go quiet on their next tick.
    pub fn destroy(&mut self) {
        self.alive = false;
    }
}

impl VisualTarget for SpriteComponent {
    fn set_uv_offset(&mut self, offset: Vec2) {
        self.uv_offset = offset;
        self.updates += 1;
    }

    fn set_uv_scale(&mut self, scale: Vec2) {
        self.uv_scale = scale;
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}
