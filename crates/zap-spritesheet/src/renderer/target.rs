//! Contract between the playback engine and whatever draws the sprite.
//!
//! The engine never renders anything itself. It only tells a target which
//! part of the sheet texture to show.

use std::cell::RefCell;
use std::rc::Weak;

use glam::Vec2;

/// Anything that can show a region of an atlas texture.
pub trait VisualTarget {
    /// Move the visible region to a cell's UV offset.
    fn set_uv_offset(&mut self, offset: Vec2);

    /// Size of the visible region in UV units. Set once when a player is created.
    fn set_uv_scale(&mut self, scale: Vec2);

    /// False once the target has been destroyed. Players stop touching dead targets.
    fn is_alive(&self) -> bool {
        true
    }
}

/// Drive a target owned elsewhere. Dead once every strong reference is dropped.
impl<T: VisualTarget> VisualTarget for Weak<RefCell<T>> {
    fn set_uv_offset(&mut self, offset: Vec2) {
        if let Some(target) = self.upgrade() {
            target.borrow_mut().set_uv_offset(offset);
        }
    }

    fn set_uv_scale(&mut self, scale: Vec2) {
        if let Some(target) = self.upgrade() {
            target.borrow_mut().set_uv_scale(scale);
        }
    }

    fn is_alive(&self) -> bool {
        self.upgrade().is_some_and(|target| target.borrow().is_alive())
    }
}

impl<T: VisualTarget + ?Sized> VisualTarget for Box<T> {
    fn set_uv_offset(&mut self, offset: Vec2) {
        (**self).set_uv_offset(offset);
    }

    fn set_uv_scale(&mut self, scale: Vec2) {
        (**self).set_uv_scale(scale);
    }

    fn is_alive(&self) -> bool {
        (**self).is_alive()
    }
}
