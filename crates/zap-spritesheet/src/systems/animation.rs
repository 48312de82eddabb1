//! Animation system: ticks every player in a scene.

use crate::core::scene::SpriteScene;
use crate::core::time::FrameClock;
use crate::renderer::target::VisualTarget;

/// Tick every active player once by `dt` seconds.
///
/// Call this once per frame before rendering.
pub fn tick_players<T: VisualTarget>(scene: &mut SpriteScene<T>, dt: f32) {
    for entity in scene.iter_mut() {
        if entity.active {
            entity.player.tick(dt);
        }
    }
}

/// Read one delta from `clock` and tick the scene with it. Returns the delta used.
pub fn tick_with_clock<T: VisualTarget>(scene: &mut SpriteScene<T>, clock: &mut impl FrameClock) -> f32 {
    let dt = clock.elapsed_seconds_since_last_tick();
    tick_players(scene, dt);
    dt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::PlayStatus;
    use crate::assets::atlas::{AtlasGrid, TilingPolicy};
    use crate::components::sequence::SequenceItem;
    use crate::components::sprite::SpriteComponent;
    use crate::core::time::ManualClock;
    use crate::systems::playback::SpritesheetPlayer;
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    fn walker<T: VisualTarget>(target: T) -> SpritesheetPlayer<T> {
        let atlas = AtlasGrid::resolve("walker", [128, 32], [32, 32], TilingPolicy::Exact).unwrap();
        let mut player = SpritesheetPlayer::new("walker", atlas, target);
        player
            .add_item(SequenceItem::range("walk", 0, 4).looping(true), None, true)
            .unwrap();
        player
    }

    #[test]
    fn tick_updates_sprite_frame() {
        let mut scene = SpriteScene::new();
        let id = scene.spawn(walker(SpriteComponent::default())).unwrap();
        assert_eq!(scene.player_mut(id).unwrap().play("walk", true), PlayStatus::Started);

        tick_players(&mut scene, 0.15);

        let player = &scene.get(id).unwrap().player;
        assert_eq!(player.current_cell(), 1);
        assert_eq!(player.target().uv_offset, Vec2::new(0.25, 0.0));
    }

    #[test]
    fn inactive_entities_are_skipped() {
        let mut scene = SpriteScene::new();
        let id = scene.spawn(walker(SpriteComponent::default())).unwrap();
        scene.player_mut(id).unwrap().play("walk", true);
        scene.get_mut(id).unwrap().active = false;

        tick_players(&mut scene, 0.15);
        assert_eq!(scene.get(id).unwrap().player.current_cell(), 0);
    }

    #[test]
    fn clock_drives_scene() {
        let mut scene = SpriteScene::new();
        let id = scene.spawn(walker(SpriteComponent::default())).unwrap();
        scene.player_mut(id).unwrap().play("walk", true);

        let mut clock = ManualClock::new();
        clock.advance(0.1);
        assert_eq!(tick_with_clock(&mut scene, &mut clock), 0.1);
        assert_eq!(scene.get(id).unwrap().player.current_cell(), 1);

        // Nothing pushed: zero delta, no advance.
        tick_with_clock(&mut scene, &mut clock);
        assert_eq!(scene.get(id).unwrap().player.current_cell(), 1);
    }

    #[test]
    fn dropped_node_silences_player() {
        let node = Rc::new(RefCell::new(SpriteComponent::default()));
        let mut scene: SpriteScene<Weak<RefCell<SpriteComponent>>> = SpriteScene::new();
        let id = scene.spawn(walker(Rc::downgrade(&node))).unwrap();
        scene.player_mut(id).unwrap().play("walk", true);
        assert_eq!(node.borrow().uv_scale, Vec2::new(0.25, 1.0));

        tick_players(&mut scene, 0.1);
        assert_eq!(node.borrow().uv_offset, Vec2::new(0.25, 0.0));

        drop(node);
        tick_players(&mut scene, 0.1);
        let player = &scene.get(id).unwrap().player;
        assert_eq!(player.cursor().frame, 1);
        assert_eq!(scene.retain_alive(), 1);
    }
}
