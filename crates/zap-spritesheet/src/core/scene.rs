use crate::api::types::EntityId;
use crate::renderer::target::VisualTarget;
use crate::systems::playback::SpritesheetPlayer;

/// A player plus the id and tag the host knows it by.
pub struct SheetEntity<T: VisualTarget> {
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Inactive entities are skipped by the tick system.
    pub active: bool,
    pub player: SpritesheetPlayer<T>,
}

impl<T: VisualTarget> SheetEntity<T> {
    pub fn new(id: EntityId, player: SpritesheetPlayer<T>) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            player,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }
}

/// Flat storage for every animated sprite the host ticks.
/// Designed for small-to-medium counts (hundreds, not millions).
pub struct SpriteScene<T: VisualTarget> {
    entities: Vec<SheetEntity<T>>,
    next_id: u32,
}

impl<T: VisualTarget> SpriteScene<T> {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// Add a player under a fresh id. Returns `None` once every id is taken.
    pub fn spawn(&mut self, player: SpritesheetPlayer<T>) -> Option<EntityId> {
        let id = self.fresh_id()?;
        self.entities.push(SheetEntity::new(id, player));
        Some(id)
    }

    fn fresh_id(&mut self) -> Option<EntityId> {
        if let Some(next) = self.next_id.checked_add(1) {
            let id = EntityId(self.next_id);
            self.next_id = next;
            return Some(id);
        }
        // Counter exhausted: fall back to the lowest free id.
        (1..=u32::MAX).map(EntityId).find(|&id| self.get(id).is_none())
    }

    /// Add a prepared entity. Keeps its id.
    pub fn insert(&mut self, entity: SheetEntity<T>) {
        self.next_id = self.next_id.max(entity.id.0.saturating_add(1));
        self.entities.push(entity);
    }

    /// Remove an entity by ID. Its player is never ticked again.
    pub fn despawn(&mut self, id: EntityId) -> Option<SheetEntity<T>> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.swap_remove(idx))
    }

    pub fn get(&self, id: EntityId) -> Option<&SheetEntity<T>> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut SheetEntity<T>> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Shortcut to an entity's player.
    pub fn player_mut(&mut self, id: EntityId) -> Option<&mut SpritesheetPlayer<T>> {
        self.get_mut(id).map(|e| &mut e.player)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SheetEntity<T>> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SheetEntity<T>> {
        self.entities.iter_mut()
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&SheetEntity<T>> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    pub fn find_by_tag_mut(&mut self, tag: &str) -> Option<&mut SheetEntity<T>> {
        self.entities.iter_mut().find(|e| e.tag == tag)
    }

    /// Drop entities whose targets are gone.
    pub fn retain_alive(&mut self) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| e.player.target().is_alive());
        before - self.entities.len()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

impl<T: VisualTarget> Default for SpriteScene<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::atlas::{AtlasGrid, TilingPolicy};
    use crate::components::sprite::SpriteComponent;

    fn player(name: &str) -> SpritesheetPlayer<SpriteComponent> {
        let atlas = AtlasGrid::resolve(name, [64, 64], [32, 32], TilingPolicy::Exact).unwrap();
        SpritesheetPlayer::new(name, atlas, SpriteComponent::default())
    }

    #[test]
    fn spawn_and_get() {
        let mut scene = SpriteScene::new();
        let a = scene.spawn(player("a")).unwrap();
        let b = scene.spawn(player("b")).unwrap();
        assert_ne!(a, b);
        assert_eq!(scene.get(b).unwrap().player.name(), "b");
    }

    #[test]
    fn despawn_removes_entity() {
        let mut scene = SpriteScene::new();
        let id = scene.spawn(player("a")).unwrap();
        assert_eq!(scene.len(), 1);
        assert!(scene.despawn(id).is_some());
        assert!(scene.is_empty());
        assert!(scene.despawn(id).is_none());
    }

    #[test]
    fn find_by_tag() {
        let mut scene = SpriteScene::new();
        scene.insert(SheetEntity::new(EntityId(7), player("hero")).with_tag("hero"));
        scene.spawn(player("enemy"));
        assert_eq!(scene.find_by_tag("hero").unwrap().id, EntityId(7));
        // Spawned ids continue after inserted ones.
        assert!(scene.iter().all(|e| e.id.0 >= 7));
    }

    #[test]
    fn retain_alive_drops_dead_targets() {
        let mut scene = SpriteScene::new();
        let id = scene.spawn(player("a")).unwrap();
        scene.spawn(player("b"));
        scene.player_mut(id).unwrap().target_mut().destroy();
        assert_eq!(scene.retain_alive(), 1);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn spawn_after_max_id_stays_unique() {
        let mut scene = SpriteScene::new();
        scene.insert(SheetEntity::new(EntityId(u32::MAX), player("last")));
        let a = scene.spawn(player("a")).unwrap();
        let b = scene.spawn(player("b")).unwrap();
        assert_eq!(a, EntityId(1));
        assert_eq!(b, EntityId(2));
        assert!(scene.get(EntityId(u32::MAX)).is_some());
        assert_eq!(scene.len(), 3);
    }
}
