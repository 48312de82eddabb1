use std::collections::HashMap;

use log::{debug, warn};

use crate::components::sequence::SequenceItem;

/// Named items registered against one sprite, plus the default item
/// playback falls back to.
#[derive(Debug, Clone, Default)]
pub struct SequenceRegistry {
    /// Owner name, used in diagnostics.
    owner: String,
    items: HashMap<String, SequenceItem>,
    default_item: Option<String>,
}

impl SequenceRegistry {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            items: HashMap::new(),
            default_item: None,
        }
    }

    /// Store `item` under `name`, or under the item's own name when `name` is None.
    /// An existing item with the same name is replaced.
    pub fn add(&mut self, item: SequenceItem, name: Option<&str>, make_default: bool) {
        let name = name.map(str::to_string).unwrap_or_else(|| item.name.clone());
        if self.items.insert(name.clone(), item).is_some() {
            debug!("{}: replaced item {name}", self.owner);
        }
        if make_default {
            self.default_item = Some(name);
        }
    }

    /// Make `name` the default item. Unknown names are logged and ignored.
    pub fn set_default(&mut self, name: &str) -> bool {
        if !self.items.contains_key(name) {
            warn!("{} has no item named {name}!", self.owner);
            return false;
        }
        self.default_item = Some(name.to_string());
        true
    }

    /// Look up an item by name. Returns None if not found.
    pub fn get(&self, name: &str) -> Option<&SequenceItem> {
        self.items.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    pub fn default_item(&self) -> Option<&str> {
        self.default_item.as_deref()
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Registered item names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_uses_item_name_by_default() {
        let mut reg = SequenceRegistry::new("bat");
        reg.add(SequenceItem::frame("dead", 0), None, false);
        reg.add(SequenceItem::range("fly", 1, 3), Some("fly_forward"), false);

        assert!(reg.contains("dead"));
        assert!(reg.contains("fly_forward"));
        assert!(!reg.contains("fly"));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn last_write_wins() {
        let mut reg = SequenceRegistry::new("bat");
        reg.add(SequenceItem::frame("idle", 0), None, false);
        reg.add(SequenceItem::frame("idle", 4), None, false);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get("idle").unwrap().cells(), &[4]);
    }

    #[test]
    fn make_default_on_add() {
        let mut reg = SequenceRegistry::new("bat");
        reg.add(SequenceItem::frame("idle", 0), None, true);
        assert_eq!(reg.default_item(), Some("idle"));
    }

    #[test]
    fn set_default_ignores_unknown() {
        let mut reg = SequenceRegistry::new("bat");
        reg.add(SequenceItem::frame("idle", 0), None, false);

        assert!(!reg.set_default("missing"));
        assert_eq!(reg.default_item(), None);

        assert!(reg.set_default("idle"));
        assert_eq!(reg.default_item(), Some("idle"));
    }

    #[test]
    fn unknown_returns_none() {
        let reg = SequenceRegistry::new("bat");
        assert!(reg.get("nonexistent").is_none());
        assert!(reg.is_empty());
    }
}
