// Tagged key/value save container.
//
// The host persists machine state (the item collector's inventory)
// through a small self-describing key/value format. `TagCompound` mirrors
// that shape: string keys mapped to integers, strings, lists, or nested
// compounds. Keys are stored in a `BTreeMap` so serialization order is
// deterministic.
//
// The tree framework itself is stateless across saves — a standing tree
// is fully represented by tile-grid contents, which the host persists on
// its own. Only `collector.rs` uses this container.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One value in a tag compound.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TagValue {
    Int(i64),
    Str(String),
    List(Vec<TagValue>),
    Compound(TagCompound),
}

/// A tagged key/value container, the unit of host persistence.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TagCompound {
    entries: BTreeMap<String, TagValue>,
}

impl TagCompound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: TagValue) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&TagValue> {
        self.entries.get(key)
    }

    /// Integer stored under `key`, if present and of the right type.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.entries.get(key) {
            Some(TagValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(TagValue::Str(v)) => Some(v),
            _ => None,
        }
    }

    pub fn get_list(&self, key: &str) -> Option<&[TagValue]> {
        match self.entries.get(key) {
            Some(TagValue::List(v)) => Some(v),
            _ => None,
        }
    }

    pub fn get_compound(&self, key: &str) -> Option<&TagCompound> {
        match self.entries.get(key) {
            Some(TagValue::Compound(v)) => Some(v),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_getters_check_the_variant() {
        let mut tag = TagCompound::new();
        tag.set("count", TagValue::Int(18));
        tag.set("name", TagValue::Str("collector".into()));

        assert_eq!(tag.get_int("count"), Some(18));
        assert_eq!(tag.get_str("name"), Some("collector"));
        // Wrong type or missing key: None, not a panic.
        assert_eq!(tag.get_str("count"), None);
        assert_eq!(tag.get_int("missing"), None);
    }

    #[test]
    fn nested_compounds_roundtrip_through_json() {
        let mut slot = TagCompound::new();
        slot.set("kind", TagValue::Int(42));
        slot.set("stack", TagValue::Int(99));
        let mut tag = TagCompound::new();
        tag.set("slots", TagValue::List(vec![TagValue::Compound(slot)]));

        let json = serde_json::to_string(&tag).unwrap();
        let restored: TagCompound = serde_json::from_str(&json).unwrap();
        assert_eq!(tag, restored);
        let slots = restored.get_list("slots").unwrap();
        assert_eq!(slots.len(), 1);
    }
}
