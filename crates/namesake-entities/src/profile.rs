//! Entity profiles

use std::collections::BTreeMap;

use namesake_core::RawName;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Everything known about one real-world entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityProfile {
    pub entity_id: String,
    pub primary_name: RawName,
    #[serde(default)]
    pub alternate_names: Vec<RawName>,
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
    /// Relation type to related entity ids, in insertion order without duplicates.
    #[serde(default)]
    relationships: BTreeMap<String, Vec<String>>,
}

impl EntityProfile {
    pub fn new(entity_id: impl Into<String>, primary_name: impl Into<RawName>) -> Self {
        Self {
            entity_id: entity_id.into(),
            primary_name: primary_name.into(),
            alternate_names: Vec::new(),
            attributes: BTreeMap::new(),
            relationships: BTreeMap::new(),
        }
    }

    /// Add an alternate name unless it is the primary name or already known.
    pub fn add_alternate_name(&mut self, name: impl Into<RawName>) {
        let name = name.into();
        if name != self.primary_name && !self.alternate_names.contains(&name) {
            self.alternate_names.push(name);
        }
    }

    /// Insert or overwrite an attribute.
    pub fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn add_relationship(&mut self, relation_type: &str, related_entity_id: &str) {
        let related = self
            .relationships
            .entry(relation_type.to_string())
            .or_default();
        if !related.iter().any(|id| id == related_entity_id) {
            related.push(related_entity_id.to_string());
        }
    }

    /// Related ids for `relation_type`; empty for unknown types.
    pub fn related(&self, relation_type: &str) -> &[String] {
        self.relationships
            .get(relation_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn relationships(&self) -> &BTreeMap<String, Vec<String>> {
        &self.relationships
    }

    /// Every name the entity is known by, primary first.
    pub fn names(&self) -> impl Iterator<Item = &RawName> {
        std::iter::once(&self.primary_name).chain(self.alternate_names.iter())
    }
}
