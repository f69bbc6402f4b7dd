//! Entity storage and name indexing
//!
//! Every key is a normalized name, so lookups see through case, accents,
//! punctuation and suffix spelling ("Apple Incorporated" finds "Apple Inc.").

use std::collections::{BTreeMap, BTreeSet};

use namesake_core::{Encoder, Normalizer, RawName};

use crate::profile::EntityProfile;

/// Storage for entity profiles with name-based lookup.
pub trait EntityRepository {
    /// Insert or replace the profile with the same id.
    fn save(&mut self, entity: EntityProfile);

    fn find_by_id(&self, entity_id: &str) -> Option<&EntityProfile>;

    /// Exact normalized lookup on primary names, then alternate names.
    fn find_by_primary_name(&self, name: &RawName) -> Option<&EntityProfile>;

    /// Profiles worth scoring against `name`, at most `limit` of them.
    fn find_candidates_by_name(&self, name: &RawName, limit: usize) -> Vec<&EntityProfile>;

    /// Primary names of every stored entity.
    fn all_entity_names(&self) -> Vec<RawName>;
}

/// In-memory repository with exact and phonetic name indexes.
#[derive(Debug, Clone)]
pub struct InMemoryEntityRepository {
    normalizer: Normalizer,
    encoder: Encoder,
    entities: BTreeMap<String, EntityProfile>,
    primary_index: BTreeMap<String, String>,
    alternate_index: BTreeMap<String, String>,
    phonetic_index: BTreeMap<String, BTreeSet<String>>,
}

impl Default for InMemoryEntityRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEntityRepository {
    /// Repository bucketing primary names by Soundex code.
    pub fn new() -> Self {
        Self::with_encoder(Encoder::Soundex)
    }

    pub fn with_encoder(encoder: Encoder) -> Self {
        Self {
            normalizer: Normalizer::new(),
            encoder,
            entities: BTreeMap::new(),
            primary_index: BTreeMap::new(),
            alternate_index: BTreeMap::new(),
            phonetic_index: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn key(&self, name: &RawName) -> Option<String> {
        let key = self.normalizer.normalize(name.as_str());
        (!key.is_empty()).then_some(key)
    }

    fn phonetic_code(&self, key: &str) -> Option<String> {
        let code = self.encoder.encode(key);
        (!code.is_empty()).then_some(code)
    }

    fn index(&mut self, entity: &EntityProfile) {
        let id = &entity.entity_id;
        if let Some(key) = self.key(&entity.primary_name) {
            if let Some(code) = self.phonetic_code(&key) {
                self.phonetic_index.entry(code).or_default().insert(id.clone());
            }
            self.primary_index.insert(key, id.clone());
        }
        for alternate in &entity.alternate_names {
            if let Some(key) = self.key(alternate) {
                self.alternate_index.insert(key, id.clone());
            }
        }
    }

    fn unindex(&mut self, entity: &EntityProfile) {
        let id = &entity.entity_id;
        if let Some(key) = self.key(&entity.primary_name) {
            if let Some(code) = self.phonetic_code(&key) {
                if let Some(bucket) = self.phonetic_index.get_mut(&code) {
                    bucket.remove(id);
                    if bucket.is_empty() {
                        self.phonetic_index.remove(&code);
                    }
                }
            }
            if self.primary_index.get(&key) == Some(id) {
                self.primary_index.remove(&key);
            }
        }
        for alternate in &entity.alternate_names {
            if let Some(key) = self.key(alternate) {
                if self.alternate_index.get(&key) == Some(id) {
                    self.alternate_index.remove(&key);
                }
            }
        }
    }
}

impl EntityRepository for InMemoryEntityRepository {
    fn save(&mut self, entity: EntityProfile) {
        if let Some(previous) = self.entities.remove(&entity.entity_id) {
            self.unindex(&previous);
        }
        self.index(&entity);
        tracing::debug!(entity_id = %entity.entity_id, "saved entity");
        self.entities.insert(entity.entity_id.clone(), entity);
    }

    fn find_by_id(&self, entity_id: &str) -> Option<&EntityProfile> {
        self.entities.get(entity_id)
    }

    fn find_by_primary_name(&self, name: &RawName) -> Option<&EntityProfile> {
        let key = self.key(name)?;
        self.primary_index
            .get(&key)
            .or_else(|| self.alternate_index.get(&key))
            .and_then(|id| self.entities.get(id))
    }

    fn find_candidates_by_name(&self, name: &RawName, limit: usize) -> Vec<&EntityProfile> {
        let Some(key) = self.key(name) else {
            return Vec::new();
        };

        let mut ids: BTreeSet<&String> = self
            .primary_index
            .get(&key)
            .into_iter()
            .chain(self.alternate_index.get(&key))
            .collect();

        if ids.is_empty() {
            if let Some(bucket) = self
                .phonetic_code(&key)
                .and_then(|code| self.phonetic_index.get(&code))
            {
                ids.extend(bucket.iter());
            }
        }

        ids.into_iter()
            .filter_map(|id| self.entities.get(id))
            .take(limit)
            .collect()
    }

    fn all_entity_names(&self) -> Vec<RawName> {
        self.entities
            .values()
            .map(|entity| entity.primary_name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_repository() -> InMemoryEntityRepository {
        let mut repo = InMemoryEntityRepository::new();

        let mut apple = EntityProfile::new("E001", "Apple Inc.");
        apple.add_alternate_name("Apple");
        apple.add_alternate_name("Apple Computer");
        repo.save(apple);

        repo.save(EntityProfile::new("E002", "Microsoft Corporation"));

        let mut ibm = EntityProfile::new("E003", "International Business Machines");
        ibm.add_alternate_name("IBM");
        ibm.add_alternate_name("IBM Corporation");
        repo.save(ibm);

        repo
    }

    #[test]
    fn test_find_by_id() {
        let repo = sample_repository();
        assert_eq!(repo.find_by_id("E002").unwrap().primary_name.as_str(), "Microsoft Corporation");
        assert!(repo.find_by_id("E999").is_none());
        assert_eq!(repo.len(), 3);
    }

    #[test]
    fn test_find_by_primary_name_normalizes() {
        let repo = sample_repository();
        let found = repo.find_by_primary_name(&"APPLE INCORPORATED".into()).unwrap();
        assert_eq!(found.entity_id, "E001");
    }

    #[test]
    fn test_find_by_alternate_name() {
        let repo = sample_repository();
        let found = repo.find_by_primary_name(&"IBM Corp.".into()).unwrap();
        assert_eq!(found.entity_id, "E003");
        assert!(repo.find_by_primary_name(&"Oracle".into()).is_none());
        assert!(repo.find_by_primary_name(&"...".into()).is_none());
    }

    #[test]
    fn test_candidates_exact_before_phonetic() {
        let repo = sample_repository();
        let candidates = repo.find_candidates_by_name(&"IBM".into(), 10);
        let ids: Vec<&str> = candidates.iter().map(|e| e.entity_id.as_str()).collect();
        assert_eq!(ids, ["E003"]);
    }

    #[test]
    fn test_candidates_from_phonetic_bucket() {
        let repo = sample_repository();
        // "Mikrosoft Corp" shares the Soundex code of "microsoft corp".
        let candidates = repo.find_candidates_by_name(&"Mikrosoft Corp".into(), 10);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].entity_id, "E002");
    }

    #[test]
    fn test_candidates_respect_limit() {
        let mut repo = InMemoryEntityRepository::new();
        repo.save(EntityProfile::new("A", "Robert"));
        repo.save(EntityProfile::new("B", "Rupert"));
        repo.save(EntityProfile::new("C", "Robart"));

        assert_eq!(repo.find_candidates_by_name(&"Rubert".into(), 10).len(), 3);
        let limited = repo.find_candidates_by_name(&"Rubert".into(), 2);
        let ids: Vec<&str> = limited.iter().map(|e| e.entity_id.as_str()).collect();
        assert_eq!(ids, ["A", "B"]);
    }

    #[test]
    fn test_resave_replaces_index_entries() {
        let mut repo = sample_repository();
        repo.save(EntityProfile::new("E002", "Alphabet Inc."));

        assert!(repo.find_by_primary_name(&"Microsoft Corporation".into()).is_none());
        assert!(repo
            .find_candidates_by_name(&"Mikrosoft Corp".into(), 10)
            .is_empty());
        assert_eq!(
            repo.find_by_primary_name(&"Alphabet".into()).map(|e| e.entity_id.as_str()),
            None
        );
        assert_eq!(
            repo.find_by_primary_name(&"alphabet inc".into()).map(|e| e.entity_id.as_str()),
            Some("E002")
        );
        assert_eq!(repo.len(), 3);
    }

    #[test]
    fn test_all_entity_names() {
        let repo = sample_repository();
        let names: Vec<String> = repo
            .all_entity_names()
            .into_iter()
            .map(RawName::into_inner)
            .collect();
        assert_eq!(
            names,
            ["Apple Inc.", "Microsoft Corporation", "International Business Machines"]
        );
    }
}
