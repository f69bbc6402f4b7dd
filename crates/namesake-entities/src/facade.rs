//! Entity resolution facade
//!
//! Wires the normalizer, scorer, decision strategy, resolver and an entity
//! repository together behind one entry point, and shapes the results into
//! plain records.

use std::collections::BTreeMap;

use namesake_core::{
    Algorithm, EntityResolver, Encoder, MatchConfig, MatchDecisionStrategy, MatchScorer,
    Normalizer, RawName,
};
use serde_json::{json, Value};

use crate::profile::EntityProfile;
use crate::report::{
    ComparisonReport, ListMatch, PhoneticSummary, ProcessedPair, EXACT_MATCH,
    EXACT_PROCESSED_MATCH,
};
use crate::repository::{EntityRepository, InMemoryEntityRepository};

/// Algorithm used to resolve a name to a stored entity.
const ENTITY_RESOLUTION_ALGORITHM: Algorithm = Algorithm::WeightedRatio;

/// High-level API for comparing names and resolving them to entities.
#[derive(Debug)]
pub struct EntityResolutionFacade<R: EntityRepository = InMemoryEntityRepository> {
    config: MatchConfig,
    normalizer: Normalizer,
    strategy: MatchDecisionStrategy,
    repository: R,
}

impl Default for EntityResolutionFacade {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}

impl EntityResolutionFacade {
    /// Facade backed by an in-memory repository.
    pub fn new(config: MatchConfig) -> Self {
        Self::with_repository(config, InMemoryEntityRepository::new())
    }
}

impl<R: EntityRepository> EntityResolutionFacade<R> {
    pub fn with_repository(config: MatchConfig, repository: R) -> Self {
        let strategy = MatchDecisionStrategy::new(MatchScorer::default(), config.decision.clone());
        Self {
            config,
            normalizer: Normalizer::new(),
            strategy,
            repository,
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repository
    }

    /// Compare two strings with every algorithm and encoder.
    pub fn compare_strings(&self, s1: &str, s2: &str) -> ComparisonReport {
        let verdict = self
            .strategy
            .evaluate_match(&RawName::from(s1), &RawName::from(s2));
        let bundle = &verdict.scores;

        let scores = self
            .strategy
            .scorer()
            .algorithms
            .iter()
            .map(|algorithm| (algorithm.name().to_string(), bundle.algorithm_score(*algorithm)))
            .collect();

        let (soundex_s1, soundex_s2) = bundle.phonetic_codes(Encoder::Soundex);
        let (metaphone_s1, metaphone_s2) = bundle.phonetic_codes(Encoder::Metaphone);
        let phonetic = PhoneticSummary {
            soundex_s1: soundex_s1.to_string(),
            soundex_s2: soundex_s2.to_string(),
            soundex_match: bundle.phonetic_match(Encoder::Soundex).is_some(),
            metaphone_s1: metaphone_s1.to_string(),
            metaphone_s2: metaphone_s2.to_string(),
            metaphone_match: bundle.phonetic_match(Encoder::Metaphone).is_some(),
        };

        ComparisonReport {
            is_match: verdict.is_match,
            match_reasons: verdict.reasons().to_vec(),
            scores,
            phonetic,
            processed: ProcessedPair {
                s1: bundle.normalized_first.value.clone(),
                s2: bundle.normalized_second.value.clone(),
            },
        }
    }

    /// Best matches for `query` among `candidates`.
    ///
    /// Candidates equal to the query as typed come first, then candidates
    /// equal after normalization, all with score `1.0`. Without any exact
    /// match the candidates are ranked with `algorithm_name`; unknown names
    /// fall back to token_set_ratio with a warning.
    pub fn find_best_matches_in_list<S: AsRef<str>>(
        &self,
        query: &str,
        candidates: &[S],
        algorithm_name: &str,
        threshold: f64,
        limit: usize,
    ) -> Vec<ListMatch> {
        let processed_query = self.normalizer.normalize(query);
        if processed_query.is_empty() {
            return Vec::new();
        }

        let processed: Vec<(&str, String)> = candidates
            .iter()
            .map(|c| (c.as_ref(), self.normalizer.normalize(c.as_ref())))
            .filter(|(_, value)| !value.is_empty())
            .collect();

        let list_match = |candidate: &str, value: &str, score: f64, algorithm: &str| ListMatch {
            original_query: query.to_string(),
            matched_candidate_original: candidate.to_string(),
            matched_candidate_processed: value.to_string(),
            score,
            algorithm_used: algorithm.to_string(),
        };

        let raw_exact = processed
            .iter()
            .filter(|(candidate, _)| *candidate == query)
            .map(|(candidate, value)| list_match(candidate, value, 1.0, EXACT_MATCH));
        let processed_exact = processed
            .iter()
            .filter(|(candidate, value)| *candidate != query && *value == processed_query)
            .map(|(candidate, value)| list_match(candidate, value, 1.0, EXACT_PROCESSED_MATCH));
        let exact: Vec<ListMatch> = raw_exact.chain(processed_exact).collect();
        if !exact.is_empty() {
            return exact;
        }

        let resolver = EntityResolver::new(Algorithm::resolve_or_default(algorithm_name), threshold, limit);
        let candidate_names: Vec<RawName> =
            processed.iter().map(|(candidate, _)| RawName::from(*candidate)).collect();

        resolver
            .resolve(&RawName::from(query), &candidate_names)
            .into_iter()
            .map(|c| {
                list_match(
                    c.raw.as_str(),
                    c.normalized.as_str(),
                    c.score,
                    resolver.algorithm.name(),
                )
            })
            .collect()
    }

    /// [`Self::find_best_matches_in_list`] with the configured resolver defaults.
    pub fn find_best_matches<S: AsRef<str>>(&self, query: &str, candidates: &[S]) -> Vec<ListMatch> {
        let resolver = &self.config.resolver;
        self.find_best_matches_in_list(
            query,
            candidates,
            &resolver.algorithm,
            resolver.threshold,
            resolver.limit,
        )
    }

    /// Create a profile and save it, replacing any entity with the same id.
    pub fn register_entity<S: AsRef<str>>(
        &mut self,
        entity_id: &str,
        primary_name: &str,
        alternate_names: &[S],
        attributes: BTreeMap<String, Value>,
    ) -> EntityProfile {
        let mut profile = EntityProfile::new(entity_id, primary_name);
        for name in alternate_names {
            profile.add_alternate_name(name.as_ref());
        }
        profile.attributes = attributes;

        self.repository.save(profile.clone());
        profile
    }

    /// Find the entity a name refers to.
    ///
    /// An exact (normalized) primary or alternate name wins. Otherwise the
    /// best fuzzy match among candidate names is accepted when it scores at
    /// least the configured resolution threshold.
    pub fn find_by_name(&self, name: &str) -> Option<&EntityProfile> {
        let query = RawName::from(name);
        if let Some(entity) = self.repository.find_by_primary_name(&query) {
            return Some(entity);
        }

        let candidates = self.candidate_names(&query);
        if candidates.is_empty() {
            return None;
        }

        let resolver = EntityResolver::new(
            ENTITY_RESOLUTION_ALGORITHM,
            self.config.resolver.resolution_threshold,
            1,
        );
        let best = resolver.resolve(&query, &candidates).into_iter().next();
        tracing::debug!(
            query = name,
            matched = best.as_ref().map(|c| c.raw.as_str()),
            "resolved name to entity"
        );
        self.repository.find_by_primary_name(&best?.raw)
    }

    fn candidate_names(&self, query: &RawName) -> Vec<RawName> {
        let profiles = self
            .repository
            .find_candidates_by_name(query, self.config.resolver.candidate_limit);
        if profiles.is_empty() {
            return self.repository.all_entity_names();
        }

        let primaries = profiles.iter().map(|p| p.primary_name.clone());
        let alternates = profiles
            .iter()
            .flat_map(|p| p.alternate_names.iter().cloned());
        primaries.chain(alternates).collect()
    }

    /// JSON view of a profile.
    pub fn profile_json(&self, entity: Option<&EntityProfile>) -> Option<Value> {
        let entity = entity?;
        Some(json!({
            "entity_id": entity.entity_id,
            "primary_name": entity.primary_name.as_str(),
            "alternate_names": entity
                .alternate_names
                .iter()
                .map(RawName::as_str)
                .collect::<Vec<_>>(),
            "attributes": entity.attributes,
            "relationships": entity.relationships(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_algorithm_falls_back_to_token_set() {
        let facade = EntityResolutionFacade::default();
        let matches =
            facade.find_best_matches_in_list("Apple", &["Apple Computer"], "nonexistent_algorithm", 0.5, 5);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].algorithm_used, "token_set_ratio");
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let facade = EntityResolutionFacade::default();
        assert!(facade
            .find_best_matches_in_list("", &[""], "levenshtein", 0.0, 5)
            .is_empty());
    }

    #[test]
    fn test_profile_json_none() {
        let facade = EntityResolutionFacade::default();
        assert_eq!(facade.profile_json(None), None);
    }
}
