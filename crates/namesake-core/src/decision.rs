//! Rule-based match decisions
//!
//! A [`MatchDecisionStrategy`] scores a pair of names and checks the bundle
//! against a fixed, ordered list of threshold rules. The pair matches if any
//! rule fires. Every firing rule contributes a reason, so the verdict
//! explains itself.

use std::fmt;

use serde::Serialize;

use crate::config::DecisionConfig;
use crate::name::RawName;
use crate::phonetic::Encoder;
use crate::scorer::{MatchScorer, ScoreBundle};
use crate::similarity::Algorithm;

/// Thresholds the decision rules are built from.
pub type DecisionThresholds = DecisionConfig;

/// Outcome of one pairwise evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchVerdict {
    pub scores: ScoreBundle,
    pub is_match: bool,
    reasons: Vec<String>,
}

impl MatchVerdict {
    pub fn new(scores: ScoreBundle) -> Self {
        Self {
            scores,
            is_match: false,
            reasons: Vec::new(),
        }
    }

    /// Append a reason; reasons are never removed.
    pub fn add_reason(&mut self, reason: impl Into<String>) {
        self.reasons.push(reason.into());
    }

    /// Reasons in rule evaluation order.
    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }
}

type Predicate = Box<dyn Fn(&ScoreBundle) -> bool + Send + Sync>;
type ReasonTemplate = fn(&ScoreBundle) -> String;

struct Rule {
    predicate: Predicate,
    reason: ReasonTemplate,
}

fn ts(scores: &ScoreBundle) -> f64 {
    scores.algorithm_score(Algorithm::TokenSetRatio)
}

fn jw(scores: &ScoreBundle) -> f64 {
    scores.algorithm_score(Algorithm::JaroWinkler)
}

fn wr(scores: &ScoreBundle) -> f64 {
    scores.algorithm_score(Algorithm::WeightedRatio)
}

impl Rule {
    fn build_all(thresholds: &DecisionThresholds) -> Vec<Rule> {
        let DecisionThresholds {
            token_set_threshold,
            jaro_winkler_threshold,
            weighted_ratio_threshold,
            high_token_set_threshold,
            high_jaro_winkler_threshold,
            phonetic_match_contributes,
        } = thresholds.clone();

        let mut rules = vec![
            Rule {
                predicate: Box::new(move |s: &ScoreBundle| {
                    ts(s) >= token_set_threshold && jw(s) >= jaro_winkler_threshold
                }),
                reason: |s| {
                    format!(
                        "Combined high token_set_ratio and jaro_winkler similarity (TS: {:.2}, JW: {:.2})",
                        ts(s),
                        jw(s)
                    )
                },
            },
            Rule {
                predicate: Box::new(move |s: &ScoreBundle| wr(s) >= weighted_ratio_threshold),
                reason: |s| format!("High weighted_ratio similarity (WR: {:.2})", wr(s)),
            },
            Rule {
                predicate: Box::new(move |s: &ScoreBundle| ts(s) >= high_token_set_threshold),
                reason: |s| format!("Very high token_set_ratio similarity (TS: {:.2})", ts(s)),
            },
            Rule {
                predicate: Box::new(move |s: &ScoreBundle| jw(s) >= high_jaro_winkler_threshold),
                reason: |s| format!("Very high jaro_winkler similarity (JW: {:.2})", jw(s)),
            },
        ];

        if phonetic_match_contributes {
            rules.push(Rule {
                predicate: Box::new(|s: &ScoreBundle| s.phonetic_match(Encoder::Soundex).is_some()),
                reason: |s| {
                    let (code, _) = s.phonetic_codes(Encoder::Soundex);
                    format!("Phonetic match (Soundex): {code}")
                },
            });
        }

        rules
    }
}

/// Evaluates name pairs against threshold rules fixed at construction.
pub struct MatchDecisionStrategy {
    scorer: MatchScorer,
    thresholds: DecisionThresholds,
    rules: Vec<Rule>,
}

impl MatchDecisionStrategy {
    pub fn new(scorer: MatchScorer, thresholds: DecisionThresholds) -> Self {
        let rules = Rule::build_all(&thresholds);
        Self {
            scorer,
            thresholds,
            rules,
        }
    }

    pub fn thresholds(&self) -> &DecisionThresholds {
        &self.thresholds
    }

    pub fn scorer(&self) -> &MatchScorer {
        &self.scorer
    }

    pub fn evaluate_match(&self, first: &RawName, second: &RawName) -> MatchVerdict {
        let mut verdict = MatchVerdict::new(self.scorer.calculate_scores(first, second));

        for rule in &self.rules {
            if (rule.predicate)(&verdict.scores) {
                verdict.is_match = true;
                let reason = (rule.reason)(&verdict.scores);
                verdict.add_reason(reason);
            }
        }

        // With the phonetic rule enabled its own reason already covers Soundex.
        if !self.thresholds.phonetic_match_contributes {
            if let Some(code) = verdict.scores.phonetic_match(Encoder::Soundex) {
                let reason = format!("Informational: Phonetic Soundex match ({code})");
                verdict.add_reason(reason);
            }
            if let Some(code) = verdict.scores.phonetic_match(Encoder::Metaphone) {
                let reason = format!("Informational: Phonetic Metaphone match ({code})");
                verdict.add_reason(reason);
            }
        }

        tracing::debug!(
            first = %first,
            second = %second,
            is_match = verdict.is_match,
            reasons = verdict.reasons.len(),
            "evaluated match"
        );
        verdict
    }
}

impl Default for MatchDecisionStrategy {
    fn default() -> Self {
        Self::new(MatchScorer::default(), DecisionThresholds::default())
    }
}

impl fmt::Debug for MatchDecisionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchDecisionStrategy")
            .field("scorer", &self.scorer)
            .field("thresholds", &self.thresholds)
            .field("rules", &self.rules.len())
            .finish()
    }
}
