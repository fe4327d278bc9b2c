//! Adaptive learning: user classification decisions accumulate into keyword
//! patterns that later resolve ambiguous detections.
//!
//! The engine is deliberately conservative. A pattern only reaches the
//! confidence needed to auto-resolve an ambiguity after enough consistent
//! samples; below that it still surfaces as context for the human.

pub mod pattern;

use crate::compat::types::{ClassificationHint, MaterialDetection, MaterialType, TypePrediction};
use crate::error::LabpackError;
use crate::model::Material;
use crate::store::Store;
use chrono::{DateTime, Utc};
use pattern::MaterialPattern;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use tracing::{debug, warn};

/// Samples required before a pattern can reach full confidence.
pub const MIN_SAMPLE_SIZE: usize = 3;
/// Confidence at or above which a prediction may act without a human.
pub const CONFIDENCE_THRESHOLD: f64 = 0.7;
/// Minimum similarity for a stored pattern to vote at all.
pub const SIMILARITY_THRESHOLD: f64 = 0.3;
/// History ring size; oldest records are evicted first.
pub const MAX_HISTORY: usize = 1000;
/// Number of similar patterns consulted per prediction.
pub const TOP_MATCHES: usize = 5;

const EXPORT_VERSION: u32 = 1;

/// One user classification decision, kept verbatim for audit and export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningRecord {
    pub timestamp: DateTime<Utc>,
    pub material: Material,
    pub user_classification: MaterialType,
    /// What automated detection said before the user overrode it, when known.
    pub original_detection: Option<MaterialDetection>,
    pub pattern: MaterialPattern,
}

/// Aggregated votes for one material key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternRecord {
    pub pattern: MaterialPattern,
    pub counts: BTreeMap<MaterialType, usize>,
    pub total: usize,
    pub majority: MaterialType,
    pub confidence: f64,
}

impl PatternRecord {
    fn recompute(&mut self) {
        self.total = self.counts.values().sum();
        // Tie on counts resolves to the smallest type key, deterministically.
        let (majority, majority_count) = self
            .counts
            .iter()
            .max_by(|(ka, va), (kb, vb)| va.cmp(vb).then(kb.cmp(ka)))
            .map(|(k, v)| (*k, *v))
            .unwrap_or((MaterialType::GeneralChemicals, 0));
        self.majority = majority;
        let consistency = if self.total == 0 {
            0.0
        } else {
            majority_count as f64 / self.total as f64
        };
        let sample_factor = (self.total as f64 / MIN_SAMPLE_SIZE as f64).min(1.0);
        self.confidence = consistency * sample_factor;
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningState {
    pub history: VecDeque<LearningRecord>,
    pub patterns: BTreeMap<String, PatternRecord>,
}

/// Portable snapshot for export/import between installations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningExport {
    pub version: u32,
    pub exported: DateTime<Utc>,
    pub state: LearningState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionSource {
    ExactPattern,
    Similarity,
    NoData,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarMatch {
    pub key: String,
    pub similarity: f64,
    pub material_type: MaterialType,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub prediction: Option<MaterialType>,
    pub confidence: f64,
    pub source: PredictionSource,
    pub requires_user_input: bool,
    pub similar_materials: Vec<SimilarMatch>,
}

impl Prediction {
    fn no_data() -> Prediction {
        Prediction {
            prediction: None,
            confidence: 0.0,
            source: PredictionSource::NoData,
            requires_user_input: true,
            similar_materials: Vec::new(),
        }
    }
}

pub struct AdaptiveLearningEngine {
    state: LearningState,
    store: Box<dyn Store<LearningState>>,
}

impl AdaptiveLearningEngine {
    /// A corrupt store is logged and replaced with an empty state rather than
    /// failing startup; the backing data stays untouched until the next save.
    pub fn new(store: Box<dyn Store<LearningState>>) -> AdaptiveLearningEngine {
        let state = match store.load() {
            Ok(Some(state)) => state,
            Ok(None) => LearningState::default(),
            Err(e) => {
                warn!("learning store unreadable, starting empty: {e}");
                LearningState::default()
            }
        };
        AdaptiveLearningEngine { state, store }
    }

    pub fn history_len(&self) -> usize {
        self.state.history.len()
    }

    pub fn pattern_count(&self) -> usize {
        self.state.patterns.len()
    }

    /// Record a user decision and fold it into the pattern for the material's
    /// key. Persists before returning.
    pub fn record_classification(
        &mut self,
        material: &Material,
        user_classification: MaterialType,
        original_detection: Option<MaterialDetection>,
    ) -> Result<(), LabpackError> {
        let extracted = MaterialPattern::extract(material);
        let key = material.key();

        while self.state.history.len() >= MAX_HISTORY {
            self.state.history.pop_front();
        }
        self.state.history.push_back(LearningRecord {
            timestamp: Utc::now(),
            material: material.clone(),
            user_classification,
            original_detection,
            pattern: extracted.clone(),
        });

        let record = self
            .state
            .patterns
            .entry(key.clone())
            .or_insert_with(|| PatternRecord {
                pattern: extracted.clone(),
                counts: BTreeMap::new(),
                total: 0,
                majority: user_classification,
                confidence: 0.0,
            });
        record.pattern = extracted;
        *record.counts.entry(user_classification).or_insert(0) += 1;
        record.recompute();
        debug!(
            key,
            %user_classification,
            total = record.total,
            confidence = record.confidence,
            "learning record added"
        );

        self.store.save(&self.state)
    }

    /// Predict a material type from learned patterns. Exact-key matches win;
    /// otherwise the most similar stored patterns vote.
    pub fn predict_classification(&self, material: &Material) -> Prediction {
        let key = material.key();
        if let Some(record) = self.state.patterns.get(&key) {
            if record.confidence >= CONFIDENCE_THRESHOLD {
                return Prediction {
                    prediction: Some(record.majority),
                    confidence: record.confidence,
                    source: PredictionSource::ExactPattern,
                    requires_user_input: false,
                    similar_materials: vec![SimilarMatch {
                        key,
                        similarity: 1.0,
                        material_type: record.majority,
                        confidence: record.confidence,
                    }],
                };
            }
        }

        let target = MaterialPattern::extract(material);
        let mut matches: Vec<SimilarMatch> = self
            .state
            .patterns
            .iter()
            .filter_map(|(key, record)| {
                let similarity = target.similarity(&record.pattern);
                (similarity >= SIMILARITY_THRESHOLD).then(|| SimilarMatch {
                    key: key.clone(),
                    similarity,
                    material_type: record.majority,
                    confidence: record.confidence,
                })
            })
            .collect();
        if matches.is_empty() {
            return Prediction::no_data();
        }
        matches.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(TOP_MATCHES);

        // Each match votes with weight similarity * pattern confidence. The
        // aggregate is the winner's vote share scaled by the winner's mean
        // vote, so a single low-sample pattern can never clear the threshold.
        let mut votes: BTreeMap<MaterialType, (f64, usize)> = BTreeMap::new();
        let mut total_votes = 0.0;
        for m in &matches {
            let weight = m.similarity * m.confidence;
            let entry = votes.entry(m.material_type).or_insert((0.0, 0));
            entry.0 += weight;
            entry.1 += 1;
            total_votes += weight;
        }
        if total_votes == 0.0 {
            return Prediction {
                requires_user_input: true,
                similar_materials: matches,
                ..Prediction::no_data()
            };
        }
        let Some((winner, (winner_votes, winner_count))) = votes
            .iter()
            .max_by(|(ka, (va, _)), (kb, (vb, _))| {
                va.partial_cmp(vb)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(kb.cmp(ka))
            })
            .map(|(k, v)| (*k, *v))
        else {
            return Prediction::no_data();
        };

        let winner_share = winner_votes / total_votes;
        let mean_winner_vote = winner_votes / winner_count as f64;
        let confidence = winner_share * mean_winner_vote;

        Prediction {
            prediction: Some(winner),
            confidence,
            source: PredictionSource::Similarity,
            requires_user_input: confidence < CONFIDENCE_THRESHOLD,
            similar_materials: matches,
        }
    }

    pub fn export(&self) -> LearningExport {
        LearningExport {
            version: EXPORT_VERSION,
            exported: Utc::now(),
            state: self.state.clone(),
        }
    }

    /// Merge a snapshot from another installation into this one. Pattern
    /// counts add together; imported history appends up to the ring size.
    pub fn import(&mut self, export: LearningExport) -> Result<(), LabpackError> {
        for (key, incoming) in export.state.patterns {
            match self.state.patterns.get_mut(&key) {
                Some(existing) => {
                    for (t, n) in incoming.counts {
                        *existing.counts.entry(t).or_insert(0) += n;
                    }
                    existing.recompute();
                }
                None => {
                    self.state.patterns.insert(key, incoming);
                }
            }
        }
        for record in export.state.history {
            if self.state.history.len() >= MAX_HISTORY {
                break;
            }
            self.state.history.push_back(record);
        }
        self.store.save(&self.state)
    }
}

impl ClassificationHint for AdaptiveLearningEngine {
    fn predict_type(&self, material: &Material) -> Option<TypePrediction> {
        let prediction = self.predict_classification(material);
        if prediction.requires_user_input {
            return None;
        }
        prediction.prediction.map(|material_type| TypePrediction {
            material_type,
            confidence: prediction.confidence,
        })
    }
}
