//! Classification database: previously classified materials served back by
//! exact key or fuzzy match, so repeat SDS runs skip the full pipeline.

pub mod similarity;

use crate::classify::outcome::MaterialClassification;
use crate::error::LabpackError;
use crate::model::{normalize_key, Material, PhysicalState};
use crate::store::Store;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Minimum blended similarity for a cache hit.
pub const MATCH_THRESHOLD: f64 = 0.7;
/// At or above this score a hit is reported as exact.
pub const EXACT_THRESHOLD: f64 = 0.9;

const EXPORT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub key: String,
    pub product_name: String,
    /// Normalized CAS numbers seen in the material's composition.
    pub cas_numbers: BTreeSet<String>,
    pub un_number: Option<String>,
    pub physical_state: Option<PhysicalState>,
    pub classification: MaterialClassification,
    /// Provenance tags ("engine", "user", "import").
    pub sources: Vec<String>,
    pub confidence: f64,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheState {
    pub entries: BTreeMap<String, CacheEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheExport {
    pub version: u32,
    pub exported: DateTime<Utc>,
    pub state: CacheState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Exact,
    Similar,
}

#[derive(Debug, Clone)]
pub struct CacheHit {
    pub score: f64,
    pub match_type: MatchType,
    pub entry: CacheEntry,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub entries: usize,
    pub mean_confidence: f64,
    pub sources: BTreeMap<String, usize>,
}

pub struct ClassificationDatabase {
    state: CacheState,
    store: Box<dyn Store<CacheState>>,
}

impl ClassificationDatabase {
    /// A corrupt store is logged and replaced with an empty database; the
    /// backing data is only overwritten on the next save.
    pub fn new(store: Box<dyn Store<CacheState>>) -> ClassificationDatabase {
        let state = match store.load() {
            Ok(Some(state)) => state,
            Ok(None) => CacheState::default(),
            Err(e) => {
                warn!("classification database unreadable, starting empty: {e}");
                CacheState::default()
            }
        };
        ClassificationDatabase { state, store }
    }

    pub fn len(&self) -> usize {
        self.state.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.entries.is_empty()
    }

    /// Best match at or above the match threshold, if any. Exact-key lookup
    /// first, then a fuzzy scan over all entries.
    pub fn find_classification(&self, material: &Material) -> Option<CacheHit> {
        let key = entry_key(material);
        if let Some(entry) = key.as_deref().and_then(|k| self.state.entries.get(k)) {
            if let Some(s) = similarity::score(material, entry) {
                if s >= MATCH_THRESHOLD {
                    return Some(hit(s, entry));
                }
            }
        }

        let best = self
            .state
            .entries
            .values()
            .filter_map(|entry| similarity::score(material, entry).map(|s| (s, entry)))
            .filter(|(s, _)| *s >= MATCH_THRESHOLD)
            .max_by(|(a, _), (b, _)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        best.map(|(s, entry)| {
            debug!(key = entry.key, score = s, "classification cache hit");
            hit(s, entry)
        })
    }

    /// Insert or update the entry for this material. Existing provenance
    /// tags are kept; the classification and timestamp are replaced.
    pub fn save_classification(
        &mut self,
        material: &Material,
        classification: &MaterialClassification,
        source: &str,
    ) -> Result<(), LabpackError> {
        let Some(key) = entry_key(material) else {
            return Err(LabpackError::InvalidMaterial(
                "material has neither a product name nor a valid CAS number".to_string(),
            ));
        };

        let cas_numbers = similarity::material_cas_set(material);
        match self.state.entries.get_mut(&key) {
            Some(entry) => {
                entry.product_name = material.product_name.clone();
                entry.cas_numbers.extend(cas_numbers);
                entry.un_number = material.un_number.clone().or(entry.un_number.take());
                entry.physical_state = material.physical_state.or(entry.physical_state);
                entry.classification = classification.clone();
                entry.confidence = classification.confidence;
                if !entry.sources.iter().any(|s| s == source) {
                    entry.sources.push(source.to_string());
                }
                entry.last_updated = Utc::now();
            }
            None => {
                self.state.entries.insert(
                    key.clone(),
                    CacheEntry {
                        key,
                        product_name: material.product_name.clone(),
                        cas_numbers,
                        un_number: material.un_number.clone(),
                        physical_state: material.physical_state,
                        classification: classification.clone(),
                        sources: vec![source.to_string()],
                        confidence: classification.confidence,
                        last_updated: Utc::now(),
                    },
                );
            }
        }
        self.store.save(&self.state)
    }

    pub fn export(&self) -> CacheExport {
        CacheExport {
            version: EXPORT_VERSION,
            exported: Utc::now(),
            state: self.state.clone(),
        }
    }

    /// Merge another database's entries into this one. Incoming entries
    /// overwrite existing keys; other keys are left untouched. Every merged
    /// entry keeps provenance from both sides, gains an "import" tag, and
    /// gets a fresh timestamp.
    pub fn import(&mut self, export: CacheExport) -> Result<usize, LabpackError> {
        let mut imported = 0;
        for (key, mut incoming) in export.state.entries {
            if !incoming.sources.iter().any(|s| s == "import") {
                incoming.sources.push("import".to_string());
            }
            incoming.last_updated = Utc::now();
            if let Some(existing) = self.state.entries.get_mut(&key) {
                for s in existing.sources.drain(..) {
                    if !incoming.sources.contains(&s) {
                        incoming.sources.push(s);
                    }
                }
                *existing = incoming;
            } else {
                self.state.entries.insert(key, incoming);
            }
            imported += 1;
        }
        self.store.save(&self.state)?;
        Ok(imported)
    }

    pub fn stats(&self) -> CacheStats {
        let mut sources: BTreeMap<String, usize> = BTreeMap::new();
        let mut confidence_sum = 0.0;
        for entry in self.state.entries.values() {
            confidence_sum += entry.confidence;
            for s in &entry.sources {
                *sources.entry(s.clone()).or_insert(0) += 1;
            }
        }
        let entries = self.state.entries.len();
        CacheStats {
            entries,
            mean_confidence: if entries == 0 {
                0.0
            } else {
                confidence_sum / entries as f64
            },
            sources,
        }
    }
}

fn hit(score: f64, entry: &CacheEntry) -> CacheHit {
    CacheHit {
        score,
        match_type: if score >= EXACT_THRESHOLD {
            MatchType::Exact
        } else {
            MatchType::Similar
        },
        entry: entry.clone(),
    }
}

/// Cache key: the normalized product name, falling back to the first valid
/// CAS number for unnamed materials.
fn entry_key(material: &Material) -> Option<String> {
    let name_key = normalize_key(&material.product_name);
    if !name_key.is_empty() {
        return Some(name_key);
    }
    similarity::material_cas_set(material).into_iter().next()
}
