use crate::model::normalize_key;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A single waste-code assignment for one constituent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeAssignment {
    /// Waste code (e.g., "P098", "U002", "D001").
    pub code: String,
    /// Human-readable basis for the assignment.
    pub basis: String,
    /// Regulatory citation backing the assignment.
    pub citation: String,
    pub confidence: f64,
}

/// Per-constituent classification outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChemicalResult {
    pub name: String,
    /// Normalized CAS the lookups were performed with.
    pub cas: Option<String>,
    pub percentage: Option<String>,
    pub assignments: Vec<CodeAssignment>,
    /// Highest assignment confidence; 0 when no code applied.
    pub confidence: f64,
}

/// A constituent that could not be classified, with the reason why.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnknownChemical {
    pub name: String,
    pub cas: Option<String>,
    pub reason: String,
}

/// Output of the constituent classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    /// Deduplicated, lexicographically sorted waste codes.
    pub waste_codes: BTreeSet<String>,
    pub reasoning: Vec<String>,
    /// Mean confidence over constituents that contributed at least one code;
    /// 0 when nothing was classifiable.
    pub confidence: f64,
    pub chemicals: Vec<ChemicalResult>,
    pub unknown_chemicals: Vec<UnknownChemical>,
}

impl ClassificationResult {
    pub fn empty(reason: &str) -> ClassificationResult {
        ClassificationResult {
            waste_codes: BTreeSet::new(),
            reasoning: vec![reason.to_string()],
            confidence: 0.0,
            chemicals: Vec::new(),
            unknown_chemicals: Vec::new(),
        }
    }
}

/// Where a finished classification came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ClassificationSource {
    /// Produced by running the full pipeline.
    Engine,
    /// Served from the classification database.
    Cache { score: f64, matched_key: String },
}

/// Full per-material classification: waste codes plus the derived
/// jurisdiction form/state codes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialClassification {
    pub product_name: String,
    pub waste_codes: BTreeSet<String>,
    pub reasoning: Vec<String>,
    pub confidence: f64,
    pub chemicals: Vec<ChemicalResult>,
    pub unknown_chemicals: Vec<UnknownChemical>,
    pub form_code: String,
    pub form_code_description: String,
    /// 8 characters: 4-digit sequence + 3-digit form code + hazard flag.
    pub full_waste_code: String,
    pub state_codes: Vec<String>,
    pub source: ClassificationSource,
}

impl MaterialClassification {
    pub fn key(&self) -> String {
        normalize_key(&self.product_name)
    }
}
