//! Keyword-set patterns and weighted Jaccard similarity between materials.

use crate::model::{Material, PhysicalState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const WEIGHT_NAME: f64 = 0.4;
pub const WEIGHT_COMPOSITION: f64 = 0.3;
pub const WEIGHT_PACKAGING: f64 = 0.2;
pub const WEIGHT_UN_NUMBER: f64 = 0.1;

const MIN_TOKEN_LEN: usize = 3;
const STOPWORDS: &[&str] = &[
    "and", "the", "for", "with", "from", "mixture", "solution", "product", "waste",
];

/// Keyword sets extracted from one material, compared field against field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialPattern {
    pub name_keywords: BTreeSet<String>,
    pub composition_keywords: BTreeSet<String>,
    pub packaging_keywords: BTreeSet<String>,
    pub un_number: Option<String>,
    /// Recorded for the fingerprint; not part of the similarity weights.
    pub physical_state: Option<PhysicalState>,
}

impl MaterialPattern {
    pub fn extract(material: &Material) -> MaterialPattern {
        let mut composition_keywords = BTreeSet::new();
        for constituent in &material.composition {
            composition_keywords.extend(tokenize(&constituent.name));
        }
        MaterialPattern {
            name_keywords: tokenize(&material.product_name),
            composition_keywords,
            packaging_keywords: material
                .packaging
                .as_deref()
                .map(tokenize)
                .unwrap_or_default(),
            un_number: material
                .un_number
                .as_deref()
                .map(|u| u.trim().to_uppercase())
                .filter(|u| !u.is_empty()),
            physical_state: material.physical_state,
        }
    }

    /// Weighted similarity in [0, 1]. Each field contributes its Jaccard
    /// overlap scaled by the field weight; fields empty on either side are
    /// left out of the denominator so sparse records are not penalized.
    pub fn similarity(&self, other: &MaterialPattern) -> f64 {
        let mut score = 0.0;
        let mut weight_total = 0.0;

        for (a, b, weight) in [
            (&self.name_keywords, &other.name_keywords, WEIGHT_NAME),
            (
                &self.composition_keywords,
                &other.composition_keywords,
                WEIGHT_COMPOSITION,
            ),
            (
                &self.packaging_keywords,
                &other.packaging_keywords,
                WEIGHT_PACKAGING,
            ),
        ] {
            if a.is_empty() || b.is_empty() {
                continue;
            }
            score += weight * jaccard(a, b);
            weight_total += weight;
        }

        if let (Some(a), Some(b)) = (&self.un_number, &other.un_number) {
            score += if a == b { WEIGHT_UN_NUMBER } else { 0.0 };
            weight_total += WEIGHT_UN_NUMBER;
        }

        if weight_total == 0.0 {
            0.0
        } else {
            score / weight_total
        }
    }
}

fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Lowercased alphanumeric tokens, short tokens and filler words dropped.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| t.len() >= MIN_TOKEN_LEN && !STOPWORDS.contains(t))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChemicalConstituent;

    fn material(name: &str) -> Material {
        Material {
            product_name: name.into(),
            ..Material::default()
        }
    }

    #[test]
    fn test_tokenize_drops_short_and_filler() {
        let tokens = tokenize("Waste acetone and MEK 5% mixture");
        assert!(tokens.contains("acetone"));
        assert!(tokens.contains("mek"));
        assert!(!tokens.contains("and"));
        assert!(!tokens.contains("waste"));
        assert!(!tokens.contains("5"));
    }

    #[test]
    fn test_identical_materials_score_one() {
        let m = Material {
            product_name: "CRC Brakleen brake cleaner".into(),
            packaging: Some("aerosol can".into()),
            un_number: Some("UN1950".into()),
            composition: vec![ChemicalConstituent {
                name: "Tetrachloroethylene".into(),
                cas_number: Some("127-18-4".into()),
                percentage: None,
            }],
            ..Material::default()
        };
        let p = MaterialPattern::extract(&m);
        assert!((p.similarity(&p) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unrelated_materials_score_low() {
        let a = MaterialPattern::extract(&material("Sulfuric acid drain opener"));
        let b = MaterialPattern::extract(&material("Latex paint, white"));
        assert!(a.similarity(&b) < 0.1);
    }

    #[test]
    fn test_missing_fields_excluded_from_denominator() {
        // Only names populated: score is pure name overlap, not dragged
        // down by absent packaging or UN number.
        let a = MaterialPattern::extract(&material("brake cleaner spray"));
        let b = MaterialPattern::extract(&material("brake cleaner spray"));
        assert!((a.similarity(&b) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_physical_state_recorded_without_weighting() {
        let mut m1 = material("Waste acetone drum");
        m1.physical_state = Some(PhysicalState::Liquid);
        let mut m2 = material("Waste acetone drum");
        m2.physical_state = Some(PhysicalState::Solid);

        let p1 = MaterialPattern::extract(&m1);
        let p2 = MaterialPattern::extract(&m2);
        assert_eq!(p1.physical_state, Some(PhysicalState::Liquid));
        // State differs but names match; similarity stays pure name overlap.
        assert!((p1.similarity(&p2) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_un_number_match_contributes() {
        let mut m1 = material("Aerosol degreaser");
        m1.un_number = Some("UN1950".into());
        let mut m2 = material("Spray lubricant");
        m2.un_number = Some("UN1950".into());
        let p1 = MaterialPattern::extract(&m1);
        let p2 = MaterialPattern::extract(&m2);
        // Names disjoint (0.0 over 0.4) but UN matches (0.1 over 0.1).
        assert!((p1.similarity(&p2) - 0.2).abs() < 1e-9);
    }
}
