//! Fuzzy matching between an incoming material and cached entries.

use crate::cache::CacheEntry;
use crate::cas;
use crate::model::{normalize_key, Material};
use std::collections::BTreeSet;

pub const WEIGHT_NAME: f64 = 0.4;
pub const WEIGHT_CAS: f64 = 0.3;
pub const WEIGHT_UN_NUMBER: f64 = 0.2;
pub const WEIGHT_STATE: f64 = 0.1;

/// Blended similarity in [0, 1], or `None` when the two records share no
/// comparable field. Each factor is weighted and the result is divided by
/// the weights actually compared, so a missing UN number on one side does
/// not drag the score down.
pub fn score(material: &Material, entry: &CacheEntry) -> Option<f64> {
    let mut total = 0.0;
    let mut weight = 0.0;

    if !material.product_name.trim().is_empty() && !entry.product_name.trim().is_empty() {
        let a = normalize_key(&material.product_name);
        let b = normalize_key(&entry.product_name);
        total += WEIGHT_NAME * strsim::normalized_levenshtein(&a, &b);
        weight += WEIGHT_NAME;
    }

    let material_cas = material_cas_set(material);
    if !material_cas.is_empty() && !entry.cas_numbers.is_empty() {
        // All-or-nothing: any shared CAS counts as a constituent-level match.
        let overlap = material_cas.intersection(&entry.cas_numbers).next().is_some();
        total += if overlap { WEIGHT_CAS } else { 0.0 };
        weight += WEIGHT_CAS;
    }

    if let (Some(a), Some(b)) = (&material.un_number, &entry.un_number) {
        let a = a.trim().to_uppercase();
        let b = b.trim().to_uppercase();
        if !a.is_empty() && !b.is_empty() {
            total += if a == b { WEIGHT_UN_NUMBER } else { 0.0 };
            weight += WEIGHT_UN_NUMBER;
        }
    }

    if let (Some(a), Some(b)) = (material.physical_state, entry.physical_state) {
        total += if a == b { WEIGHT_STATE } else { 0.0 };
        weight += WEIGHT_STATE;
    }

    (weight > 0.0).then(|| total / weight)
}

pub fn material_cas_set(material: &Material) -> BTreeSet<String> {
    material
        .composition
        .iter()
        .filter_map(|c| c.cas_number.as_deref())
        .filter_map(cas::normalize)
        .collect()
}
