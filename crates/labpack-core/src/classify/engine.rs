use crate::cas;
use crate::classify::outcome::{
    ChemicalResult, ClassificationResult, CodeAssignment, UnknownChemical,
};
use crate::model::{ChemicalConstituent, Material};
use crate::regulatory::index::RegulatoryIndex;
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::time::Instant;
use tracing::debug;

/// Confidence weight for a listed-code (P/U) or TCLP-constituent (D) match.
pub const CONFIDENCE_LISTED: f64 = 0.95;
/// Confidence weight for a property-derived characteristic code.
pub const CONFIDENCE_CHARACTERISTIC: f64 = 0.90;

/// Flash point below which a liquid is ignitable (D001).
pub const THRESHOLD_IGNITABLE_FLASH_C: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// pH band outside which a material is corrosive (D002).
pub const PH_CORROSIVE_MIN: Decimal = Decimal::from_parts(2, 0, 0, false, 0);
pub const PH_CORROSIVE_MAX: Decimal = Decimal::from_parts(125, 0, 0, false, 1);

pub const REASON_INVALID_CAS: &str = "Invalid CAS format";
pub const REASON_CAS_NOT_FOUND: &str = "CAS not found in regulatory database";
pub const REASON_NO_CAS: &str = "No CAS number provided";

/// Classify a composition against the regulatory index, constituent-first.
///
/// Every constituent is checked independently against all three code maps;
/// any listed or characteristic constituent contributes its codes to the
/// whole regardless of its stated percentage. Nothing here throws: invalid
/// and unmatched constituents are reported in `unknown_chemicals`.
pub fn classify(
    composition: &[ChemicalConstituent],
    index: &RegulatoryIndex,
) -> ClassificationResult {
    let started = Instant::now();

    if composition.is_empty() {
        return ClassificationResult::empty("No valid composition to classify");
    }

    let mut waste_codes: BTreeSet<String> = BTreeSet::new();
    let mut reasoning: Vec<String> = Vec::new();
    let mut chemicals: Vec<ChemicalResult> = Vec::new();
    let mut unknown_chemicals: Vec<UnknownChemical> = Vec::new();

    for constituent in composition {
        let Some(raw_cas) = constituent.cas_number.as_deref() else {
            unknown_chemicals.push(UnknownChemical {
                name: constituent.name.clone(),
                cas: None,
                reason: REASON_NO_CAS.to_string(),
            });
            continue;
        };

        let Some(normalized) = cas::normalize(raw_cas) else {
            unknown_chemicals.push(UnknownChemical {
                name: constituent.name.clone(),
                cas: Some(raw_cas.to_string()),
                reason: REASON_INVALID_CAS.to_string(),
            });
            continue;
        };

        let assignments = classify_constituent(&normalized, index);

        if assignments.is_empty() {
            if index.chemical_properties(&normalized).is_some() {
                // Known chemical, no applicable code. Contributes nothing and
                // does not lower the aggregate confidence.
                reasoning.push(format!(
                    "{} ({normalized}): no federal waste codes apply",
                    constituent.name
                ));
                chemicals.push(ChemicalResult {
                    name: constituent.name.clone(),
                    cas: Some(normalized),
                    percentage: constituent.percentage.clone(),
                    assignments: Vec::new(),
                    confidence: 0.0,
                });
            } else {
                unknown_chemicals.push(UnknownChemical {
                    name: constituent.name.clone(),
                    cas: Some(normalized),
                    reason: REASON_CAS_NOT_FOUND.to_string(),
                });
            }
            continue;
        }

        let confidence = assignments
            .iter()
            .map(|a| a.confidence)
            .fold(0.0_f64, f64::max);

        for a in &assignments {
            waste_codes.insert(a.code.clone());
            reasoning.push(format!(
                "{} ({normalized}): {} -> {} [{}]",
                constituent.name, a.basis, a.code, a.citation
            ));
        }

        chemicals.push(ChemicalResult {
            name: constituent.name.clone(),
            cas: Some(normalized),
            percentage: constituent.percentage.clone(),
            assignments,
            confidence,
        });
    }

    let contributing: Vec<&ChemicalResult> = chemicals
        .iter()
        .filter(|c| !c.assignments.is_empty())
        .collect();
    let confidence = if contributing.is_empty() {
        0.0
    } else {
        contributing.iter().map(|c| c.confidence).sum::<f64>() / contributing.len() as f64
    };

    if waste_codes.is_empty() {
        reasoning.push("No constituents matched the regulatory tables".to_string());
    }

    debug!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        constituents = composition.len(),
        coded = contributing.len(),
        unknown = unknown_chemicals.len(),
        codes = waste_codes.len(),
        "constituent classification complete"
    );

    ClassificationResult {
        waste_codes,
        reasoning,
        confidence,
        chemicals,
        unknown_chemicals,
    }
}

/// All code assignments for one normalized CAS.
fn classify_constituent(cas: &str, index: &RegulatoryIndex) -> Vec<CodeAssignment> {
    let mut assignments = Vec::new();

    if let Some(p) = index.p_code(cas) {
        assignments.push(CodeAssignment {
            code: p.code.clone(),
            basis: format!("acutely hazardous listed chemical ({})", p.hazard_reason),
            citation: p.citation.clone(),
            confidence: CONFIDENCE_LISTED,
        });
    }

    if let Some(u) = index.u_code(cas) {
        assignments.push(CodeAssignment {
            code: u.code.clone(),
            basis: format!("listed toxic commercial chemical ({})", u.reason),
            citation: u.citation.clone(),
            confidence: CONFIDENCE_LISTED,
        });
    }

    if let Some(d) = index.d_code(cas) {
        assignments.push(CodeAssignment {
            code: d.code.clone(),
            basis: format!(
                "TCLP constituent {} (threshold {} {})",
                d.constituent_name, d.tclp_threshold, d.units
            ),
            citation: d.citation.clone(),
            confidence: CONFIDENCE_LISTED,
        });
    }

    if let Some(props) = index.chemical_properties(cas) {
        let flash_ignitable = props
            .flash_point_celsius
            .map(|fp| fp < THRESHOLD_IGNITABLE_FLASH_C)
            .unwrap_or(false);

        if flash_ignitable || props.ignitable {
            let basis = match props.flash_point_celsius {
                Some(fp) => format!("ignitable, flash point {fp} C below 60 C"),
                None => "ignitable per chemical property table".to_string(),
            };
            assignments.push(CodeAssignment {
                code: "D001".to_string(),
                basis,
                citation: "40 CFR 261.21".to_string(),
                confidence: CONFIDENCE_CHARACTERISTIC,
            });
        } else if props.oxidizer {
            assignments.push(CodeAssignment {
                code: "D001".to_string(),
                basis: "oxidizer per chemical property table".to_string(),
                citation: "40 CFR 261.21".to_string(),
                confidence: CONFIDENCE_CHARACTERISTIC,
            });
        }

        if props.corrosive {
            assignments.push(CodeAssignment {
                code: "D002".to_string(),
                basis: "corrosive per chemical property table".to_string(),
                citation: "40 CFR 261.22".to_string(),
                confidence: CONFIDENCE_CHARACTERISTIC,
            });
        }
    }

    assignments
}

/// Material-level corrosivity supplement: a bulk pH at or beyond the
/// corrosive band adds D002 even when no constituent carries it.
pub fn apply_ph_corrosivity(result: &mut ClassificationResult, material: &Material) {
    if let Some(ph) = material.ph {
        if ph <= PH_CORROSIVE_MIN || ph >= PH_CORROSIVE_MAX {
            result.waste_codes.insert("D002".to_string());
            result.reasoning.push(format!(
                "Material pH {ph} within corrosive band (<= {PH_CORROSIVE_MIN} or >= {PH_CORROSIVE_MAX}) -> D002 [40 CFR 261.22]"
            ));
        }
    }
}
