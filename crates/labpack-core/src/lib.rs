//! Hazardous-waste classification and lab-pack compatibility engine.
//!
//! The pipeline takes a `Material` (product name, composition, physical
//! properties), assigns federal waste codes from the embedded regulatory
//! tables, derives jurisdiction form and state codes, and caches the result
//! for fuzzy reuse. A separate compatibility engine judges which materials
//! may share a lab pack, backed by an adaptive learning store that folds
//! user decisions back into detection.

pub mod cache;
pub mod cas;
pub mod classify;
pub mod compat;
pub mod error;
pub mod learning;
pub mod model;
pub mod regulatory;
pub mod store;

pub use cache::{CacheHit, ClassificationDatabase, MatchType};
pub use classify::outcome::{ClassificationSource, MaterialClassification};
pub use compat::{CompatibilityEngine, CompatibilityReport, GroupCompatibilityReport};
pub use error::LabpackError;
pub use learning::AdaptiveLearningEngine;
pub use model::{ChemicalConstituent, Material, PhysicalState};
pub use regulatory::RegulatoryIndex;

use classify::outcome::ClassificationSource as Source;
use tracing::info;

/// Classify one material end to end: cache lookup, constituent waste codes,
/// pH corrosivity, form and state codes, cache write-back.
///
/// Pass `None` for the database to force a fresh classification.
pub fn classify_material(
    material: &Material,
    index: &RegulatoryIndex,
    database: Option<&mut ClassificationDatabase>,
) -> Result<MaterialClassification, LabpackError> {
    if material.product_name.trim().is_empty() {
        return Err(LabpackError::InvalidMaterial(
            "material has no product name".to_string(),
        ));
    }

    if let Some(db) = database.as_deref() {
        if let Some(hit) = db.find_classification(material) {
            info!(
                material = %material.product_name,
                matched = hit.entry.key,
                score = hit.score,
                "served from classification database"
            );
            return Ok(MaterialClassification {
                product_name: material.product_name.clone(),
                source: Source::Cache {
                    score: hit.score,
                    matched_key: hit.entry.key.clone(),
                },
                ..hit.entry.classification
            });
        }
    }

    let mut result = classify::classify(&material.composition, index);
    classify::engine::apply_ph_corrosivity(&mut result, material);

    let form = classify::form_code::generate_form_code(&result, material);
    let full_waste_code = classify::form_code::generate_full_waste_code(&result, material);
    let state_codes = classify::form_code::generate_state_codes(&result, material);

    let classification = MaterialClassification {
        product_name: material.product_name.clone(),
        waste_codes: result.waste_codes,
        reasoning: result.reasoning,
        confidence: result.confidence,
        chemicals: result.chemicals,
        unknown_chemicals: result.unknown_chemicals,
        form_code: form.code,
        form_code_description: form.description,
        full_waste_code,
        state_codes,
        source: Source::Engine,
    };

    if let Some(db) = database {
        db.save_classification(material, &classification, "engine")?;
    }

    Ok(classification)
}
