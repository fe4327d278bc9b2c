//! Material-type detection: AmbiguityCheck -> user classification -> learned
//! hint -> ordered additive type rules -> general-chemicals fallback.

use crate::compat::rules::{
    ambiguous_types, composition_cas, FALLBACK_CONFIDENCE, HINT_CONFIDENCE_THRESHOLD, TYPE_RULES,
    USER_CLASSIFICATION_CONFIDENCE,
};
use crate::compat::types::{ClassificationHint, MaterialDetection, MaterialType};
use crate::model::Material;
use std::collections::HashMap;
use tracing::debug;

pub(crate) fn detect(
    material: &Material,
    user_classifications: &HashMap<String, MaterialType>,
    hint: Option<&dyn ClassificationHint>,
) -> MaterialDetection {
    let text = material.search_text();
    let cas_list = composition_cas(material);

    let mut material_types: Vec<MaterialType> = Vec::new();
    let mut hazard_classes: Vec<String> = Vec::new();
    let mut special_handling: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();
    let mut confidence: f64 = 0.0;

    let ambiguous = ambiguous_types(&text, material);
    if !ambiguous.is_empty() {
        if let Some(user_type) = user_classifications.get(&material.key()) {
            material_types.push(*user_type);
            confidence = USER_CLASSIFICATION_CONFIDENCE;
            warnings.push(format!(
                "ambiguity resolved by user classification: {user_type}"
            ));
        } else if let Some(prediction) = hint.and_then(|h| h.predict_type(material)) {
            if prediction.confidence >= HINT_CONFIDENCE_THRESHOLD {
                material_types.push(prediction.material_type);
                confidence = prediction.confidence;
                warnings.push(format!(
                    "ambiguity resolved by learned pattern: {} (confidence {:.2})",
                    prediction.material_type, prediction.confidence
                ));
            } else {
                return MaterialDetection::needs_user(ambiguous, warnings);
            }
        } else {
            // No prior resolution: detection stops here, callers must ask.
            return MaterialDetection::needs_user(ambiguous, warnings);
        }
    }

    for rule in TYPE_RULES {
        if !rule.matches(&text, &cas_list, material) {
            continue;
        }
        if !material_types.contains(&rule.material_type) {
            material_types.push(rule.material_type);
        }
        if !hazard_classes.iter().any(|c| c == rule.dot_class) {
            hazard_classes.push(rule.dot_class.to_string());
        }
        for handling in rule.special_handling {
            if !special_handling.iter().any(|h| h == handling) {
                special_handling.push(handling.to_string());
            }
        }
        confidence = confidence.max(rule.confidence);
    }

    if material_types.is_empty() {
        material_types.push(MaterialType::GeneralChemicals);
        confidence = FALLBACK_CONFIDENCE;
    }

    debug!(
        material = %material.product_name,
        types = ?material_types,
        confidence,
        "material type detection"
    );

    MaterialDetection {
        material_types,
        hazard_classes,
        special_handling,
        confidence,
        warnings,
        ambiguous_types: ambiguous,
        requires_user_input: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::types::TypePrediction;
    use crate::model::ChemicalConstituent;
    use rust_decimal_macros::dec;

    fn no_users() -> HashMap<String, MaterialType> {
        HashMap::new()
    }

    fn material(name: &str) -> Material {
        Material {
            product_name: name.into(),
            ..Material::default()
        }
    }

    #[test]
    fn test_strong_acid_by_cas() {
        let mut m = material("Floor etch solution");
        m.composition = vec![ChemicalConstituent {
            name: "Hydrochloric acid".into(),
            cas_number: Some("7647-01-0".into()),
            percentage: Some("31%".into()),
        }];
        let det = detect(&m, &no_users(), None);
        assert!(det.has_type(MaterialType::StrongAcid));
        assert!(det.hazard_classes.contains(&"8".to_string()));
        assert!(!det.requires_user_input);
    }

    #[test]
    fn test_additive_types() {
        let m = Material {
            product_name: "CRC Brakleen brake cleaner".into(),
            packaging: Some("aerosol can".into()),
            ..Material::default()
        };
        let det = detect(&m, &no_users(), None);
        assert!(det.has_type(MaterialType::Aerosol));
        assert!(det.has_type(MaterialType::BrakeCleaner));
        assert!((det.confidence - 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_unmatched_falls_back_to_general_low_confidence() {
        let det = detect(&material("Unidentified blue powder"), &no_users(), None);
        assert_eq!(det.material_types, vec![MaterialType::GeneralChemicals]);
        assert!((det.confidence - FALLBACK_CONFIDENCE).abs() < 1e-9);
        assert!(!det.requires_user_input);
    }

    #[test]
    fn test_ambiguous_requires_user_input() {
        let det = detect(&material("Pressurized container"), &no_users(), None);
        assert!(det.requires_user_input);
        assert!(det.material_types.is_empty());
        assert_eq!(det.confidence, 0.0);
    }

    #[test]
    fn test_user_classification_resolves_ambiguity() {
        let m = material("Pressurized container");
        let mut users = HashMap::new();
        users.insert(m.key(), MaterialType::Aerosol);
        let det = detect(&m, &users, None);
        assert!(!det.requires_user_input);
        assert!(det.has_type(MaterialType::Aerosol));
        assert!((det.confidence - USER_CLASSIFICATION_CONFIDENCE).abs() < 1e-9);
    }

    #[test]
    fn test_confident_hint_resolves_ambiguity() {
        struct FixedHint(f64);
        impl ClassificationHint for FixedHint {
            fn predict_type(&self, _m: &Material) -> Option<TypePrediction> {
                Some(TypePrediction {
                    material_type: MaterialType::PressurizedCylinder,
                    confidence: self.0,
                })
            }
        }

        let m = material("Pressurized container");
        let det = detect(&m, &no_users(), Some(&FixedHint(0.85)));
        assert!(!det.requires_user_input);
        assert!(det.has_type(MaterialType::PressurizedCylinder));

        // Below threshold the hint is ignored.
        let det = detect(&m, &no_users(), Some(&FixedHint(0.5)));
        assert!(det.requires_user_input);
    }

    #[test]
    fn test_flash_point_triggers_flammable() {
        let m = Material {
            product_name: "Wash fluid".into(),
            flash_point_celsius: Some(dec!(-5)),
            ..Material::default()
        };
        let det = detect(&m, &no_users(), None);
        assert!(det.has_type(MaterialType::Flammable));
    }
}
