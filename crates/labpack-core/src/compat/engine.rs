//! Pairwise and group compatibility verdicts.
//!
//! Precedence is fixed: reactive-group matrix, then aerosol segregation,
//! then severe DOT entries, then the compatible-group whitelist, then the
//! general/unknown fallback. The first blocking layer wins; later layers
//! may only add advisory notes.

use crate::compat::detect::detect;
use crate::compat::rules::{dot_lookup, shared_group, REACTIVE_INCOMPATIBILITIES};
use crate::compat::types::{
    ClassificationHint, CompatibilityReport, GroupCompatibilityReport, MaterialDetection,
    MaterialType, PairVerdict, RiskLevel,
};
use crate::model::Material;
use std::collections::HashMap;
use tracing::debug;

/// Stateless rule evaluator plus the user-classification overrides that
/// resolve ambiguous materials.
#[derive(Default)]
pub struct CompatibilityEngine {
    user_classifications: HashMap<String, MaterialType>,
}

impl CompatibilityEngine {
    pub fn new() -> CompatibilityEngine {
        CompatibilityEngine::default()
    }

    /// Record a human classification for a material key. Applies to every
    /// later detection of a material with the same key.
    pub fn set_user_classification(&mut self, key: impl Into<String>, material_type: MaterialType) {
        self.user_classifications.insert(key.into(), material_type);
    }

    pub fn user_classification(&self, key: &str) -> Option<MaterialType> {
        self.user_classifications.get(key).copied()
    }

    pub fn detect_material_type(
        &self,
        material: &Material,
        hint: Option<&dyn ClassificationHint>,
    ) -> MaterialDetection {
        detect(material, &self.user_classifications, hint)
    }

    /// Pairwise verdict. Symmetric by construction: every layer consults
    /// unordered pairs only.
    pub fn check_compatibility(
        &self,
        a: &Material,
        b: &Material,
        hint: Option<&dyn ClassificationHint>,
    ) -> CompatibilityReport {
        let det_a = self.detect_material_type(a, hint);
        let det_b = self.detect_material_type(b, hint);
        self.judge(a, &det_a, b, &det_b)
    }

    fn judge(
        &self,
        a: &Material,
        det_a: &MaterialDetection,
        b: &Material,
        det_b: &MaterialDetection,
    ) -> CompatibilityReport {
        if det_a.requires_user_input || det_b.requires_user_input {
            let mut issues = Vec::new();
            for (material, det) in [(a, det_a), (b, det_b)] {
                if det.requires_user_input {
                    issues.push(format!(
                        "'{}' requires user classification ({})",
                        material.product_name,
                        det.ambiguous_types.join(", ")
                    ));
                }
            }
            return CompatibilityReport {
                compatible: false,
                risk_level: RiskLevel::Moderate,
                issues,
                recommendations: vec![
                    "classify the ambiguous material(s) before packing".to_string()
                ],
                segregation_required: true,
            };
        }

        let mut issues = Vec::new();
        let mut recommendations = Vec::new();

        // Layer 1: reactive-group matrix. Always severe, always blocking.
        for (x, y, why) in REACTIVE_INCOMPATIBILITIES {
            let hit = (det_a.has_type(*x) && det_b.has_type(*y))
                || (det_a.has_type(*y) && det_b.has_type(*x));
            if hit {
                issues.push(format!("reactive incompatibility: {why}"));
            }
        }
        if !issues.is_empty() {
            recommendations.push("pack in separate containers with full segregation".to_string());
            return self.report(a, b, false, RiskLevel::Severe, issues, recommendations, true);
        }

        // Layer 2: aerosols pack only with aerosols.
        let a_aero = det_a.has_type(MaterialType::Aerosol);
        let b_aero = det_b.has_type(MaterialType::Aerosol);
        if a_aero != b_aero {
            let aerosol_name = if a_aero { &a.product_name } else { &b.product_name };
            issues.push(format!(
                "'{aerosol_name}' is an aerosol and must be packed only with other aerosols"
            ));
            recommendations.push("move the aerosol to a dedicated aerosol pack".to_string());
            return self.report(a, b, false, RiskLevel::Moderate, issues, recommendations, true);
        }

        // Layer 3: DOT table. Severe entries block; lower severities only advise.
        let mut advisory: Option<RiskLevel> = None;
        for class_a in &det_a.hazard_classes {
            for class_b in &det_b.hazard_classes {
                if let Some(entry) = dot_lookup(class_a, class_b) {
                    if entry.severity == RiskLevel::Severe {
                        issues.push(format!(
                            "DOT segregation {class_a}/{class_b}: {}",
                            entry.note
                        ));
                    } else {
                        recommendations.push(entry.note.to_string());
                        advisory = Some(advisory.map_or(entry.severity, |r| r.max(entry.severity)));
                    }
                }
            }
        }
        if !issues.is_empty() {
            recommendations.push("pack in separate containers with full segregation".to_string());
            return self.report(a, b, false, RiskLevel::Severe, issues, recommendations, true);
        }

        // Layer 4: whitelist. A shared group is compatible; DOT advisories
        // from layer 3 stay in the recommendations.
        if let Some(group) = shared_group(&det_a.material_types, &det_b.material_types) {
            recommendations.push(format!("compatible within group '{group}'"));
            let risk = advisory.unwrap_or(RiskLevel::Low);
            return self.report(a, b, true, risk, issues, recommendations, false);
        }

        // Layer 5: fallback. A general-only or unknown side never forces
        // segregation on its own; the pair is kept apart only when both
        // sides carry specific types no earlier layer covered.
        if det_a.is_general_only() || det_b.is_general_only() {
            recommendations
                .push("no specific hazard detected; verify labels before packing".to_string());
            return self.report(a, b, true, RiskLevel::Low, issues, recommendations, false);
        }

        issues.push(format!(
            "no compatibility rule covers '{}' ({}) with '{}' ({})",
            a.product_name,
            describe_types(det_a),
            b.product_name,
            describe_types(det_b)
        ));
        recommendations.push("keep apart pending manual review".to_string());
        self.report(a, b, false, RiskLevel::Moderate, issues, recommendations, true)
    }

    #[allow(clippy::too_many_arguments)]
    fn report(
        &self,
        a: &Material,
        b: &Material,
        compatible: bool,
        risk_level: RiskLevel,
        issues: Vec<String>,
        recommendations: Vec<String>,
        segregation_required: bool,
    ) -> CompatibilityReport {
        debug!(
            a = %a.product_name,
            b = %b.product_name,
            compatible,
            risk = %risk_level,
            "compatibility verdict"
        );
        CompatibilityReport {
            compatible,
            risk_level,
            issues,
            recommendations,
            segregation_required,
        }
    }

    /// All-pairs verdict over a candidate pack. Materials whose detection
    /// requires user input are listed as unresolved and excluded from pairing.
    pub fn check_group(
        &self,
        materials: &[Material],
        hint: Option<&dyn ClassificationHint>,
    ) -> GroupCompatibilityReport {
        let detections: Vec<MaterialDetection> = materials
            .iter()
            .map(|m| self.detect_material_type(m, hint))
            .collect();

        let unresolved: Vec<String> = materials
            .iter()
            .zip(&detections)
            .filter(|(_, d)| d.requires_user_input)
            .map(|(m, _)| m.product_name.clone())
            .collect();

        let mut pairwise = Vec::new();
        let mut overall_compatible = unresolved.is_empty();
        for i in 0..materials.len() {
            if detections[i].requires_user_input {
                continue;
            }
            for j in (i + 1)..materials.len() {
                if detections[j].requires_user_input {
                    continue;
                }
                let report = self.judge(&materials[i], &detections[i], &materials[j], &detections[j]);
                overall_compatible &= report.compatible;
                pairwise.push(PairVerdict {
                    material_a: materials[i].product_name.clone(),
                    material_b: materials[j].product_name.clone(),
                    report,
                });
            }
        }

        GroupCompatibilityReport {
            pairwise,
            overall_compatible,
            unresolved,
        }
    }
}

fn describe_types(det: &MaterialDetection) -> String {
    det.material_types
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChemicalConstituent;
    use rust_decimal_macros::dec;

    fn material(name: &str) -> Material {
        Material {
            product_name: name.into(),
            ..Material::default()
        }
    }

    fn with_cas(name: &str, constituent: &str, cas: &str) -> Material {
        Material {
            product_name: name.into(),
            composition: vec![ChemicalConstituent {
                name: constituent.into(),
                cas_number: Some(cas.into()),
                percentage: None,
            }],
            ..Material::default()
        }
    }

    #[test]
    fn test_acid_and_cyanide_severe() {
        let engine = CompatibilityEngine::new();
        let acid = with_cas("Muriatic acid 31%", "Hydrochloric acid", "7647-01-0");
        let cyanide = with_cas("Plating salt", "Potassium cyanide", "151-50-8");
        let report = engine.check_compatibility(&acid, &cyanide, None);
        assert!(!report.compatible);
        assert_eq!(report.risk_level, RiskLevel::Severe);
        assert!(report.segregation_required);
        assert!(report.issues.iter().any(|i| i.contains("hydrogen cyanide")));
    }

    #[test]
    fn test_symmetry() {
        // One pair per outcome band: severe reactive, moderate aerosol
        // mismatch, compatible whitelist pair, general-side fallback.
        let engine = CompatibilityEngine::new();
        let aerosol = Material {
            product_name: "Spray paint".into(),
            packaging: Some("aerosol can".into()),
            ..Material::default()
        };
        let pairs = [
            (
                with_cas("Battery acid", "Sulfuric acid", "7664-93-9"),
                material("Caustic soda beads"),
            ),
            (aerosol, material("Used motor oil")),
            (material("Used motor oil"), material("Kerosene heater fuel")),
            (
                material("Unknown green liquid"),
                with_cas("Muriatic acid 31%", "Hydrochloric acid", "7647-01-0"),
            ),
        ];
        for (x, y) in pairs {
            let xy = engine.check_compatibility(&x, &y, None);
            let yx = engine.check_compatibility(&y, &x, None);
            assert_eq!(
                xy.compatible, yx.compatible,
                "{} / {}",
                x.product_name, y.product_name
            );
            assert_eq!(xy.risk_level, yx.risk_level);
            assert_eq!(xy.segregation_required, yx.segregation_required);
        }
    }

    #[test]
    fn test_aerosol_with_non_aerosol_segregates() {
        let engine = CompatibilityEngine::new();
        let aerosol = Material {
            product_name: "Spray paint".into(),
            packaging: Some("aerosol can".into()),
            ..Material::default()
        };
        let powder = material("Unidentified blue powder");
        let report = engine.check_compatibility(&aerosol, &powder, None);
        assert!(!report.compatible);
        assert_eq!(report.risk_level, RiskLevel::Moderate);
        assert!(report.segregation_required);
    }

    #[test]
    fn test_dot_severe_blocks_whitelist() {
        // Oxidizing flammable mix: class 3 vs 5.1 is severe even though both
        // sides carry a flammable type.
        let engine = CompatibilityEngine::new();
        let solvent = with_cas("Waste acetone", "Acetone", "67-64-1");
        let mixed = Material {
            product_name: "Oxidizing lacquer blend".into(),
            ..Material::default()
        };
        let report = engine.check_compatibility(&solvent, &mixed, None);
        assert!(!report.compatible);
        assert_eq!(report.risk_level, RiskLevel::Severe);
        assert!(report.issues.iter().any(|i| i.contains("DOT segregation")));
    }

    #[test]
    fn test_petroleum_pair_compatible_despite_advisory() {
        let engine = CompatibilityEngine::new();
        let oil = material("Used motor oil");
        let kerosene = material("Kerosene heater fuel");
        let report = engine.check_compatibility(&oil, &kerosene, None);
        assert!(report.compatible);
        assert!(!report.segregation_required);
        // The class 3/3 advisory survives as a recommendation.
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.contains("flash point")));
    }

    #[test]
    fn test_general_pair_compatible() {
        let engine = CompatibilityEngine::new();
        let a = material("Unknown green liquid");
        let b = material("Mystery crystals");
        let report = engine.check_compatibility(&a, &b, None);
        assert!(report.compatible);
        assert_eq!(report.risk_level, RiskLevel::Low);
        assert!(!report.segregation_required);
    }

    #[test]
    fn test_general_side_never_forces_segregation() {
        let engine = CompatibilityEngine::new();
        let general = material("Unknown green liquid");
        for specific in [
            with_cas("Muriatic acid 31%", "Hydrochloric acid", "7647-01-0"),
            with_cas("Waste acetone", "Acetone", "67-64-1"),
            material("Used motor oil"),
        ] {
            let report = engine.check_compatibility(&general, &specific, None);
            assert!(report.compatible, "general vs {}", specific.product_name);
            assert_eq!(report.risk_level, RiskLevel::Low);
            assert!(!report.segregation_required);
        }
    }

    #[test]
    fn test_specific_unmatched_pair_kept_apart() {
        // Acid (class 8) and solvent (class 3) share no whitelist group and
        // no blocking rule; both carry specific types, so they stay apart.
        let engine = CompatibilityEngine::new();
        let acid = with_cas("Muriatic acid 31%", "Hydrochloric acid", "7647-01-0");
        let solvent = with_cas("Waste acetone", "Acetone", "67-64-1");
        let report = engine.check_compatibility(&acid, &solvent, None);
        assert!(!report.compatible);
        assert_eq!(report.risk_level, RiskLevel::Moderate);
        assert!(report.segregation_required);
    }

    #[test]
    fn test_ambiguous_pair_requires_classification() {
        let engine = CompatibilityEngine::new();
        let pressurized = material("Pressurized container");
        let oil = material("Used motor oil");
        let report = engine.check_compatibility(&pressurized, &oil, None);
        assert!(!report.compatible);
        assert!(report
            .issues
            .iter()
            .any(|i| i.contains("requires user classification")));
    }

    #[test]
    fn test_user_classification_unblocks_pair() {
        let mut engine = CompatibilityEngine::new();
        let pressurized = material("Pressurized container");
        engine.set_user_classification(pressurized.key(), MaterialType::Aerosol);
        let aerosol = Material {
            product_name: "Spray lubricant".into(),
            packaging: Some("aerosol can".into()),
            ..Material::default()
        };
        let report = engine.check_compatibility(&pressurized, &aerosol, None);
        assert!(report.compatible);
    }

    #[test]
    fn test_group_report() {
        let engine = CompatibilityEngine::new();
        let materials = vec![
            material("Used motor oil"),
            material("Kerosene heater fuel"),
            material("Pressurized container"),
        ];
        let report = engine.check_group(&materials, None);
        assert_eq!(report.unresolved, vec!["Pressurized container".to_string()]);
        assert_eq!(report.pairwise.len(), 1);
        assert!(!report.overall_compatible);
        assert!(report.pairwise[0].report.compatible);

        let flash = Material {
            flash_point_celsius: Some(dec!(-4)),
            ..material("Gasoline drain")
        };
        let resolved = vec![material("Used motor oil"), flash];
        let report = engine.check_group(&resolved, None);
        assert!(report.overall_compatible);
        assert!(report.unresolved.is_empty());
    }
}
