//! End-to-end pipeline tests: classification, database reuse, compatibility
//! verdicts, and the learning loop, all against the embedded data tables.

use labpack_core::compat::types::{ClassificationHint, MaterialType, RiskLevel};
use labpack_core::store::MemoryStore;
use labpack_core::{
    classify_material, AdaptiveLearningEngine, ChemicalConstituent, ClassificationDatabase,
    ClassificationSource, CompatibilityEngine, Material, PhysicalState, RegulatoryIndex,
};

fn index() -> RegulatoryIndex {
    RegulatoryIndex::builtin().unwrap()
}

fn db() -> ClassificationDatabase {
    ClassificationDatabase::new(Box::new(MemoryStore::new()))
}

fn constituent(name: &str, cas: &str, pct: &str) -> ChemicalConstituent {
    ChemicalConstituent {
        name: name.into(),
        cas_number: Some(cas.into()),
        percentage: Some(pct.into()),
    }
}

fn acetone_solvent() -> Material {
    Material {
        product_name: "Waste acetone solvent".into(),
        composition: vec![constituent("Acetone", "67-64-1", "100%")],
        physical_state: Some(PhysicalState::Liquid),
        ..Material::default()
    }
}

#[test]
fn acetone_solvent_end_to_end() {
    let c = classify_material(&acetone_solvent(), &index(), None).unwrap();

    assert!(c.waste_codes.contains("U002"), "listed toxic code");
    assert!(c.waste_codes.contains("D001"), "ignitability code");
    assert_eq!(c.form_code, "203");
    assert_eq!(c.full_waste_code, "0001203H");
    assert!(c.state_codes.contains(&"212".to_string()));
    assert!((c.confidence - 0.95).abs() < 1e-9);
    assert!(matches!(c.source, ClassificationSource::Engine));
}

#[test]
fn bare_chemical_name_stays_in_general_band() {
    // Without solvent-use language the material lands in the default
    // organic-liquid band, not the solvent band.
    let m = Material {
        product_name: "Acetone".into(),
        composition: vec![constituent("Acetone", "67-64-1", "100%")],
        physical_state: Some(PhysicalState::Liquid),
        ..Material::default()
    };
    let c = classify_material(&m, &index(), None).unwrap();
    assert_eq!(c.form_code, "219");
    assert!(c.waste_codes.contains("U002"));
}

#[test]
fn unknown_constituents_are_reported_not_dropped() {
    let m = Material {
        product_name: "Mixed drum".into(),
        composition: vec![
            constituent("Acetone", "67-64-1", "50%"),
            constituent("Mystery additive", "99-99-99-9", "25%"),
            ChemicalConstituent {
                name: "Proprietary fragrance".into(),
                cas_number: None,
                percentage: Some("25%".into()),
            },
        ],
        physical_state: Some(PhysicalState::Liquid),
        ..Material::default()
    };
    let c = classify_material(&m, &index(), None).unwrap();
    assert!(c.waste_codes.contains("U002"));
    assert_eq!(c.unknown_chemicals.len(), 2);
    let reasons: Vec<&str> = c.unknown_chemicals.iter().map(|u| u.reason.as_str()).collect();
    assert!(reasons.contains(&"Invalid CAS format"));
    assert!(reasons.contains(&"No CAS number provided"));
}

#[test]
fn second_classification_served_from_database() {
    let idx = index();
    let mut database = db();

    let first = classify_material(&acetone_solvent(), &idx, Some(&mut database)).unwrap();
    assert!(matches!(first.source, ClassificationSource::Engine));

    let second = classify_material(&acetone_solvent(), &idx, Some(&mut database)).unwrap();
    let ClassificationSource::Cache { score, matched_key } = second.source else {
        panic!("expected a database hit");
    };
    assert!(score >= 0.9, "identical material should match exactly");
    assert_eq!(matched_key, "waste_acetone_solvent");
    assert_eq!(second.waste_codes, first.waste_codes);
    assert_eq!(second.full_waste_code, first.full_waste_code);
}

#[test]
fn near_miss_name_is_not_served_from_database() {
    let idx = index();
    let mut database = db();
    let stored = Material {
        product_name: "Acetone".into(),
        ..Material::default()
    };
    classify_material(&stored, &idx, Some(&mut database)).unwrap();

    let query = Material {
        product_name: "Acetone Pure".into(),
        ..Material::default()
    };
    let c = classify_material(&query, &idx, Some(&mut database)).unwrap();
    assert!(matches!(c.source, ClassificationSource::Engine));
}

#[test]
fn database_export_import_round_trip() {
    let idx = index();
    let mut source_db = db();
    classify_material(&acetone_solvent(), &idx, Some(&mut source_db)).unwrap();

    let mut target_db = db();
    let imported = target_db.import(source_db.export()).unwrap();
    assert_eq!(imported, 1);

    let c = classify_material(&acetone_solvent(), &idx, Some(&mut target_db)).unwrap();
    assert!(matches!(c.source, ClassificationSource::Cache { .. }));
}

#[test]
fn acid_and_cyanide_never_share_a_pack() {
    let engine = CompatibilityEngine::new();
    let acid = Material {
        product_name: "Muriatic acid 31%".into(),
        composition: vec![constituent("Hydrochloric acid", "7647-01-0", "31%")],
        ..Material::default()
    };
    let cyanide = Material {
        product_name: "Plating bath salt".into(),
        composition: vec![constituent("Potassium cyanide", "151-50-8", "90%")],
        ..Material::default()
    };

    let report = engine.check_compatibility(&acid, &cyanide, None);
    assert!(!report.compatible);
    assert_eq!(report.risk_level, RiskLevel::Severe);
    assert!(report.segregation_required);

    let reversed = engine.check_compatibility(&cyanide, &acid, None);
    assert_eq!(report.compatible, reversed.compatible);
    assert_eq!(report.risk_level, reversed.risk_level);
}

#[test]
fn aerosols_only_pack_with_aerosols() {
    let engine = CompatibilityEngine::new();
    let aerosol = Material {
        product_name: "Spray paint, assorted colors".into(),
        packaging: Some("aerosol cans".into()),
        ..Material::default()
    };
    let solvent = acetone_solvent();

    let report = engine.check_compatibility(&aerosol, &solvent, None);
    assert!(!report.compatible);
    assert!(report.segregation_required);

    let other_aerosol = Material {
        product_name: "Aerosol lubricant".into(),
        packaging: Some("aerosol can".into()),
        ..Material::default()
    };
    let report = engine.check_compatibility(&aerosol, &other_aerosol, None);
    assert!(report.compatible);
}

#[test]
fn learning_loop_resolves_ambiguity_after_enough_samples() {
    let engine = CompatibilityEngine::new();
    let mut learner = AdaptiveLearningEngine::new(Box::new(MemoryStore::new()));
    let ambiguous = Material {
        product_name: "Pressurized container".into(),
        ..Material::default()
    };
    let oil = Material {
        product_name: "Used motor oil".into(),
        ..Material::default()
    };

    // Untrained: detection must punt to the user.
    let report = engine.check_group(&[ambiguous.clone(), oil.clone()], Some(&learner));
    assert_eq!(report.unresolved, vec!["Pressurized container".to_string()]);
    assert!(!report.overall_compatible);

    // One decision is not enough.
    learner
        .record_classification(&ambiguous, MaterialType::Aerosol, None)
        .unwrap();
    assert!(learner.predict_type(&ambiguous).is_none());

    learner
        .record_classification(&ambiguous, MaterialType::Aerosol, None)
        .unwrap();
    learner
        .record_classification(&ambiguous, MaterialType::Aerosol, None)
        .unwrap();

    // Trained: the hint resolves the ambiguity and the aerosol rule takes over.
    let report = engine.check_group(&[ambiguous, oil], Some(&learner));
    assert!(report.unresolved.is_empty());
    assert_eq!(report.pairwise.len(), 1);
    assert!(!report.pairwise[0].report.compatible);
    assert!(report.pairwise[0].report.segregation_required);
}

#[test]
fn user_classification_beats_learning() {
    let mut engine = CompatibilityEngine::new();
    let ambiguous = Material {
        product_name: "Pressurized container".into(),
        ..Material::default()
    };
    engine.set_user_classification(ambiguous.key(), MaterialType::PressurizedCylinder);

    let detection = engine.detect_material_type(&ambiguous, None);
    assert!(!detection.requires_user_input);
    assert!(detection.has_type(MaterialType::PressurizedCylinder));
}

#[test]
fn empty_composition_still_classifies_by_name() {
    let m = Material {
        product_name: "Unknown green liquid".into(),
        physical_state: Some(PhysicalState::Liquid),
        ..Material::default()
    };
    let c = classify_material(&m, &index(), None).unwrap();
    assert!(c.waste_codes.is_empty());
    assert_eq!(c.form_code, "219");
    assert_eq!(c.confidence, 0.0);
}
