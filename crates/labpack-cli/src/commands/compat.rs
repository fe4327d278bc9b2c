use labpack_core::compat::types::{ClassificationHint, MaterialType};
use labpack_core::error::LabpackError;
use labpack_core::model::Material;
use labpack_core::store::JsonFileStore;
use labpack_core::{AdaptiveLearningEngine, CompatibilityEngine};
use std::path::PathBuf;

use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    learn_path: Option<PathBuf>,
    resolutions: Vec<String>,
) -> Result<(), LabpackError> {
    let materials = super::read_materials(&input_file)?;

    let mut learner =
        learn_path.map(|path| AdaptiveLearningEngine::new(Box::new(JsonFileStore::new(path))));

    let mut engine = CompatibilityEngine::new();
    for resolution in &resolutions {
        let (name, type_str) = resolution.split_once('=').ok_or_else(|| {
            LabpackError::InvalidMaterial(format!(
                "invalid --resolve '{resolution}': expected NAME=TYPE"
            ))
        })?;
        let material_type: MaterialType = type_str
            .parse()
            .map_err(LabpackError::InvalidMaterial)?;

        // Resolve against the input material so UN-number keys line up;
        // an unmatched name still registers under its normalized form.
        let material = materials
            .iter()
            .find(|m| m.product_name.eq_ignore_ascii_case(name.trim()))
            .cloned()
            .unwrap_or_else(|| Material {
                product_name: name.trim().to_string(),
                ..Material::default()
            });
        // Detect before the override is installed so the record keeps what
        // automation would have said on its own.
        let original_detection = engine.detect_material_type(&material, None);
        engine.set_user_classification(material.key(), material_type);
        if let Some(learner) = learner.as_mut() {
            learner.record_classification(&material, material_type, Some(original_detection))?;
        }
    }

    let hint = learner.as_ref().map(|l| l as &dyn ClassificationHint);
    let report = engine.check_group(&materials, hint);

    match output_format {
        "json" => output::json::print(&report)?,
        _ => output::table::print_group(&report),
    }

    Ok(())
}
