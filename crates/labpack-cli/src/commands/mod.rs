pub mod classify;
pub mod codes;
pub mod compat;

use labpack_core::error::LabpackError;
use labpack_core::model::Material;
use std::path::Path;

/// Read one material or an array of materials from a JSON file.
pub fn read_materials(path: &Path) -> Result<Vec<Material>, LabpackError> {
    let bytes = std::fs::read(path)?;
    let value: serde_json::Value = serde_json::from_slice(&bytes)?;
    let materials = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };
    Ok(materials)
}
