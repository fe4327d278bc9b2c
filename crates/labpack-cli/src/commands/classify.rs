use labpack_core::error::LabpackError;
use labpack_core::store::JsonFileStore;
use labpack_core::{classify_material, ClassificationDatabase, RegulatoryIndex};
use std::path::PathBuf;

use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    db_path: Option<PathBuf>,
    no_cache: bool,
) -> Result<(), LabpackError> {
    let index = RegulatoryIndex::builtin()?;
    let materials = super::read_materials(&input_file)?;

    let mut database = match (db_path, no_cache) {
        (Some(path), false) => Some(ClassificationDatabase::new(Box::new(JsonFileStore::new(
            path,
        )))),
        _ => None,
    };

    let mut classifications = Vec::with_capacity(materials.len());
    for material in &materials {
        let classification = classify_material(material, &index, database.as_mut())?;
        classifications.push(classification);
    }

    match output_format {
        "json" => output::json::print(&classifications)?,
        _ => output::table::print_classifications(&classifications),
    }

    Ok(())
}
