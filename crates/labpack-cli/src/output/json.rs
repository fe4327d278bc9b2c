use labpack_core::error::LabpackError;
use serde::Serialize;

pub fn print<T: Serialize>(value: &T) -> Result<(), LabpackError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
