use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raw row of the acutely-hazardous (P) or toxic-commercial (U) tables.
///
/// Field aliases match the variants seen in regulatory data exports
/// (`cas`/`cas_number`, `code`/`waste_code`, `chemical`/`chemical_name`).
#[derive(Debug, Clone, Deserialize)]
pub struct ListedCodeRow {
    #[serde(alias = "cas_number")]
    pub cas: String,
    #[serde(alias = "waste_code")]
    pub code: String,
    #[serde(alias = "chemical_name")]
    pub chemical: String,
    #[serde(default, alias = "hazard_reason", alias = "reason")]
    pub hazard: Option<String>,
    #[serde(default)]
    pub citation: Option<String>,
}

/// Raw row of the characteristic/TCLP (D) table.
#[derive(Debug, Clone, Deserialize)]
pub struct DCodeRow {
    #[serde(alias = "cas_number")]
    pub cas: String,
    #[serde(alias = "waste_code")]
    pub code: String,
    #[serde(alias = "constituent_name")]
    pub constituent: String,
    #[serde(alias = "tclp_threshold")]
    pub threshold: Decimal,
    pub units: String,
    pub method: String,
    #[serde(default)]
    pub citation: Option<String>,
}

/// Raw chemical-property entry, keyed by CAS in the property map.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRow {
    pub name: String,
    #[serde(default)]
    pub flash_point: Option<Decimal>,
    #[serde(default)]
    pub ignitable: bool,
    #[serde(default)]
    pub corrosive: bool,
    #[serde(default)]
    pub oxidizer: bool,
}

/// Acutely hazardous listed chemical (P code).
#[derive(Debug, Clone, Serialize)]
pub struct PCodeEntry {
    pub code: String,
    pub chemical_name: String,
    pub hazard_reason: String,
    pub citation: String,
}

/// Toxic commercial chemical product (U code).
#[derive(Debug, Clone, Serialize)]
pub struct UCodeEntry {
    pub code: String,
    pub chemical_name: String,
    pub reason: String,
    pub citation: String,
}

/// Toxicity characteristic constituent (D code) with its TCLP threshold.
#[derive(Debug, Clone, Serialize)]
pub struct DCodeEntry {
    pub code: String,
    pub constituent_name: String,
    pub tclp_threshold: Decimal,
    pub units: String,
    pub method: String,
    pub citation: String,
}

/// Physical/chemical properties relevant to characteristic codes.
#[derive(Debug, Clone, Serialize)]
pub struct ChemicalProperties {
    pub name: String,
    pub flash_point_celsius: Option<Decimal>,
    pub ignitable: bool,
    pub corrosive: bool,
    pub oxidizer: bool,
}
