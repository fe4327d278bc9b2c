use super::schema::{
    ChemicalProperties, DCodeEntry, DCodeRow, ListedCodeRow, PCodeEntry, PropertyRow, UCodeEntry,
};
use crate::cas;
use crate::error::LabpackError;
use std::collections::HashMap;
use tracing::warn;

const P_CODES_JSON: &str = include_str!("../../../../data/p-code-wastes.json");
const U_CODES_JSON: &str = include_str!("../../../../data/u-code-wastes.json");
const D_CODES_JSON: &str = include_str!("../../../../data/d-code-wastes.json");
const PROPERTIES_JSON: &str = include_str!("../../../../data/chemical-properties.json");

/// The four JSON documents an index is built from.
pub struct RegulatorySources<'a> {
    pub p_codes: &'a str,
    pub u_codes: &'a str,
    pub d_codes: &'a str,
    pub chemical_properties: &'a str,
}

impl RegulatorySources<'_> {
    pub fn builtin() -> RegulatorySources<'static> {
        RegulatorySources {
            p_codes: P_CODES_JSON,
            u_codes: U_CODES_JSON,
            d_codes: D_CODES_JSON,
            chemical_properties: PROPERTIES_JSON,
        }
    }
}

/// Normalized-CAS keyed lookup maps over the regulatory tables.
///
/// Read-only after construction. A chemical may appear in more than one map;
/// the code families are not mutually exclusive.
#[derive(Debug)]
pub struct RegulatoryIndex {
    p_codes: HashMap<String, PCodeEntry>,
    u_codes: HashMap<String, UCodeEntry>,
    d_codes: HashMap<String, DCodeEntry>,
    properties: HashMap<String, ChemicalProperties>,
    skipped_rows: usize,
}

impl RegulatoryIndex {
    /// Build an index from explicit sources.
    ///
    /// Rows with an unparseable CAS are skipped with a warning and counted;
    /// a table that fails to parse as JSON is fatal.
    pub fn load(sources: &RegulatorySources<'_>) -> Result<RegulatoryIndex, LabpackError> {
        let p_rows: Vec<ListedCodeRow> = parse_table("p-code-wastes", sources.p_codes)?;
        let u_rows: Vec<ListedCodeRow> = parse_table("u-code-wastes", sources.u_codes)?;
        let d_rows: Vec<DCodeRow> = parse_table("d-code-wastes", sources.d_codes)?;
        let prop_rows: HashMap<String, PropertyRow> =
            parse_table("chemical-properties", sources.chemical_properties)?;

        let mut skipped_rows = 0;

        let mut p_codes = HashMap::with_capacity(p_rows.len());
        for row in p_rows {
            match cas::normalize(&row.cas) {
                Some(key) => {
                    p_codes.insert(
                        key,
                        PCodeEntry {
                            code: row.code,
                            chemical_name: row.chemical,
                            hazard_reason: row.hazard.unwrap_or_default(),
                            citation: row.citation.unwrap_or_default(),
                        },
                    );
                }
                None => {
                    warn!(code = %row.code, cas = %row.cas, "skipping P-code row with unparseable CAS");
                    skipped_rows += 1;
                }
            }
        }

        let mut u_codes = HashMap::with_capacity(u_rows.len());
        for row in u_rows {
            match cas::normalize(&row.cas) {
                Some(key) => {
                    u_codes.insert(
                        key,
                        UCodeEntry {
                            code: row.code,
                            chemical_name: row.chemical,
                            reason: row.hazard.unwrap_or_default(),
                            citation: row.citation.unwrap_or_default(),
                        },
                    );
                }
                None => {
                    warn!(code = %row.code, cas = %row.cas, "skipping U-code row with unparseable CAS");
                    skipped_rows += 1;
                }
            }
        }

        let mut d_codes = HashMap::with_capacity(d_rows.len());
        for row in d_rows {
            match cas::normalize(&row.cas) {
                Some(key) => {
                    d_codes.insert(
                        key,
                        DCodeEntry {
                            code: row.code,
                            constituent_name: row.constituent,
                            tclp_threshold: row.threshold,
                            units: row.units,
                            method: row.method,
                            citation: row.citation.unwrap_or_default(),
                        },
                    );
                }
                None => {
                    warn!(code = %row.code, cas = %row.cas, "skipping D-code row with unparseable CAS");
                    skipped_rows += 1;
                }
            }
        }

        let mut properties = HashMap::with_capacity(prop_rows.len());
        for (raw_cas, row) in prop_rows {
            match cas::normalize(&raw_cas) {
                Some(key) => {
                    properties.insert(
                        key,
                        ChemicalProperties {
                            name: row.name,
                            flash_point_celsius: row.flash_point,
                            ignitable: row.ignitable,
                            corrosive: row.corrosive,
                            oxidizer: row.oxidizer,
                        },
                    );
                }
                None => {
                    warn!(cas = %raw_cas, "skipping chemical-property entry with unparseable CAS");
                    skipped_rows += 1;
                }
            }
        }

        Ok(RegulatoryIndex {
            p_codes,
            u_codes,
            d_codes,
            properties,
            skipped_rows,
        })
    }

    /// Build the index from the embedded data tables.
    pub fn builtin() -> Result<RegulatoryIndex, LabpackError> {
        Self::load(&RegulatorySources::builtin())
    }

    /// Look up by normalized CAS (see [`crate::cas::normalize`]).
    pub fn p_code(&self, cas: &str) -> Option<&PCodeEntry> {
        self.p_codes.get(cas)
    }

    pub fn u_code(&self, cas: &str) -> Option<&UCodeEntry> {
        self.u_codes.get(cas)
    }

    pub fn d_code(&self, cas: &str) -> Option<&DCodeEntry> {
        self.d_codes.get(cas)
    }

    pub fn chemical_properties(&self, cas: &str) -> Option<&ChemicalProperties> {
        self.properties.get(cas)
    }

    /// Rows dropped at load time because their CAS did not parse.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    pub fn iter_p(&self) -> impl Iterator<Item = (&str, &PCodeEntry)> {
        self.p_codes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_u(&self) -> impl Iterator<Item = (&str, &UCodeEntry)> {
        self.u_codes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_d(&self) -> impl Iterator<Item = (&str, &DCodeEntry)> {
        self.d_codes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn counts(&self) -> (usize, usize, usize, usize) {
        (
            self.p_codes.len(),
            self.u_codes.len(),
            self.d_codes.len(),
            self.properties.len(),
        )
    }
}

fn parse_table<T: serde::de::DeserializeOwned>(
    table: &str,
    json: &str,
) -> Result<T, LabpackError> {
    serde_json::from_str(json).map_err(|e| LabpackError::DataLoad {
        table: table.to_string(),
        reason: e.to_string(),
    })
}
