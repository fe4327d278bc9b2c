use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One constituent of a material's composition, as reported on an SDS.
///
/// An invalid CAS number is kept as-is; the classifier flags it rather than
/// dropping the constituent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChemicalConstituent {
    pub name: String,
    #[serde(default, alias = "cas")]
    pub cas_number: Option<String>,
    #[serde(default)]
    pub percentage: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhysicalState {
    Liquid,
    Solid,
    Gas,
    Sludge,
}

impl fmt::Display for PhysicalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicalState::Liquid => write!(f, "liquid"),
            PhysicalState::Solid => write!(f, "solid"),
            PhysicalState::Gas => write!(f, "gas"),
            PhysicalState::Sludge => write!(f, "sludge"),
        }
    }
}

impl PhysicalState {
    pub fn from_str_loose(s: &str) -> Option<PhysicalState> {
        let lower = s.trim().to_lowercase();
        if lower.contains("liquid") || lower.contains("solution") || lower.contains("aqueous") {
            Some(PhysicalState::Liquid)
        } else if lower.contains("sludge")
            || lower.contains("paste")
            || lower.contains("slurry")
            || lower.contains("semi-solid")
            || lower.contains("gel")
        {
            Some(PhysicalState::Sludge)
        } else if lower.contains("solid")
            || lower.contains("powder")
            || lower.contains("granul")
            || lower.contains("crystal")
        {
            Some(PhysicalState::Solid)
        } else if lower.contains("gas") || lower.contains("vapor") || lower.contains("vapour") {
            Some(PhysicalState::Gas)
        } else {
            None
        }
    }
}

/// A material handed to the engine by SDS extraction.
///
/// The engine only ever reads a `Material`; classification never mutates it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub product_name: String,
    #[serde(default)]
    pub composition: Vec<ChemicalConstituent>,
    #[serde(default)]
    pub physical_state: Option<PhysicalState>,
    #[serde(default, alias = "flashPoint")]
    pub flash_point_celsius: Option<Decimal>,
    #[serde(default, rename = "pH", alias = "ph")]
    pub ph: Option<Decimal>,
    #[serde(default)]
    pub un_number: Option<String>,
    #[serde(default)]
    pub packaging: Option<String>,
    #[serde(default)]
    pub size_descriptor: Option<String>,
}

impl Material {
    /// Stable identity key: the UN number when present, else the normalized
    /// product name. Shared by the learning engine and user classifications.
    pub fn key(&self) -> String {
        match &self.un_number {
            Some(un) if !un.trim().is_empty() => un.trim().to_uppercase(),
            _ => normalize_key(&self.product_name),
        }
    }

    /// Lowercased searchable text: product name, constituent names, packaging.
    pub fn search_text(&self) -> String {
        let mut text = self.product_name.to_lowercase();
        for c in &self.composition {
            text.push(' ');
            text.push_str(&c.name.to_lowercase());
        }
        if let Some(p) = &self.packaging {
            text.push(' ');
            text.push_str(&p.to_lowercase());
        }
        text
    }
}

/// Normalize a free-text name to a comparable key: lowercase, non-alphanumerics
/// collapsed to single underscores.
pub fn normalize_key(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    let mut result = String::with_capacity(lower.len());
    let mut prev_underscore = true;
    for c in lower.chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c);
            prev_underscore = false;
        } else if !prev_underscore {
            result.push('_');
            prev_underscore = true;
        }
    }
    if result.ends_with('_') {
        result.pop();
    }
    result
}
