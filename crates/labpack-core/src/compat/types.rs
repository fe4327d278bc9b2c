use crate::model::Material;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Segregation-relevant material families. A material may belong to several;
/// detection is additive, not exclusive.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MaterialType {
    StrongAcid,
    StrongBase,
    Oxidizer,
    Cyanide,
    Aerosol,
    BrakeCleaner,
    Flammable,
    Petroleum,
    PressurizedCylinder,
    GeneralChemicals,
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MaterialType::StrongAcid => "strong_acid",
            MaterialType::StrongBase => "strong_base",
            MaterialType::Oxidizer => "oxidizer",
            MaterialType::Cyanide => "cyanide",
            MaterialType::Aerosol => "aerosol",
            MaterialType::BrakeCleaner => "brake_cleaner",
            MaterialType::Flammable => "flammable",
            MaterialType::Petroleum => "petroleum",
            MaterialType::PressurizedCylinder => "pressurized_cylinder",
            MaterialType::GeneralChemicals => "general_chemicals",
        };
        write!(f, "{s}")
    }
}

impl FromStr for MaterialType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strong_acid" | "acid" => Ok(MaterialType::StrongAcid),
            "strong_base" | "base" => Ok(MaterialType::StrongBase),
            "oxidizer" => Ok(MaterialType::Oxidizer),
            "cyanide" => Ok(MaterialType::Cyanide),
            "aerosol" => Ok(MaterialType::Aerosol),
            "brake_cleaner" => Ok(MaterialType::BrakeCleaner),
            "flammable" => Ok(MaterialType::Flammable),
            "petroleum" => Ok(MaterialType::Petroleum),
            "pressurized_cylinder" | "cylinder" => Ok(MaterialType::PressurizedCylinder),
            "general_chemicals" | "general" => Ok(MaterialType::GeneralChemicals),
            other => Err(format!("unknown material type '{other}'")),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    Severe,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Moderate => write!(f, "moderate"),
            RiskLevel::Severe => write!(f, "severe"),
        }
    }
}

/// Outcome of material-type detection for one material.
///
/// Recomputed per compatibility check; cheap and never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialDetection {
    pub material_types: Vec<MaterialType>,
    /// DOT hazard classes contributed by the matched types (e.g., "3", "8").
    pub hazard_classes: Vec<String>,
    pub special_handling: Vec<String>,
    pub confidence: f64,
    pub warnings: Vec<String>,
    pub ambiguous_types: Vec<String>,
    /// When true, no automated segregation decision may be made for this
    /// material; the caller must obtain a human classification.
    pub requires_user_input: bool,
}

impl MaterialDetection {
    pub fn needs_user(ambiguous_types: Vec<String>, warnings: Vec<String>) -> MaterialDetection {
        MaterialDetection {
            material_types: Vec::new(),
            hazard_classes: Vec::new(),
            special_handling: Vec::new(),
            confidence: 0.0,
            warnings,
            ambiguous_types,
            requires_user_input: true,
        }
    }

    pub fn has_type(&self, t: MaterialType) -> bool {
        self.material_types.contains(&t)
    }

    /// True when nothing specific was detected.
    pub fn is_general_only(&self) -> bool {
        self.material_types.is_empty()
            || self
                .material_types
                .iter()
                .all(|t| *t == MaterialType::GeneralChemicals)
    }
}

/// Pairwise compatibility verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityReport {
    pub compatible: bool,
    pub risk_level: RiskLevel,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
    pub segregation_required: bool,
}

/// All-pairs verdict for lab-pack planning.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCompatibilityReport {
    pub pairwise: Vec<PairVerdict>,
    pub overall_compatible: bool,
    /// Materials whose detection requires user input; their pairs are not judged.
    pub unresolved: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairVerdict {
    pub material_a: String,
    pub material_b: String,
    pub report: CompatibilityReport,
}

/// A learned type prediction offered to the detector.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypePrediction {
    pub material_type: MaterialType,
    pub confidence: f64,
}

/// Seam through which the learning engine feeds predictions back into
/// ambiguity detection.
pub trait ClassificationHint {
    fn predict_type(&self, material: &Material) -> Option<TypePrediction>;
}
