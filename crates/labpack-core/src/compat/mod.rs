pub mod detect;
pub mod engine;
pub mod rules;
pub mod types;

pub use engine::CompatibilityEngine;
pub use types::{
    ClassificationHint, CompatibilityReport, GroupCompatibilityReport, MaterialDetection,
    MaterialType, RiskLevel, TypePrediction,
};
