//! Static reactivity and segregation data: ambiguity patterns, ordered
//! material-type rules, the reactive-group incompatibility matrix, the DOT
//! hazard-class segregation table, and the compatible-group whitelist.

use crate::cas;
use crate::classify::engine::THRESHOLD_IGNITABLE_FLASH_C;
use crate::compat::types::{MaterialType, RiskLevel};
use crate::model::Material;
use rust_decimal::Decimal;

const PH_STRONG_ACID_MAX: Decimal = Decimal::from_parts(2, 0, 0, false, 0);
const PH_STRONG_BASE_MIN: Decimal = Decimal::from_parts(125, 0, 0, false, 1);

// Aerosol-vs-cylinder ambiguity signals. Tuned on field SDS language;
// pending domain-expert review.
pub const PRESSURIZED_KEYWORDS: &[&str] =
    &["pressurized", "compressed", "under pressure", "propellant"];
pub const AEROSOL_SIGNALS: &[&str] = &["aerosol", "spray"];
pub const CYLINDER_SIGNALS: &[&str] = &["cylinder", "gas bottle", "tank"];
pub const FLAMMABLE_LANGUAGE: &[&str] = &["flammable", "combustible"];

pub const AMBIGUITY_AEROSOL_OR_CYLINDER: &str = "aerosol_or_cylinder";
pub const AMBIGUITY_FLAMMABLE_NO_FLASH_POINT: &str = "flammable_without_flash_point";

/// Ambiguity patterns that must be resolved by a human or a confident learned
/// prediction before detection may proceed.
pub fn ambiguous_types(text: &str, material: &Material) -> Vec<String> {
    let mut ambiguous = Vec::new();

    let has_any = |kws: &[&str]| kws.iter().any(|kw| text.contains(kw));

    if has_any(PRESSURIZED_KEYWORDS) && !has_any(AEROSOL_SIGNALS) && !has_any(CYLINDER_SIGNALS) {
        ambiguous.push(AMBIGUITY_AEROSOL_OR_CYLINDER.to_string());
    }

    if has_any(FLAMMABLE_LANGUAGE) && material.flash_point_celsius.is_none() {
        ambiguous.push(AMBIGUITY_FLAMMABLE_NO_FLASH_POINT.to_string());
    }

    ambiguous
}

/// One ordered, additive type-detection rule.
pub struct TypeRule {
    pub material_type: MaterialType,
    pub keywords: &'static [&'static str],
    pub cas_numbers: &'static [&'static str],
    /// DOT hazard class contributed when the rule matches.
    pub dot_class: &'static str,
    pub special_handling: &'static [&'static str],
    pub confidence: f64,
    pub predicate: Option<fn(&Material) -> bool>,
}

impl TypeRule {
    pub fn matches(&self, text: &str, composition_cas: &[String], material: &Material) -> bool {
        self.keywords.iter().any(|kw| text.contains(kw))
            || self
                .cas_numbers
                .iter()
                .any(|c| composition_cas.iter().any(|cc| cc == c))
            || self.predicate.map(|p| p(material)).unwrap_or(false)
    }
}

/// Ordered type rules; each match contributes additively to the detection.
pub const TYPE_RULES: &[TypeRule] = &[
    TypeRule {
        material_type: MaterialType::StrongAcid,
        keywords: &[
            "hydrochloric",
            "sulfuric",
            "nitric acid",
            "muriatic",
            "phosphoric acid",
            "battery acid",
        ],
        cas_numbers: &["7647-01-0", "7664-93-9", "7697-37-2", "7664-38-2"],
        dot_class: "8",
        special_handling: &["segregate from bases, cyanides, and oxidizers"],
        confidence: 0.9,
        predicate: Some(|m| m.ph.map(|ph| ph <= PH_STRONG_ACID_MAX).unwrap_or(false)),
    },
    TypeRule {
        material_type: MaterialType::StrongBase,
        keywords: &[
            "sodium hydroxide",
            "potassium hydroxide",
            "caustic",
            "lye",
            "ammonium hydroxide",
        ],
        cas_numbers: &["1310-73-2", "1310-58-3", "1336-21-6"],
        dot_class: "8",
        special_handling: &["segregate from acids"],
        confidence: 0.9,
        predicate: Some(|m| m.ph.map(|ph| ph >= PH_STRONG_BASE_MIN).unwrap_or(false)),
    },
    TypeRule {
        material_type: MaterialType::Oxidizer,
        keywords: &[
            "peroxide",
            "permanganate",
            "nitrate",
            "perchlorate",
            "hypochlorite",
            "bleach",
            "oxidizer",
            "oxidizing",
        ],
        cas_numbers: &["7722-84-1", "7722-64-7", "7681-52-9", "7631-99-4", "7757-79-1"],
        dot_class: "5.1",
        special_handling: &["keep away from flammables and organics"],
        confidence: 0.9,
        predicate: None,
    },
    TypeRule {
        material_type: MaterialType::Cyanide,
        keywords: &["cyanide"],
        cas_numbers: &["151-50-8", "143-33-9", "542-62-1", "592-01-8", "544-92-3"],
        dot_class: "6.1",
        special_handling: &["never pack with acids: hydrogen cyanide gas risk"],
        confidence: 0.95,
        predicate: None,
    },
    TypeRule {
        material_type: MaterialType::Aerosol,
        keywords: &["aerosol", "spray can", "spray paint"],
        cas_numbers: &[],
        dot_class: "2.1",
        special_handling: &["pack aerosols only with aerosols"],
        confidence: 0.9,
        predicate: Some(|m| {
            m.packaging
                .as_deref()
                .map(|p| {
                    let p = p.to_lowercase();
                    p.contains("aerosol") || p.contains("spray")
                })
                .unwrap_or(false)
        }),
    },
    TypeRule {
        material_type: MaterialType::BrakeCleaner,
        keywords: &["brake cleaner", "brake parts cleaner", "brakleen"],
        cas_numbers: &[],
        dot_class: "3",
        special_handling: &[],
        confidence: 0.95,
        predicate: None,
    },
    TypeRule {
        material_type: MaterialType::Flammable,
        keywords: &[
            "flammable", "acetone", "toluene", "xylene", "ethanol", "methanol", "isopropanol",
            "alcohol", "thinner", "naphtha", "lacquer",
        ],
        cas_numbers: &["67-64-1", "108-88-3", "1330-20-7", "64-17-5", "67-56-1", "67-63-0"],
        dot_class: "3",
        special_handling: &["keep away from oxidizers and ignition sources"],
        confidence: 0.85,
        predicate: Some(|m| {
            m.flash_point_celsius
                .map(|fp| fp < THRESHOLD_IGNITABLE_FLASH_C)
                .unwrap_or(false)
        }),
    },
    TypeRule {
        material_type: MaterialType::Petroleum,
        keywords: &[
            "petroleum", "gasoline", "diesel", "kerosene", "motor oil", "lubricant", "wd-40",
            "mineral spirits",
        ],
        cas_numbers: &["8006-61-9", "8008-20-6", "68476-34-6", "64742-88-7"],
        dot_class: "3",
        special_handling: &[],
        confidence: 0.85,
        predicate: None,
    },
    TypeRule {
        material_type: MaterialType::PressurizedCylinder,
        keywords: &["cylinder", "compressed gas", "gas bottle"],
        cas_numbers: &[],
        dot_class: "2.2",
        special_handling: &["do not lab-pack cylinders; ship separately"],
        confidence: 0.9,
        predicate: None,
    },
];

/// Confidence assigned when nothing matches. Low by design: an unidentified
/// material may be grouped with other unclassified materials.
pub const FALLBACK_CONFIDENCE: f64 = 0.1;

/// Confidence assigned to an explicit user classification.
pub const USER_CLASSIFICATION_CONFIDENCE: f64 = 0.95;

/// Minimum learned-prediction confidence accepted to resolve an ambiguity.
pub const HINT_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Reactive-group incompatibilities. Always severe, never compatible;
/// this table outranks every other compatibility consideration.
pub const REACTIVE_INCOMPATIBILITIES: &[(MaterialType, MaterialType, &str)] = &[
    (
        MaterialType::StrongAcid,
        MaterialType::Cyanide,
        "acid contact with cyanide generates hydrogen cyanide gas",
    ),
    (
        MaterialType::StrongAcid,
        MaterialType::StrongBase,
        "violent neutralization with heat generation and splatter",
    ),
    (
        MaterialType::StrongAcid,
        MaterialType::Oxidizer,
        "acid contact with oxidizers can generate toxic gases (e.g., chlorine from hypochlorite)",
    ),
];

pub struct DotSegregation {
    pub class_a: &'static str,
    pub class_b: &'static str,
    pub severity: RiskLevel,
    pub note: &'static str,
}

/// DOT hazard-class segregation table. Only `Severe` entries block
/// compatibility; lower severities are advisory.
pub const DOT_SEGREGATION: &[DotSegregation] = &[
    DotSegregation {
        class_a: "3",
        class_b: "5.1",
        severity: RiskLevel::Severe,
        note: "flammable liquids must not be packed with oxidizers",
    },
    DotSegregation {
        class_a: "2.1",
        class_b: "5.1",
        severity: RiskLevel::Severe,
        note: "flammable gases must not be packed with oxidizers",
    },
    DotSegregation {
        class_a: "6.1",
        class_b: "8",
        severity: RiskLevel::Moderate,
        note: "toxics with corrosives: verify no gas-generating combination",
    },
    DotSegregation {
        class_a: "8",
        class_b: "3",
        severity: RiskLevel::Moderate,
        note: "corrosives with flammables: check container integrity",
    },
    DotSegregation {
        class_a: "3",
        class_b: "3",
        severity: RiskLevel::Moderate,
        note: "group flammables by flash point band where practical",
    },
    DotSegregation {
        class_a: "2.2",
        class_b: "3",
        severity: RiskLevel::Low,
        note: "non-flammable gas with flammables: secure cylinders upright",
    },
];

pub fn dot_lookup(class_a: &str, class_b: &str) -> Option<&'static DotSegregation> {
    DOT_SEGREGATION.iter().find(|e| {
        (e.class_a == class_a && e.class_b == class_b)
            || (e.class_a == class_b && e.class_b == class_a)
    })
}

/// Compatible-group whitelist: materials sharing any group may be packed
/// together (unless a severe rule above already blocked them).
pub const COMPATIBLE_GROUPS: &[(&str, &[MaterialType])] = &[
    (
        "flammable_liquids",
        &[
            MaterialType::Flammable,
            MaterialType::Petroleum,
            MaterialType::BrakeCleaner,
        ],
    ),
    (
        "petroleum_products",
        &[MaterialType::Petroleum, MaterialType::BrakeCleaner],
    ),
    ("aerosols", &[MaterialType::Aerosol]),
    ("acids", &[MaterialType::StrongAcid]),
    ("bases", &[MaterialType::StrongBase]),
    ("general", &[MaterialType::GeneralChemicals]),
];

/// First whitelist group both type sets intersect, if any.
pub fn shared_group(a: &[MaterialType], b: &[MaterialType]) -> Option<&'static str> {
    COMPATIBLE_GROUPS.iter().find_map(|(name, members)| {
        let a_in = a.iter().any(|t| members.contains(t));
        let b_in = b.iter().any(|t| members.contains(t));
        (a_in && b_in).then_some(*name)
    })
}

/// Normalized CAS numbers present in a material's composition.
pub fn composition_cas(material: &Material) -> Vec<String> {
    material
        .composition
        .iter()
        .filter_map(|c| c.cas_number.as_deref())
        .filter_map(cas::normalize)
        .collect()
}
