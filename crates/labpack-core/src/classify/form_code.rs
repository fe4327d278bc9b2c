//! Jurisdiction waste form codes, the combined 8-character waste code, and
//! state waste codes, all derived from an ordered rule list.
//!
//! Form code bands: lab packs 001-009, inorganic liquids 101-119, organic
//! liquids 201-219, inorganic solids 301-319, organic solids 401-419,
//! inorganic sludges 501-519, organic sludges 601-619, gases 701/801,
//! fixed overrides 998/999. Every input terminates with a code; unmatched
//! materials degrade to the least-specific code for their state.

use crate::classify::outcome::ClassificationResult;
use crate::model::{Material, PhysicalState};
use rust_decimal::Decimal;
use serde::Serialize;

/// Inorganic only wins the keyword vote with more than this many indicator
/// matches and zero organic matches; everything else defaults to organic.
/// Tuned against historical waste streams; pending domain-expert review.
pub const INORGANIC_VOTE_THRESHOLD: usize = 2;

/// A composition with at least this many constituents counts as a lab-pack
/// indicator on its own.
pub const LAB_PACK_MIN_CONSTITUENTS: usize = 4;

/// Combustible (not ignitable) flash point band for the hazard flag.
pub const COMBUSTIBLE_FLASH_MIN_C: Decimal = Decimal::from_parts(60, 0, 0, false, 0);
pub const COMBUSTIBLE_FLASH_MAX_C: Decimal = Decimal::from_parts(93, 0, 0, false, 0);

const PH_ACID_MAX: Decimal = Decimal::from_parts(2, 0, 0, false, 0);
const PH_ALKALINE_MIN: Decimal = Decimal::from_parts(125, 0, 0, false, 1);

const ORGANIC_INDICATORS: &[&str] = &[
    "solvent", "acetone", "alcohol", "ethanol", "methanol", "isopropanol", "toluene", "xylene",
    "benzene", "ketone", "ether", "ester", "acetate", "glycol", "hydrocarbon", "petroleum", "oil",
    "fuel", "paint", "thinner", "lacquer", "resin", "polymer", "adhesive", "phenol", "methyl",
    "ethyl", "propyl", "butyl", "organic",
];

const INORGANIC_INDICATORS: &[&str] = &[
    "acid", "hydroxide", "caustic", "chloride", "sulfate", "sulfide", "nitrate", "phosphate",
    "carbonate", "silicate", "chromate", "cyanide", "oxide", "peroxide", "permanganate",
    "hypochlorite", "bleach", "sodium", "potassium", "calcium", "ammonium", "metal", "inorganic",
];

const HALOGENATED_KEYWORDS: &[&str] = &[
    "chloro", "dichloro", "trichloro", "tetrachloro", "perchloro", "chlorinated", "fluoro",
    "bromo", "methylene chloride", "halogenated",
];

// Deliberately narrow: a named solvent chemical without solvent-use language
// stays in the general organic-liquid band.
const SOLVENT_KEYWORDS: &[&str] = &["solvent", "thinner", "degreaser", "naphtha", "mineral spirits"];

/// Keyword-vote heuristic for the organic/inorganic split.
///
/// Default bias is organic: industrial waste streams are conservatively
/// assumed organic when the indicators are ambiguous.
pub fn is_organic_compound(material: &Material) -> bool {
    let text = material.search_text();
    let organic_matches = ORGANIC_INDICATORS
        .iter()
        .filter(|kw| text.contains(**kw))
        .count();
    let inorganic_matches = INORGANIC_INDICATORS
        .iter()
        .filter(|kw| text.contains(**kw))
        .count();

    !(inorganic_matches > INORGANIC_VOTE_THRESHOLD && organic_matches == 0)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormCode {
    pub code: String,
    pub description: String,
}

/// Evaluation context shared by the form-code and state-code rules.
pub struct FormContext<'a> {
    pub material: &'a Material,
    pub classification: &'a ClassificationResult,
    text: String,
    organic: bool,
}

impl<'a> FormContext<'a> {
    pub fn new(classification: &'a ClassificationResult, material: &'a Material) -> Self {
        FormContext {
            text: material.search_text(),
            organic: is_organic_compound(material),
            material,
            classification,
        }
    }

    pub fn organic(&self) -> bool {
        self.organic
    }

    pub fn state(&self) -> Option<PhysicalState> {
        self.material.physical_state
    }

    pub fn has_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|kw| self.text.contains(kw))
    }

    fn is_state(&self, state: PhysicalState) -> bool {
        self.material.physical_state == Some(state)
    }

    fn lab_pack(&self) -> bool {
        self.material.composition.len() >= LAB_PACK_MIN_CONSTITUENTS
            || self.has_any(&["lab pack", "labpack", "laboratory", "assorted", "mixed"])
    }

    fn acidic(&self) -> bool {
        self.has_any(&["acid", "acidic", "muriatic"])
            || self.material.ph.map(|ph| ph <= PH_ACID_MAX).unwrap_or(false)
    }

    fn alkaline(&self) -> bool {
        self.has_any(&["caustic", "hydroxide", "alkaline", "lye", "ammonia"])
            || self
                .material
                .ph
                .map(|ph| ph >= PH_ALKALINE_MIN)
                .unwrap_or(false)
    }

    fn solventish(&self) -> bool {
        self.has_any(SOLVENT_KEYWORDS)
    }

    fn halogenated(&self) -> bool {
        self.has_any(HALOGENATED_KEYWORDS)
    }

    /// Any TCLP metal code (D004-D011) in the classification.
    fn has_metal_codes(&self) -> bool {
        const METAL_CODES: &[&str] = &[
            "D004", "D005", "D006", "D007", "D008", "D009", "D010", "D011",
        ];
        METAL_CODES
            .iter()
            .any(|c| self.classification.waste_codes.contains(*c))
    }
}

pub struct FormRule {
    pub code: &'static str,
    pub description: &'static str,
    pub applies: fn(&FormContext) -> bool,
}

/// Ordered form-code rules; the first match wins. Band order: lab packs,
/// gases, liquids, solids, sludges, fixed overrides, per-state defaults,
/// global fallback.
pub const FORM_RULES: &[FormRule] = &[
    // Lab packs
    FormRule {
        code: "004",
        description: "Lab pack: pharmaceutical waste",
        applies: |c| c.lab_pack() && c.has_any(&["pharmaceutical", "medicine", "drug"]),
    },
    FormRule {
        code: "005",
        description: "Lab pack: pathological waste",
        applies: |c| c.lab_pack() && c.has_any(&["pathological", "biological", "biohazard"]),
    },
    FormRule {
        code: "006",
        description: "Lab pack: unidentified laboratory chemicals",
        applies: |c| c.lab_pack() && c.has_any(&["unknown", "unidentified", "unlabeled"]),
    },
    FormRule {
        code: "003",
        description: "Lab pack: mixed laboratory chemicals",
        applies: |c| c.lab_pack(),
    },
    // Gases
    FormRule {
        code: "801",
        description: "Organic gas or vapor",
        applies: |c| c.is_state(PhysicalState::Gas) && c.organic(),
    },
    FormRule {
        code: "701",
        description: "Inorganic gas or vapor",
        applies: |c| c.is_state(PhysicalState::Gas),
    },
    // Liquids: keyword families
    FormRule {
        code: "109",
        description: "Spent cyanide solution",
        applies: |c| c.is_state(PhysicalState::Liquid) && c.has_any(&["cyanide"]),
    },
    FormRule {
        code: "105",
        description: "Acidic aqueous waste",
        applies: |c| c.is_state(PhysicalState::Liquid) && c.acidic(),
    },
    FormRule {
        code: "106",
        description: "Caustic aqueous waste",
        applies: |c| c.is_state(PhysicalState::Liquid) && c.alkaline(),
    },
    FormRule {
        code: "201",
        description: "Halogenated organic solvent",
        applies: |c| {
            c.is_state(PhysicalState::Liquid) && c.organic() && c.solventish() && c.halogenated()
        },
    },
    FormRule {
        code: "203",
        description: "Non-halogenated organic solvent",
        applies: |c| c.is_state(PhysicalState::Liquid) && c.organic() && c.solventish(),
    },
    FormRule {
        code: "202",
        description: "Waste fuel",
        applies: |c| {
            c.is_state(PhysicalState::Liquid)
                && c.has_any(&["gasoline", "diesel", "kerosene", "fuel"])
        },
    },
    FormRule {
        code: "204",
        description: "Waste oil",
        applies: |c| {
            c.is_state(PhysicalState::Liquid) && c.has_any(&["oil", "lubricant", "hydraulic"])
        },
    },
    FormRule {
        code: "209",
        description: "Liquid paint or coating waste",
        applies: |c| {
            c.is_state(PhysicalState::Liquid)
                && c.has_any(&["paint", "coating", "lacquer", "varnish", "ink"])
        },
    },
    FormRule {
        code: "212",
        description: "Liquid pesticide waste",
        applies: |c| {
            c.is_state(PhysicalState::Liquid)
                && c.has_any(&["pesticide", "herbicide", "insecticide", "fungicide"])
        },
    },
    FormRule {
        code: "110",
        description: "Metal-bearing aqueous waste",
        applies: |c| {
            c.is_state(PhysicalState::Liquid) && c.has_any(&["plating", "metal", "etching"])
        },
    },
    // Solids: keyword families
    FormRule {
        code: "307",
        description: "Cyanide-bearing solid",
        applies: |c| c.is_state(PhysicalState::Solid) && c.has_any(&["cyanide"]),
    },
    FormRule {
        code: "301",
        description: "Metal scale, filings, or shavings",
        applies: |c| {
            c.is_state(PhysicalState::Solid)
                && c.has_any(&["metal", "filings", "shavings", "scale"])
        },
    },
    FormRule {
        code: "303",
        description: "Spent salts",
        applies: |c| c.is_state(PhysicalState::Solid) && c.has_any(&["salt", "salts"]),
    },
    FormRule {
        code: "404",
        description: "Paint chips and solids",
        applies: |c| c.is_state(PhysicalState::Solid) && c.has_any(&["paint", "coating"]),
    },
    FormRule {
        code: "403",
        description: "Solid pesticide waste",
        applies: |c| {
            c.is_state(PhysicalState::Solid)
                && c.has_any(&["pesticide", "herbicide", "insecticide"])
        },
    },
    FormRule {
        code: "401",
        description: "Cured resins and polymerized solids",
        applies: |c| {
            c.is_state(PhysicalState::Solid)
                && c.has_any(&["resin", "polymer", "adhesive", "epoxy"])
        },
    },
    FormRule {
        code: "402",
        description: "Contaminated debris, rags, and absorbents",
        applies: |c| {
            c.is_state(PhysicalState::Solid)
                && c.has_any(&["debris", "rags", "wipes", "absorbent", "ppe", "gloves"])
        },
    },
    // Sludges: keyword families
    FormRule {
        code: "504",
        description: "Metal hydroxide sludge",
        applies: |c| {
            c.is_state(PhysicalState::Sludge) && c.has_any(&["metal", "plating", "hydroxide"])
        },
    },
    FormRule {
        code: "604",
        description: "Paint sludge",
        applies: |c| c.is_state(PhysicalState::Sludge) && c.has_any(&["paint", "coating"]),
    },
    FormRule {
        code: "602",
        description: "Oily sludge",
        applies: |c| c.is_state(PhysicalState::Sludge) && c.has_any(&["oil", "petroleum"]),
    },
    // Fixed overrides
    FormRule {
        code: "999",
        description: "Plant trash",
        applies: |c| c.has_any(&["plant trash", "trash", "garbage", "refuse"]),
    },
    FormRule {
        code: "998",
        description: "Construction and demolition debris",
        applies: |c| c.has_any(&["construction debris", "demolition", "concrete", "drywall"]),
    },
    // Per-state defaults
    FormRule {
        code: "219",
        description: "Other organic liquid",
        applies: |c| c.is_state(PhysicalState::Liquid) && c.organic(),
    },
    FormRule {
        code: "119",
        description: "Other inorganic liquid",
        applies: |c| c.is_state(PhysicalState::Liquid),
    },
    FormRule {
        code: "419",
        description: "Other organic solid",
        applies: |c| c.is_state(PhysicalState::Solid) && c.organic(),
    },
    FormRule {
        code: "319",
        description: "Other inorganic solid",
        applies: |c| c.is_state(PhysicalState::Solid),
    },
    FormRule {
        code: "619",
        description: "Other organic sludge",
        applies: |c| c.is_state(PhysicalState::Sludge) && c.organic(),
    },
    FormRule {
        code: "519",
        description: "Other inorganic sludge",
        applies: |c| c.is_state(PhysicalState::Sludge),
    },
    // Fallback when the physical state is unmatched
    FormRule {
        code: "219",
        description: "Other organic waste, physical state unknown",
        applies: |c| c.organic(),
    },
    FormRule {
        code: "119",
        description: "Other inorganic waste, physical state unknown",
        applies: |_| true,
    },
];

/// Derive the 3-digit form code. Always terminates with a code.
pub fn generate_form_code(classification: &ClassificationResult, material: &Material) -> FormCode {
    let ctx = FormContext::new(classification, material);
    // The final rule matches unconditionally.
    let rule = FORM_RULES
        .iter()
        .find(|r| (r.applies)(&ctx))
        .unwrap_or(&FORM_RULES[FORM_RULES.len() - 1]);
    FormCode {
        code: rule.code.to_string(),
        description: rule.description.to_string(),
    }
}

/// Form-rule catalog for inspection tooling.
pub fn form_rule_catalog() -> Vec<(&'static str, &'static str)> {
    FORM_RULES.iter().map(|r| (r.code, r.description)).collect()
}

/// 8-character combined waste code with the default sequence 0001.
pub fn generate_full_waste_code(
    classification: &ClassificationResult,
    material: &Material,
) -> String {
    full_waste_code_with_sequence(classification, material, 1)
}

/// 8 characters: 4-digit sequence + 3-digit form code + hazard flag.
///
/// Flag: `H` when any federal waste code applies; `3` for plant trash and
/// construction debris; `1` for combustible (flash 60-93 C) or materials
/// with unclassifiable constituents; `2` otherwise.
pub fn full_waste_code_with_sequence(
    classification: &ClassificationResult,
    material: &Material,
    sequence: u32,
) -> String {
    let form = generate_form_code(classification, material);

    let combustible = material
        .flash_point_celsius
        .map(|fp| fp >= COMBUSTIBLE_FLASH_MIN_C && fp <= COMBUSTIBLE_FLASH_MAX_C)
        .unwrap_or(false);

    let flag = if !classification.waste_codes.is_empty() {
        'H'
    } else if form.code == "999" || form.code == "998" {
        '3'
    } else if combustible || !classification.unknown_chemicals.is_empty() {
        '1'
    } else {
        '2'
    };

    format!("{sequence:04}{}{flag}", form.code)
}

pub struct StateCodeRule {
    pub code: &'static str,
    pub description: &'static str,
    pub applies: fn(&FormContext) -> bool,
}

/// Additive state waste-code rules (California-style). All matching rules
/// contribute; duplicates are dropped, first-match order preserved.
pub const STATE_CODE_RULES: &[StateCodeRule] = &[
    StateCodeRule {
        code: "211",
        description: "Halogenated solvents",
        applies: |c| c.organic() && c.solventish() && c.halogenated(),
    },
    StateCodeRule {
        code: "212",
        description: "Oxygenated solvents",
        applies: |c| {
            c.has_any(&[
                "acetone", "alcohol", "ethanol", "methanol", "isopropanol", "ketone", "ester",
                "acetate", "glycol",
            ])
        },
    },
    StateCodeRule {
        code: "213",
        description: "Hydrocarbon solvents",
        applies: |c| {
            c.has_any(&[
                "toluene", "xylene", "benzene", "naphtha", "mineral spirits", "hexane",
                "petroleum distillate",
            ])
        },
    },
    StateCodeRule {
        code: "214",
        description: "Unspecified solvent mixture",
        applies: |c| {
            c.has_any(&["solvent"])
                && !c.halogenated()
                && !c.has_any(&[
                    "acetone", "alcohol", "ethanol", "methanol", "isopropanol", "ketone", "ester",
                    "acetate", "glycol", "toluene", "xylene", "benzene", "naphtha",
                    "mineral spirits", "hexane", "petroleum distillate",
                ])
        },
    },
    StateCodeRule {
        code: "791",
        description: "Liquids with pH <= 2",
        applies: |c| {
            c.material
                .ph
                .map(|ph| ph <= PH_ACID_MAX)
                .unwrap_or(false)
        },
    },
    StateCodeRule {
        code: "122",
        description: "Alkaline solution (pH >= 12.5) with metals",
        applies: |c| {
            c.material
                .ph
                .map(|ph| ph >= PH_ALKALINE_MIN)
                .unwrap_or(false)
                && c.has_metal_codes()
        },
    },
    StateCodeRule {
        code: "123",
        description: "Unspecified alkaline solution (pH >= 12.5)",
        applies: |c| {
            c.material
                .ph
                .map(|ph| ph >= PH_ALKALINE_MIN)
                .unwrap_or(false)
                && !c.has_metal_codes()
        },
    },
    StateCodeRule {
        code: "551",
        description: "Laboratory waste chemicals",
        applies: |c| c.has_any(&["laboratory", "lab pack", "lab chemicals"]),
    },
    StateCodeRule {
        code: "221",
        description: "Waste oil and mixed oil",
        applies: |c| c.has_any(&["waste oil", "used oil", "motor oil", "lubricant"]),
    },
    StateCodeRule {
        code: "611",
        description: "Contaminated soil",
        applies: |c| c.has_any(&["contaminated soil", "soil"]),
    },
    StateCodeRule {
        code: "132",
        description: "Aqueous waste with metals",
        applies: |c| c.has_any(&["aqueous", "water"]) && c.has_metal_codes(),
    },
    StateCodeRule {
        code: "134",
        description: "Aqueous waste with organic residues",
        applies: |c| c.has_any(&["aqueous", "water"]) && c.organic() && !c.has_metal_codes(),
    },
    StateCodeRule {
        code: "135",
        description: "Unspecified aqueous waste",
        applies: |c| c.has_any(&["aqueous", "water"]) && !c.organic() && !c.has_metal_codes(),
    },
    StateCodeRule {
        code: "331",
        description: "Off-specification, aged, or surplus organics",
        applies: |c| {
            c.organic() && c.has_any(&["off-spec", "expired", "surplus", "outdated", "aged"])
        },
    },
];

/// Derive applicable state waste codes.
pub fn generate_state_codes(
    classification: &ClassificationResult,
    material: &Material,
) -> Vec<String> {
    let ctx = FormContext::new(classification, material);
    let mut codes = Vec::new();
    for rule in STATE_CODE_RULES {
        if (rule.applies)(&ctx) && !codes.iter().any(|c| c == rule.code) {
            codes.push(rule.code.to_string());
        }
    }
    codes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::engine::classify;
    use crate::model::ChemicalConstituent;
    use crate::regulatory::index::RegulatoryIndex;
    use rust_decimal_macros::dec;

    fn material(name: &str, state: Option<PhysicalState>) -> Material {
        Material {
            product_name: name.into(),
            physical_state: state,
            ..Material::default()
        }
    }

    fn empty_classification() -> ClassificationResult {
        ClassificationResult::empty("test")
    }

    #[test]
    fn test_organic_default_bias() {
        // No indicators at all: organic.
        assert!(is_organic_compound(&material("Mystery waste", None)));
        // A couple of inorganic indicators are not enough to flip.
        assert!(is_organic_compound(&material(
            "Sodium hydroxide solution",
            None
        )));
    }

    #[test]
    fn test_inorganic_flip_needs_three_votes_and_no_organic() {
        // Three inorganic indicators, zero organic: inorganic.
        assert!(!is_organic_compound(&material(
            "Ammonium sulfate nitrate fertilizer",
            None
        )));
        // Same indicators plus one organic keyword stays organic.
        assert!(is_organic_compound(&material(
            "Ammonium sulfate nitrate in glycol carrier",
            None
        )));
    }

    #[test]
    fn test_solvent_form_codes() {
        let c = empty_classification();
        let m = material("Waste solvent drum", Some(PhysicalState::Liquid));
        assert_eq!(generate_form_code(&c, &m).code, "203");

        let m = material(
            "Chlorinated solvent still bottoms",
            Some(PhysicalState::Liquid),
        );
        assert_eq!(generate_form_code(&c, &m).code, "201");
    }

    #[test]
    fn test_other_organic_liquid_default() {
        let c = empty_classification();
        let m = Material {
            product_name: "Acetone".into(),
            physical_state: Some(PhysicalState::Liquid),
            ..Material::default()
        };
        assert_eq!(generate_form_code(&c, &m).code, "219");
    }

    #[test]
    fn test_lab_pack_wins_over_state_branch() {
        let c = empty_classification();
        let m = material("Mixed laboratory chemicals", Some(PhysicalState::Liquid));
        assert_eq!(generate_form_code(&c, &m).code, "003");
    }

    #[test]
    fn test_lab_pack_by_composition_size() {
        let c = empty_classification();
        let mut m = material("Bench reagents", Some(PhysicalState::Liquid));
        m.composition = (0..4)
            .map(|i| ChemicalConstituent {
                name: format!("reagent {i}"),
                cas_number: None,
                percentage: None,
            })
            .collect();
        assert_eq!(generate_form_code(&c, &m).code, "003");
    }

    #[test]
    fn test_gas_split_on_organic() {
        let c = empty_classification();
        let m = material("Propane vapor", Some(PhysicalState::Gas));
        // "propane" carries no indicator; organic default applies.
        assert_eq!(generate_form_code(&c, &m).code, "801");

        let m = material(
            "Ammonium chloride sodium fume",
            Some(PhysicalState::Gas),
        );
        assert_eq!(generate_form_code(&c, &m).code, "701");
    }

    #[test]
    fn test_overrides_beat_state_defaults() {
        let c = empty_classification();
        let m = material("Plant trash", Some(PhysicalState::Solid));
        assert_eq!(generate_form_code(&c, &m).code, "999");

        let m = material("Construction debris, concrete", Some(PhysicalState::Solid));
        // "debris" also matches the solid-debris rule earlier in the list.
        assert_eq!(generate_form_code(&c, &m).code, "402");

        let m = material("Demolition concrete", Some(PhysicalState::Solid));
        assert_eq!(generate_form_code(&c, &m).code, "998");
    }

    #[test]
    fn test_unknown_state_fallback() {
        let c = empty_classification();
        let m = material("Mystery organic residue", None);
        assert_eq!(generate_form_code(&c, &m).code, "219");

        let m = material("Sodium potassium chloride residue", None);
        assert_eq!(generate_form_code(&c, &m).code, "119");
    }

    #[test]
    fn test_full_waste_code_shape_and_flag() {
        let index = RegulatoryIndex::builtin().unwrap();
        let m = Material {
            product_name: "Waste acetone solvent".into(),
            physical_state: Some(PhysicalState::Liquid),
            composition: vec![ChemicalConstituent {
                name: "Acetone".into(),
                cas_number: Some("67-64-1".into()),
                percentage: Some("100%".into()),
            }],
            ..Material::default()
        };
        let c = classify(&m.composition, &index);
        let full = generate_full_waste_code(&c, &m);
        assert_eq!(full.len(), 8);
        assert_eq!(full, "0001203H");

        // No codes, no flash point, nothing unknown -> class 2.
        let c = empty_classification();
        let m = material("Rinse water", Some(PhysicalState::Liquid));
        let full = generate_full_waste_code(&c, &m);
        assert!(full.ends_with('2'));
    }

    #[test]
    fn test_combustible_flag() {
        let c = empty_classification();
        let m = Material {
            product_name: "High flash wash".into(),
            physical_state: Some(PhysicalState::Liquid),
            flash_point_celsius: Some(dec!(70)),
            ..Material::default()
        };
        assert!(generate_full_waste_code(&c, &m).ends_with('1'));
    }

    #[test]
    fn test_sequence_override() {
        let c = empty_classification();
        let m = material("Rinse water", Some(PhysicalState::Liquid));
        let full = full_waste_code_with_sequence(&c, &m, 17);
        assert!(full.starts_with("0017"));
        assert_eq!(full.len(), 8);
    }

    #[test]
    fn test_state_codes_additive_and_deduplicated() {
        let c = empty_classification();
        let m = Material {
            product_name: "Laboratory acetone and toluene solvent blend".into(),
            physical_state: Some(PhysicalState::Liquid),
            ..Material::default()
        };
        let codes = generate_state_codes(&c, &m);
        assert_eq!(codes, vec!["212", "213", "551"]);
    }

    #[test]
    fn test_state_code_ph_bands() {
        let index = RegulatoryIndex::builtin().unwrap();
        let m = Material {
            product_name: "Spent etch bath".into(),
            ph: Some(dec!(1.0)),
            ..Material::default()
        };
        let c = classify(&m.composition, &index);
        assert!(generate_state_codes(&c, &m).contains(&"791".to_string()));

        let m = Material {
            product_name: "Caustic wash".into(),
            ph: Some(dec!(13)),
            ..Material::default()
        };
        let c = classify(&m.composition, &index);
        assert!(generate_state_codes(&c, &m).contains(&"123".to_string()));
    }
}
