//! Calibrated rule tables, one per category.
//!
//! Each rule adds its weight when its predicate holds. Rules are independent:
//! there is no early exit and an image may satisfy rules of several
//! categories at once. Thresholds are on the 8-bit scales described in
//! [`crate::types::FeatureVector`].

use catalog::WasteCategory;

use crate::types::Evidence;

/// A weighted predicate over the evidence of one image
#[derive(Clone, Copy)]
pub struct Rule {
    pub label: &'static str,
    pub weight: u32,
    pub applies: fn(&Evidence) -> bool,
}

impl Rule {
    /// The rule's weight if it fires, otherwise 0
    pub fn score(&self, evidence: &Evidence) -> u32 {
        if (self.applies)(evidence) { self.weight } else { 0 }
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("label", &self.label)
            .field("weight", &self.weight)
            .finish()
    }
}

/// Landfill's residual bonus is granted only while every other score is below this
pub const LANDFILL_RESIDUAL_THRESHOLD: u32 = 65;
/// Points for a landfill residual
pub const LANDFILL_RESIDUAL_BONUS: u32 = 50;

fn between(value: f64, low: f64, high: f64) -> bool {
    (low..=high).contains(&value)
}

fn near_neutral(channel: f64, tolerance: f64) -> bool {
    (channel - 128.0).abs() < tolerance
}

pub static PAPER: [Rule; 7] = [
    Rule {
        label: "warm or magenta hue",
        weight: 25,
        applies: |e: &Evidence| between(e.features.avg_hue, 10.0, 30.0) || between(e.features.avg_hue, 150.0, 180.0),
    },
    Rule {
        label: "mid brightness",
        weight: 20,
        applies: |e: &Evidence| between(e.features.avg_brightness, 80.0, 200.0),
    },
    Rule { label: "muted color", weight: 15, applies: |e: &Evidence| e.features.avg_saturation < 80.0 },
    Rule { label: "fibrous edges", weight: 15, applies: |e: &Evidence| e.features.edge_density > 0.08 },
    Rule { label: "neutral green-red axis", weight: 10, applies: |e: &Evidence| near_neutral(e.features.avg_a, 15.0) },
    Rule { label: "soft texture", weight: 10, applies: |e: &Evidence| e.features.texture_sharpness < 100.0 },
    Rule { label: "even color", weight: 5, applies: |e: &Evidence| e.features.color_uniformity > 0.7 },
];

pub static PLASTIC: [Rule; 7] = [
    Rule { label: "saturated color", weight: 20, applies: |e: &Evidence| e.features.avg_saturation > 60.0 },
    Rule { label: "steady brightness", weight: 20, applies: |e: &Evidence| e.features.std_brightness < 40.0 },
    Rule { label: "smooth surface", weight: 15, applies: |e: &Evidence| e.features.edge_density < 0.12 },
    Rule { label: "bright", weight: 15, applies: |e: &Evidence| e.features.avg_brightness > 120.0 },
    Rule {
        label: "blue or red dominant",
        weight: 15,
        applies: |e: &Evidence| e.features.blue_ratio > 0.4 || e.features.red_ratio > 0.4,
    },
    Rule { label: "rounded outline", weight: 10, applies: |e: &Evidence| e.shape.circularity > 0.6 },
    Rule { label: "very even color", weight: 5, applies: |e: &Evidence| e.features.color_uniformity > 0.8 },
];

pub static GLASS: [Rule; 6] = [
    Rule { label: "very bright", weight: 25, applies: |e: &Evidence| e.features.avg_brightness > 160.0 },
    Rule { label: "specular highlights", weight: 25, applies: |e: &Evidence| e.features.std_brightness > 50.0 },
    Rule { label: "colorless", weight: 20, applies: |e: &Evidence| e.features.avg_saturation < 40.0 },
    Rule { label: "few edges", weight: 15, applies: |e: &Evidence| e.features.edge_density < 0.08 },
    Rule { label: "sharp reflections", weight: 10, applies: |e: &Evidence| e.features.texture_sharpness > 200.0 },
    Rule { label: "low co-occurrence contrast", weight: 5, applies: |e: &Evidence| e.texture.cooccurrence.contrast < 0.1 },
];

pub static METAL: [Rule; 6] = [
    Rule {
        label: "neutral opponent channels",
        weight: 25,
        applies: |e: &Evidence| near_neutral(e.features.avg_a, 20.0) && near_neutral(e.features.avg_b, 20.0),
    },
    Rule { label: "bright", weight: 20, applies: |e: &Evidence| e.features.avg_brightness > 130.0 },
    Rule { label: "reflective contrast", weight: 20, applies: |e: &Evidence| e.features.std_brightness > 40.0 },
    Rule { label: "low saturation", weight: 15, applies: |e: &Evidence| e.features.avg_saturation < 60.0 },
    Rule { label: "crisp texture", weight: 10, applies: |e: &Evidence| e.features.texture_sharpness > 150.0 },
    Rule { label: "regular micro-pattern", weight: 10, applies: |e: &Evidence| e.texture.lbp_dispersion < 0.02 },
];

pub static FOOD: [Rule; 7] = [
    Rule {
        label: "organic hue",
        weight: 20,
        applies: |e: &Evidence| between(e.features.avg_hue, 5.0, 50.0) || between(e.features.avg_hue, 150.0, 180.0),
    },
    Rule {
        label: "moderate saturation",
        weight: 20,
        applies: |e: &Evidence| e.features.avg_saturation > 50.0 && e.features.avg_saturation < 180.0,
    },
    Rule {
        label: "moderate brightness",
        weight: 15,
        applies: |e: &Evidence| e.features.avg_brightness > 60.0 && e.features.avg_brightness < 190.0,
    },
    Rule { label: "irregular edges", weight: 15, applies: |e: &Evidence| e.features.edge_density > 0.15 },
    Rule { label: "varied hue", weight: 15, applies: |e: &Evidence| e.features.std_hue > 20.0 },
    Rule { label: "many outlines", weight: 10, applies: |e: &Evidence| e.shape.complexity > 0.3 },
    Rule { label: "busy histogram", weight: 5, applies: |e: &Evidence| e.features.entropy > 4.0 },
];

pub static YARD: [Rule; 5] = [
    Rule { label: "green hue", weight: 30, applies: |e: &Evidence| between(e.features.avg_hue, 35.0, 90.0) },
    Rule { label: "green dominant", weight: 25, applies: |e: &Evidence| e.features.green_ratio > 0.4 },
    Rule {
        label: "natural saturation",
        weight: 20,
        applies: |e: &Evidence| e.features.avg_saturation > 50.0 && e.features.avg_saturation < 200.0,
    },
    Rule { label: "leafy edges", weight: 15, applies: |e: &Evidence| e.features.edge_density > 0.18 },
    Rule { label: "varied green", weight: 10, applies: |e: &Evidence| e.features.std_green > 20.0 },
];

pub static HAZARDOUS: [Rule; 6] = [
    Rule {
        label: "warning hue",
        weight: 25,
        applies: |e: &Evidence| between(e.features.avg_hue, 0.0, 15.0) || between(e.features.avg_hue, 160.0, 180.0),
    },
    Rule { label: "vivid color", weight: 20, applies: |e: &Evidence| e.features.avg_saturation > 120.0 },
    Rule { label: "red dominant", weight: 20, applies: |e: &Evidence| e.features.red_ratio > 0.4 },
    Rule { label: "printed labels", weight: 15, applies: |e: &Evidence| e.features.edge_density > 0.2 },
    Rule { label: "varied red", weight: 10, applies: |e: &Evidence| e.features.std_red > 25.0 },
    Rule { label: "mixed colors", weight: 10, applies: |e: &Evidence| e.features.color_uniformity < 0.6 },
];

pub static E_WASTE: [Rule; 7] = [
    Rule { label: "dark", weight: 25, applies: |e: &Evidence| e.features.avg_brightness < 120.0 },
    Rule { label: "low saturation", weight: 20, applies: |e: &Evidence| e.features.avg_saturation < 70.0 },
    Rule { label: "dense circuitry edges", weight: 20, applies: |e: &Evidence| e.features.edge_density > 0.25 },
    Rule { label: "neutral green-red axis", weight: 15, applies: |e: &Evidence| near_neutral(e.features.avg_a, 25.0) },
    Rule { label: "component contrast", weight: 15, applies: |e: &Evidence| e.features.std_brightness > 35.0 },
    Rule { label: "many parts", weight: 10, applies: |e: &Evidence| e.shape.complexity > 0.5 },
    Rule { label: "irregular micro-pattern", weight: 5, applies: |e: &Evidence| e.texture.lbp_dispersion > 0.03 },
];

/// Landfill's feature rules; the residual bonus is applied separately
pub static LANDFILL: [Rule; 3] = [
    Rule {
        label: "middling color and brightness",
        weight: 20,
        applies: |e: &Evidence| {
            let f = &e.features;
            f.avg_saturation > 40.0 && f.avg_saturation < 130.0 && f.avg_brightness > 70.0 && f.avg_brightness < 170.0
        },
    },
    Rule {
        label: "plain and even",
        weight: 15,
        applies: |e: &Evidence| e.features.entropy < 3.0 && e.features.color_uniformity > 0.6,
    },
    Rule { label: "dull texture", weight: 15, applies: |e: &Evidence| e.features.texture_sharpness < 50.0 },
];

/// Rule table of a category
pub fn rules_for(category: WasteCategory) -> &'static [Rule] {
    match category {
        WasteCategory::RecyclablePaper => &PAPER,
        WasteCategory::RecyclablePlastic => &PLASTIC,
        WasteCategory::RecyclableGlass => &GLASS,
        WasteCategory::RecyclableMetal => &METAL,
        WasteCategory::OrganicFood => &FOOD,
        WasteCategory::OrganicYard => &YARD,
        WasteCategory::Hazardous => &HAZARDOUS,
        WasteCategory::EWaste => &E_WASTE,
        WasteCategory::LandfillGeneral => &LANDFILL,
    }
}

/// Sum of the weights of the rules that fire
pub fn evaluate(rules: &[Rule], evidence: &Evidence) -> u32 {
    rules.iter().map(|rule| rule.score(evidence)).sum()
}
