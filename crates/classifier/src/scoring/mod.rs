pub mod rules;

use catalog::WasteCategory;
use serde::{ser::SerializeMap, Serialize, Serializer};
use strum::{EnumCount, IntoEnumIterator};

use crate::types::Evidence;
use rules::{evaluate, rules_for, LANDFILL_RESIDUAL_BONUS, LANDFILL_RESIDUAL_THRESHOLD};

/// Raw score of every category, always all nine keys.
///
/// Iteration and serialization follow category priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreMap {
    scores: [u32; WasteCategory::COUNT],
}

impl ScoreMap {
    pub fn get(&self, category: WasteCategory) -> u32 {
        self.scores[category.index()]
    }

    pub fn set(&mut self, category: WasteCategory, score: u32) {
        self.scores[category.index()] = score;
    }

    pub fn iter(&self) -> impl Iterator<Item = (WasteCategory, u32)> + '_ {
        WasteCategory::iter().map(|category| (category, self.get(category)))
    }
}

impl Serialize for ScoreMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(WasteCategory::COUNT))?;
        for (category, score) in self.iter() {
            map.serialize_entry(category.key(), &score)?;
        }
        map.end()
    }
}

/// Score all nine categories against the evidence of one image.
///
/// Every category except landfill is scored from its own rule table. Landfill
/// then gets its residual bonus when no other category reached the residual
/// threshold, plus its own feature rules.
pub fn score_categories(evidence: &Evidence) -> ScoreMap {
    let mut scores = ScoreMap::default();
    for category in WasteCategory::iter().filter(|c| *c != WasteCategory::LandfillGeneral) {
        scores.set(category, evaluate(rules_for(category), evidence));
    }

    let residual = scores
        .iter()
        .filter(|(category, _)| *category != WasteCategory::LandfillGeneral)
        .all(|(_, score)| score < LANDFILL_RESIDUAL_THRESHOLD);
    let landfill = evaluate(rules_for(WasteCategory::LandfillGeneral), evidence)
        + if residual { LANDFILL_RESIDUAL_BONUS } else { 0 };
    scores.set(WasteCategory::LandfillGeneral, landfill);

    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FeatureVector, TextureDescriptors, TexturePair};

    /// Evidence of a flat single-color 224x224 image, given its 8-bit statistics
    fn flat(rgb: [f64; 3], hsv: [f64; 3], gray: f64, lab: [f64; 3]) -> Evidence {
        let [r, g, b] = rgb;
        let eps = 1e-10;
        Evidence {
            features: FeatureVector {
                avg_hue: hsv[0],
                avg_saturation: hsv[1],
                avg_value: hsv[2],
                avg_l: lab[0],
                avg_a: lab[1],
                avg_b: lab[2],
                avg_red: r,
                avg_green: g,
                avg_blue: b,
                avg_brightness: gray,
                red_ratio: r / (g + b + eps),
                green_ratio: g / (r + b + eps),
                blue_ratio: b / (r + g + eps),
                color_uniformity: 1.0,
                ..Default::default()
            },
            shape: Default::default(),
            texture: TextureDescriptors {
                cooccurrence: TexturePair { contrast: 0.0, homogeneity: 1.0 },
                lbp_dispersion: 0.0624,
            },
        }
    }

    fn expect(scores: &ScoreMap, expected: [u32; 9]) {
        let actual: Vec<u32> = scores.iter().map(|(_, s)| s).collect();
        assert_eq!(actual, expected.to_vec());
    }

    #[test]
    fn test_flat_tan_scores() {
        let scores = score_categories(&flat([210.0, 180.0, 139.0], [17.0, 86.0, 210.0], 184.0, [191.0, 133.0, 153.0]));
        // paper, plastic, glass, metal, food, yard, hazardous, e-waste, landfill
        expect(&scores, [70, 90, 45, 20, 55, 45, 20, 20, 30]);
    }

    #[test]
    fn test_flat_blue_scores() {
        let scores = score_categories(&flat([50.0, 100.0, 200.0], [110.0, 191.0, 200.0], 96.0, [113.0, 146.0, 71.0]));
        expect(&scores, [35, 75, 20, 0, 15, 20, 20, 45, 30]);
    }

    #[test]
    fn test_flat_white_scores() {
        let scores = score_categories(&flat([240.0; 3], [0.0, 0.0, 240.0], 240.0, [243.0, 128.0, 128.0]));
        expect(&scores, [40, 70, 65, 60, 0, 25, 45, 40, 30]);
    }

    #[test]
    fn test_flat_gray_scores() {
        let scores = score_categories(&flat([150.0; 3], [0.0, 0.0, 150.0], 150.0, [158.0, 128.0, 128.0]));
        expect(&scores, [60, 70, 40, 60, 15, 25, 45, 40, 30]);
    }

    #[test]
    fn test_landfill_residual_bonus() {
        // a dark, busy, mid-saturated image keeps every other category below 65
        let mut evidence = Evidence::default();
        evidence.features.avg_hue = 100.0;
        evidence.features.avg_saturation = 100.0;
        evidence.features.avg_brightness = 110.0;
        evidence.features.std_brightness = 30.0;
        evidence.features.avg_a = 160.0;
        evidence.features.edge_density = 0.1;
        evidence.features.texture_sharpness = 120.0;
        evidence.features.entropy = 5.0;
        evidence.features.color_uniformity = 0.5;
        evidence.texture.lbp_dispersion = 0.025;

        let scores = score_categories(&evidence);
        assert!(scores.iter().filter(|(c, _)| *c != WasteCategory::LandfillGeneral).all(|(_, s)| s < 65), "{scores:?}");
        assert_eq!(scores.get(WasteCategory::LandfillGeneral), 50 + 20);
    }

    #[test]
    fn test_score_map_serializes_in_priority_order() {
        let mut scores = ScoreMap::default();
        scores.set(WasteCategory::EWaste, 40);
        let json = serde_json::to_string(&scores).unwrap();
        assert!(json.starts_with("{\"recyclable_paper\":0,"));
        assert!(json.contains("\"e_waste\":40"));
        assert!(json.ends_with("\"landfill_general\":0}"));
    }
}
