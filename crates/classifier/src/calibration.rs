use catalog::WasteCategory;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::scoring::ScoreMap;

pub const MIN_CONFIDENCE: f64 = 0.4;
pub const MAX_CONFIDENCE: f64 = 0.92;
/// Score treated as full certainty before clamping
pub const MAX_POSSIBLE_SCORE: f64 = 100.0;
/// Margin that would earn a full point of boost
pub const MARGIN_SCALE: f64 = 50.0;
pub const MAX_MARGIN_BOOST: f64 = 0.15;

/// The chosen category and how sure we are about it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Calibration {
    pub category: WasteCategory,
    /// Always within `[MIN_CONFIDENCE, MAX_CONFIDENCE]`
    pub confidence: f64,
    pub best_score: u32,
    /// Best score minus the runner-up's
    pub margin: u32,
}

impl Calibration {
    /// Result for an empty score set
    pub fn fallback() -> Self {
        Self {
            category: WasteCategory::FALLBACK,
            confidence: MIN_CONFIDENCE,
            best_score: 0,
            margin: 0,
        }
    }
}

/// Pick the winning category of a score map and calibrate its confidence
pub fn calibrate(scores: &ScoreMap) -> Calibration {
    calibrate_entries(scores.iter())
}

/// Calibrate an arbitrary set of category scores.
///
/// The highest score wins; an exact tie goes to the category declared first.
/// Base confidence is `best / 100` held to `[0.4, 0.92]`, then boosted by
/// `min(margin / 50, 0.15)` and clamped to the same range again. An empty
/// input yields the landfill fallback at minimum confidence.
pub fn calibrate_entries<I>(entries: I) -> Calibration
where
    I: IntoIterator<Item = (WasteCategory, u32)>,
{
    let entries: Vec<(WasteCategory, u32)> = entries.into_iter().collect();
    let Some(&(category, best_score)) = entries
        .iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
    else {
        return Calibration::fallback();
    };

    let runner_up = entries
        .iter()
        .filter(|(other, _)| *other != category)
        .map(|(_, score)| *score)
        .max()
        .unwrap_or(0);
    let margin = best_score.saturating_sub(runner_up);

    let base = (f64::from(best_score) / MAX_POSSIBLE_SCORE)
        .min(MAX_CONFIDENCE)
        .max(MIN_CONFIDENCE);
    let boost = (f64::from(margin) / MARGIN_SCALE).min(MAX_MARGIN_BOOST);
    let confidence = (base + boost).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE);

    Calibration { category, confidence, best_score, margin }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::WasteCategory::*;

    fn map(entries: &[(WasteCategory, u32)]) -> ScoreMap {
        let mut scores = ScoreMap::default();
        for &(category, score) in entries {
            scores.set(category, score);
        }
        scores
    }

    #[test]
    fn test_clear_winner() {
        let result = calibrate(&map(&[(RecyclablePaper, 70), (RecyclablePlastic, 90), (OrganicFood, 55)]));
        assert_eq!(result.category, RecyclablePlastic);
        assert_eq!(result.best_score, 90);
        assert_eq!(result.margin, 20);
        assert!((result.confidence - 0.92).abs() < 1e-12);
    }

    #[test]
    fn test_boost_is_capped() {
        let result = calibrate(&map(&[(RecyclablePlastic, 75), (EWaste, 45)]));
        // 0.75 + min(30 / 50, 0.15)
        assert!((result.confidence - 0.90).abs() < 1e-12, "{result:?}");
    }

    #[test]
    fn test_low_scores_are_floored() {
        let result = calibrate(&map(&[(OrganicYard, 20), (Hazardous, 15)]));
        assert_eq!(result.category, OrganicYard);
        // 0.4 floor + 5 / 50
        assert!((result.confidence - 0.5).abs() < 1e-12, "{result:?}");
    }

    #[test]
    fn test_tie_goes_to_earlier_category() {
        let result = calibrate(&map(&[(OrganicYard, 75), (RecyclablePlastic, 75), (LandfillGeneral, 30)]));
        assert_eq!(result.category, RecyclablePlastic);
        assert_eq!(result.margin, 0);
        assert!((result.confidence - 0.75).abs() < 1e-12);

        // order of the input does not matter
        let reversed = calibrate_entries([(OrganicYard, 75), (RecyclablePlastic, 75)]);
        assert_eq!(reversed.category, RecyclablePlastic);
    }

    #[test]
    fn test_all_zero_picks_first_category() {
        let result = calibrate(&ScoreMap::default());
        assert_eq!(result.category, RecyclablePaper);
        assert_eq!(result.confidence, MIN_CONFIDENCE);
    }

    #[test]
    fn test_empty_input_falls_back_to_landfill() {
        let result = calibrate_entries(std::iter::empty());
        assert_eq!(result, Calibration::fallback());
        assert_eq!(result.category, LandfillGeneral);
        assert_eq!(result.confidence, 0.4);
    }

    #[test]
    fn test_single_entry_uses_zero_runner_up() {
        let result = calibrate_entries([(RecyclableGlass, 60)]);
        assert_eq!(result.margin, 60);
        assert!((result.confidence - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_confidence_never_drops_as_margin_grows() {
        let mut previous = 0.0;
        for runner_up in (0..80).rev() {
            let result = calibrate(&map(&[(RecyclableMetal, 80), (RecyclableGlass, runner_up)]));
            assert_eq!(result.category, RecyclableMetal);
            assert!(result.confidence >= previous, "runner-up {runner_up}: {result:?}");
            previous = result.confidence;
        }
    }

    #[test]
    fn test_confidence_stays_in_bounds() {
        for best in [0, 1, 39, 40, 41, 65, 92, 100, 110, 500] {
            for other in [0, best / 2, best] {
                let result = calibrate(&map(&[(RecyclableMetal, best), (OrganicFood, other)]));
                assert!((MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&result.confidence), "{result:?}");
            }
        }
    }
}
