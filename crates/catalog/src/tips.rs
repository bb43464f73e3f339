use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::CategoryInfo;

/// Tip prepended when the classification is uncertain
pub const LOW_CONFIDENCE_TIP: &str =
    "Classification confidence is low: double-check your local disposal rules";

/// How many eco-tips to return and when to flag a low-confidence result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TipPolicy {
    /// Maximum number of tips returned
    pub count: usize,
    /// Confidence below which [`LOW_CONFIDENCE_TIP`] leads the list
    pub low_confidence_threshold: f64,
}

impl Default for TipPolicy {
    fn default() -> Self {
        Self {
            count: 3,
            low_confidence_threshold: 0.6,
        }
    }
}

/// Pick the eco-tips shown for a category at a given confidence.
///
/// The category's own tips are taken in catalog order. Below the policy's
/// threshold the low-confidence tip comes first; the list never exceeds
/// `policy.count`.
pub fn select_eco_tips(info: &CategoryInfo, confidence: f64, policy: &TipPolicy) -> Vec<String> {
    let mut tips = Vec::with_capacity(policy.count);
    if confidence < policy.low_confidence_threshold {
        tips.push(LOW_CONFIDENCE_TIP.to_string());
    }
    tips.extend(info.eco_tips.iter().cloned());
    tips.truncate(policy.count);
    tips
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info_with_tips(tips: &[&str]) -> CategoryInfo {
        CategoryInfo {
            name: "Test".to_string(),
            subcategories: vec![],
            disposal_instructions: String::new(),
            recycling_code: String::new(),
            contamination_warnings: vec![],
            eco_tips: tips.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_confident_result_uses_category_tips() {
        let info = info_with_tips(&["a", "b", "c", "d"]);
        let tips = select_eco_tips(&info, 0.9, &TipPolicy::default());
        assert_eq!(tips, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_low_confidence_tip_leads() {
        let info = info_with_tips(&["a", "b", "c"]);
        let tips = select_eco_tips(&info, 0.45, &TipPolicy::default());
        assert_eq!(tips.len(), 3);
        assert_eq!(tips[0], LOW_CONFIDENCE_TIP);
        assert_eq!(tips[1], "a");
    }

    #[test]
    fn test_zero_count_returns_nothing() {
        let info = info_with_tips(&["a"]);
        let policy = TipPolicy { count: 0, ..TipPolicy::default() };
        assert!(select_eco_tips(&info, 0.4, &policy).is_empty());
    }
}
