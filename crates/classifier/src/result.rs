use std::collections::BTreeMap;

use catalog::{CategoryInfo, WasteCategory};
use schemars::JsonSchema;
use serde::Serialize;

use crate::{calibration::Calibration, scoring::ScoreMap, types::Evidence};

/// Category key reported when classification failed
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Round to two decimals for display
pub fn round_confidence(confidence: f64) -> f64 {
    (confidence * 100.0).round() / 100.0
}

/// Everything computed for one image before catalog enrichment
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Analysis {
    #[serde(flatten)]
    pub evidence: Evidence,
    pub scores: ScoreMap,
    pub calibration: Calibration,
}

/// A successful classification with its catalog metadata
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ClassificationResult {
    pub waste_type: WasteCategory,
    pub category_name: String,
    /// Calibrated confidence, rounded to two decimals
    pub confidence: f64,
    pub subcategories: Vec<String>,
    pub disposal_instructions: String,
    pub recycling_code: String,
    pub eco_tips: Vec<String>,
    pub contamination_warnings: Vec<String>,
    /// Raw rule score of every category
    #[schemars(with = "BTreeMap<String, u32>")]
    pub scores: ScoreMap,
}

impl ClassificationResult {
    pub fn new(
        category: WasteCategory,
        confidence: f64,
        info: &CategoryInfo,
        eco_tips: Vec<String>,
        scores: ScoreMap,
    ) -> Self {
        Self {
            waste_type: category,
            category_name: info.name.clone(),
            confidence: round_confidence(confidence),
            subcategories: info.subcategories.clone(),
            disposal_instructions: info.disposal_instructions.clone(),
            recycling_code: info.recycling_code.clone(),
            eco_tips,
            contamination_warnings: info.contamination_warnings.clone(),
            scores,
        }
    }
}

/// Error record returned in place of a result
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct FailedClassification {
    pub error: String,
    /// Always `"unknown"`
    pub category: String,
    /// Always 0
    pub confidence: f64,
}

impl FailedClassification {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            category: UNKNOWN_CATEGORY.to_string(),
            confidence: 0.0,
        }
    }
}

/// Outcome of a classification that never fails
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum ClassificationReport {
    Classified(ClassificationResult),
    Failed(FailedClassification),
}

impl ClassificationReport {
    pub fn is_classified(&self) -> bool {
        matches!(self, Self::Classified(_))
    }

    pub fn confidence(&self) -> f64 {
        match self {
            Self::Classified(result) => result.confidence,
            Self::Failed(failed) => failed.confidence,
        }
    }

    /// Category key, or `"unknown"` for a failure
    pub fn category_key(&self) -> &str {
        match self {
            Self::Classified(result) => result.waste_type.key(),
            Self::Failed(failed) => &failed.category,
        }
    }
}
