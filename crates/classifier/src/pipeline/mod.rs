pub mod builder;

use std::panic::{self, AssertUnwindSafe};

use catalog::{CategoryCatalog, WasteCategory};
use image::{DynamicImage, RgbImage};
use tracing::{debug, warn};

use crate::{
    calibration::calibrate,
    config::ClassifierConfig,
    error::{ClassifyError, Result},
    result::{Analysis, ClassificationReport, ClassificationResult, FailedClassification},
    scoring::score_categories,
    traits::{FeatureExtractor, ShapeAnalyzer, TextureAnalyzer},
    types::{Evidence, PreparedImage},
};

/// The classification pipeline: prepare once, run the three analysis
/// stages, score, calibrate, then enrich from a catalog.
///
/// A pipeline holds no per-call state and can be shared between threads.
pub struct Pipeline {
    config: ClassifierConfig,
    feature_extractor: Box<dyn FeatureExtractor>,
    shape_analyzer: Box<dyn ShapeAnalyzer>,
    texture_analyzer: Box<dyn TextureAnalyzer>,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    /// Create a new pipeline with the given components
    pub fn new(
        config: ClassifierConfig,
        feature_extractor: Box<dyn FeatureExtractor>,
        shape_analyzer: Box<dyn ShapeAnalyzer>,
        texture_analyzer: Box<dyn TextureAnalyzer>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            feature_extractor,
            shape_analyzer,
            texture_analyzer,
        })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Resize, convert to grayscale and detect edges
    pub fn prepare(&self, image: &RgbImage) -> Result<PreparedImage> {
        PreparedImage::new(image, &self.config)
    }

    /// Run every stage up to and including calibration
    pub fn analyze(&self, image: &RgbImage) -> Result<Analysis> {
        let prepared = self.prepare(image)?;
        debug!(
            "Prepared {}x{} input as {}x{}",
            image.width(),
            image.height(),
            prepared.rgb.width(),
            prepared.rgb.height()
        );

        let features = self.feature_extractor.extract(&prepared)?;
        debug!(
            hue = features.avg_hue,
            saturation = features.avg_saturation,
            brightness = features.avg_brightness,
            edge_density = features.edge_density,
            "Extracted features"
        );

        let shape = self.shape_analyzer.analyze(&prepared)?;
        debug!(?shape, "Analyzed shape");

        let texture = self.texture_analyzer.analyze(&prepared)?;
        debug!(?texture, "Analyzed texture");

        let evidence = Evidence { features, shape, texture };
        let scores = score_categories(&evidence);
        let calibration = calibrate(&scores);
        debug!(
            category = %calibration.category,
            confidence = calibration.confidence,
            margin = calibration.margin,
            "Scored categories"
        );

        Ok(Analysis { evidence, scores, calibration })
    }

    /// Classify an image and attach the catalog entry of the winning category.
    ///
    /// A category missing from the catalog is reported as landfill; only a
    /// catalog without a landfill entry is an error.
    pub fn classify(&self, image: &DynamicImage, catalog: &dyn CategoryCatalog) -> Result<ClassificationResult> {
        let rgb = image.to_rgb8();
        let analysis = self.analyze(&rgb)?;
        let calibration = analysis.calibration;

        let (category, info) = match catalog.lookup(calibration.category) {
            Some(info) => (calibration.category, info),
            None => {
                warn!("Catalog has no entry for {}, reporting {}", calibration.category, WasteCategory::FALLBACK);
                let info = catalog.lookup(WasteCategory::FALLBACK).ok_or_else(|| ClassifyError::CatalogMiss {
                    category: calibration.category.to_string(),
                })?;
                (WasteCategory::FALLBACK, info)
            }
        };

        let eco_tips = catalog.eco_tips(category, calibration.confidence, &self.config.eco_tips);
        Ok(ClassificationResult::new(category, calibration.confidence, info, eco_tips, analysis.scores))
    }

    /// Classify without ever failing: errors and stage panics become an error record
    pub fn predict(&self, image: &DynamicImage, catalog: &dyn CategoryCatalog) -> ClassificationReport {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.classify(image, catalog)))
            .unwrap_or_else(|payload| Err(ClassifyError::StagePanic(panic_message(payload.as_ref()))));

        match outcome {
            Ok(result) => ClassificationReport::Classified(result),
            Err(err) => {
                warn!("Classification failed: {err}");
                ClassificationReport::Failed(FailedClassification::new(err.to_string()))
            }
        }
    }

    /// Get information about the pipeline configuration
    pub fn info(&self) -> String {
        format!(
            "Pipeline: {}x{} working image, edge thresholds {}/{}, 1 feature extractor, 1 shape analyzer, 1 texture analyzer",
            self.config.target_size, self.config.target_size, self.config.canny_low, self.config.canny_high
        )
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        builder::PipelineBuilder::new().build_default()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
