use crate::{
    algorithms::{ColorStatisticsExtractor, ContourShapeAnalyzer, CooccurrenceTextureAnalyzer},
    config::ClassifierConfig,
    error::Result,
    pipeline::Pipeline,
    traits::{FeatureExtractor, ShapeAnalyzer, TextureAnalyzer},
};

/// Builder for creating classification pipelines with a fluent API
pub struct PipelineBuilder {
    config: ClassifierConfig,
    feature_extractor: Option<Box<dyn FeatureExtractor>>,
    shape_analyzer: Option<Box<dyn ShapeAnalyzer>>,
    texture_analyzer: Option<Box<dyn TextureAnalyzer>>,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            config: ClassifierConfig::default(),
            feature_extractor: None,
            shape_analyzer: None,
            texture_analyzer: None,
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: ClassifierConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the feature extractor (replaces any existing one)
    pub fn set_feature_extractor<E>(mut self, extractor: E) -> Self
    where
        E: FeatureExtractor + 'static,
    {
        self.feature_extractor = Some(Box::new(extractor));
        self
    }

    /// Set the shape analyzer (replaces any existing one)
    pub fn set_shape_analyzer<S>(mut self, analyzer: S) -> Self
    where
        S: ShapeAnalyzer + 'static,
    {
        self.shape_analyzer = Some(Box::new(analyzer));
        self
    }

    /// Set the texture analyzer (replaces any existing one)
    pub fn set_texture_analyzer<T>(mut self, analyzer: T) -> Self
    where
        T: TextureAnalyzer + 'static,
    {
        self.texture_analyzer = Some(Box::new(analyzer));
        self
    }

    /// Build the pipeline with default components if not specified
    pub fn build(self) -> Result<Pipeline> {
        let (config, feature_extractor, shape_analyzer, texture_analyzer) = self.into_parts();
        Pipeline::new(config, feature_extractor, shape_analyzer, texture_analyzer)
    }

    /// Build with the default configuration, which needs no validation
    pub(crate) fn build_default(self) -> Pipeline {
        let (_, feature_extractor, shape_analyzer, texture_analyzer) = self.into_parts();
        Pipeline {
            config: ClassifierConfig::default(),
            feature_extractor,
            shape_analyzer,
            texture_analyzer,
        }
    }

    #[allow(clippy::type_complexity)]
    fn into_parts(
        self,
    ) -> (
        ClassifierConfig,
        Box<dyn FeatureExtractor>,
        Box<dyn ShapeAnalyzer>,
        Box<dyn TextureAnalyzer>,
    ) {
        let feature_extractor = self
            .feature_extractor
            .unwrap_or_else(|| Box::new(ColorStatisticsExtractor));
        let shape_analyzer = self
            .shape_analyzer
            .unwrap_or_else(|| Box::new(ContourShapeAnalyzer));
        let texture_analyzer = self
            .texture_analyzer
            .unwrap_or_else(|| Box::new(CooccurrenceTextureAnalyzer));
        (self.config, feature_extractor, shape_analyzer, texture_analyzer)
    }

    /// Build a pipeline from a configuration file (`.toml` or `.json`)
    pub fn build_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Pipeline> {
        let config = ClassifierConfig::from_file(path)?;
        Self::new().with_config(config).build()
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
