use crate::{
    error::Result,
    types::{FeatureVector, PreparedImage, ShapeDescriptors, TextureDescriptors},
};

/// Trait for color/texture feature extraction
pub trait FeatureExtractor: Send + Sync {
    /// Compute the full feature vector of a prepared image
    fn extract(&self, image: &PreparedImage) -> Result<FeatureVector>;
}

/// Trait for contour geometry analysis
pub trait ShapeAnalyzer: Send + Sync {
    /// Derive shape descriptors from the prepared edge map
    fn analyze(&self, image: &PreparedImage) -> Result<ShapeDescriptors>;
}

/// Trait for texture pattern analysis
pub trait TextureAnalyzer: Send + Sync {
    /// Derive co-occurrence and LBP statistics from the prepared grayscale image
    fn analyze(&self, image: &PreparedImage) -> Result<TextureDescriptors>;
}
