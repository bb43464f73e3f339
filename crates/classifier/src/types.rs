use image::{imageops::FilterType, GrayImage, RgbImage};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    algorithms::{color::grayscale, edges::edge_map},
    config::ClassifierConfig,
    error::{ClassifyError, Result},
};

/// The working image shared by every stage of one classification.
///
/// Resizing, grayscale conversion and edge detection happen exactly once
/// here; the stages only read from it.
#[derive(Debug, Clone)]
pub struct PreparedImage {
    pub rgb: RgbImage,
    pub gray: GrayImage,
    pub edges: GrayImage,
}

impl PreparedImage {
    /// Resize to the configured working size and derive grayscale and edges
    pub fn new(image: &RgbImage, config: &ClassifierConfig) -> Result<Self> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(ClassifyError::EmptyImage { width, height });
        }

        let size = config.target_size;
        let rgb = if (width, height) == (size, size) {
            image.clone()
        } else {
            image::imageops::resize(image, size, size, FilterType::Triangle)
        };
        let gray = grayscale(&rgb);
        let edges = edge_map(&gray, config.canny_low, config.canny_high);

        Ok(Self { rgb, gray, edges })
    }

    pub fn pixel_count(&self) -> u64 {
        u64::from(self.rgb.width()) * u64::from(self.rgb.height())
    }
}

/// Per-image color and texture statistics.
///
/// Color statistics use 8-bit conventions throughout: hue in [0, 180),
/// saturation/value in [0, 255], and lightness/opponent channels scaled to
/// [0, 255] with neutral at 128.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct FeatureVector {
    pub avg_hue: f64,
    pub avg_saturation: f64,
    pub avg_value: f64,
    pub std_hue: f64,
    pub std_saturation: f64,
    pub std_value: f64,

    pub avg_l: f64,
    pub avg_a: f64,
    pub avg_b: f64,
    pub std_l: f64,
    pub std_a: f64,
    pub std_b: f64,

    pub avg_red: f64,
    pub avg_green: f64,
    pub avg_blue: f64,
    pub std_red: f64,
    pub std_green: f64,
    pub std_blue: f64,

    pub avg_brightness: f64,
    pub std_brightness: f64,

    /// Fraction of pixels on the edge map
    pub edge_density: f64,
    /// Variance of the Laplacian response
    pub texture_sharpness: f64,
    /// Shannon entropy (bits) of the 64-bin intensity histogram
    pub entropy: f64,

    pub red_ratio: f64,
    pub green_ratio: f64,
    pub blue_ratio: f64,

    pub color_uniformity: f64,
}

impl FeatureVector {
    /// Feature names in their fixed order
    pub const NAMES: [&'static str; 27] = [
        "avg_hue", "avg_saturation", "avg_value", "std_hue", "std_saturation", "std_value",
        "avg_l", "avg_a", "avg_b", "std_l", "std_a", "std_b",
        "avg_red", "avg_green", "avg_blue", "std_red", "std_green", "std_blue",
        "avg_brightness", "std_brightness",
        "edge_density", "texture_sharpness", "entropy",
        "red_ratio", "green_ratio", "blue_ratio",
        "color_uniformity",
    ];

    fn values(&self) -> [f64; 27] {
        [
            self.avg_hue, self.avg_saturation, self.avg_value,
            self.std_hue, self.std_saturation, self.std_value,
            self.avg_l, self.avg_a, self.avg_b, self.std_l, self.std_a, self.std_b,
            self.avg_red, self.avg_green, self.avg_blue,
            self.std_red, self.std_green, self.std_blue,
            self.avg_brightness, self.std_brightness,
            self.edge_density, self.texture_sharpness, self.entropy,
            self.red_ratio, self.green_ratio, self.blue_ratio,
            self.color_uniformity,
        ]
    }

    /// `(name, value)` pairs in the fixed order of [`FeatureVector::NAMES`]
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, f64)> {
        Self::NAMES.into_iter().zip(self.values())
    }

    /// Look a feature up by name
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries().find(|(key, _)| *key == name).map(|(_, value)| value)
    }
}

/// Geometry of the external edge contours
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ShapeDescriptors {
    /// Mean `4π·area/perimeter²` over contours with a non-zero perimeter
    pub circularity: f64,
    /// Contour count / 10, unbounded
    pub complexity: f64,
    /// Summed contour area over image area; may exceed 1 when contours overlap
    pub solidity: f64,
}

/// Gray-level co-occurrence statistics
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct TexturePair {
    pub contrast: f64,
    pub homogeneity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct TextureDescriptors {
    pub cooccurrence: TexturePair,
    /// Standard deviation of the normalized local binary pattern histogram
    pub lbp_dispersion: f64,
}

/// Everything the scorer looks at for one image
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Evidence {
    pub features: FeatureVector,
    pub shape: ShapeDescriptors,
    pub texture: TextureDescriptors,
}
