use image::{GrayImage, RgbImage};

use crate::{
    algorithms::{
        color::{color_statistics, gray_statistics},
        edges::edge_density,
    },
    config::ClassifierConfig,
    error::Result,
    traits::FeatureExtractor,
    types::{FeatureVector, PreparedImage},
};

/// Guard against `log(0)` and division by zero
pub const EPSILON: f64 = 1e-10;

/// Histogram resolution used for the entropy statistic
pub const ENTROPY_BINS: usize = 64;

/// Mirror an out-of-range index without repeating the edge sample (`dcb|abcd|cba`)
fn reflect_101(i: i64, n: i64) -> u32 {
    if n <= 1 {
        return 0;
    }
    let i = if i < 0 { -i } else if i >= n { 2 * n - 2 - i } else { i };
    i.clamp(0, n - 1) as u32
}

/// 4-neighbour Laplacian response of every pixel, row-major, with mirrored borders
fn laplacian_response(gray: &GrayImage) -> Vec<f64> {
    let (width, height) = gray.dimensions();
    let (w, h) = (i64::from(width), i64::from(height));
    let at = |x: i64, y: i64| f64::from(gray.get_pixel(reflect_101(x, w), reflect_101(y, h)).0[0]);

    let mut response = Vec::with_capacity(width as usize * height as usize);
    for y in 0..h {
        for x in 0..w {
            response.push(at(x - 1, y) + at(x + 1, y) + at(x, y - 1) + at(x, y + 1) - 4.0 * at(x, y));
        }
    }
    response
}

/// Variance of the 4-neighbour Laplacian response; 0 for a flat image
pub fn laplacian_variance(gray: &GrayImage) -> f64 {
    let response = laplacian_response(gray);
    let n = response.len();
    if n == 0 {
        return 0.0;
    }
    let (sum, sum_sq) = response.iter().fold((0.0f64, 0.0f64), |(s, ss), &v| (s + v, ss + v * v));
    let mean = sum / n as f64;
    (sum_sq / n as f64 - mean * mean).max(0.0)
}

/// Shannon entropy in bits of the 64-bin intensity histogram
pub fn histogram_entropy(gray: &GrayImage) -> f64 {
    let mut hist = [0u64; ENTROPY_BINS];
    let bin_width = 256 / ENTROPY_BINS;
    for pixel in gray.pixels() {
        hist[usize::from(pixel.0[0]) / bin_width] += 1;
    }
    let total: u64 = hist.iter().sum();
    if total == 0 {
        return 0.0;
    }
    -hist
        .iter()
        .map(|&count| {
            let p = count as f64 / total as f64;
            p * (p + EPSILON).log2()
        })
        .sum::<f64>()
}

/// Assemble the feature vector from a prepared image
pub fn features_from_prepared(prepared: &PreparedImage) -> FeatureVector {
    let color = color_statistics(&prepared.rgb);
    let brightness = gray_statistics(&prepared.gray);
    let [red, green, blue] = color.rgb;
    let [hue, saturation, value] = color.hsv;
    let [l, a, b] = color.lab;

    FeatureVector {
        avg_hue: hue.mean,
        avg_saturation: saturation.mean,
        avg_value: value.mean,
        std_hue: hue.std,
        std_saturation: saturation.std,
        std_value: value.std,

        avg_l: l.mean,
        avg_a: a.mean,
        avg_b: b.mean,
        std_l: l.std,
        std_a: a.std,
        std_b: b.std,

        avg_red: red.mean,
        avg_green: green.mean,
        avg_blue: blue.mean,
        std_red: red.std,
        std_green: green.std,
        std_blue: blue.std,

        avg_brightness: brightness.mean,
        std_brightness: brightness.std,

        edge_density: edge_density(&prepared.edges),
        texture_sharpness: laplacian_variance(&prepared.gray),
        entropy: histogram_entropy(&prepared.gray),

        red_ratio: red.mean / (green.mean + blue.mean + EPSILON),
        green_ratio: green.mean / (red.mean + blue.mean + EPSILON),
        blue_ratio: blue.mean / (red.mean + green.mean + EPSILON),

        color_uniformity: 1.0 - (red.std + green.std + blue.std) / 255.0,
    }
}

/// Compute the feature vector of an image with the default configuration
pub fn extract_features(image: &RgbImage) -> Result<FeatureVector> {
    let prepared = PreparedImage::new(image, &ClassifierConfig::default())?;
    Ok(features_from_prepared(&prepared))
}

/// Default feature extractor: color-space moments plus edge/texture statistics
#[derive(Debug, Clone, Default)]
pub struct ColorStatisticsExtractor;

impl FeatureExtractor for ColorStatisticsExtractor {
    fn extract(&self, image: &PreparedImage) -> Result<FeatureVector> {
        Ok(features_from_prepared(image))
    }
}
