use image::GrayImage;

use crate::{
    algorithms::features::EPSILON,
    error::Result,
    traits::TextureAnalyzer,
    types::{PreparedImage, TextureDescriptors, TexturePair},
};

/// Intensity levels of the co-occurrence matrix
pub const COOCCURRENCE_LEVELS: usize = 8;

const LEVEL_WIDTH: u8 = 32;

/// Neighbour offsets in bit order: top-left is bit 7, then clockwise down to left at bit 0
const LBP_NEIGHBOURS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
];

fn level(value: u8) -> usize {
    usize::from(value / LEVEL_WIDTH)
}

/// Contrast and homogeneity of the right/bottom neighbour co-occurrence matrix.
///
/// Every pixel that has both a right and a bottom neighbour contributes one
/// pair of each kind. An image without such pixels yields `(0, 0)`.
pub fn cooccurrence(gray: &GrayImage) -> TexturePair {
    let (width, height) = gray.dimensions();
    let mut matrix = [[0u64; COOCCURRENCE_LEVELS]; COOCCURRENCE_LEVELS];

    for y in 0..height.saturating_sub(1) {
        for x in 0..width.saturating_sub(1) {
            let here = level(gray.get_pixel(x, y).0[0]);
            let right = level(gray.get_pixel(x + 1, y).0[0]);
            let below = level(gray.get_pixel(x, y + 1).0[0]);
            matrix[here][right] += 1;
            matrix[here][below] += 1;
        }
    }

    let total: u64 = matrix.iter().flatten().sum();
    if total == 0 {
        return TexturePair::default();
    }

    let mut pair = TexturePair::default();
    for (i, row) in matrix.iter().enumerate() {
        for (j, &count) in row.iter().enumerate() {
            let p = count as f64 / total as f64;
            let diff = (i as f64 - j as f64).powi(2);
            pair.contrast += p * diff;
            pair.homogeneity += p / (1.0 + diff);
        }
    }
    pair
}

/// 8-bit local binary pattern of an interior pixel; `None` on the outer ring
fn lbp_code(gray: &GrayImage, x: u32, y: u32) -> Option<u8> {
    let (width, height) = gray.dimensions();
    if x == 0 || y == 0 || x + 1 >= width || y + 1 >= height {
        return None;
    }
    let center = gray.get_pixel(x, y).0[0];
    let code = LBP_NEIGHBOURS.iter().fold(0u8, |code, &(dx, dy)| {
        let nx = x.wrapping_add_signed(dx);
        let ny = y.wrapping_add_signed(dy);
        let brighter = gray.get_pixel(nx, ny).0[0] > center;
        (code << 1) | u8::from(brighter)
    });
    Some(code)
}

/// Population standard deviation of the normalized LBP histogram over interior pixels
pub fn lbp_dispersion(gray: &GrayImage) -> f64 {
    let (width, height) = gray.dimensions();
    let mut histogram = [0u64; 256];

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            if let Some(code) = lbp_code(gray, x, y) {
                histogram[usize::from(code)] += 1;
            }
        }
    }

    let total = histogram.iter().sum::<u64>() as f64 + EPSILON;
    let bins = histogram.len() as f64;
    let probabilities = histogram.map(|count| count as f64 / total);
    let mean = probabilities.iter().sum::<f64>() / bins;
    let variance = probabilities.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / bins;
    variance.sqrt()
}

/// Co-occurrence pair and LBP dispersion of a grayscale image
pub fn analyze_texture(gray: &GrayImage) -> TextureDescriptors {
    TextureDescriptors {
        cooccurrence: cooccurrence(gray),
        lbp_dispersion: lbp_dispersion(gray),
    }
}

/// Default texture analyzer over the shared grayscale image
#[derive(Debug, Clone, Default)]
pub struct CooccurrenceTextureAnalyzer;

impl TextureAnalyzer for CooccurrenceTextureAnalyzer {
    fn analyze(&self, image: &PreparedImage) -> Result<TextureDescriptors> {
        Ok(analyze_texture(&image.gray))
    }
}
