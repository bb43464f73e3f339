//! Color-space conversions and per-channel statistics.
//!
//! All three color representations are quantized to 8 bits per channel
//! before statistics are taken, so the downstream thresholds see the same
//! scales regardless of which conversion produced them:
//!
//! - HSV: hue in half-degrees `[0, 180]`, saturation and value in `[0, 255]`
//! - Lab: `L*` scaled by 255/100, `a*` and `b*` offset by 128

use image::{GrayImage, Luma, RgbImage};
use palette::{FromColor, Hsv, Lab, Srgb};

/// Mean and population standard deviation of one channel
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChannelStats {
    pub mean: f64,
    pub std: f64,
}

/// Exact integer accumulator for 8-bit samples
#[derive(Debug, Clone, Copy, Default)]
struct ChannelAccumulator {
    sum: u64,
    sum_sq: u64,
    count: u64,
}

impl ChannelAccumulator {
    fn push(&mut self, value: u8) {
        let v = u64::from(value);
        self.sum += v;
        self.sum_sq += v * v;
        self.count += 1;
    }

    fn finish(&self) -> ChannelStats {
        if self.count == 0 {
            return ChannelStats::default();
        }
        let n = self.count as f64;
        let mean = self.sum as f64 / n;
        let variance = (self.sum_sq as f64 / n - mean * mean).max(0.0);
        ChannelStats { mean, std: variance.sqrt() }
    }
}

/// Statistics of the three representations plus grayscale brightness
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColorStatistics {
    /// Red, green, blue
    pub rgb: [ChannelStats; 3],
    /// Hue, saturation, value
    pub hsv: [ChannelStats; 3],
    /// Lightness, green-red, blue-yellow
    pub lab: [ChannelStats; 3],
}

/// ITU-R BT.601 luma, rounded to 8 bits
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let y = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
    y.round().clamp(0.0, 255.0) as u8
}

pub fn grayscale(image: &RgbImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b] = image.get_pixel(x, y).0;
        Luma([luma(r, g, b)])
    })
}

fn quantize(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// 8-bit HSV triple for one pixel
pub fn to_hsv8(r: u8, g: u8, b: u8) -> [u8; 3] {
    let hsv: Hsv = Hsv::from_color(srgb(r, g, b));
    [
        quantize(hsv.hue.into_positive_degrees() / 2.0),
        quantize(hsv.saturation * 255.0),
        quantize(hsv.value * 255.0),
    ]
}

/// 8-bit Lab triple for one pixel (D65 white point)
pub fn to_lab8(r: u8, g: u8, b: u8) -> [u8; 3] {
    let lab: Lab = Lab::from_color(srgb(r, g, b));
    [
        quantize(lab.l * 255.0 / 100.0),
        quantize(lab.a + 128.0),
        quantize(lab.b + 128.0),
    ]
}

fn srgb(r: u8, g: u8, b: u8) -> Srgb<f32> {
    Srgb::new(f32::from(r) / 255.0, f32::from(g) / 255.0, f32::from(b) / 255.0)
}

/// Single pass over the image accumulating all nine channels
pub fn color_statistics(image: &RgbImage) -> ColorStatistics {
    let mut rgb = [ChannelAccumulator::default(); 3];
    let mut hsv = [ChannelAccumulator::default(); 3];
    let mut lab = [ChannelAccumulator::default(); 3];

    for pixel in image.pixels() {
        let [r, g, b] = pixel.0;
        let converted = [[r, g, b], to_hsv8(r, g, b), to_lab8(r, g, b)];
        for (accumulators, channels) in [&mut rgb, &mut hsv, &mut lab].into_iter().zip(converted) {
            for (acc, value) in accumulators.iter_mut().zip(channels) {
                acc.push(value);
            }
        }
    }

    ColorStatistics {
        rgb: rgb.map(|acc| acc.finish()),
        hsv: hsv.map(|acc| acc.finish()),
        lab: lab.map(|acc| acc.finish()),
    }
}

/// Brightness mean and deviation of a grayscale image
pub fn gray_statistics(gray: &GrayImage) -> ChannelStats {
    let mut acc = ChannelAccumulator::default();
    for pixel in gray.pixels() {
        acc.push(pixel.0[0]);
    }
    acc.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_luma_weights() {
        assert_eq!(luma(210, 180, 139), 184);
        assert_eq!(luma(50, 100, 200), 96);
        assert_eq!(luma(240, 240, 240), 240);
        assert_eq!(luma(255, 0, 0), 76);
    }

    #[test]
    fn test_hsv_scaling() {
        // pure red sits at hue 0, fully saturated
        assert_eq!(to_hsv8(255, 0, 0), [0, 255, 255]);
        // blue is 240 degrees -> 120 half-degrees
        assert_eq!(to_hsv8(0, 0, 255), [120, 255, 255]);
        // achromatic
        assert_eq!(to_hsv8(150, 150, 150), [0, 0, 150]);
        let [h, s, v] = to_hsv8(210, 180, 139);
        assert_eq!(v, 210);
        assert!((16..=18).contains(&h), "hue {h}");
        assert!((85..=87).contains(&s), "saturation {s}");
    }

    #[test]
    fn test_lab_neutral_axis() {
        let [l, a, b] = to_lab8(150, 150, 150);
        assert_eq!((a, b), (128, 128));
        assert!((165..=169).contains(&l), "lightness {l}");
        assert_eq!(to_lab8(255, 255, 255), [255, 128, 128]);
        assert_eq!(to_lab8(0, 0, 0), [0, 128, 128]);
    }

    #[test]
    fn test_statistics_of_uniform_image() {
        let image = RgbImage::from_pixel(16, 16, Rgb([50, 100, 200]));
        let stats = color_statistics(&image);
        assert_eq!(stats.rgb[0], ChannelStats { mean: 50.0, std: 0.0 });
        assert_eq!(stats.rgb[2], ChannelStats { mean: 200.0, std: 0.0 });
        assert_eq!(stats.hsv[0].mean, 110.0);
        assert_eq!(stats.hsv[1].mean, 191.0);
        assert_eq!(stats.hsv[2].mean, 200.0);
        assert!(stats.lab.iter().all(|c| c.std == 0.0));
    }

    #[test]
    fn test_population_std() {
        let mut gray = GrayImage::new(2, 1);
        gray.put_pixel(0, 0, Luma([0]));
        gray.put_pixel(1, 0, Luma([100]));
        let stats = gray_statistics(&gray);
        assert_eq!(stats.mean, 50.0);
        assert_eq!(stats.std, 50.0);
    }
}
