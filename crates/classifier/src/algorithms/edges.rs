use image::{GrayImage, Luma};
use imageproc::gradients::{horizontal_sobel, vertical_sobel};

const TAN_22_5: f32 = 0.414_213_56;
const TAN_67_5: f32 = 2.414_213_6;

const NOT_EDGE: u8 = 0;
const WEAK: u8 = 1;
const STRONG: u8 = 2;

/// Binary edge map from a two-threshold gradient detector (edges are 255).
///
/// Gradients are 3x3 Sobel responses of the unsmoothed image with an L1
/// magnitude. Thin ridges survive non-maximum suppression along the
/// quantized gradient direction, and weak ridges are kept only when
/// 8-connected to a strong one.
pub fn edge_map(gray: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    let (width, height) = gray.dimensions();
    let (w, h) = (width as usize, height as usize);
    if w == 0 || h == 0 {
        return GrayImage::new(width, height);
    }

    let gx = horizontal_sobel(gray);
    let gy = vertical_sobel(gray);
    let magnitude: Vec<f32> = gx
        .pixels()
        .zip(gy.pixels())
        .map(|(x, y)| f32::from(x.0[0]).abs() + f32::from(y.0[0]).abs())
        .collect();

    // outside the frame counts as zero magnitude
    let mag_at = |x: isize, y: isize| -> f32 {
        if x < 0 || y < 0 || x as usize >= w || y as usize >= h {
            0.0
        } else {
            magnitude[y as usize * w + x as usize]
        }
    };

    let mut state = vec![NOT_EDGE; w * h];
    for y in 0..h {
        for x in 0..w {
            let m = magnitude[y * w + x];
            if m <= low_threshold {
                continue;
            }
            let dx = f32::from(gx.get_pixel(x as u32, y as u32).0[0]);
            let dy = f32::from(gy.get_pixel(x as u32, y as u32).0[0]);
            let (ax, ay) = (dx.abs(), dy.abs());
            let (xi, yi) = (x as isize, y as isize);

            let is_peak = if ay < ax * TAN_22_5 {
                m > mag_at(xi - 1, yi) && m >= mag_at(xi + 1, yi)
            } else if ay > ax * TAN_67_5 {
                m > mag_at(xi, yi - 1) && m >= mag_at(xi, yi + 1)
            } else if (dx > 0.0) == (dy > 0.0) {
                m > mag_at(xi - 1, yi - 1) && m > mag_at(xi + 1, yi + 1)
            } else {
                m > mag_at(xi + 1, yi - 1) && m > mag_at(xi - 1, yi + 1)
            };

            if is_peak {
                state[y * w + x] = if m > high_threshold { STRONG } else { WEAK };
            }
        }
    }

    hysteresis(&state, width, height)
}

/// Grow strong ridges into every 8-connected weak ridge
fn hysteresis(state: &[u8], width: u32, height: u32) -> GrayImage {
    let (w, h) = (width as usize, height as usize);
    let mut out = GrayImage::new(width, height);
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for (i, &s) in state.iter().enumerate() {
        if s == STRONG {
            let (x, y) = (i % w, i / w);
            out.put_pixel(x as u32, y as u32, Luma([255]));
            stack.push((x, y));
        }
    }

    while let Some((x, y)) = stack.pop() {
        for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                if state[ny * w + nx] != NOT_EDGE && out.get_pixel(nx as u32, ny as u32).0[0] == 0 {
                    out.put_pixel(nx as u32, ny as u32, Luma([255]));
                    stack.push((nx, ny));
                }
            }
        }
    }
    out
}

/// Fraction of pixels marked as edges
pub fn edge_density(edges: &GrayImage) -> f64 {
    let total = u64::from(edges.width()) * u64::from(edges.height());
    if total == 0 {
        return 0.0;
    }
    let on = edges.pixels().filter(|p| p.0[0] > 0).count();
    on as f64 / total as f64
}
