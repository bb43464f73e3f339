use std::f64::consts::PI;

use geo::{Area, EuclideanLength};
use geo_types::{Coord, LineString, Polygon};
use image::{GrayImage, RgbImage};
use imageproc::contours::{find_contours, BorderType};

use crate::{
    config::ClassifierConfig,
    error::Result,
    traits::ShapeAnalyzer,
    types::{PreparedImage, ShapeDescriptors},
};

/// Outer boundaries of top-level edge components; nested contours are dropped
pub fn external_contours(edges: &GrayImage) -> Vec<Polygon<f64>> {
    find_contours::<i32>(edges)
        .into_iter()
        .filter(|contour| contour.parent.is_none() && matches!(contour.border_type, BorderType::Outer))
        .map(|contour| {
            let coords: Vec<Coord<f64>> = contour
                .points
                .iter()
                .map(|p| Coord { x: f64::from(p.x), y: f64::from(p.y) })
                .collect();
            // Polygon::new closes the ring, so the exterior length is the closed perimeter
            Polygon::new(LineString::new(coords), vec![])
        })
        .collect()
}

/// Circularity, complexity and solidity of the contours in an edge map
pub fn shape_from_edges(edges: &GrayImage) -> ShapeDescriptors {
    let image_area = f64::from(edges.width()) * f64::from(edges.height());
    describe_contours(&external_contours(edges), image_area)
}

/// Shape descriptors of a set of closed contours within a frame of `image_area` pixels.
///
/// Solidity is the summed contour area over the frame area and is not clamped,
/// so overlapping contours can push it past 1.
pub fn describe_contours(contours: &[Polygon<f64>], image_area: f64) -> ShapeDescriptors {
    if contours.is_empty() || image_area <= 0.0 {
        return ShapeDescriptors::default();
    }

    let mut total_area = 0.0;
    let mut circularities = Vec::with_capacity(contours.len());
    for polygon in contours {
        let area = polygon.unsigned_area();
        let perimeter = polygon.exterior().euclidean_length();
        total_area += area;
        if perimeter > 0.0 {
            circularities.push(4.0 * PI * area / (perimeter * perimeter));
        }
    }

    let circularity = if circularities.is_empty() {
        0.0
    } else {
        circularities.iter().sum::<f64>() / circularities.len() as f64
    };

    ShapeDescriptors {
        circularity,
        complexity: contours.len() as f64 / 10.0,
        solidity: total_area / image_area,
    }
}

/// Shape descriptors of an image with the default configuration
pub fn analyze_shape(image: &RgbImage) -> Result<ShapeDescriptors> {
    let prepared = PreparedImage::new(image, &ClassifierConfig::default())?;
    Ok(shape_from_edges(&prepared.edges))
}

/// Default shape analyzer over external edge contours
#[derive(Debug, Clone, Default)]
pub struct ContourShapeAnalyzer;

impl ShapeAnalyzer for ContourShapeAnalyzer {
    fn analyze(&self, image: &PreparedImage) -> Result<ShapeDescriptors> {
        Ok(shape_from_edges(&image.edges))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb};

    fn rectangle_image() -> RgbImage {
        RgbImage::from_fn(224, 224, |x, y| {
            if (60..160).contains(&x) && (70..150).contains(&y) {
                Rgb([200, 200, 200])
            } else {
                Rgb([30, 30, 30])
            }
        })
    }

    #[test]
    fn test_flat_image_has_no_contours() {
        let image = RgbImage::from_pixel(224, 224, Rgb([90, 140, 60]));
        assert_eq!(analyze_shape(&image).unwrap(), ShapeDescriptors::default());
    }

    #[test]
    fn test_single_rectangle_is_found() {
        let shape = analyze_shape(&rectangle_image()).unwrap();
        assert!(shape.complexity >= 0.1, "expected at least one contour: {shape:?}");
        assert!(shape.circularity > 0.3 && shape.circularity < 1.2, "{shape:?}");
        // the outline encloses roughly 100x80 pixels of a 224x224 frame
        assert!(shape.solidity > 0.05 && shape.solidity < 0.3, "{shape:?}");
    }

    #[test]
    fn test_nested_contours_are_ignored() {
        // a hollow square ring: one outer border, one hole border
        let mut edges = GrayImage::new(20, 20);
        for i in 5..15 {
            edges.put_pixel(i, 5, Luma([255]));
            edges.put_pixel(i, 14, Luma([255]));
            edges.put_pixel(5, i, Luma([255]));
            edges.put_pixel(14, i, Luma([255]));
        }
        let contours = external_contours(&edges);
        assert_eq!(contours.len(), 1);

        let shape = shape_from_edges(&edges);
        assert!((shape.complexity - 0.1).abs() < 1e-12);
        // outer border traced through pixel centres: 9x9
        assert!((shape.solidity - 81.0 / 400.0).abs() < 1e-9, "{shape:?}");
        assert!((shape.circularity - PI / 4.0).abs() < 1e-9, "{shape:?}");
    }

    #[test]
    fn test_single_pixel_contour_has_no_circularity() {
        let mut edges = GrayImage::new(10, 10);
        edges.put_pixel(4, 4, Luma([255]));
        let shape = shape_from_edges(&edges);
        assert_eq!(shape.circularity, 0.0);
        assert!((shape.complexity - 0.1).abs() < 1e-12);
        assert_eq!(shape.solidity, 0.0);
    }

    fn square(x0: f64, y0: f64, side: f64) -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![(x0, y0), (x0 + side, y0), (x0 + side, y0 + side), (x0, y0 + side)]),
            vec![],
        )
    }

    #[test]
    fn test_overlapping_contours_exceed_unit_solidity() {
        let contours = [square(0.0, 0.0, 8.0), square(2.0, 2.0, 8.0)];
        let shape = describe_contours(&contours, 100.0);
        assert!((shape.solidity - 1.28).abs() < 1e-12, "{shape:?}");
        assert!((shape.complexity - 0.2).abs() < 1e-12);
        assert!((shape.circularity - PI / 4.0).abs() < 1e-12, "{shape:?}");
    }

    #[test]
    fn test_no_contours_or_empty_frame() {
        assert_eq!(describe_contours(&[], 100.0), ShapeDescriptors::default());
        assert_eq!(describe_contours(&[square(0.0, 0.0, 2.0)], 0.0), ShapeDescriptors::default());
    }
}
