use std::path::{Path, PathBuf};

use catalog::{CatalogError, CategoryCatalog, CategoryInfo, StaticCatalog, WasteCategory};
use classifier::{
    Analysis, ClassificationReport, ClassifyError, FailedClassification, Pipeline, PipelineBuilder,
};
use image::DynamicImage;
use schemars::JsonSchema;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum WasteSortError {
    #[error(transparent)]
    Classify(#[from] ClassifyError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WasteSortError>;

/// Report of one input file
#[derive(Debug, Clone, Serialize, JsonSchema, PartialEq)]
pub struct ImageReport {
    pub path: String,
    #[serde(flatten)]
    pub report: ClassificationReport,
}

/// Diagnostic dump of one input file
#[derive(Debug, Clone, Serialize)]
pub struct FeatureReport {
    pub path: String,
    #[serde(flatten)]
    pub analysis: Analysis,
}

/// Catalog entry as listed by the `categories` command
#[derive(Debug, Clone, Serialize)]
pub struct CategoryListing<'a> {
    pub key: WasteCategory,
    pub stream: catalog::WasteStream,
    #[serde(flatten)]
    pub info: &'a CategoryInfo,
}

/// Build a pipeline from an optional `.toml`/`.json` configuration file
pub fn load_pipeline(config: Option<&Path>) -> Result<Pipeline> {
    let pipeline = match config {
        Some(path) => {
            debug!("Loading classifier configuration from {}", path.display());
            PipelineBuilder::build_from_file(path)?
        }
        None => Pipeline::default(),
    };
    Ok(pipeline)
}

/// The built-in catalog, or one loaded from a `.toml`/`.json` file
pub fn load_catalog(path: Option<&Path>) -> Result<StaticCatalog> {
    match path {
        Some(path) => Ok(StaticCatalog::from_file(path)?),
        None => Ok(StaticCatalog::default()),
    }
}

/// Decode an image file into pixels
pub fn decode_image(path: &Path) -> Result<DynamicImage> {
    let image = image::open(path).map_err(ClassifyError::from)?;
    debug!("Decoded {} ({}x{})", path.display(), image.width(), image.height());
    Ok(image)
}

/// Classify one file; decode failures become error records
pub fn classify_path(pipeline: &Pipeline, catalog: &dyn CategoryCatalog, path: &Path) -> ImageReport {
    let report = match decode_image(path) {
        Ok(image) => pipeline.predict(&image, catalog),
        Err(err) => {
            warn!("Could not decode {}: {err}", path.display());
            ClassificationReport::Failed(FailedClassification::new(err.to_string()))
        }
    };
    ImageReport {
        path: path.display().to_string(),
        report,
    }
}

/// Classify every file in order
pub fn classify_paths(pipeline: &Pipeline, catalog: &dyn CategoryCatalog, paths: &[PathBuf]) -> Vec<ImageReport> {
    paths
        .iter()
        .map(|path| classify_path(pipeline, catalog, path))
        .collect()
}

/// Features, shape, texture, scores and calibration of one file
pub fn analyze_path(pipeline: &Pipeline, path: &Path) -> Result<FeatureReport> {
    let image = decode_image(path)?;
    let analysis = pipeline.analyze(&image.to_rgb8())?;
    Ok(FeatureReport {
        path: path.display().to_string(),
        analysis,
    })
}

/// Catalog entries in category priority order
pub fn list_categories(catalog: &StaticCatalog) -> Vec<CategoryListing<'_>> {
    catalog
        .iter()
        .map(|(key, info)| CategoryListing {
            key,
            stream: key.stream(),
            info,
        })
        .collect()
}

/// Serialize as JSON, optionally pretty-printed
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::io::Write;

    fn write_png(dir: &Path, name: &str, rgb: [u8; 3]) -> PathBuf {
        let path = dir.join(name);
        RgbImage::from_pixel(64, 48, Rgb(rgb)).save(&path).unwrap();
        path
    }

    #[test]
    fn test_classify_paths_keeps_order_and_reports_failures() {
        let dir = tempfile::tempdir().unwrap();
        let blue = write_png(dir.path(), "blue.png", [50, 100, 200]);
        let missing = dir.path().join("missing.png");

        let pipeline = load_pipeline(None).unwrap();
        let catalog = load_catalog(None).unwrap();
        let reports = classify_paths(&pipeline, &catalog, &[blue.clone(), missing]);

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].path, blue.display().to_string());
        assert_eq!(reports[0].report.category_key(), "recyclable_plastic");
        assert!(!reports[1].report.is_classified());

        let json: serde_json::Value = serde_json::from_str(&to_json(&reports, false).unwrap()).unwrap();
        assert_eq!(json[0]["waste_type"], "recyclable_plastic");
        assert_eq!(json[1]["category"], "unknown");
        assert_eq!(json[1]["confidence"], 0.0);
    }

    #[test]
    fn test_load_pipeline_from_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(b"canny_low = 30.0\n").unwrap();
        let pipeline = load_pipeline(Some(file.path())).unwrap();
        assert_eq!(pipeline.config().canny_low, 30.0);
    }

    #[test]
    fn test_analyze_path_reports_scores() {
        let dir = tempfile::tempdir().unwrap();
        let tan = write_png(dir.path(), "tan.png", [210, 180, 139]);
        let report = analyze_path(&load_pipeline(None).unwrap(), &tan).unwrap();
        assert_eq!(report.analysis.scores.get(WasteCategory::RecyclablePaper), 70);

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["features"]["avg_hue"].is_number());
        assert!(json["shape"]["circularity"].is_number());
        assert_eq!(json["calibration"]["category"], "recyclable_plastic");
    }

    #[test]
    fn test_list_categories_covers_catalog() {
        let catalog = StaticCatalog::default();
        let listing = list_categories(&catalog);
        assert_eq!(listing.len(), 9);
        assert_eq!(listing[0].key, WasteCategory::RecyclablePaper);

        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json[8]["key"], "landfill_general");
        assert_eq!(json[8]["stream"], "landfill");
        assert!(json[8]["disposal_instructions"].is_string());
    }
}
