//! # Heuristic Waste Classifier
//!
//! Classifies a photographed object into one of nine waste categories using
//! hand-engineered image statistics and calibrated rule tables. No trained
//! model is involved; every call is a pure function of the input pixels.
//!
//! ## Core Features
//!
//! - **Feature Extraction**: color moments in RGB, HSV and Lab, brightness, edge density, sharpness and entropy
//! - **Shape Analysis**: circularity, complexity and solidity of external edge contours
//! - **Texture Analysis**: co-occurrence contrast/homogeneity and local binary pattern dispersion
//! - **Rule Scoring**: nine independent weighted rule tables with a landfill residual
//! - **Calibration**: bounded confidence from the winning score and its margin
//! - **Trait-based Pipeline**: swap any analysis stage by implementing a trait
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use catalog::StaticCatalog;
//! use classifier::Pipeline;
//!
//! let pipeline = Pipeline::default();
//! let catalog = StaticCatalog::default();
//!
//! let image = image::open("item.jpg")?;
//! let report = pipeline.predict(&image, &catalog);
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Individual Stages
//!
//! ```rust,no_run
//! use classifier::{analyze_shape, analyze_texture, calibrate, extract_features, score_categories, Evidence};
//! use classifier::algorithms::color::grayscale;
//!
//! let image = image::open("item.jpg")?.to_rgb8();
//! let features = extract_features(&image)?;
//! let shape = analyze_shape(&image)?;
//! let gray = grayscale(&image::imageops::resize(&image, 224, 224, image::imageops::FilterType::Triangle));
//! let texture = analyze_texture(&gray);
//!
//! let scores = score_categories(&Evidence { features, shape, texture });
//! let calibration = calibrate(&scores);
//! println!("{} ({:.2})", calibration.category, calibration.confidence);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod algorithms;
pub mod calibration;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod result;
pub mod scoring;
pub mod traits;
pub mod types;

pub use algorithms::*;
pub use calibration::{calibrate, calibrate_entries, Calibration};
pub use config::ClassifierConfig;
pub use error::{ClassifyError, Result};
pub use pipeline::{builder::PipelineBuilder, Pipeline};
pub use result::{Analysis, ClassificationReport, ClassificationResult, FailedClassification};
pub use scoring::{score_categories, ScoreMap};
pub use traits::*;
pub use types::{Evidence, FeatureVector, PreparedImage, ShapeDescriptors, TextureDescriptors, TexturePair};

pub use catalog::{CategoryCatalog, CategoryInfo, StaticCatalog, WasteCategory};
