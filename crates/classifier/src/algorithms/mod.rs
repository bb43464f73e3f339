pub mod color;
pub mod edges;
pub mod features;
pub mod shape;
pub mod texture;

pub use color::{ChannelStats, ColorStatistics};
pub use features::{extract_features, ColorStatisticsExtractor};
pub use shape::{analyze_shape, ContourShapeAnalyzer};
pub use texture::{analyze_texture, CooccurrenceTextureAnalyzer};
