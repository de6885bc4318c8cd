pub mod aggregate;
pub mod export;
pub mod geometry;

pub use aggregate::{District, DistrictDraft, DistrictListItem};
pub use export::ExportFormat;
pub use geometry::{DistrictGeometry, Shape};
