//! Export of a single district to GIS interchange formats.
//!
//! Every format is a pure function of the district and nothing is persisted.
//! The geometry is validated once up front, so an invalid geometry never
//! produces a file (or a temp directory) of any kind.

mod geojson_file;
mod kml_file;
mod shapefile_zip;

use contracts::domain::a001_fire_district::aggregate::DistrictDraft;
use contracts::domain::a001_fire_district::export::ExportFormat;
use contracts::domain::a001_fire_district::geometry::Shape;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("{format} export failed: {message}")]
    Encode {
        format: &'static str,
        message: String,
    },

    #[error("export io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    pub(crate) fn encode(format: ExportFormat, e: impl std::fmt::Display) -> Self {
        ExportError::Encode {
            format: format.code(),
            message: e.to_string(),
        }
    }
}

/// One downloadable file
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: &'static str,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// District checked for export: display name plus typed shape
pub(crate) struct ExportSource {
    pub name: String,
    pub shape: Shape,
}

fn prepare(draft: &DistrictDraft) -> Result<ExportSource, ExportError> {
    let shape = draft
        .geometry
        .validate()
        .map_err(ExportError::InvalidGeometry)?;
    Ok(ExportSource {
        name: draft.display_name(),
        shape,
    })
}

fn encode(
    source: &ExportSource,
    format: ExportFormat,
    scratch_root: &Path,
) -> Result<ExportFile, ExportError> {
    tracing::debug!("Exporting '{}' as {}", source.name, format.code());
    let bytes = match format {
        ExportFormat::GeoJson => geojson_file::write(source)?,
        ExportFormat::Shapefile => shapefile_zip::write(source, scratch_root)?,
        ExportFormat::Kml => kml_file::write(source)?,
    };
    Ok(ExportFile {
        file_name: format.file_name(),
        content_type: format.content_type(),
        bytes,
    })
}

/// Export one district in one format
pub fn export(draft: &DistrictDraft, format: ExportFormat) -> Result<ExportFile, ExportError> {
    export_in(draft, format, &std::env::temp_dir())
}

/// Same as [`export`], with intermediate files placed under `scratch_root`
pub fn export_in(
    draft: &DistrictDraft,
    format: ExportFormat,
    scratch_root: &Path,
) -> Result<ExportFile, ExportError> {
    let source = prepare(draft)?;
    encode(&source, format, scratch_root)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use contracts::domain::a001_fire_district::geometry::DistrictGeometry;
    use serde_json::json;

    pub(crate) fn draft(name: &str, coordinates: serde_json::Value) -> DistrictDraft {
        DistrictDraft {
            name: name.into(),
            geometry: DistrictGeometry::new("Polygon", coordinates),
        }
    }

    #[test]
    fn test_every_format_yields_a_named_file() {
        let root = tempfile::tempdir().unwrap();
        let station = draft("Station 7", json!([[[0, 0], [0, 1], [1, 1], [1, 0], [0, 0]]]));
        let names: Vec<&str> = ExportFormat::ALL
            .into_iter()
            .map(|format| {
                let file = export_in(&station, format, root.path()).unwrap();
                assert!(!file.bytes.is_empty());
                file.file_name
            })
            .collect();
        assert_eq!(names, vec!["district.geojson", "district.zip", "district.kml"]);
    }

    #[test]
    fn test_malformed_geometry_fails_for_every_format() {
        let bad = draft("x", json!("not-an-array"));
        for format in ExportFormat::ALL {
            match export(&bad, format) {
                Err(ExportError::InvalidGeometry(msg)) => assert!(msg.contains("array")),
                other => panic!("expected InvalidGeometry for {:?}, got {:?}", format, other),
            }
        }
    }

    fn entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn test_malformed_geometry_leaves_no_temp_files() {
        let root = tempfile::tempdir().unwrap();
        let bad = draft("x", json!([[["a", "b"]]]));
        assert!(matches!(
            export_in(&bad, ExportFormat::Shapefile, root.path()),
            Err(ExportError::InvalidGeometry(_))
        ));
        assert_eq!(entries(root.path()), 0);
    }

    #[test]
    fn test_shapefile_export_cleans_up_scratch_dir() {
        let root = tempfile::tempdir().unwrap();
        let file = export_in(
            &draft("Station 7", json!([[[0, 0], [0, 1], [1, 1], [1, 0]]])),
            ExportFormat::Shapefile,
            root.path(),
        )
        .unwrap();
        assert!(!file.bytes.is_empty());
        assert_eq!(entries(root.path()), 0);
    }
}
