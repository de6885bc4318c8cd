use serde::{Deserialize, Serialize};

/// Download format offered by the drawing view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    GeoJson,
    Shapefile,
    Kml,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [
        ExportFormat::GeoJson,
        ExportFormat::Shapefile,
        ExportFormat::Kml,
    ];

    /// Path segment used by `/api/fire_district/export/:format`
    pub fn code(&self) -> &'static str {
        match self {
            ExportFormat::GeoJson => "geojson",
            ExportFormat::Shapefile => "shapefile",
            ExportFormat::Kml => "kml",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.code().eq_ignore_ascii_case(code))
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::GeoJson => "district.geojson",
            ExportFormat::Shapefile => "district.zip",
            ExportFormat::Kml => "district.kml",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::GeoJson => "application/geo+json",
            ExportFormat::Shapefile => "application/zip",
            ExportFormat::Kml => "application/vnd.google-earth.kml+xml",
        }
    }

    pub fn button_label(&self) -> &'static str {
        match self {
            ExportFormat::GeoJson => "Download GeoJSON",
            ExportFormat::Shapefile => "Download Shapefile (.zip)",
            ExportFormat::Kml => "Download KML",
        }
    }
}
