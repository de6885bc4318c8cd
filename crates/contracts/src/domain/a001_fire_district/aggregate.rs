use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::geometry::DistrictGeometry;

/// Name stored when the user leaves the name field blank
pub const DEFAULT_DISTRICT_NAME: &str = "Unnamed District";

/// Name shown in the list for documents that carry no `district_name`
pub const MISSING_NAME_PLACEHOLDER: &str = "Unnamed";

// ============================================================================
// Draft (what the drawing view sends)
// ============================================================================

/// Only-just-drawn district: name as typed (may be blank) plus the geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictDraft {
    pub name: String,
    pub geometry: DistrictGeometry,
}

impl DistrictDraft {
    pub fn display_name(&self) -> String {
        display_name(&self.name)
    }
}

/// Blank (or whitespace-only) names fall back to [`DEFAULT_DISTRICT_NAME`].
pub fn display_name(name: &str) -> String {
    if name.trim().is_empty() {
        DEFAULT_DISTRICT_NAME.to_string()
    } else {
        name.to_string()
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Fire district as stored in the document store.
///
/// `id` is assigned by the store and is `None` until the district is saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct District {
    #[serde(skip)]
    pub id: Option<String>,
    #[serde(rename = "district_name")]
    pub name: String,
    pub geometry: DistrictGeometry,
    pub created_at: String,
}

impl District {
    /// Build the document to store from a draft, stamping `created_at` with `now`.
    pub fn from_draft(draft: DistrictDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            name: display_name(&draft.name),
            geometry: draft.geometry,
            created_at: now.to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }

    /// Checks run before the document is written to the store
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("District name must not be empty".into());
        }
        self.geometry
            .validate()
            .map(|_| ())
            .map_err(|e| format!("invalid geometry: {}", e))
    }
}

// ============================================================================
// List rows
// ============================================================================

/// One row of the saved districts list. The id is carried but not displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistrictListItem {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

/// Id of the first row named `name`.
///
/// Duplicate names are not disambiguated: the first match in list order wins.
pub fn resolve_district_id<'a>(rows: &'a [DistrictListItem], name: &str) -> Option<&'a str> {
    rows.iter()
        .find(|row| row.name == name)
        .map(|row| row.id.as_str())
}

/// Header of the districts CSV export
pub const CSV_HEADERS: [&str; 2] = ["district_name", "created_at"];

/// Render the list as UTF-8 CSV: header row, then one `name,created_at` line per row.
pub fn districts_to_csv(rows: &[DistrictListItem]) -> Result<Vec<u8>, String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS).map_err(|e| e.to_string())?;
    for row in rows {
        writer
            .write_record([row.name.as_str(), row.created_at.as_str()])
            .map_err(|e| e.to_string())?;
    }
    writer.into_inner().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn geometry() -> DistrictGeometry {
        DistrictGeometry::new("Polygon", json!([[[0, 0], [0, 1], [1, 1], [1, 0]]]))
    }

    fn row(id: &str, name: &str) -> DistrictListItem {
        DistrictListItem {
            id: id.into(),
            name: name.into(),
            created_at: "2025-01-01T00:00:00.000000Z".into(),
        }
    }

    #[test]
    fn test_blank_name_defaults() {
        assert_eq!(display_name(""), DEFAULT_DISTRICT_NAME);
        assert_eq!(display_name("   "), DEFAULT_DISTRICT_NAME);
        assert_eq!(display_name("Station 7"), "Station 7");
    }

    #[test]
    fn test_from_draft_stamps_utc_timestamp() {
        let now = Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap();
        let district = District::from_draft(
            DistrictDraft {
                name: String::new(),
                geometry: geometry(),
            },
            now,
        );
        assert_eq!(district.name, DEFAULT_DISTRICT_NAME);
        assert_eq!(district.created_at, "2025-03-14T09:26:53.000000Z");
        assert!(district.id.is_none());
        assert!(district.validate().is_ok());
    }

    #[test]
    fn test_store_document_shape() {
        let district = District::from_draft(
            DistrictDraft {
                name: "Station 7".into(),
                geometry: geometry(),
            },
            Utc::now(),
        );
        let doc = serde_json::to_value(&district).unwrap();
        let keys: Vec<&String> = doc.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 3);
        assert_eq!(doc["district_name"], "Station 7");
        assert_eq!(doc["geometry"]["type"], "Polygon");
        assert!(doc["created_at"].is_string());
    }

    #[test]
    fn test_validate_rejects_bad_geometry() {
        let district = District {
            id: None,
            name: "x".into(),
            geometry: DistrictGeometry::new("Polygon", json!("not-an-array")),
            created_at: String::new(),
        };
        assert!(district.validate().is_err());
    }

    #[test]
    fn test_resolve_picks_first_match_on_duplicate_names() {
        // Duplicate names resolve to the first row; kept as-is pending a product decision.
        let rows = vec![row("a", "North"), row("b", "South"), row("c", "North")];
        assert_eq!(resolve_district_id(&rows, "North"), Some("a"));
        assert_eq!(resolve_district_id(&rows, "South"), Some("b"));
        assert_eq!(resolve_district_id(&rows, "East"), None);
    }

    #[test]
    fn test_csv_has_header_and_name_created_columns() {
        let rows = vec![row("a", "Station 7"), row("b", "Hill, East")];
        let csv = String::from_utf8(districts_to_csv(&rows).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "district_name,created_at");
        assert_eq!(lines[1], "Station 7,2025-01-01T00:00:00.000000Z");
        assert_eq!(lines[2], "\"Hill, East\",2025-01-01T00:00:00.000000Z");
        assert_eq!(lines.len(), 3);
    }
}
