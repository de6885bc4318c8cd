use contracts::domain::a001_fire_district::geometry::Shape;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};

use super::{ExportError, ExportSource};

/// Property holding the district name on the exported feature
pub const NAME_PROPERTY: &str = "district_name";

fn to_value(shape: &Shape) -> Value {
    match shape {
        Shape::Polygon(rings) => Value::Polygon(rings.clone()),
        Shape::MultiPolygon(polygons) => Value::MultiPolygon(polygons.clone()),
    }
}

/// FeatureCollection with a single feature: the drawn geometry plus the name
pub(super) fn write(source: &ExportSource) -> Result<Vec<u8>, ExportError> {
    let mut properties = JsonObject::new();
    properties.insert(NAME_PROPERTY.to_string(), source.name.clone().into());

    let feature = Feature {
        bbox: None,
        geometry: Some(Geometry::new(to_value(&source.shape))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    };

    let collection = FeatureCollection {
        bbox: None,
        features: vec![feature],
        foreign_members: None,
    };

    Ok(GeoJson::from(collection).to_string().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::super::tests::draft;
    use super::super::{export, ExportError};
    use contracts::domain::a001_fire_district::aggregate::DEFAULT_DISTRICT_NAME;
    use contracts::domain::a001_fire_district::export::ExportFormat;
    use contracts::domain::a001_fire_district::geometry::DistrictGeometry;
    use serde_json::{json, Value};

    fn exported(name: &str, geometry: DistrictGeometry) -> Value {
        let draft = contracts::domain::a001_fire_district::aggregate::DistrictDraft {
            name: name.into(),
            geometry,
        };
        let file = export(&draft, ExportFormat::GeoJson).unwrap();
        serde_json::from_slice(&file.bytes).unwrap()
    }

    #[test]
    fn test_single_feature_keeps_coordinates_and_name() {
        let coordinates = json!([[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]]]);
        let doc = exported("Station 7", DistrictGeometry::new("Polygon", coordinates.clone()));

        assert_eq!(doc["type"], "FeatureCollection");
        let features = doc["features"].as_array().unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0]["geometry"]["type"], "Polygon");
        assert_eq!(features[0]["geometry"]["coordinates"], coordinates);
        assert_eq!(features[0]["properties"]["district_name"], "Station 7");
    }

    #[test]
    fn test_blank_name_becomes_default() {
        let doc = exported(
            "",
            DistrictGeometry::new("Polygon", json!([[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]]])),
        );
        assert_eq!(
            doc["features"][0]["properties"]["district_name"],
            DEFAULT_DISTRICT_NAME
        );
    }

    #[test]
    fn test_multipolygon_and_elevation_are_preserved() {
        let coordinates = json!([
            [[[10.5, 20.25, 3.0], [10.5, 21.0, 3.0], [11.0, 21.0, 3.0], [10.5, 20.25, 3.0]]],
            [[[-73.9, 40.7], [-73.8, 40.7], [-73.8, 40.8], [-73.9, 40.7]]]
        ]);
        let doc = exported("Twin", DistrictGeometry::new("MultiPolygon", coordinates.clone()));
        assert_eq!(doc["features"][0]["geometry"]["type"], "MultiPolygon");
        assert_eq!(doc["features"][0]["geometry"]["coordinates"], coordinates);
    }

    #[test]
    fn test_invalid_geometry_is_rejected() {
        let result = export(&draft("x", json!([1, 2, 3])), ExportFormat::GeoJson);
        assert!(matches!(result, Err(ExportError::InvalidGeometry(_))));
    }
}
