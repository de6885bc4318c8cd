use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Position (lon, lat[, z]) in WGS84
pub type Position = Vec<f64>;

/// Polygon ring: positions, closed or not
pub type Ring = Vec<Position>;

/// GeoJSON-shaped geometry exactly as it was drawn on the map.
///
/// `coordinates` stays an untyped JSON value so that the geometry can be
/// passed through to the store and the exporters without being rewritten.
/// Use [`DistrictGeometry::validate`] to get the typed [`Shape`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Value,
}

/// Typed view of a validated geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
}

impl Shape {
    /// All polygons of the shape, each as a list of rings (outer ring first).
    pub fn polygons(&self) -> Vec<&[Ring]> {
        match self {
            Shape::Polygon(rings) => vec![rings.as_slice()],
            Shape::MultiPolygon(polygons) => polygons.iter().map(Vec::as_slice).collect(),
        }
    }
}

impl DistrictGeometry {
    pub fn new(kind: impl Into<String>, coordinates: Value) -> Self {
        Self {
            kind: kind.into(),
            coordinates,
        }
    }

    /// Structural validation: geometry type plus coordinate nesting.
    ///
    /// Topology (self-intersection, winding order) is not checked.
    pub fn validate(&self) -> Result<Shape, String> {
        match self.kind.as_str() {
            "Polygon" => parse_polygon(&self.coordinates).map(Shape::Polygon),
            "MultiPolygon" => {
                let polygons = as_array(&self.coordinates, "MultiPolygon coordinates")?;
                if polygons.is_empty() {
                    return Err("MultiPolygon must contain at least one polygon".into());
                }
                polygons
                    .iter()
                    .map(parse_polygon)
                    .collect::<Result<Vec<_>, _>>()
                    .map(Shape::MultiPolygon)
            }
            other => Err(format!(
                "unsupported geometry type '{}', expected Polygon or MultiPolygon",
                other
            )),
        }
    }
}

fn as_array<'a>(value: &'a Value, what: &str) -> Result<&'a Vec<Value>, String> {
    value
        .as_array()
        .ok_or_else(|| format!("{} must be an array", what))
}

fn parse_polygon(value: &Value) -> Result<Vec<Ring>, String> {
    let rings = as_array(value, "Polygon coordinates")?;
    if rings.is_empty() {
        return Err("Polygon must contain at least one ring".into());
    }
    rings.iter().map(parse_ring).collect()
}

fn parse_ring(value: &Value) -> Result<Ring, String> {
    let positions = as_array(value, "ring")?;
    if positions.len() < 3 {
        return Err(format!(
            "ring must have at least 3 positions, got {}",
            positions.len()
        ));
    }
    positions.iter().map(parse_position).collect()
}

fn parse_position(value: &Value) -> Result<Position, String> {
    let items = as_array(value, "position")?;
    if items.len() < 2 {
        return Err("position must have at least longitude and latitude".into());
    }
    items
        .iter()
        .map(|n| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .ok_or_else(|| format!("position component {} is not a finite number", n))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn square() -> DistrictGeometry {
        DistrictGeometry::new(
            "Polygon",
            json!([[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]]]),
        )
    }

    #[test]
    fn test_polygon_validates() {
        let shape = square().validate().unwrap();
        match shape {
            Shape::Polygon(rings) => {
                assert_eq!(rings.len(), 1);
                assert_eq!(rings[0][2], vec![1.0, 1.0]);
            }
            _ => panic!("expected polygon"),
        }
    }

    #[test]
    fn test_multipolygon_validates() {
        let geometry = DistrictGeometry::new(
            "MultiPolygon",
            json!([
                [[[0, 0], [0, 1], [1, 1], [0, 0]]],
                [[[5, 5], [5, 6], [6, 6], [5, 5]]]
            ]),
        );
        let shape = geometry.validate().unwrap();
        assert_eq!(shape.polygons().len(), 2);
    }

    #[test]
    fn test_coordinates_not_an_array_is_rejected() {
        let geometry = DistrictGeometry::new("Polygon", json!("not-an-array"));
        let err = geometry.validate().unwrap_err();
        assert!(err.contains("must be an array"), "{}", err);
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let geometry = DistrictGeometry::new("Point", json!([0.0, 0.0]));
        assert!(geometry.validate().is_err());
    }

    #[test]
    fn test_wrong_nesting_is_rejected() {
        // LineString nesting under a Polygon type
        let geometry = DistrictGeometry::new("Polygon", json!([[0.0, 0.0], [1.0, 1.0], [2.0, 0.0]]));
        assert!(geometry.validate().is_err());
    }

    #[test]
    fn test_short_ring_and_bad_position_are_rejected() {
        let short = DistrictGeometry::new("Polygon", json!([[[0, 0], [1, 1]]]));
        assert!(short.validate().is_err());

        let bad = DistrictGeometry::new("Polygon", json!([[[0, 0], [1, "x"], [1, 0]]]));
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_serde_uses_geojson_field_names() {
        let value = serde_json::to_value(square()).unwrap();
        assert_eq!(value["type"], "Polygon");
        assert!(value["coordinates"].is_array());

        let back: DistrictGeometry = serde_json::from_value(value).unwrap();
        assert_eq!(back, square());
    }
}
