use contracts::domain::a001_fire_district::export::ExportFormat;
use contracts::domain::a001_fire_district::geometry::Ring;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::geojson_file::NAME_PROPERTY;
use super::{ExportError, ExportSource};

/// KML 2.2 namespace
pub const KML_NS: &str = "http://www.opengis.net/kml/2.2";

type KmlWriter = Writer<Vec<u8>>;

fn emit(xml: &mut KmlWriter, event: Event<'_>) -> Result<(), ExportError> {
    xml.write_event(event)
        .map_err(|e| ExportError::encode(ExportFormat::Kml, e))
}

fn start(xml: &mut KmlWriter, tag: &str) -> Result<(), ExportError> {
    emit(xml, Event::Start(BytesStart::new(tag)))
}

fn end(xml: &mut KmlWriter, tag: &str) -> Result<(), ExportError> {
    emit(xml, Event::End(BytesEnd::new(tag)))
}

fn text_element(xml: &mut KmlWriter, tag: &str, text: &str) -> Result<(), ExportError> {
    start(xml, tag)?;
    emit(xml, Event::Text(BytesText::new(text)))?;
    end(xml, tag)
}

/// `lon,lat[,z]` tuples separated by spaces; the ring is closed if it isn't
fn coordinates_text(ring: &Ring) -> String {
    let mut tuples: Vec<String> = ring
        .iter()
        .map(|p| {
            p.iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect();
    if ring.first() != ring.last() {
        if let Some(first) = tuples.first().cloned() {
            tuples.push(first);
        }
    }
    tuples.join(" ")
}

fn write_boundary(xml: &mut KmlWriter, tag: &str, ring: &Ring) -> Result<(), ExportError> {
    start(xml, tag)?;
    start(xml, "LinearRing")?;
    text_element(xml, "coordinates", &coordinates_text(ring))?;
    end(xml, "LinearRing")?;
    end(xml, tag)
}

fn write_polygon(xml: &mut KmlWriter, rings: &[Ring]) -> Result<(), ExportError> {
    start(xml, "Polygon")?;
    for (i, ring) in rings.iter().enumerate() {
        let tag = if i == 0 {
            "outerBoundaryIs"
        } else {
            "innerBoundaryIs"
        };
        write_boundary(xml, tag, ring)?;
    }
    end(xml, "Polygon")
}

/// KML document with one Placemark; multi-polygons become a MultiGeometry
pub(super) fn write(source: &ExportSource) -> Result<Vec<u8>, ExportError> {
    let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);

    emit(&mut xml, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("kml");
    root.push_attribute(("xmlns", KML_NS));
    emit(&mut xml, Event::Start(root))?;
    start(&mut xml, "Document")?;
    text_element(&mut xml, "name", &source.name)?;

    start(&mut xml, "Placemark")?;
    text_element(&mut xml, "name", &source.name)?;

    start(&mut xml, "ExtendedData")?;
    let mut data = BytesStart::new("Data");
    data.push_attribute(("name", NAME_PROPERTY));
    emit(&mut xml, Event::Start(data))?;
    text_element(&mut xml, "value", &source.name)?;
    end(&mut xml, "Data")?;
    end(&mut xml, "ExtendedData")?;

    let polygons = source.shape.polygons();
    if polygons.len() == 1 {
        write_polygon(&mut xml, polygons[0])?;
    } else {
        start(&mut xml, "MultiGeometry")?;
        for rings in polygons {
            write_polygon(&mut xml, rings)?;
        }
        end(&mut xml, "MultiGeometry")?;
    }

    end(&mut xml, "Placemark")?;
    end(&mut xml, "Document")?;
    end(&mut xml, "kml")?;

    Ok(xml.into_inner())
}

#[cfg(test)]
mod tests {
    use super::super::{export, tests::draft};
    use super::*;
    use contracts::domain::a001_fire_district::aggregate::DistrictDraft;
    use contracts::domain::a001_fire_district::geometry::DistrictGeometry;
    use serde_json::json;

    fn kml_for(draft: &DistrictDraft) -> String {
        let file = export(draft, ExportFormat::Kml).unwrap();
        String::from_utf8(file.bytes).unwrap()
    }

    #[test]
    fn test_polygon_placemark() {
        let kml = kml_for(&draft(
            "Station 7",
            json!([[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]]]),
        ));

        assert!(kml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(kml.contains(KML_NS));
        assert_eq!(kml.matches("<Placemark>").count(), 1);
        assert!(kml.contains("<name>Station 7</name>"));
        assert!(kml.contains("<outerBoundaryIs>"));
        // ring closed back onto its first vertex
        assert!(kml.contains("<coordinates>0,0 0,1 1,1 1,0 0,0</coordinates>"));
        assert!(!kml.contains("MultiGeometry"));
    }

    #[test]
    fn test_holes_and_multipolygons() {
        let kml = kml_for(&DistrictDraft {
            name: "Twin".into(),
            geometry: DistrictGeometry::new(
                "MultiPolygon",
                json!([
                    [
                        [[0, 0], [0, 10], [10, 10], [10, 0], [0, 0]],
                        [[2, 2], [2, 3], [3, 3], [2, 2]]
                    ],
                    [[[20, 20], [20, 21], [21, 21], [20, 20]]]
                ]),
            ),
        });
        assert!(kml.contains("<MultiGeometry>"));
        assert_eq!(kml.matches("<Polygon>").count(), 2);
        assert_eq!(kml.matches("<innerBoundaryIs>").count(), 1);
    }

    #[test]
    fn test_name_is_escaped() {
        let kml = kml_for(&draft(
            "Hose & Ladder <3>",
            json!([[[0, 0], [0, 1], [1, 1], [0, 0]]]),
        ));
        assert!(kml.contains("Hose &amp; Ladder &lt;3&gt;"));
    }

    #[test]
    fn test_blank_name_uses_default() {
        let kml = kml_for(&draft("", json!([[[0, 0], [0, 1], [1, 1], [0, 0]]])));
        assert!(kml.contains("<name>Unnamed District</name>"));
    }
}
