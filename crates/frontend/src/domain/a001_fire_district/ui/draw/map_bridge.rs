//! Leaflet + Leaflet.draw map, driven from Rust.
//!
//! The page loads both libraries from `index.html`; this module only wires
//! a map into a container element and forwards the drawn geometry.

use contracts::domain::a001_fire_district::DistrictGeometry;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

pub const DEFAULT_CENTER: (f64, f64) = (40.7, -73.9);
pub const DEFAULT_ZOOM: u8 = 8;

#[wasm_bindgen(inline_js = r#"
export function mountDrawMap(container, lat, lng, zoom, onChange) {
  const map = L.map(container).setView([lat, lng], zoom);
  L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
    maxZoom: 19,
    attribution: '&copy; OpenStreetMap contributors'
  }).addTo(map);

  const drawn = new L.FeatureGroup();
  map.addLayer(drawn);
  map.addControl(new L.Control.Draw({
    draw: {
      polyline: false,
      circle: false,
      marker: false,
      circlemarker: false,
      polygon: true,
      rectangle: true
    },
    edit: { featureGroup: drawn }
  }));

  const current = () => {
    const layers = drawn.getLayers();
    return layers.length ? JSON.stringify(layers[0].toGeoJSON().geometry) : null;
  };

  map.on(L.Draw.Event.CREATED, (e) => {
    drawn.clearLayers();
    drawn.addLayer(e.layer);
    onChange(current());
  });
  map.on(L.Draw.Event.EDITED, () => onChange(current()));
  map.on(L.Draw.Event.DELETED, () => onChange(current()));

  setTimeout(() => map.invalidateSize(), 0);
}
"#)]
extern "C" {
    #[wasm_bindgen(js_name = mountDrawMap, catch)]
    fn mount_draw_map(
        container: &HtmlElement,
        lat: f64,
        lng: f64,
        zoom: u8,
        on_change: &Closure<dyn FnMut(Option<String>)>,
    ) -> Result<(), JsValue>;
}

/// Mounts the drawing map into `container`.
///
/// `on_change` receives the GeoJSON geometry of the latest drawing as a JSON
/// string, or `None` once it has been deleted. Drawing a new shape replaces
/// the previous one.
pub fn mount(
    container: &HtmlElement,
    on_change: impl FnMut(Option<String>) + 'static,
) -> Result<(), String> {
    let callback = Closure::<dyn FnMut(Option<String>)>::new(on_change);
    let (lat, lng) = DEFAULT_CENTER;
    mount_draw_map(container, lat, lng, DEFAULT_ZOOM, &callback)
        .map_err(|e| format!("Failed to initialise map: {:?}", e))?;
    // the map holds on to the callback for the lifetime of the page
    callback.forget();
    Ok(())
}

/// Parses a geometry emitted by the map and checks its structure
pub fn parse_drawn_geometry(json: &str) -> Result<DistrictGeometry, String> {
    let geometry: DistrictGeometry =
        serde_json::from_str(json).map_err(|e| format!("Unreadable geometry: {e}"))?;
    geometry.validate()?;
    Ok(geometry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rectangle() {
        let json = r#"{"type":"Polygon","coordinates":[[[-74.1,40.6],[-74.1,40.8],[-73.8,40.8],[-73.8,40.6],[-74.1,40.6]]]}"#;
        let geometry = parse_drawn_geometry(json).unwrap();
        assert_eq!(geometry.kind, "Polygon");
    }

    #[test]
    fn test_parse_rejects_non_polygons() {
        let json = r#"{"type":"Point","coordinates":[-74.0,40.7]}"#;
        assert!(parse_drawn_geometry(json).is_err());
        assert!(parse_drawn_geometry("not json").is_err());
    }
}
