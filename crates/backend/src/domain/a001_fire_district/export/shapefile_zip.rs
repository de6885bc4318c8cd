use std::io::{Cursor, Write};
use std::path::Path;

use contracts::domain::a001_fire_district::export::ExportFormat;
use contracts::domain::a001_fire_district::geometry::Ring;
use shapefile::dbase::{FieldName, FieldValue, Record, TableWriterBuilder};
use shapefile::{Point, Polygon, PolygonRing};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::{ExportError, ExportSource};

/// Base name of every component inside the archive
const BASE_NAME: &str = "district";

/// dBase field holding the district name (dBase names are limited to 10 chars)
pub const NAME_FIELD: &str = "DIST_NAME";
const NAME_FIELD_LENGTH: u8 = 254;

/// Components written next to the .shp, in archive order
const COMPONENT_EXTENSIONS: [&str; 5] = ["shp", "shx", "dbf", "prj", "cpg"];

/// ESRI WKT of WGS84 (EPSG:4326)
const WGS84_PRJ: &str = r#"GEOGCS["GCS_WGS_1984",DATUM["D_WGS_1984",SPHEROID["WGS_1984",6378137.0,298.257223563]],PRIMEM["Greenwich",0.0],UNIT["Degree",0.0174532925199433]]"#;

/// Run `f` inside a fresh directory under `root`; the directory is removed
/// when this returns, whatever `f` returned.
fn in_scratch_dir<T>(
    root: &Path,
    f: impl FnOnce(&Path) -> Result<T, ExportError>,
) -> Result<T, ExportError> {
    let dir = tempfile::Builder::new()
        .prefix("fire-district-")
        .tempdir_in(root)?;
    let result = f(dir.path());
    dir.close()?;
    result
}

/// Name as stored in the dBase field: cut to the field width on a char boundary
fn dbf_name(name: &str) -> &str {
    let max = usize::from(NAME_FIELD_LENGTH);
    if name.len() <= max {
        return name;
    }
    let mut end = max;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

fn to_ring(ring: &Ring, outer: bool) -> PolygonRing<Point> {
    let points = ring.iter().map(|p| Point::new(p[0], p[1])).collect();
    if outer {
        PolygonRing::Outer(points)
    } else {
        PolygonRing::Inner(points)
    }
}

fn to_polygon(source: &ExportSource) -> Polygon {
    let rings = source
        .shape
        .polygons()
        .into_iter()
        .flat_map(|rings| {
            rings
                .iter()
                .enumerate()
                .map(|(i, ring)| to_ring(ring, i == 0))
        })
        .collect();
    Polygon::with_rings(rings)
}

fn write_components(source: &ExportSource, dir: &Path) -> Result<(), ExportError> {
    let shp_path = dir.join(format!("{}.shp", BASE_NAME));
    let field = FieldName::try_from(NAME_FIELD)
        .map_err(|e| ExportError::encode(ExportFormat::Shapefile, format!("{:?}", e)))?;
    let table = TableWriterBuilder::new().add_character_field(field, NAME_FIELD_LENGTH);

    let mut record = Record::default();
    record.insert(
        NAME_FIELD.to_string(),
        FieldValue::Character(Some(dbf_name(&source.name).to_string())),
    );

    {
        // .shp/.shx/.dbf headers are finalized when the writer is dropped
        let mut writer = shapefile::Writer::from_path(&shp_path, table)
            .map_err(|e| ExportError::encode(ExportFormat::Shapefile, e))?;
        writer
            .write_shape_and_record(&to_polygon(source), &record)
            .map_err(|e| ExportError::encode(ExportFormat::Shapefile, e))?;
    }

    std::fs::write(dir.join(format!("{}.prj", BASE_NAME)), WGS84_PRJ)?;
    std::fs::write(dir.join(format!("{}.cpg", BASE_NAME)), "UTF-8")?;
    Ok(())
}

fn zip_components(dir: &Path) -> Result<Vec<u8>, ExportError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for ext in COMPONENT_EXTENSIONS {
        let name = format!("{}.{}", BASE_NAME, ext);
        let bytes = std::fs::read(dir.join(&name))?;
        zip.start_file(name, options)
            .map_err(|e| ExportError::encode(ExportFormat::Shapefile, e))?;
        zip.write_all(&bytes)?;
    }

    let cursor = zip
        .finish()
        .map_err(|e| ExportError::encode(ExportFormat::Shapefile, e))?;
    Ok(cursor.into_inner())
}

/// Zipped Shapefile (.shp, .shx, .dbf, .prj, .cpg) with one polygon record.
///
/// Components are written into a scratch directory under `scratch_root`
/// and the directory is removed before returning, on success and on error.
pub(super) fn write(source: &ExportSource, scratch_root: &Path) -> Result<Vec<u8>, ExportError> {
    in_scratch_dir(scratch_root, |dir| {
        write_components(source, dir)?;
        zip_components(dir)
    })
}
