mod common;

use std::fs;
use std::path::Path;
use approx::assert_abs_diff_eq;
use tempfile::tempdir;

use common::{geo_gcp, proj_gcp, MapBuilder, ScaleTransform};
use odin_ozimap::config::OziMapConfig;
use odin_ozimap::crs::SrsPair;
use odin_ozimap::cutline::CutlineSpace;
use odin_ozimap::map::{GroundRef, Point, RawGcp};
use odin_ozimap::record::write_record;
use odin_ozimap::transform::Proj4Transformer;
use odin_ozimap::{convert_gcps, OziMapConverter, OziMapError};

fn latlong_map () -> MapBuilder {
    MapBuilder::new().latlong()
        .gcp(1, geo_gcp(1, 0, 0, (55, 0.0, "N"), (37, 0.0, "E")))
        .gcp(2, geo_gcp(2, 1000, 0, (55, 0.0, "N"), (38, 0.0, "E")))
        .gcp(3, geo_gcp(3, 0, 1000, (54, 0.0, "N"), (37, 0.0, "E")))
        .tail("MMPNUM,4")
        .tail("MMPLL,1,  37.000000,  55.000000")
        .tail("MMPLL,2,  38.000000,  55.000000")
        .tail("MMPLL,3,  38.000000,  54.000000")
        .tail("MMPLL,4,  37.000000,  54.000000")
}

fn write_map (dir: &Path, map: &MapBuilder) -> std::path::PathBuf {
    let path = dir.join("sheet-01.map");
    fs::write(&path, map.build()).unwrap();
    path
}

#[test]
fn test_convert_latlong_map() {
    let dir = tempdir().unwrap();
    let map_path = write_map(dir.path(), &latlong_map());
    fs::write(dir.path().join("sheet-01.jpg"), b"").unwrap(); // map refers to "Sheet-01.JPG"

    let config = OziMapConfig::default();
    let converter = OziMapConverter::new(&config, &Proj4Transformer);
    let rec = converter.convert_file(&map_path, Some(CutlineSpace::Geographic)).unwrap();

    assert_eq!(rec.image_path, dir.path().join("sheet-01.jpg"));
    assert_eq!(rec.title, "Test sheet");
    assert_eq!(rec.datum, "wgs84");
    assert_eq!(rec.srs.projected, "+datum=WGS84 +proj=latlong");
    assert_eq!(rec.gcps.len(), 3);

    let gt = rec.transform.forward.coefficients();
    assert_abs_diff_eq!(gt[0], 37.0, epsilon = 1e-9);
    assert_abs_diff_eq!(gt[1], 0.001, epsilon = 1e-12);
    assert_abs_diff_eq!(gt[2], 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(gt[3], 55.0, epsilon = 1e-9);
    assert_abs_diff_eq!(gt[4], 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(gt[5], -0.001, epsilon = 1e-12);
    assert_abs_diff_eq!(rec.units_per_pixel, 0.001, epsilon = 1e-12);

    let px = rec.transform.ground_to_pixel(Point::new(37.5, 54.5));
    assert_abs_diff_eq!(px.x, 500.0, epsilon = 1e-6);
    assert_abs_diff_eq!(px.y, 500.0, epsilon = 1e-6);

    let cutline = rec.cutline.unwrap();
    assert_eq!(cutline.points.len(), 5);
    assert_eq!(cutline.points[0], Point::new(37.0, 55.0));
    assert_eq!(cutline.points[4], Point::new(37.0, 55.0));
}

#[test]
fn test_convert_without_cutline() {
    let dir = tempdir().unwrap();
    let map_path = write_map(dir.path(), &latlong_map());
    fs::write(dir.path().join("Sheet-01.JPG"), b"").unwrap();

    let config = OziMapConfig::default();
    let converter = OziMapConverter::new(&config, &Proj4Transformer);
    let rec = converter.convert_file(&map_path, None).unwrap();
    assert!(rec.cutline.is_none());
}

#[test]
fn test_convert_projected_gcps() {
    let dir = tempdir().unwrap();
    let map = MapBuilder::new()
        .gcp(1, proj_gcp(1, 0, 0, "35", 500000.0, 6100000.0, "N"))
        .gcp(2, proj_gcp(2, 1000, 1000, "35", 502000.0, 6098000.0, "N"));
    let map_path = write_map(dir.path(), &map);
    fs::write(dir.path().join("sheet-01.jpg"), b"").unwrap();

    let config = OziMapConfig::default();
    let converter = OziMapConverter::new(&config, &Proj4Transformer);
    let rec = converter.convert_file(&map_path, None).unwrap();

    assert_eq!(rec.srs.projected, "+datum=WGS84 +proj=tmerc +units=m +lat_0=0 +lon_0=27 +k=1 +x_0=500000 +y_0=0");
    assert_eq!(rec.transform.forward.coefficients(), &[500000.0, 2.0, 0.0, 6100000.0, 0.0, -2.0]);
    assert_eq!(rec.units_per_pixel, 2.0);
}

#[test]
fn test_convert_errors() {
    let dir = tempdir().unwrap();
    let map_path = write_map(dir.path(), &latlong_map());

    let config = OziMapConfig::default();
    let converter = OziMapConverter::new(&config, &Proj4Transformer);

    match converter.convert_file(&map_path, None) {
        Err(OziMapError::ImageNotFound(name)) => assert_eq!(name, "Sheet-01.JPG"),
        other => panic!("expected ImageNotFound, got {:?}", other)
    }

    fs::write(dir.path().join("sheet-01.jpg"), b"").unwrap();
    fs::write(dir.path().join("SHEET-01.jpg"), b"").unwrap();
    assert!(matches!(converter.convert_file(&map_path, None), Err(OziMapError::AmbiguousImage(_))));
    fs::remove_file(dir.path().join("SHEET-01.jpg")).unwrap();

    let no_gcps = dir.path().join("empty.map");
    fs::write(&no_gcps, MapBuilder::new().latlong().build()).unwrap();
    assert!(matches!(converter.convert_file(&no_gcps, None), Err(OziMapError::InsufficientGcps(0))));

    let bad = dir.path().join("bad.map");
    fs::write(&bad, "not a map file\r\n").unwrap();
    assert!(matches!(converter.convert_file(&bad, None), Err(OziMapError::Format(_))));
}

#[test]
fn test_unsupported_datum() {
    let dir = tempdir().unwrap();
    let mut map = latlong_map();
    map.datum = "Tokyo,Tokyo,   0.0000,   0.0000,Tokyo".to_string();
    let map_path = write_map(dir.path(), &map);
    fs::write(dir.path().join("sheet-01.jpg"), b"").unwrap();

    let config = OziMapConfig::default();
    let converter = OziMapConverter::new(&config, &Proj4Transformer);
    match converter.convert_file(&map_path, None) {
        Err(e @ OziMapError::UnsupportedCrs(_)) => assert_eq!(e.to_string(), "unsupported datum or projection: 'Tokyo'"),
        other => panic!("expected UnsupportedCrs, got {:?}", other)
    }
}

#[test]
fn test_convert_gcps_tmerc() {
    let srs = SrsPair {
        projected: "+datum=WGS84 +proj=tmerc +units=m +lat_0=0 +lon_0=27 +k=1 +x_0=500000 +y_0=0".to_string(),
        geographic: "+datum=WGS84 +proj=latlong".to_string(),
    };
    let raw = [
        RawGcp { pixel: Point::new(0.0, 0.0), ground: GroundRef::Geographic(Point::new(27.0, 0.0)) },
        RawGcp { pixel: Point::new(0.0, 100.0), ground: GroundRef::Geographic(Point::new(27.0, 1.0)) },
        RawGcp { pixel: Point::new(100.0, 0.0), ground: GroundRef::Projected { point: Point::new(1.0, 2.0), zone: Some(35) } },
    ];

    let gcps = convert_gcps(&raw, &srs, &Proj4Transformer).unwrap();
    assert_abs_diff_eq!(gcps[0].ground.x, 500000.0, epsilon = 1e-3);
    assert_abs_diff_eq!(gcps[0].ground.y, 0.0, epsilon = 1e-3);
    assert_abs_diff_eq!(gcps[1].ground.x, 500000.0, epsilon = 1e-3);
    assert_abs_diff_eq!(gcps[1].ground.y, 110574.4, epsilon = 1.0); // meridian arc of 1 deg at the equator
    assert_eq!(gcps[2].ground, Point::new(1.0, 2.0));
    assert_eq!(gcps[2].pixel, Point::new(100.0, 0.0));
}

#[test]
fn test_scaled_pipeline() {
    let config = OziMapConfig::default();
    let converter = OziMapConverter::new(&config, &ScaleTransform);

    let mut raw = odin_ozimap::reader::read_map(&latlong_map().build()).unwrap();
    raw.projection = odin_ozimap::map::Projection::new("Mercator");
    for p in [ odin_ozimap::map::ProjParam::LonOrigin, odin_ozimap::map::ProjParam::FalseEasting,
               odin_ozimap::map::ProjParam::FalseNorthing ] {
        raw.projection.set_param(p, 0.0);
    }
    raw.projection.set_param(odin_ozimap::map::ProjParam::KFactor, 1.0);

    let rec = converter.build_record(&raw, "sheet-01.jpg".into(), Some(CutlineSpace::Projected)).unwrap();
    // ScaleTransform: x = lon*1000, y = lat*2000
    assert_abs_diff_eq!(rec.gcps[1].ground.x, 38000.0, epsilon = 1e-9);
    assert_abs_diff_eq!(rec.gcps[2].ground.y, 108000.0, epsilon = 1e-9);
    assert_abs_diff_eq!(rec.units_per_pixel, 2.0, epsilon = 1e-6);

    let cutline = rec.cutline.unwrap();
    assert_eq!(cutline.points[1], Point::new(38000.0, 110000.0));
    assert_eq!(cutline.srs.as_deref(), Some(rec.srs.projected.as_str()));
}

#[test]
fn test_write_record() {
    let dir = tempdir().unwrap();
    let map_path = write_map(dir.path(), &latlong_map());
    fs::write(dir.path().join("sheet-01.jpg"), b"").unwrap();

    let config = OziMapConfig::default();
    let converter = OziMapConverter::new(&config, &Proj4Transformer);
    let rec = converter.convert_file(&map_path, Some(CutlineSpace::Geographic)).unwrap();

    let rel_path = dir.path().join("rel.maprec.ron");
    write_record(&rec, &rel_path, true).unwrap();
    let contents = fs::read_to_string(&rel_path).unwrap();
    assert!(contents.starts_with("GeoreferencingRecord("));
    assert!(contents.contains("image_path: \"sheet-01.jpg\""));

    let abs_path = dir.path().join("abs.maprec.ron");
    write_record(&rec, &abs_path, false).unwrap();
    let contents = fs::read_to_string(&abs_path).unwrap();
    let expected = format!("image_path: {:?}", rec.image_path.to_str().unwrap());
    assert!(contents.contains(&expected));

    let restored: odin_ozimap::record::GeoreferencingRecord = ron::from_str(&contents).unwrap();
    assert_eq!(restored.image_path, rec.image_path);
    assert_eq!(restored.cutline, rec.cutline);
}
