#![allow(dead_code)]

use odin_ozimap::crs::is_latlong;
use odin_ozimap::errors::Result;
use odin_ozimap::map::Point;
use odin_ozimap::transform::CoordTransform;

pub const TM_SETUP: &str = "Projection Setup,     0.000000000,    27.000000000,     1.000000000,   500000.00,        0.00,,,,,";

pub fn excluded_gcp (slot: usize) -> String {
    format!("Point{:02},xy,     ,     ,ex, deg,    ,        ,N,    ,        ,E, grid,   ,           ,           ,N", slot)
}

pub fn geo_gcp (slot: usize, px: i64, py: i64, lat: (i64,f64,&str), lon: (i64,f64,&str)) -> String {
    format!("Point{:02},xy, {:5}, {:5},in, deg, {:3}, {:8.4},{}, {:3}, {:8.4},{}, grid,   ,           ,           ,N",
            slot, px, py, lat.0, lat.1, lat.2, lon.0, lon.1, lon.2)
}

pub fn proj_gcp (slot: usize, px: i64, py: i64, zone: &str, x: f64, y: f64, ns: &str) -> String {
    format!("Point{:02},xy, {:5}, {:5},in, deg,    ,        ,N,    ,        ,E, grid, {:>3}, {:10.1}, {:10.1},{}",
            slot, px, py, zone, x, y, ns)
}

/// assembles the fixed line layout of a map file: 9 header lines, 30 gcp slots, projection setup and tail lines
pub struct MapBuilder {
    pub signature: String,
    pub title: String,
    pub image: String,
    pub datum: String,
    pub projection_line: String,
    pub gcps: Vec<String>,
    pub setup: String,
    pub tail: Vec<String>,
}

impl MapBuilder {
    pub fn new () -> MapBuilder {
        MapBuilder {
            signature: "OziExplorer Map Data File Version 2.2".to_string(),
            title: "Test sheet".to_string(),
            image: "C:\\maps\\Sheet-01.JPG".to_string(),
            datum: "WGS 84,WGS 84,   0.0000,   0.0000,WGS 84".to_string(),
            projection_line: "Map Projection,Transverse Mercator,PolyCal,No,AutoCalOnly,No,BSBUseWPX,No".to_string(),
            gcps: (1..=30).map(excluded_gcp).collect(),
            setup: TM_SETUP.to_string(),
            tail: vec![
                "Map Feature = MF ; Map Comment = MC     These follow if they exist".to_string(),
                "MM0,Yes".to_string(),
            ],
        }
    }

    pub fn latlong (mut self) -> MapBuilder {
        self.projection_line = "Map Projection,Latitude/Longitude,PolyCal,No,AutoCalOnly,No,BSBUseWPX,No".to_string();
        self.setup = "Projection Setup,,,,,,,,,,".to_string();
        self
    }

    pub fn gcp (mut self, slot: usize, line: String) -> MapBuilder {
        self.gcps[slot-1] = line;
        self
    }

    pub fn tail (mut self, line: &str) -> MapBuilder {
        self.tail.push(line.to_string());
        self
    }

    pub fn lines (&self) -> Vec<String> {
        let mut lines = vec![
            self.signature.clone(),
            self.title.clone(),
            self.image.clone(),
            "1 ,Map Code,".to_string(),
            self.datum.clone(),
            "Reserved 1".to_string(),
            "Reserved 2".to_string(),
            "Magnetic Variation,,,E".to_string(),
            self.projection_line.clone(),
        ];
        lines.extend(self.gcps.iter().cloned());
        lines.push(self.setup.clone());
        lines.extend(self.tail.iter().cloned());
        lines
    }

    pub fn build (&self) -> String {
        let mut s = self.lines().join("\r\n");
        s.push_str("\r\n");
        s
    }
}

/// a deterministic stand-in for a projection: projected = (lon*1000, lat*2000)
pub struct ScaleTransform;

impl CoordTransform for ScaleTransform {
    fn transform (&self, src_srs: &str, tgt_srs: &str, points: &[Point]) -> Result<Vec<Point>> {
        let res = match (is_latlong(src_srs), is_latlong(tgt_srs)) {
            (true, false) => points.iter().map(|p| Point::new(p.x * 1000.0, p.y * 2000.0)).collect(),
            (false, true) => points.iter().map(|p| Point::new(p.x / 1000.0, p.y / 2000.0)).collect(),
            _ => points.to_vec()
        };
        Ok(res)
    }
}

/// a broken transformation that loses the last point of every request
pub struct DroppingTransform;

impl CoordTransform for DroppingTransform {
    fn transform (&self, _src_srs: &str, _tgt_srs: &str, points: &[Point]) -> Result<Vec<Point>> {
        Ok(points[..points.len().saturating_sub(1)].to_vec())
    }
}
