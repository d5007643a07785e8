//! Stored road and region features.
//!
//! Features are owned by the spatial store and handed out read-only. The
//! constructors check that the geometry has the expected family (line for
//! roads, polygon for regions) and enough positions to describe it;
//! coordinates are kept exactly as stored.

use geojson::{Geometry, Value};

/// Geometry rejected by a feature constructor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeatureShapeError {
    /// Geometry family did not match the feature kind.
    #[error("expected {expected} geometry, found {found}")]
    WrongKind {
        expected: &'static str,
        found: &'static str,
    },
    /// A multi-geometry or polygon has nothing in it.
    #[error("{part} is empty")]
    Empty { part: &'static str },
    /// A line or ring is too short to describe a shape.
    #[error("{part} needs at least {min} positions, found {found}")]
    TooFewPositions {
        part: &'static str,
        min: usize,
        found: usize,
    },
}

const LINE_MIN_POSITIONS: usize = 2;
const RING_MIN_POSITIONS: usize = 4;

fn check_len(part: &'static str, min: usize, found: usize) -> Result<(), FeatureShapeError> {
    if found < min {
        return Err(FeatureShapeError::TooFewPositions { part, min, found });
    }
    Ok(())
}

fn check_not_empty<T>(part: &'static str, members: &[T]) -> Result<(), FeatureShapeError> {
    if members.is_empty() {
        return Err(FeatureShapeError::Empty { part });
    }
    Ok(())
}

fn check_lines(lines: &[Vec<Vec<f64>>]) -> Result<(), FeatureShapeError> {
    check_not_empty("multi-line", lines)?;
    lines
        .iter()
        .try_for_each(|line| check_len("line", LINE_MIN_POSITIONS, line.len()))
}

fn check_polygon(rings: &[Vec<Vec<f64>>]) -> Result<(), FeatureShapeError> {
    check_not_empty("polygon", rings)?;
    rings
        .iter()
        .try_for_each(|ring| check_len("ring", RING_MIN_POSITIONS, ring.len()))
}

/// GeoJSON type name of a geometry value.
#[must_use]
pub fn geometry_kind(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

/// Properties attached to a road feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadProperties {
    /// OpenStreetMap way identifier.
    pub osm_id: i64,
    /// Street name, when the source has one.
    pub name: Option<String>,
    /// OSM `highway` tag value, for example `residential`.
    pub highway: Option<String>,
}

/// A road segment with a line geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadFeature {
    properties: RoadProperties,
    geometry: Geometry,
}

impl RoadFeature {
    /// Accepts `LineString` and `MultiLineString` geometries whose lines
    /// have at least two positions.
    pub fn new(properties: RoadProperties, geometry: Geometry) -> Result<Self, FeatureShapeError> {
        match &geometry.value {
            Value::LineString(line) => check_len("line", LINE_MIN_POSITIONS, line.len())?,
            Value::MultiLineString(lines) => check_lines(lines)?,
            other => {
                return Err(FeatureShapeError::WrongKind {
                    expected: "line",
                    found: geometry_kind(other),
                });
            }
        }
        Ok(Self {
            properties,
            geometry,
        })
    }

    /// OpenStreetMap way identifier.
    #[must_use]
    pub fn osm_id(&self) -> i64 {
        self.properties.osm_id
    }

    /// Properties as stored.
    #[must_use]
    pub fn properties(&self) -> &RoadProperties {
        &self.properties
    }

    /// Line geometry, longitude first, exactly as stored.
    #[must_use]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub(crate) fn into_parts(self) -> (RoadProperties, Geometry) {
        (self.properties, self.geometry)
    }
}

/// Administrative names for a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionProperties {
    /// Provinsi, the first-level division.
    pub province: String,
    /// Kabupaten or kota.
    pub district: String,
    /// Kecamatan.
    pub sub_district: String,
    /// Desa or kelurahan.
    pub village: String,
}

/// An administrative region with a polygon border.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionFeature {
    id: i64,
    properties: RegionProperties,
    border: Geometry,
}

impl RegionFeature {
    /// Accepts `Polygon` and `MultiPolygon` borders whose rings have at
    /// least four positions.
    pub fn new(
        id: i64,
        properties: RegionProperties,
        border: Geometry,
    ) -> Result<Self, FeatureShapeError> {
        match &border.value {
            Value::Polygon(rings) => check_polygon(rings)?,
            Value::MultiPolygon(polygons) => {
                check_not_empty("multi-polygon", polygons)?;
                polygons
                    .iter()
                    .try_for_each(|rings| check_polygon(rings))?;
            }
            other => {
                return Err(FeatureShapeError::WrongKind {
                    expected: "polygon",
                    found: geometry_kind(other),
                });
            }
        }
        Ok(Self {
            id,
            properties,
            border,
        })
    }

    /// Store-assigned identifier.
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Administrative names.
    #[must_use]
    pub fn properties(&self) -> &RegionProperties {
        &self.properties
    }

    /// Polygon border, longitude first, exactly as stored.
    #[must_use]
    pub fn border(&self) -> &Geometry {
        &self.border
    }

    pub(crate) fn into_parts(self) -> (RegionProperties, Geometry) {
        (self.properties, self.border)
    }
}
