//! Process-local spatial store used in fixture mode and tests.
//!
//! Road distance is the haversine distance from the query point to the
//! closest point on the road's line geometry. Region containment is planar
//! intersection on longitude/latitude, boundary inclusive, with the smallest
//! planar area winning ties. Both mirror the PostGIS operators closely enough
//! for fixtures; they are not a substitute for a spatial index.

use std::cmp::Ordering;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use geo::{Area, Closest, HaversineClosestPoint, HaversineDistance, Intersects, Point};
use geojson::{Geometry, Value};

use crate::domain::geo::{Coordinate, MaxDistance, RegionFeature, RoadFeature};
use crate::domain::ports::{
    RegionRecord, SpatialIngestionError, SpatialIngestionRepository, SpatialStore,
    SpatialStoreError,
};

#[derive(Debug)]
struct Features {
    roads: Vec<RoadFeature>,
    regions: Vec<RegionFeature>,
    next_region_id: i64,
}

/// Holds roads and regions in memory behind a read/write lock.
#[derive(Debug)]
pub struct InMemorySpatialStore {
    features: RwLock<Features>,
}

fn check_positions(value: &Value) -> Result<(), SpatialStoreError> {
    let well_formed = |position: &Vec<f64>| {
        position.len() >= 2 && position.iter().all(|component| component.is_finite())
    };
    let ok = match value {
        Value::Point(position) => well_formed(position),
        Value::MultiPoint(line) | Value::LineString(line) => line.iter().all(well_formed),
        Value::MultiLineString(rings) | Value::Polygon(rings) => {
            rings.iter().flatten().all(well_formed)
        }
        Value::MultiPolygon(polygons) => polygons.iter().flatten().flatten().all(well_formed),
        Value::GeometryCollection(members) => {
            return members
                .iter()
                .try_for_each(|member| check_positions(&member.value));
        }
    };
    if ok {
        Ok(())
    } else {
        Err(SpatialStoreError::decode(
            "positions need finite longitude and latitude",
        ))
    }
}

fn to_geo(geometry: &Geometry) -> Result<geo::Geometry<f64>, SpatialStoreError> {
    check_positions(&geometry.value)?;
    geo::Geometry::<f64>::try_from(geometry.value.clone())
        .map_err(|err| SpatialStoreError::decode(err.to_string()))
}

fn road_distance(road: &RoadFeature, origin: Point<f64>) -> Result<f64, SpatialStoreError> {
    let closest = match to_geo(road.geometry())? {
        geo::Geometry::LineString(line) => line.haversine_closest_point(&origin),
        geo::Geometry::MultiLineString(lines) => lines.haversine_closest_point(&origin),
        _ => {
            return Err(SpatialStoreError::decode(format!(
                "road {} does not have a line geometry",
                road.osm_id()
            )));
        }
    };
    match closest {
        Closest::Intersection(point) | Closest::SinglePoint(point) => {
            Ok(origin.haversine_distance(&point))
        }
        Closest::Indeterminate => Err(SpatialStoreError::decode(format!(
            "road {} has no closest point",
            road.osm_id()
        ))),
    }
}

fn region_area_if_containing(
    region: &RegionFeature,
    origin: Point<f64>,
) -> Result<Option<f64>, SpatialStoreError> {
    let border = to_geo(region.border())?;
    let hit = match &border {
        geo::Geometry::Polygon(polygon) => polygon.intersects(&origin),
        geo::Geometry::MultiPolygon(polygons) => polygons.intersects(&origin),
        _ => {
            return Err(SpatialStoreError::decode(format!(
                "region {} does not have a polygon border",
                region.id()
            )));
        }
    };
    Ok(hit.then(|| border.unsigned_area()))
}

impl Default for InMemorySpatialStore {
    fn default() -> Self {
        Self::with_features(Vec::new(), Vec::new())
    }
}

impl InMemorySpatialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing features.
    #[must_use]
    pub fn with_features(roads: Vec<RoadFeature>, regions: Vec<RegionFeature>) -> Self {
        let next_region_id = regions.iter().map(RegionFeature::id).max().unwrap_or(0) + 1;
        Self {
            features: RwLock::new(Features {
                roads,
                regions,
                next_region_id,
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Features>, SpatialStoreError> {
        self.features
            .read()
            .map_err(|_| SpatialStoreError::unavailable("feature store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Features>, SpatialIngestionError> {
        self.features
            .write()
            .map_err(|_| SpatialIngestionError::query("feature store lock poisoned"))
    }
}

#[async_trait]
impl SpatialStore for InMemorySpatialStore {
    async fn find_near_roads(
        &self,
        coordinate: Coordinate,
        max_distance: MaxDistance,
    ) -> Result<Vec<RoadFeature>, SpatialStoreError> {
        let origin = coordinate.to_point();
        let features = self.read()?;
        let mut hits = Vec::new();
        for road in &features.roads {
            let distance = road_distance(road, origin)?;
            if distance <= max_distance.metres() {
                hits.push((distance, road));
            }
        }
        hits.sort_by(|(left, a), (right, b)| {
            left.total_cmp(right).then_with(|| a.osm_id().cmp(&b.osm_id()))
        });
        Ok(hits.into_iter().map(|(_, road)| road.clone()).collect())
    }

    async fn find_containing_region(
        &self,
        coordinate: Coordinate,
    ) -> Result<Option<RegionFeature>, SpatialStoreError> {
        let origin = coordinate.to_point();
        let features = self.read()?;
        let mut best: Option<(f64, &RegionFeature)> = None;
        for region in &features.regions {
            let Some(area) = region_area_if_containing(region, origin)? else {
                continue;
            };
            let better = match best {
                None => true,
                Some((best_area, current)) => match area.total_cmp(&best_area) {
                    Ordering::Less => true,
                    Ordering::Equal => region.id() < current.id(),
                    Ordering::Greater => false,
                },
            };
            if better {
                best = Some((area, region));
            }
        }
        Ok(best.map(|(_, region)| region.clone()))
    }
}

#[async_trait]
impl SpatialIngestionRepository for InMemorySpatialStore {
    async fn upsert_roads(&self, roads: &[RoadFeature]) -> Result<usize, SpatialIngestionError> {
        let mut features = self.write()?;
        for road in roads {
            match features
                .roads
                .iter_mut()
                .find(|stored| stored.osm_id() == road.osm_id())
            {
                Some(stored) => *stored = road.clone(),
                None => features.roads.push(road.clone()),
            }
        }
        Ok(roads.len())
    }

    async fn upsert_regions(
        &self,
        regions: &[RegionRecord],
    ) -> Result<usize, SpatialIngestionError> {
        let mut features = self.write()?;
        for record in regions {
            let existing = features
                .regions
                .iter()
                .position(|stored| stored.properties() == &record.properties);
            let id = match existing {
                Some(index) => features.regions[index].id(),
                None => features.next_region_id,
            };
            let region = RegionFeature::new(id, record.properties.clone(), record.border.clone())
                .map_err(|err| SpatialIngestionError::query(err.to_string()))?;
            match existing {
                Some(index) => features.regions[index] = region,
                None => {
                    features.regions.push(region);
                    features.next_region_id += 1;
                }
            }
        }
        Ok(regions.len())
    }
}
