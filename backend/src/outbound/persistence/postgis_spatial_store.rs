//! PostGIS-backed `SpatialStore` adapter.
//!
//! `roads.geom` is a `geography` column, so `ST_DWithin` and `ST_Distance`
//! measure metres; `use_spheroid = false` keeps the measure on a sphere.
//! `regions.border` is a planar `geometry` column tested with
//! `ST_Intersects`, which counts boundary points as inside.
//!
//! This is the one place where a [`Coordinate`] is turned into
//! (longitude, latitude) for the database.

use async_trait::async_trait;
use diesel::sql_query;
use diesel::sql_types::Double;
use diesel_async::RunQueryDsl;
use geojson::Geometry;

use crate::domain::geo::{
    Coordinate, MaxDistance, RegionFeature, RegionProperties, RoadFeature, RoadProperties,
};
use crate::domain::ports::{SpatialStore, SpatialStoreError};

use super::diesel_helpers::classify_diesel_error;
use super::models::{RegionRow, RoadRow};
use super::pool::{DbPool, PoolError};

const NEAR_ROADS_SQL: &str = r"
SELECT osm_id, name, highway, ST_AsGeoJSON(geom)::text AS geometry
FROM roads
WHERE ST_DWithin(geom, ST_SetSRID(ST_MakePoint($1, $2), 4326)::geography, $3, false)
ORDER BY ST_Distance(geom, ST_SetSRID(ST_MakePoint($1, $2), 4326)::geography, false), osm_id
";

const CONTAINING_REGION_SQL: &str = r"
SELECT id, province, district, sub_district, village, ST_AsGeoJSON(border)::text AS border
FROM regions
WHERE ST_Intersects(border, ST_SetSRID(ST_MakePoint($1, $2), 4326))
ORDER BY ST_Area(border), id
LIMIT 1
";

/// Diesel-backed spatial store.
#[derive(Clone)]
pub struct PostgisSpatialStore {
    pool: DbPool,
}

impl PostgisSpatialStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SpatialStoreError {
    SpatialStoreError::unavailable(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error, operation: &str) -> SpatialStoreError {
    SpatialStoreError::unavailable(classify_diesel_error(error, operation).into_message())
}

fn decode_geometry(raw: &str, owner: &str) -> Result<Geometry, SpatialStoreError> {
    serde_json::from_str(raw)
        .map_err(|err| SpatialStoreError::decode(format!("{owner}: geometry JSON: {err}")))
}

pub(crate) fn road_from_row(row: RoadRow) -> Result<RoadFeature, SpatialStoreError> {
    let owner = format!("road {}", row.osm_id);
    let geometry = decode_geometry(&row.geometry, &owner)?;
    RoadFeature::new(
        RoadProperties {
            osm_id: row.osm_id,
            name: row.name,
            highway: row.highway,
        },
        geometry,
    )
    .map_err(|err| SpatialStoreError::decode(format!("{owner}: {err}")))
}

pub(crate) fn region_from_row(row: RegionRow) -> Result<RegionFeature, SpatialStoreError> {
    let owner = format!("region {}", row.id);
    let border = decode_geometry(&row.border, &owner)?;
    RegionFeature::new(
        row.id,
        RegionProperties {
            province: row.province,
            district: row.district,
            sub_district: row.sub_district,
            village: row.village,
        },
        border,
    )
    .map_err(|err| SpatialStoreError::decode(format!("{owner}: {err}")))
}

#[async_trait]
impl SpatialStore for PostgisSpatialStore {
    async fn find_near_roads(
        &self,
        coordinate: Coordinate,
        max_distance: MaxDistance,
    ) -> Result<Vec<RoadFeature>, SpatialStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<RoadRow> = sql_query(NEAR_ROADS_SQL)
            .bind::<Double, _>(coordinate.longitude())
            .bind::<Double, _>(coordinate.latitude())
            .bind::<Double, _>(max_distance.metres())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "find near roads"))?;
        rows.into_iter().map(road_from_row).collect()
    }

    async fn find_containing_region(
        &self,
        coordinate: Coordinate,
    ) -> Result<Option<RegionFeature>, SpatialStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut rows: Vec<RegionRow> = sql_query(CONTAINING_REGION_SQL)
            .bind::<Double, _>(coordinate.longitude())
            .bind::<Double, _>(coordinate.latitude())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "find containing region"))?;
        rows.pop().map(region_from_row).transpose()
    }
}
