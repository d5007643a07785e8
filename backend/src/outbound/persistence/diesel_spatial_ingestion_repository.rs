//! PostgreSQL-backed writer for roads and regions.
//!
//! Each batch runs in one transaction, so a rejected row rolls back the rows
//! written before it.

use async_trait::async_trait;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Nullable, Text};
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};
use geojson::Geometry;

use crate::domain::geo::RoadFeature;
use crate::domain::ports::{RegionRecord, SpatialIngestionError, SpatialIngestionRepository};

use super::diesel_helpers::{DieselFailure, classify_diesel_error};
use super::pool::{DbPool, PoolError};

const UPSERT_ROAD_SQL: &str = r"
INSERT INTO roads (osm_id, name, highway, geom)
VALUES ($1, $2, $3, ST_SetSRID(ST_GeomFromGeoJSON($4), 4326)::geography)
ON CONFLICT (osm_id)
DO UPDATE SET
    name = EXCLUDED.name,
    highway = EXCLUDED.highway,
    geom = EXCLUDED.geom
";

const UPSERT_REGION_SQL: &str = r"
INSERT INTO regions (province, district, sub_district, village, border)
VALUES ($1, $2, $3, $4, ST_SetSRID(ST_GeomFromGeoJSON($5), 4326))
ON CONFLICT (province, district, sub_district, village)
DO UPDATE SET border = EXCLUDED.border
";

/// Diesel-backed implementation of the ingestion port.
#[derive(Clone)]
pub struct DieselSpatialIngestionRepository {
    pool: DbPool,
}

impl DieselSpatialIngestionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SpatialIngestionError {
    SpatialIngestionError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error, operation: &str) -> SpatialIngestionError {
    match classify_diesel_error(error, operation) {
        DieselFailure::Connection(message) => SpatialIngestionError::connection(message),
        other => SpatialIngestionError::query(other.into_message()),
    }
}

fn geometry_json(geometry: &Geometry) -> Result<String, SpatialIngestionError> {
    serde_json::to_string(geometry)
        .map_err(|err| SpatialIngestionError::query(format!("failed to serialise geometry: {err}")))
}

#[async_trait]
impl SpatialIngestionRepository for DieselSpatialIngestionRepository {
    async fn upsert_roads(&self, roads: &[RoadFeature]) -> Result<usize, SpatialIngestionError> {
        if roads.is_empty() {
            return Ok(0);
        }
        let encoded = roads
            .iter()
            .map(|road| Ok((road.properties(), geometry_json(road.geometry())?)))
            .collect::<Result<Vec<_>, SpatialIngestionError>>()?;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                let mut written = 0;
                for (properties, geometry) in &encoded {
                    written += sql_query(UPSERT_ROAD_SQL)
                        .bind::<BigInt, _>(properties.osm_id)
                        .bind::<Nullable<Text>, _>(properties.name.as_deref())
                        .bind::<Nullable<Text>, _>(properties.highway.as_deref())
                        .bind::<Text, _>(geometry)
                        .execute(conn)
                        .await?;
                }
                Ok::<_, diesel::result::Error>(written)
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| map_diesel_error(err, "upsert roads"))
    }

    async fn upsert_regions(
        &self,
        regions: &[RegionRecord],
    ) -> Result<usize, SpatialIngestionError> {
        if regions.is_empty() {
            return Ok(0);
        }
        let encoded = regions
            .iter()
            .map(|region| Ok((&region.properties, geometry_json(&region.border)?)))
            .collect::<Result<Vec<_>, SpatialIngestionError>>()?;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                let mut written = 0;
                for (properties, border) in &encoded {
                    written += sql_query(UPSERT_REGION_SQL)
                        .bind::<Text, _>(&properties.province)
                        .bind::<Text, _>(&properties.district)
                        .bind::<Text, _>(&properties.sub_district)
                        .bind::<Text, _>(&properties.village)
                        .bind::<Text, _>(border)
                        .execute(conn)
                        .await?;
                }
                Ok::<_, diesel::result::Error>(written)
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| map_diesel_error(err, "upsert regions"))
    }
}
