//! Driven port for writing roads and regions into the spatial store.

use async_trait::async_trait;
use geojson::Geometry;

use crate::domain::geo::{RegionProperties, RoadFeature};

use super::define_port_error;

/// Region awaiting an upsert; the store assigns identifiers to new rows.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionRecord {
    /// Administrative names; together they identify the region.
    pub properties: RegionProperties,
    /// Polygon or multipolygon border.
    pub border: Geometry,
}

define_port_error! {
    /// Errors raised while writing spatial features.
    pub enum SpatialIngestionError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "spatial ingestion connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "spatial ingestion query failed: {message}",
    }
}

/// Write side of the spatial store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpatialIngestionRepository: Send + Sync {
    /// Upsert roads keyed by `osm_id`. Returns the number of rows written.
    async fn upsert_roads(&self, roads: &[RoadFeature]) -> Result<usize, SpatialIngestionError>;

    /// Upsert regions keyed by their four administrative names, replacing the
    /// border of an existing match. Returns the number of rows written.
    async fn upsert_regions(
        &self,
        regions: &[RegionRecord],
    ) -> Result<usize, SpatialIngestionError>;
}
