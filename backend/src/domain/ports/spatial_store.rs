//! Driven port for the spatial feature store.
//!
//! Adapters own the sphere-distance and intersection operators; the domain
//! only expects ordered results and typed failures.

use async_trait::async_trait;

use crate::domain::geo::{Coordinate, MaxDistance, RegionFeature, RoadFeature};

use super::define_port_error;

define_port_error! {
    /// Failures raised by spatial store adapters.
    pub enum SpatialStoreError {
        /// Connection could not be obtained or the query failed.
        Unavailable { message: String } => "spatial store unavailable: {message}",
        /// The store did not answer before the deadline.
        Timeout { millis: u64 } => "spatial store did not answer within {millis} ms",
        /// A stored record could not be turned into a feature.
        Decode { message: String } => "stored feature could not be decoded: {message}",
    }
}

/// Read access to stored roads and regions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpatialStore: Send + Sync {
    /// Roads within `max_distance` metres of `coordinate` on a sphere,
    /// nearest first with ties broken by ascending `osm_id`.
    ///
    /// Returns an empty vector when nothing is in range.
    async fn find_near_roads(
        &self,
        coordinate: Coordinate,
        max_distance: MaxDistance,
    ) -> Result<Vec<RoadFeature>, SpatialStoreError>;

    /// The region whose border intersects `coordinate`, boundary inclusive.
    ///
    /// When borders overlap, the smallest area wins, then the lowest id.
    async fn find_containing_region(
        &self,
        coordinate: Coordinate,
    ) -> Result<Option<RegionFeature>, SpatialStoreError>;
}
