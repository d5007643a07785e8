//! Lookup service implementing the [`GeoLookup`] driving port.
//!
//! Each store call runs under its own deadline. Store failures are logged in
//! full and surface to callers as short `internal_error` messages.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use geojson::FeatureCollection;
use tracing::{debug, error};

use crate::domain::Error;
use crate::domain::geo::{
    ContainingRegionQuery, NearestRoadsQuery, region_collection, roads_collection,
};
use crate::domain::ports::{GeoLookup, SpatialStore, SpatialStoreError};

/// Default per-call store deadline.
pub const DEFAULT_STORE_DEADLINE: Duration = Duration::from_secs(5);

const NO_ROADS: &str = "no roads found within the requested distance";
const NO_REGION: &str = "no region contains the requested point";

fn map_store_error(err: SpatialStoreError) -> Error {
    error!(error = %err, "spatial store call failed");
    match err {
        SpatialStoreError::Unavailable { .. } => Error::internal("spatial store unavailable"),
        SpatialStoreError::Timeout { .. } => Error::internal("spatial store timed out"),
        SpatialStoreError::Decode { .. } => Error::internal("stored feature could not be decoded"),
    }
}

/// Nearest-road and containing-region lookups over a [`SpatialStore`].
#[derive(Clone)]
pub struct GeoLookupService<S: ?Sized> {
    store: Arc<S>,
    deadline: Duration,
}

impl<S: ?Sized> GeoLookupService<S> {
    /// Build a service with an explicit store deadline.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use std::time::Duration;
    /// use petapedia::domain::GeoLookupService;
    /// use petapedia::outbound::memory::InMemorySpatialStore;
    ///
    /// let _service =
    ///     GeoLookupService::new(Arc::new(InMemorySpatialStore::new()), Duration::from_secs(2));
    /// ```
    pub fn new(store: Arc<S>, deadline: Duration) -> Self {
        Self { store, deadline }
    }

    fn deadline_millis(&self) -> u64 {
        u64::try_from(self.deadline.as_millis()).unwrap_or(u64::MAX)
    }
}

impl<S> GeoLookupService<S>
where
    S: SpatialStore + ?Sized,
{
    async fn with_deadline<T, F>(&self, call: F) -> Result<T, SpatialStoreError>
    where
        F: Future<Output = Result<T, SpatialStoreError>>,
    {
        tokio::time::timeout(self.deadline, call)
            .await
            .unwrap_or_else(|_| Err(SpatialStoreError::timeout(self.deadline_millis())))
    }
}

#[async_trait]
impl<S> GeoLookup for GeoLookupService<S>
where
    S: SpatialStore + ?Sized,
{
    async fn nearest_roads(&self, query: &NearestRoadsQuery) -> Result<FeatureCollection, Error> {
        let roads = self
            .with_deadline(
                self.store
                    .find_near_roads(query.coordinate, query.max_distance),
            )
            .await
            .map_err(map_store_error)?;

        if roads.is_empty() {
            return Err(Error::not_found(NO_ROADS));
        }
        debug!(count = roads.len(), "nearest roads resolved");
        Ok(roads_collection(roads))
    }

    async fn containing_region(
        &self,
        query: &ContainingRegionQuery,
    ) -> Result<FeatureCollection, Error> {
        let region = self
            .with_deadline(self.store.find_containing_region(query.coordinate))
            .await
            .map_err(map_store_error)?;

        match region {
            Some(region) => {
                debug!(region_id = region.id(), "containing region resolved");
                Ok(region_collection(region))
            }
            None => Err(Error::not_found(NO_REGION)),
        }
    }
}
