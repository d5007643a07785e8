//! Driving port for nearest-road and containing-region lookups.

use async_trait::async_trait;
use geojson::FeatureCollection;

use crate::domain::Error;
use crate::domain::geo::{ContainingRegionQuery, NearestRoadsQuery};

/// Lookup use-cases consumed by the HTTP adapter.
///
/// Both operations return a GeoJSON feature collection on success. "Nothing
/// matched" is reported as a `not_found` error rather than an empty
/// collection.
///
/// # Examples
/// ```rust,no_run
/// # async fn example() -> Result<(), petapedia::domain::Error> {
/// use std::sync::Arc;
/// use petapedia::domain::geo::ContainingRegionQuery;
/// use petapedia::domain::ports::GeoLookup;
/// use petapedia::domain::{DEFAULT_STORE_DEADLINE, GeoLookupService};
/// use petapedia::outbound::memory::InMemorySpatialStore;
///
/// let lookup = GeoLookupService::new(Arc::new(InMemorySpatialStore::new()), DEFAULT_STORE_DEADLINE);
/// let query = ContainingRegionQuery::try_from_parts(-6.9, 107.6).unwrap();
/// let result = lookup.containing_region(&query).await;
/// assert!(result.is_err());
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeoLookup: Send + Sync {
    /// Roads near the query point, nearest first.
    async fn nearest_roads(&self, query: &NearestRoadsQuery) -> Result<FeatureCollection, Error>;

    /// Singleton collection holding the region containing the query point.
    async fn containing_region(
        &self,
        query: &ContainingRegionQuery,
    ) -> Result<FeatureCollection, Error>;
}
