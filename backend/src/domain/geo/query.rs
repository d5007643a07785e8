//! Query values handed to the lookup service.

use super::{Coordinate, GeoValidationError, MaxDistance};

/// Find roads within `max_distance` metres of `coordinate`, nearest first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestRoadsQuery {
    /// Search origin.
    pub coordinate: Coordinate,
    /// Inclusive search radius.
    pub max_distance: MaxDistance,
}

impl NearestRoadsQuery {
    /// Validate raw request numbers into a query.
    ///
    /// # Examples
    /// ```
    /// use petapedia::domain::geo::NearestRoadsQuery;
    ///
    /// let query = NearestRoadsQuery::try_from_parts(-6.9, 107.6, 500.0).unwrap();
    /// assert_eq!(query.max_distance.metres(), 500.0);
    /// ```
    pub fn try_from_parts(
        latitude: f64,
        longitude: f64,
        max_distance: f64,
    ) -> Result<Self, GeoValidationError> {
        Ok(Self {
            coordinate: Coordinate::new(latitude, longitude)?,
            max_distance: MaxDistance::new(max_distance)?,
        })
    }
}

/// Find the region whose border contains `coordinate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainingRegionQuery {
    /// Point to locate.
    pub coordinate: Coordinate,
}

impl ContainingRegionQuery {
    /// Validate raw request numbers into a query.
    pub fn try_from_parts(latitude: f64, longitude: f64) -> Result<Self, GeoValidationError> {
        Ok(Self {
            coordinate: Coordinate::new(latitude, longitude)?,
        })
    }
}
