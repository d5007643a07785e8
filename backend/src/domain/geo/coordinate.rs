//! Validated coordinate and distance values.

use geo::Point;
use geojson::Position;

/// Validation failures for client-supplied geographic values.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GeoValidationError {
    /// Coordinate component was non-finite or outside its range.
    #[error("{field} must be a finite number between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    /// Search radius was non-finite, zero, or negative.
    #[error("max_distance must be a finite number of metres greater than zero, got {value}")]
    NonPositiveDistance { value: f64 },
}

impl GeoValidationError {
    /// Request field the failure refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::OutOfRange { field, .. } => field,
            Self::NonPositiveDistance { .. } => "max_distance",
        }
    }
}

fn check_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<f64, GeoValidationError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(GeoValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

/// A WGS84 point supplied by a client as `(latitude, longitude)`.
///
/// # Examples
/// ```
/// use petapedia::domain::geo::Coordinate;
///
/// let here = Coordinate::new(-6.2, 106.8).unwrap();
/// assert_eq!(here.to_position(), vec![106.8, -6.2]);
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Validate both components and build the coordinate.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoValidationError> {
        Ok(Self {
            latitude: check_range("latitude", latitude, -90.0, 90.0)?,
            longitude: check_range("longitude", longitude, -180.0, 180.0)?,
        })
    }

    /// Degrees north, in `[-90, 90]`.
    #[must_use]
    pub fn latitude(self) -> f64 {
        self.latitude
    }

    /// Degrees east, in `[-180, 180]`.
    #[must_use]
    pub fn longitude(self) -> f64 {
        self.longitude
    }

    /// GeoJSON position, longitude first.
    #[must_use]
    pub fn to_position(self) -> Position {
        vec![self.longitude, self.latitude]
    }

    /// `geo` point with `x = longitude` and `y = latitude`.
    #[must_use]
    pub fn to_point(self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

/// Search radius in metres, strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaxDistance(f64);

impl MaxDistance {
    /// Accept a finite radius greater than zero.
    pub fn new(metres: f64) -> Result<Self, GeoValidationError> {
        if metres.is_finite() && metres > 0.0 {
            Ok(Self(metres))
        } else {
            Err(GeoValidationError::NonPositiveDistance { value: metres })
        }
    }

    /// Radius in metres.
    #[must_use]
    pub fn metres(self) -> f64 {
        self.0
    }
}
