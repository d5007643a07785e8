//! Geolocation domain: coordinates, query values, stored features, and the
//! GeoJSON response assembler.
//!
//! Coordinates arrive from clients as `(latitude, longitude)`; stored
//! geometries use GeoJSON `[longitude, latitude]` positions. The only place
//! the axis order flips is [`Coordinate::to_position`] and
//! [`Coordinate::to_point`], which store adapters call once per query.

mod collection;
mod coordinate;
mod feature;
mod query;

pub use collection::{region_collection, roads_collection};
pub use coordinate::{Coordinate, GeoValidationError, MaxDistance};
pub use feature::{
    FeatureShapeError, RegionFeature, RegionProperties, RoadFeature, RoadProperties,
    geometry_kind,
};
pub use query::{ContainingRegionQuery, NearestRoadsQuery};
