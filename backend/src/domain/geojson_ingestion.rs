//! GeoJSON ingestion: turn a feature collection into stored roads or regions.
//!
//! Features that do not fit the requested kind are skipped and reported,
//! never silently coerced. Positions are written as found; GeoJSON is already
//! longitude first.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use geojson::{Feature, FeatureCollection, JsonValue};
use tracing::{error, info, warn};

use crate::domain::Error;
use crate::domain::geo::{RegionFeature, RegionProperties, RoadFeature, RoadProperties};
use crate::domain::ports::{RegionRecord, SpatialIngestionError, SpatialIngestionRepository};

/// Which table a collection is loaded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    Roads,
    Regions,
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Roads => "roads",
            Self::Regions => "regions",
        })
    }
}

impl FromStr for FeatureKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "roads" => Ok(Self::Roads),
            "regions" => Ok(Self::Regions),
            other => Err(format!("unknown feature kind `{other}`; expected roads or regions")),
        }
    }
}

/// A feature left out of the load, with its position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFeature {
    /// Position in the input collection, from zero.
    pub index: usize,
    /// Why the feature was rejected.
    pub reason: String,
}

/// Summary of one ingestion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoJsonIngestionOutcome {
    /// Table the features were written to.
    pub kind: FeatureKind,
    /// Rows inserted or updated.
    pub written: usize,
    /// Rejected features in input order.
    pub skipped: Vec<SkippedFeature>,
}

fn string_property(feature: &Feature, key: &str) -> Result<String, String> {
    match feature.property(key) {
        Some(JsonValue::String(value)) => Ok(value.clone()),
        Some(_) => Err(format!("property `{key}` must be a string")),
        None => Err(format!("property `{key}` is missing")),
    }
}

fn optional_string_property(feature: &Feature, key: &str) -> Result<Option<String>, String> {
    match feature.property(key) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(format!("property `{key}` must be a string")),
    }
}

fn osm_id(feature: &Feature) -> Result<i64, String> {
    match feature.property("osm_id") {
        Some(JsonValue::Number(number)) => number
            .as_i64()
            .ok_or_else(|| "property `osm_id` must be an integer".to_owned()),
        Some(JsonValue::String(raw)) => raw
            .trim()
            .parse()
            .map_err(|_| "property `osm_id` must be an integer".to_owned()),
        Some(_) => Err("property `osm_id` must be an integer".to_owned()),
        None => Err("property `osm_id` is missing".to_owned()),
    }
}

/// Read one GeoJSON feature as a road.
pub fn road_from_feature(feature: &Feature) -> Result<RoadFeature, String> {
    let geometry = feature
        .geometry
        .clone()
        .ok_or_else(|| "feature has no geometry".to_owned())?;
    let properties = RoadProperties {
        osm_id: osm_id(feature)?,
        name: optional_string_property(feature, "name")?,
        highway: optional_string_property(feature, "highway")?,
    };
    RoadFeature::new(properties, geometry).map_err(|err| err.to_string())
}

/// Read one GeoJSON feature as a region awaiting insertion.
pub fn region_from_feature(feature: &Feature) -> Result<RegionRecord, String> {
    let border = feature
        .geometry
        .clone()
        .ok_or_else(|| "feature has no geometry".to_owned())?;
    let properties = RegionProperties {
        province: string_property(feature, "province")?,
        district: string_property(feature, "district")?,
        sub_district: string_property(feature, "sub_district")?,
        village: string_property(feature, "village")?,
    };
    // Shape check only; the store assigns the real identifier.
    let checked = RegionFeature::new(0, properties, border).map_err(|err| err.to_string())?;
    Ok(RegionRecord {
        properties: checked.properties().clone(),
        border: checked.border().clone(),
    })
}

fn partition<T>(
    collection: &FeatureCollection,
    read: impl Fn(&Feature) -> Result<T, String>,
) -> (Vec<T>, Vec<SkippedFeature>) {
    let mut accepted = Vec::new();
    let mut skipped = Vec::new();
    for (index, feature) in collection.features.iter().enumerate() {
        match read(feature) {
            Ok(value) => accepted.push(value),
            Err(reason) => {
                warn!(index, %reason, "skipping feature");
                skipped.push(SkippedFeature { index, reason });
            }
        }
    }
    (accepted, skipped)
}

fn map_ingestion_error(err: SpatialIngestionError) -> Error {
    error!(error = %err, "spatial ingestion failed");
    match err {
        SpatialIngestionError::Connection { .. } => Error::internal("spatial store unavailable"),
        SpatialIngestionError::Query { message } => {
            Error::internal(format!("spatial ingestion failed: {message}"))
        }
    }
}

/// Loads GeoJSON collections through a [`SpatialIngestionRepository`].
pub struct GeoJsonIngestionService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R> GeoJsonIngestionService<R>
where
    R: SpatialIngestionRepository + ?Sized,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Write every acceptable feature of `collection` as `kind`.
    pub async fn ingest(
        &self,
        kind: FeatureKind,
        collection: &FeatureCollection,
    ) -> Result<GeoJsonIngestionOutcome, Error> {
        let (written, skipped) = match kind {
            FeatureKind::Roads => {
                let (roads, skipped) = partition(collection, road_from_feature);
                let written = if roads.is_empty() {
                    0
                } else {
                    self.repo
                        .upsert_roads(&roads)
                        .await
                        .map_err(map_ingestion_error)?
                };
                (written, skipped)
            }
            FeatureKind::Regions => {
                let (regions, skipped) = partition(collection, region_from_feature);
                let written = if regions.is_empty() {
                    0
                } else {
                    self.repo
                        .upsert_regions(&regions)
                        .await
                        .map_err(map_ingestion_error)?
                };
                (written, skipped)
            }
        };

        info!(%kind, written, skipped = skipped.len(), "geojson ingestion finished");
        Ok(GeoJsonIngestionOutcome {
            kind,
            written,
            skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockSpatialIngestionRepository;
    use rstest::rstest;
    use serde_json::json;

    fn collection(value: serde_json::Value) -> FeatureCollection {
        serde_json::from_value(value).expect("valid feature collection")
    }

    fn line() -> serde_json::Value {
        json!({ "type": "LineString", "coordinates": [[107.6, -6.9], [107.61, -6.9]] })
    }

    fn square() -> serde_json::Value {
        json!({
            "type": "Polygon",
            "coordinates": [[[107.6, -6.9], [107.7, -6.9], [107.7, -6.8], [107.6, -6.9]]],
        })
    }

    #[rstest]
    #[case(json!({ "osm_id": 12, "name": "Jalan Dago" }), Ok(12))]
    #[case(json!({ "osm_id": "34" }), Ok(34))]
    #[case(json!({ "osm_id": 1.5 }), Err("property `osm_id` must be an integer"))]
    #[case(json!({ "name": "nameless" }), Err("property `osm_id` is missing"))]
    #[case(json!({ "osm_id": 1, "highway": 7 }), Err("property `highway` must be a string"))]
    fn roads_need_integer_osm_id(
        #[case] properties: serde_json::Value,
        #[case] expected: Result<i64, &str>,
    ) {
        let feature: Feature = serde_json::from_value(json!({
            "type": "Feature",
            "geometry": line(),
            "properties": properties,
        }))
        .expect("valid feature");

        let result = road_from_feature(&feature).map(|road| road.osm_id());
        assert_eq!(result, expected.map_err(str::to_owned));
    }

    #[rstest]
    fn regions_need_polygon_and_names() {
        let feature: Feature = serde_json::from_value(json!({
            "type": "Feature",
            "geometry": line(),
            "properties": {
                "province": "Jawa Barat", "district": "Bandung",
                "sub_district": "Coblong", "village": "Dago",
            },
        }))
        .expect("valid feature");

        let err = region_from_feature(&feature).expect_err("line border");
        assert_eq!(err, "expected polygon geometry, found LineString");
    }

    #[rstest]
    fn single_position_roads_are_rejected() {
        let feature: Feature = serde_json::from_value(json!({
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": [[107.6, -6.9]] },
            "properties": { "osm_id": 5 },
        }))
        .expect("valid feature");

        let err = road_from_feature(&feature).expect_err("one position");
        assert_eq!(err, "line needs at least 2 positions, found 1");
    }

    #[rstest]
    #[tokio::test]
    async fn roads_are_written_and_bad_features_reported() {
        let input = collection(json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "geometry": line(), "properties": { "osm_id": 1 } },
                { "type": "Feature", "geometry": square(), "properties": { "osm_id": 2 } },
                { "type": "Feature", "geometry": line(), "properties": { "osm_id": 3 } },
            ],
        }));
        let mut repo = MockSpatialIngestionRepository::new();
        repo.expect_upsert_roads()
            .withf(|roads| roads.iter().map(RoadFeature::osm_id).eq([1, 3]))
            .times(1)
            .returning(|roads| Ok(roads.len()));

        let outcome = GeoJsonIngestionService::new(Arc::new(repo))
            .ingest(FeatureKind::Roads, &input)
            .await
            .expect("ingestion succeeds");

        assert_eq!(outcome.written, 2);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].index, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn empty_batches_skip_the_store() {
        let input = collection(json!({ "type": "FeatureCollection", "features": [] }));
        let repo = MockSpatialIngestionRepository::new();

        let outcome = GeoJsonIngestionService::new(Arc::new(repo))
            .ingest(FeatureKind::Regions, &input)
            .await
            .expect("nothing to write");

        assert_eq!(outcome.written, 0);
    }

    #[rstest]
    #[case("roads", Ok(FeatureKind::Roads))]
    #[case("regions", Ok(FeatureKind::Regions))]
    fn kind_parses(#[case] raw: &str, #[case] expected: Result<FeatureKind, String>) {
        assert_eq!(raw.parse::<FeatureKind>(), expected);
    }

    #[rstest]
    fn unknown_kind_is_rejected() {
        assert!("rivers".parse::<FeatureKind>().is_err());
    }
}
