//! Behavioural tests for the nearest-road and containing-region endpoints.
#[path = "support/app.rs"]
mod app;

use std::cell::{Cell, RefCell};
use std::sync::Arc;
use std::time::Duration;

use actix_web::test as actix_test;
use async_trait::async_trait;
use geojson::{Geometry, Value as GeoValue};
use petapedia::domain::geo::{
    Coordinate, MaxDistance, RegionFeature, RegionProperties, RoadFeature, RoadProperties,
};
use petapedia::domain::ports::{SpatialStore, SpatialStoreError};
use petapedia::domain::{DEFAULT_STORE_DEADLINE, TRACE_ID_HEADER};
use petapedia::outbound::memory::InMemorySpatialStore;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};

const ORIGIN: (f64, f64) = (-6.9, 107.6);
const REMOTE: (f64, f64) = (-20.0, 90.0);
// One degree of latitude is roughly 111.2 km on the haversine sphere.
const DEGREES_PER_200_M: f64 = 0.0018;

struct StalledStore;

#[async_trait]
impl SpatialStore for StalledStore {
    async fn find_near_roads(
        &self,
        _coordinate: Coordinate,
        _max_distance: MaxDistance,
    ) -> Result<Vec<RoadFeature>, SpatialStoreError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(Vec::new())
    }

    async fn find_containing_region(
        &self,
        _coordinate: Coordinate,
    ) -> Result<Option<RegionFeature>, SpatialStoreError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(None)
    }
}

fn east_west_line(lat: f64) -> Geometry {
    Geometry::new(GeoValue::LineString(vec![
        vec![107.59, lat],
        vec![107.61, lat],
    ]))
}

fn road(osm_id: i64, lat: f64) -> RoadFeature {
    RoadFeature::new(
        RoadProperties {
            osm_id,
            name: Some(format!("Jalan {osm_id}")),
            highway: Some("residential".to_owned()),
        },
        east_west_line(lat),
    )
    .expect("line geometry")
}

fn village_square() -> Geometry {
    Geometry::new(GeoValue::Polygon(vec![vec![
        vec![107.59, -6.91],
        vec![107.61, -6.91],
        vec![107.61, -6.89],
        vec![107.59, -6.89],
        vec![107.59, -6.91],
    ]]))
}

struct Response {
    status: u16,
    trace_id: Option<String>,
    body: Value,
}

struct GeoWorld {
    store: RefCell<Arc<dyn SpatialStore>>,
    deadline: Cell<Duration>,
    stored_road: RefCell<Option<Geometry>>,
    response: RefCell<Option<Response>>,
}

impl GeoWorld {
    fn new() -> Self {
        Self {
            store: RefCell::new(Arc::new(InMemorySpatialStore::new())),
            deadline: Cell::new(DEFAULT_STORE_DEADLINE),
            stored_road: RefCell::new(None),
            response: RefCell::new(None),
        }
    }

    fn use_store(&self, store: Arc<dyn SpatialStore>) {
        *self.store.borrow_mut() = store;
    }

    fn post(&self, path: &str, payload: Value) {
        let state = app::http_state(self.store.borrow().clone(), self.deadline.get());
        let uri = path.to_owned();
        let response = actix_rt::System::new().block_on(async move {
            let service = actix_test::init_service(app::app(state)).await;
            let res = actix_test::call_service(
                &service,
                actix_test::TestRequest::post()
                    .uri(&uri)
                    .set_json(payload)
                    .to_request(),
            )
            .await;
            let status = res.status().as_u16();
            let trace_id = res
                .headers()
                .get(TRACE_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let body: Value = actix_test::read_body_json(res).await;
            Response {
                status,
                trace_id,
                body,
            }
        });
        *self.response.borrow_mut() = Some(response);
    }

    fn with_response<T>(&self, check: impl FnOnce(&Response) -> T) -> T {
        let response = self.response.borrow();
        check(response.as_ref().expect("a request was sent"))
    }
}

#[fixture]
fn world() -> GeoWorld {
    GeoWorld::new()
}

#[given("a store with roads 200 and 800 metres north and south of the origin")]
fn a_store_with_two_roads(world: &GeoWorld) {
    let near = road(1001, ORIGIN.0 + DEGREES_PER_200_M);
    let far = road(1002, ORIGIN.0 - 4.0 * DEGREES_PER_200_M);
    *world.stored_road.borrow_mut() = Some(near.geometry().clone());
    world.use_store(Arc::new(InMemorySpatialStore::with_features(
        vec![far, near],
        Vec::new(),
    )));
}

#[given("an empty store")]
fn an_empty_store(world: &GeoWorld) {
    world.use_store(Arc::new(InMemorySpatialStore::new()));
}

#[given("a store that never answers")]
fn a_store_that_never_answers(world: &GeoWorld) {
    world.use_store(Arc::new(StalledStore));
    world.deadline.set(Duration::from_millis(50));
}

#[given("a store with a village polygon covering the origin")]
fn a_store_with_a_village_polygon(world: &GeoWorld) {
    let region = RegionFeature::new(
        1,
        RegionProperties {
            province: "Jawa Barat".to_owned(),
            district: "Kota Bandung".to_owned(),
            sub_district: "Coblong".to_owned(),
            village: "Dago".to_owned(),
        },
        village_square(),
    )
    .expect("polygon border");
    world.use_store(Arc::new(InMemorySpatialStore::with_features(
        Vec::new(),
        vec![region],
    )));
}

#[when("the client asks for roads within {metres} metres of the origin")]
fn the_client_asks_for_roads_near_the_origin(world: &GeoWorld, metres: f64) {
    world.post(
        "/api/getroad",
        json!({"latitude": ORIGIN.0, "longitude": ORIGIN.1, "max_distance": metres}),
    );
}

#[when("the client asks for roads within one metre of a remote point")]
fn the_client_asks_for_roads_near_a_remote_point(world: &GeoWorld) {
    world.post(
        "/api/getroad",
        json!({"latitude": REMOTE.0, "longitude": REMOTE.1, "max_distance": 1}),
    );
}

#[when("the client posts a road query with a non-numeric latitude")]
fn the_client_posts_a_non_numeric_latitude(world: &GeoWorld) {
    world.post(
        "/api/getroad",
        json!({"latitude": "not-a-number", "longitude": ORIGIN.1, "max_distance": 500}),
    );
}

#[when("the client asks for the region containing the origin")]
fn the_client_asks_for_the_region_at_the_origin(world: &GeoWorld) {
    world.post(
        "/api/getregion",
        json!({"latitude": ORIGIN.0, "longitude": ORIGIN.1}),
    );
}

#[when("the client asks for the region containing a remote point")]
fn the_client_asks_for_the_region_at_a_remote_point(world: &GeoWorld) {
    world.post(
        "/api/getregion",
        json!({"latitude": REMOTE.0, "longitude": REMOTE.1}),
    );
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &GeoWorld, status: u16) {
    world.with_response(|response| {
        assert_eq!(response.status, status, "body: {}", response.body);
        assert!(response.trace_id.is_some(), "every response carries a trace id");
    });
}

#[then("the error code is {code}")]
fn the_error_code_is(world: &GeoWorld, code: String) {
    world.with_response(|response| {
        assert_eq!(response.body["code"], Value::String(code));
        assert_eq!(
            response.body["traceId"].as_str(),
            response.trace_id.as_deref(),
            "body and header share the trace id"
        );
    });
}

#[then("the error carries the parser message")]
fn the_error_carries_the_parser_message(world: &GeoWorld) {
    world.with_response(|response| {
        assert!(response.body["details"]["parseError"].is_string());
    });
}

#[then("the collection holds only road {osm_id}")]
fn the_collection_holds_only_road(world: &GeoWorld, osm_id: i64) {
    world.with_response(|response| {
        assert_eq!(response.body["type"], "FeatureCollection");
        let features = response.body["features"].as_array().expect("features array");
        assert_eq!(features.len(), 1);
        assert_eq!(features[0]["properties"]["osm_id"], osm_id);
    });
}

#[then("the returned geometry matches the stored road")]
fn the_returned_geometry_matches_the_stored_road(world: &GeoWorld) {
    let stored = world.stored_road.borrow().clone().expect("road stored");
    world.with_response(|response| {
        let returned: Geometry = serde_json::from_value(response.body["features"][0]["geometry"].clone())
            .expect("geometry decodes");
        assert_eq!(returned, stored);
    });
}

#[then("the roads are ordered {first} then {second}")]
fn the_roads_are_ordered(world: &GeoWorld, first: i64, second: i64) {
    world.with_response(|response| {
        let ids: Vec<i64> = response.body["features"]
            .as_array()
            .expect("features array")
            .iter()
            .filter_map(|feature| feature["properties"]["osm_id"].as_i64())
            .collect();
        assert_eq!(ids, vec![first, second]);
    });
}

#[then("the collection holds a single region for village {village}")]
fn the_collection_holds_a_single_region(world: &GeoWorld, village: String) {
    world.with_response(|response| {
        let features = response.body["features"].as_array().expect("features array");
        assert_eq!(features.len(), 1);
        assert_eq!(
            features[0]["properties"],
            json!({
                "province": "Jawa Barat",
                "district": "Kota Bandung",
                "sub_district": "Coblong",
                "village": village,
            })
        );
    });
}

#[scenario(
    path = "tests/features/geo_lookup.feature",
    name = "Only roads within the requested distance are returned"
)]
fn only_roads_within_range_are_returned(world: GeoWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/geo_lookup.feature",
    name = "Nearer roads come first"
)]
fn nearer_roads_come_first(world: GeoWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/geo_lookup.feature",
    name = "A remote point finds no roads"
)]
fn remote_point_finds_no_roads(world: GeoWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/geo_lookup.feature",
    name = "A non-numeric latitude is rejected"
)]
fn non_numeric_latitude_is_rejected(world: GeoWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/geo_lookup.feature",
    name = "An unresponsive store fails fast"
)]
fn unresponsive_store_fails_fast(world: GeoWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/geo_lookup.feature",
    name = "The containing region is returned with its names"
)]
fn containing_region_is_returned(world: GeoWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/geo_lookup.feature",
    name = "A point outside every region finds nothing"
)]
fn point_outside_every_region_finds_nothing(world: GeoWorld) {
    drop(world);
}
