//! Assemble stored features into GeoJSON feature collections.
//!
//! Geometries pass through untouched; only the property objects are built
//! here.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue};

use super::{RegionFeature, RoadFeature};

fn feature(geometry: Geometry, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn optional_string(value: Option<String>) -> JsonValue {
    value.map_or(JsonValue::Null, JsonValue::String)
}

/// Build a collection from roads, preserving their order.
///
/// # Examples
/// ```
/// use geojson::{Geometry, Value};
/// use petapedia::domain::geo::{RoadFeature, RoadProperties, roads_collection};
///
/// let road = RoadFeature::new(
///     RoadProperties { osm_id: 1, name: None, highway: None },
///     Geometry::new(Value::LineString(vec![vec![0.0, 0.0], vec![0.0, 1.0]])),
/// )
/// .unwrap();
/// let collection = roads_collection(vec![road]);
/// assert_eq!(collection.features.len(), 1);
/// ```
#[must_use]
pub fn roads_collection(roads: Vec<RoadFeature>) -> FeatureCollection {
    let features = roads
        .into_iter()
        .map(|road| {
            let (props, geometry) = road.into_parts();
            let mut properties = JsonObject::new();
            properties.insert("osm_id".to_owned(), JsonValue::from(props.osm_id));
            properties.insert("name".to_owned(), optional_string(props.name));
            properties.insert("highway".to_owned(), optional_string(props.highway));
            feature(geometry, properties)
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Build a singleton collection for the containing region.
#[must_use]
pub fn region_collection(region: RegionFeature) -> FeatureCollection {
    let (props, border) = region.into_parts();
    let mut properties = JsonObject::new();
    properties.insert("province".to_owned(), JsonValue::String(props.province));
    properties.insert("district".to_owned(), JsonValue::String(props.district));
    properties.insert(
        "sub_district".to_owned(),
        JsonValue::String(props.sub_district),
    );
    properties.insert("village".to_owned(), JsonValue::String(props.village));

    FeatureCollection {
        bbox: None,
        features: vec![feature(border, properties)],
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geo::{RegionProperties, RoadProperties};
    use geojson::Value;
    use rstest::{fixture, rstest};
    use serde_json::json;

    fn road(osm_id: i64, name: Option<&str>, line: Vec<Vec<f64>>) -> RoadFeature {
        RoadFeature::new(
            RoadProperties {
                osm_id,
                name: name.map(str::to_owned),
                highway: Some("residential".to_owned()),
            },
            Geometry::new(Value::LineString(line)),
        )
        .expect("line geometry")
    }

    #[fixture]
    fn region() -> RegionFeature {
        RegionFeature::new(
            3,
            RegionProperties {
                province: "Jawa Barat".to_owned(),
                district: "Kota Bandung".to_owned(),
                sub_district: "Coblong".to_owned(),
                village: "Dago".to_owned(),
            },
            Geometry::new(Value::Polygon(vec![vec![
                vec![107.6, -6.9],
                vec![107.7, -6.9],
                vec![107.7, -6.8],
                vec![107.6, -6.9],
            ]])),
        )
        .expect("polygon geometry")
    }

    #[rstest]
    fn roads_keep_order_and_geometry() {
        let first = vec![vec![107.61, -6.91], vec![107.62, -6.91]];
        let second = vec![vec![107.63, -6.92], vec![107.64, -6.92]];
        let collection = roads_collection(vec![
            road(9, Some("Jalan Asia Afrika"), first.clone()),
            road(4, None, second.clone()),
        ]);

        let value = serde_json::to_value(&collection).expect("collection serialises");
        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"][0]["properties"]["osm_id"], 9);
        assert_eq!(value["features"][0]["geometry"]["coordinates"], json!(first));
        assert_eq!(value["features"][1]["properties"]["name"], JsonValue::Null);
        assert_eq!(value["features"][1]["geometry"]["coordinates"], json!(second));
    }

    #[rstest]
    fn empty_roads_give_empty_collection() {
        assert!(roads_collection(Vec::new()).features.is_empty());
    }

    #[rstest]
    fn region_is_a_singleton_with_admin_properties(region: RegionFeature) {
        let border = region.border().clone();
        let collection = region_collection(region);

        assert_eq!(collection.features.len(), 1);
        let only = &collection.features[0];
        assert_eq!(only.geometry.as_ref(), Some(&border));
        let value = serde_json::to_value(only).expect("feature serialises");
        assert_eq!(
            value["properties"],
            json!({
                "province": "Jawa Barat",
                "district": "Kota Bandung",
                "sub_district": "Coblong",
                "village": "Dago",
            })
        );
    }
}
