use crate::utils::geojson::{AttributeValue, Feature, GeometryMember};
use serde_json::Value;

pub(crate) fn geometry(value: Value) -> geojson::Geometry {
    serde_json::from_value(value).unwrap()
}

pub(crate) fn feature(geometry_value: Option<Value>, properties: Value) -> Feature {
    let properties = match properties {
        Value::Object(map) => map
            .into_iter()
            .map(|(key, value)| (key, AttributeValue::from(value)))
            .collect(),
        _ => Default::default(),
    };

    Feature {
        geometry: geometry_value.map(|value| GeometryMember::Parsed(geometry(value))),
        properties,
    }
}

pub(crate) fn point(properties: Value) -> Feature {
    feature(
        Some(serde_json::json!({"type": "Point", "coordinates": [-85.3097, 35.0456]})),
        properties,
    )
}

pub(crate) fn trail(properties: Value) -> Feature {
    feature(
        Some(serde_json::json!({
            "type": "LineString",
            "coordinates": [[-85.31, 35.05], [-85.30, 35.06]]
        })),
        properties,
    )
}

/// A feature whose geometry member did not parse.
pub(crate) fn unparsed(raw: Value) -> Feature {
    Feature {
        geometry: Some(GeometryMember::Unparsed(raw)),
        ..Default::default()
    }
}
