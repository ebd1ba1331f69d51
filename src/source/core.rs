use crate::error::LoadError;
use crate::utils::geojson::{Feature, FeatureCollection};
use serde_json::Value;

pub trait FeatureSource {
    /// Stable identity of the underlying data, used as the cache key.
    fn identity(&self) -> String;
    fn load(&self) -> Result<FeatureCollection, LoadError>;
}

/// Only the document envelope is strict. Each entry of `features` is read
/// leniently so one bad geometry never rejects the whole file.
pub fn parse_collection(identity: &str, contents: &str) -> Result<FeatureCollection, LoadError> {
    let document: Value = serde_json::from_str(contents).map_err(|source| LoadError::Parse {
        path: identity.to_string(),
        source,
    })?;

    let not_a_collection = || LoadError::NotACollection {
        path: identity.to_string(),
    };

    let Value::Object(mut object) = document else {
        return Err(not_a_collection());
    };
    if object.get("type").and_then(Value::as_str) != Some("FeatureCollection") {
        return Err(not_a_collection());
    }

    match object.remove("features") {
        Some(Value::Array(features)) => {
            Ok(features.into_iter().map(Feature::from_json_value).collect())
        }
        _ => Err(not_a_collection()),
    }
}
