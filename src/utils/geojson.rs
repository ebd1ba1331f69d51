use serde::ser::{Error as _, Serializer};
use serde::Serialize;
use serde_json::{Number, Value};
use std::collections::BTreeMap;

pub type Attributes = BTreeMap<String, AttributeValue>;

/// A single attribute as read from a GeoJSON `properties` member.
///
/// Lists and objects are kept verbatim in `Composite` until the normaliser
/// turns their column into text; the renderer only accepts the primitive variants.
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    Composite(Value),
}

impl AttributeValue {
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    /// Text spelling used when a column is coerced. `None` for nulls.
    pub fn to_text(&self) -> Option<String> {
        match self {
            AttributeValue::Null => None,
            AttributeValue::Bool(b) => Some(b.to_string()),
            AttributeValue::Number(n) => Some(n.to_string()),
            AttributeValue::Text(s) => Some(s.clone()),
            AttributeValue::Composite(v) => Some(v.to_string()),
        }
    }
}

impl From<Value> for AttributeValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => AttributeValue::Null,
            Value::Bool(b) => AttributeValue::Bool(b),
            Value::Number(n) => AttributeValue::Number(n),
            Value::String(s) => AttributeValue::Text(s),
            composite => AttributeValue::Composite(composite),
        }
    }
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AttributeValue::Null => serializer.serialize_unit(),
            AttributeValue::Bool(b) => serializer.serialize_bool(*b),
            AttributeValue::Number(n) => n.serialize(serializer),
            AttributeValue::Text(s) => serializer.serialize_str(s),
            AttributeValue::Composite(_) => Err(S::Error::custom(
                "unsupported attribute type: list or object values must be normalised to text",
            )),
        }
    }
}

/// A feature's `geometry` member. Members that do not parse as GeoJSON
/// geometries are kept raw so the sanitiser can classify and count them.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GeometryMember {
    Parsed(geojson::Geometry),
    Unparsed(Value),
}

impl GeometryMember {
    pub fn from_json_value(value: Value) -> Self {
        match geojson::Geometry::from_json_value(value.clone()) {
            Ok(geometry) => GeometryMember::Parsed(geometry),
            Err(e) => {
                tracing::debug!("Keeping unparseable geometry for sanitation: {e}");
                GeometryMember::Unparsed(value)
            }
        }
    }

    pub fn parsed(&self) -> Option<&geojson::Geometry> {
        match self {
            GeometryMember::Parsed(geometry) => Some(geometry),
            GeometryMember::Unparsed(_) => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub geometry: Option<GeometryMember>,
    pub properties: Attributes,
}

impl Feature {
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.properties.get(key)
    }

    /// Builds a feature from one entry of a `features` array without
    /// rejecting it. An absent or `null` geometry becomes `None`.
    pub fn from_json_value(value: Value) -> Self {
        let Value::Object(mut object) = value else {
            return Self::default();
        };

        let geometry = match object.remove("geometry") {
            None | Some(Value::Null) => None,
            Some(raw) => Some(GeometryMember::from_json_value(raw)),
        };

        let properties = match object.remove("properties") {
            Some(Value::Object(map)) => map
                .into_iter()
                .map(|(key, value)| (key, AttributeValue::from(value)))
                .collect(),
            _ => Attributes::new(),
        };

        Self {
            geometry,
            properties,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self {
            features: iter.into_iter().collect(),
        }
    }
}
