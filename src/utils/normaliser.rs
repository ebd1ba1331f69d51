use crate::utils::geojson::{AttributeValue, FeatureCollection};
use std::collections::BTreeMap;

/// Declared type of an attribute column, inferred over every non-null value in it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnType {
    Null,
    Text,
    Integer,
    Float,
    Boolean,
    Mixed,
    Composite,
}

impl ColumnType {
    fn of(value: &AttributeValue) -> Self {
        match value {
            AttributeValue::Null => ColumnType::Null,
            AttributeValue::Bool(_) => ColumnType::Boolean,
            AttributeValue::Number(n) if n.is_f64() => ColumnType::Float,
            AttributeValue::Number(_) => ColumnType::Integer,
            AttributeValue::Text(_) => ColumnType::Text,
            AttributeValue::Composite(_) => ColumnType::Composite,
        }
    }

    fn merge(self, other: Self) -> Self {
        use ColumnType::*;
        match (self, other) {
            (Null, t) | (t, Null) => t,
            (Composite, _) | (_, Composite) => Composite,
            (a, b) if a == b => a,
            (Integer, Float) | (Float, Integer) => Float,
            _ => Mixed,
        }
    }

    pub fn needs_coercion(self) -> bool {
        matches!(self, ColumnType::Mixed | ColumnType::Composite)
    }
}

pub fn column_types(collection: &FeatureCollection) -> BTreeMap<String, ColumnType> {
    let mut columns: BTreeMap<String, ColumnType> = BTreeMap::new();
    for feature in collection.iter() {
        for (name, value) in &feature.properties {
            let column = columns.entry(name.clone()).or_insert(ColumnType::Null);
            *column = column.merge(ColumnType::of(value));
        }
    }
    columns
}

/// Rewrites every Mixed or Composite column to text so the collection can be
/// serialised for the map. Primitive columns are left exactly as they were.
pub fn normalise(mut collection: FeatureCollection) -> FeatureCollection {
    let coerced: Vec<String> = column_types(&collection)
        .into_iter()
        .filter(|(_, column)| column.needs_coercion())
        .map(|(name, _)| name)
        .collect();

    if coerced.is_empty() {
        return collection;
    }

    tracing::debug!("Coercing columns to text: {}", coerced.join(", "));

    for feature in collection.features.iter_mut() {
        for name in &coerced {
            if let Some(value) = feature.properties.get_mut(name) {
                *value = value
                    .to_text()
                    .map_or(AttributeValue::Null, AttributeValue::Text);
            }
        }
    }

    collection
}
