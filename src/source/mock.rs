use crate::error::LoadError;
use crate::source::core::{parse_collection, FeatureSource};
use crate::utils::geojson::FeatureCollection;
use std::sync::atomic::{AtomicUsize, Ordering};

pub(crate) struct MockFeatureSource {
    identity: String,
    document: String,
    loads: AtomicUsize,
}

impl MockFeatureSource {
    pub fn new(identity: &str, document: &str) -> Self {
        Self {
            identity: identity.to_string(),
            document: document.to_string(),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn from_value(identity: &str, document: serde_json::Value) -> Self {
        Self::new(identity, &document.to_string())
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl FeatureSource for MockFeatureSource {
    fn identity(&self) -> String {
        self.identity.clone()
    }

    fn load(&self) -> Result<FeatureCollection, LoadError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        parse_collection(&self.identity, &self.document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_source_counts_loads() {
        let source = MockFeatureSource::from_value(
            "parks",
            serde_json::json!({"type": "FeatureCollection", "features": []}),
        );

        assert!(source.load().unwrap().is_empty());
        assert!(source.load().unwrap().is_empty());
        assert_eq!(source.load_count(), 2);
    }
}
