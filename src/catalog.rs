use crate::error::ViewerError;
use crate::source::{FeatureSource, FileSource};
use crate::utils::geojson::FeatureCollection;
use crate::utils::maptypes::LayerKind;
use crate::utils::normaliser::normalise;
use crate::utils::sanitiser::{Sanitise, SanitiseReport};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// A sanitised, normalised collection ready to hand to the renderer.
#[derive(Clone, Debug)]
pub struct Dataset {
    pub kind: LayerKind,
    pub collection: FeatureCollection,
    pub report: SanitiseReport,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }
}

pub fn prepare(kind: LayerKind, raw: FeatureCollection) -> Result<Dataset, ViewerError> {
    let _span = tracing::info_span!("prepare", layer = %kind).entered();

    let mut collection = raw;
    let report = collection.sanitise();
    if collection.is_empty() {
        return Err(ViewerError::EmptyDataset { kind });
    }

    Ok(Dataset {
        kind,
        collection: normalise(collection),
        report,
    })
}

/// Prepared datasets keyed by source identity. Inputs do not change while the
/// process runs, so entries are never evicted. Failed loads are not stored.
#[derive(Default)]
pub struct DatasetCache {
    entries: RwLock<HashMap<String, Arc<Dataset>>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load<S>(&self, source: &S, kind: LayerKind) -> Result<Arc<Dataset>, ViewerError>
    where
        S: FeatureSource + ?Sized,
    {
        let key = source.identity();
        if let Some(dataset) = self.entries.read().get(&key) {
            return Ok(dataset.clone());
        }

        let dataset = Arc::new(prepare(kind, source.load()?)?);
        tracing::info!(
            "Cached {} {kind} from {key} ({} removed)",
            dataset.len(),
            dataset.report.removed()
        );

        Ok(self.entries.write().entry(key).or_insert(dataset).clone())
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }
}

pub struct Catalog<S = FileSource>
where
    S: FeatureSource,
{
    pub parks: S,
    pub trails: S,
    cache: DatasetCache,
}

impl<S> Catalog<S>
where
    S: FeatureSource,
{
    pub fn new(parks: S, trails: S) -> Self {
        Self {
            parks,
            trails,
            cache: DatasetCache::new(),
        }
    }

    pub fn datasets(&self) -> Result<(Arc<Dataset>, Arc<Dataset>), ViewerError> {
        let parks = self.cache.get_or_load(&self.parks, LayerKind::Park)?;
        let trails = self.cache.get_or_load(&self.trails, LayerKind::Trail)?;
        Ok((parks, trails))
    }
}
