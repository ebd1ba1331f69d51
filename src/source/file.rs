use crate::error::LoadError;
use crate::source::core::{parse_collection, FeatureSource};
use crate::utils::geojson::FeatureCollection;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct FileSource {
    pub path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FeatureSource for FileSource {
    fn identity(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<FeatureCollection, LoadError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|source| LoadError::Io {
            path: self.identity(),
            source,
        })?;

        let collection = parse_collection(&self.identity(), &contents)?;
        tracing::info!("Loaded {} features from {}", collection.len(), self.identity());
        Ok(collection)
    }
}
