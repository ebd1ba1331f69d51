use crate::utils::maptypes::LayerKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{path} is not a GeoJSON FeatureCollection")]
    NotACollection { path: String },
}

/// Errors that stop the map from being drawn. Both are shown to the user.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("Error loading GeoJSON data: {0}")]
    Load(#[from] LoadError),
    #[error("No {kind} with usable geometries remain after cleaning the data")]
    EmptyDataset { kind: LayerKind },
}
