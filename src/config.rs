use crate::binder::FieldMapping;
use anyhow::{Context, Result};
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_PARKS_PATH: &str = "data/chatt_parks.geojson";
const DEFAULT_TRAILS_PATH: &str = "data/chatt_trails.geojson";

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub parks_path: PathBuf,
    pub trails_path: PathBuf,
    pub fields: FieldMapping,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match lookup("PORT") {
            Some(port) => port
                .parse()
                .with_context(|| format!("Failed to parse PORT {port:?}"))?,
            None => DEFAULT_PORT,
        };

        let fields = match lookup("FIELD_MAPPING_PATH") {
            Some(path) => {
                let contents = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read field mapping {path}"))?;
                serde_json::from_str(&contents)
                    .with_context(|| format!("Failed to parse field mapping {path}"))?
            }
            None => FieldMapping::default(),
        };

        Ok(Self {
            port,
            parks_path: lookup("PARKS_PATH")
                .unwrap_or_else(|| DEFAULT_PARKS_PATH.to_string())
                .into(),
            trails_path: lookup("TRAILS_PATH")
                .unwrap_or_else(|| DEFAULT_TRAILS_PATH.to_string())
                .into(),
            fields,
        })
    }
}
