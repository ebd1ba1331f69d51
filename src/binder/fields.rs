use crate::utils::geojson::{AttributeValue, Feature};
use crate::utils::maptypes::LayerKind;
use serde::{Deserialize, Serialize};

pub const NO_NAME: &str = "No Name";
pub const NOT_AVAILABLE: &str = "N/A";

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

/// One popup row. `keys` are tried in order because dataset versions
/// disagree on attribute names (`TRAIL_NAME` vs `name`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub label: String,
    pub keys: Vec<String>,
    #[serde(default = "not_available")]
    pub fallback: String,
    #[serde(default)]
    pub link: bool,
}

impl FieldSpec {
    pub fn new(label: &str, keys: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            keys: keys.iter().map(|k| k.to_string()).collect(),
            fallback: not_available(),
            link: false,
        }
    }

    pub fn with_fallback(mut self, fallback: &str) -> Self {
        self.fallback = fallback.to_string();
        self
    }

    pub fn as_link(mut self) -> Self {
        self.link = true;
        self
    }

    /// First non-null value among `keys`.
    pub fn resolve<'a>(&self, feature: &'a Feature) -> Option<&'a AttributeValue> {
        self.keys
            .iter()
            .filter_map(|key| feature.get(key))
            .find(|value| !value.is_null())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayerFields {
    pub name: FieldSpec,
    #[serde(default)]
    pub details: Vec<FieldSpec>,
}

impl LayerFields {
    pub fn trails() -> Self {
        Self {
            name: FieldSpec::new("Trail Name:", &["TRAIL_NAME", "Name", "NAME", "name"])
                .with_fallback(NO_NAME),
            details: vec![
                FieldSpec::new("Description:", &["DESCRIPTION", "Description", "description"]),
                FieldSpec::new("Length (mi):", &["LENGTH", "Length", "length", "LENGTH_MI"]),
                FieldSpec::new(
                    "Surface Type:",
                    &["SURFACE_TYPE", "SURFACE", "Surface", "surface", "DIFFICULTY", "difficulty"],
                ),
                FieldSpec::new("ADA Accessible:", &["ADA", "Ada", "ada"]),
                FieldSpec::new("External Link:", &["EXT_LINK", "URL", "url", "website"]).as_link(),
            ],
        }
    }

    pub fn parks() -> Self {
        Self {
            name: FieldSpec::new("Name:", &["NAME", "Name", "name", "PARK_NAME"])
                .with_fallback(NO_NAME),
            details: vec![
                FieldSpec::new("Description:", &["DESCRIPTION", "Description", "description"]),
                FieldSpec::new("Amenities:", &["AMENITIES", "Amenities", "amenities"]),
                FieldSpec::new("Acres:", &["ACRES", "Acres", "acres"]),
            ],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec> {
        std::iter::once(&self.name).chain(self.details.iter())
    }
}

/// Field-name mapping for both layers. Either half may be omitted from a
/// mapping file, in which case the built-in schema is used.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    #[serde(default = "LayerFields::parks")]
    pub parks: LayerFields,
    #[serde(default = "LayerFields::trails")]
    pub trails: LayerFields,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            parks: LayerFields::parks(),
            trails: LayerFields::trails(),
        }
    }
}

impl FieldMapping {
    pub fn for_layer(&self, kind: LayerKind) -> &LayerFields {
        match kind {
            LayerKind::Park => &self.parks,
            LayerKind::Trail => &self.trails,
        }
    }
}
