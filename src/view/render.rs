use crate::binder::{bind, FieldMapping, LayerFields, StyleSpec};
use crate::catalog::Dataset;
use crate::utils::geojson::{Attributes, FeatureCollection, GeometryMember};
use crate::utils::maptypes::{LayerKind, CHATTANOOGA};
use crate::view::state::{TileSource, ViewState};
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

pub const DEFAULT_ZOOM: u8 = 11;

/// Everything the browser needs to draw the map for one view state.
#[derive(Debug, Serialize)]
pub struct RenderSpec<'a> {
    pub basemap: TileSource,
    pub centre: [f64; 2],
    pub zoom: u8,
    pub layers: Vec<RenderLayer<'a>>,
    pub layer_control: bool,
}

#[cfg(test)]
impl RenderSpec<'_> {
    pub fn layer(&self, kind: LayerKind) -> Option<&RenderLayer<'_>> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }
}

#[derive(Debug)]
pub struct RenderLayer<'a> {
    pub kind: LayerKind,
    pub name: &'static str,
    pub style: StyleSpec,
    pub features: &'a FeatureCollection,
    pub fields: &'a LayerFields,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct BoundFeature<'a> {
    pub geometry: Option<&'a geojson::Geometry>,
    pub properties: &'a Attributes,
    pub tooltip: String,
    pub popup: String,
}

impl<'a> RenderLayer<'a> {
    pub fn bound_features(&self) -> impl Iterator<Item = BoundFeature<'a>> + '_ {
        self.features.iter().map(move |feature| {
            let (_, content) = bind(feature, self.kind, self.fields);
            BoundFeature {
                geometry: feature.geometry.as_ref().and_then(GeometryMember::parsed),
                properties: &feature.properties,
                tooltip: content.tooltip().to_string(),
                popup: content.to_html().into_string(),
            }
        })
    }
}

impl Serialize for RenderLayer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let features: Vec<BoundFeature<'_>> = self.bound_features().collect();
        let mut state = serializer.serialize_struct("RenderLayer", 4)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("name", self.name)?;
        state.serialize_field("style", &self.style)?;
        state.serialize_field("features", &features)?;
        state.end()
    }
}

fn layer<'a>(dataset: &'a Dataset, fields: &'a FieldMapping) -> RenderLayer<'a> {
    RenderLayer {
        kind: dataset.kind,
        name: dataset.kind.layer_name(),
        style: StyleSpec::for_layer(dataset.kind),
        features: &dataset.collection,
        fields: fields.for_layer(dataset.kind),
    }
}

/// Pure function of its inputs. Trails are listed first so parks draw on top.
pub fn render<'a>(
    parks: &'a Dataset,
    trails: &'a Dataset,
    view: &ViewState,
    fields: &'a FieldMapping,
) -> RenderSpec<'a> {
    let mut layers = Vec::new();
    if view.show_trails && !trails.is_empty() {
        layers.push(layer(trails, fields));
    }
    if view.show_parks && !parks.is_empty() {
        layers.push(layer(parks, fields));
    }

    RenderSpec {
        basemap: view.basemap.tile_source(),
        centre: CHATTANOOGA.into(),
        zoom: DEFAULT_ZOOM,
        layers,
        layer_control: true,
    }
}

pub fn feature_counts(parks: &Dataset, trails: &Dataset) -> String {
    format!("Parks: {} | Trails: {}", parks.len(), trails.len())
}
