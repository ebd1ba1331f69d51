use crate::utils::maptypes::LayerKind;
use serde::Serialize;

pub const TRAIL_COLOUR: &str = "#f39c12";
pub const PARK_COLOUR: &str = "#27ae60";
pub const MARKER_BORDER_COLOUR: &str = "#fff";

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStyle {
    pub color: &'static str,
    pub weight: u32,
    pub opacity: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerShape {
    Circle,
}

/// Point features become markers; polygons reuse the fill and border settings.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    pub shape: MarkerShape,
    pub radius: u32,
    pub fill_color: &'static str,
    pub fill_opacity: f64,
    pub color: &'static str,
    pub weight: u32,
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StyleSpec {
    Line(LineStyle),
    Marker(MarkerStyle),
}

impl StyleSpec {
    pub fn for_layer(kind: LayerKind) -> Self {
        match kind {
            LayerKind::Trail => StyleSpec::Line(LineStyle {
                color: TRAIL_COLOUR,
                weight: 4,
                opacity: 0.8,
            }),
            LayerKind::Park => StyleSpec::Marker(MarkerStyle {
                shape: MarkerShape::Circle,
                radius: 8,
                fill_color: PARK_COLOUR,
                fill_opacity: 0.8,
                color: MARKER_BORDER_COLOUR,
                weight: 2,
                opacity: 1.0,
            }),
        }
    }
}
