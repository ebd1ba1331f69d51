use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
}

/// Downtown Chattanooga, TN.
pub const CHATTANOOGA: GeoPosition = GeoPosition {
    latitude: 35.0456,
    longitude: -85.3097,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Park,
    Trail,
}

impl LayerKind {
    /// Name shown in the layer control.
    pub fn layer_name(&self) -> &'static str {
        match self {
            LayerKind::Park => "Parks",
            LayerKind::Trail => "Trails",
        }
    }
}

impl From<GeoPosition> for [f64; 2] {
    fn from(pos: GeoPosition) -> Self {
        [pos.latitude, pos.longitude]
    }
}

impl Display for LayerKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LayerKind::Park => write!(f, "parks"),
            LayerKind::Trail => write!(f, "trails"),
        }
    }
}

impl Display for GeoPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}, {:?}]", self.latitude, self.longitude)
    }
}
