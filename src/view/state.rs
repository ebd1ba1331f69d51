use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TileSource {
    pub name: &'static str,
    pub url: &'static str,
    pub attribution: &'static str,
    pub max_zoom: u8,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Basemap {
    #[default]
    #[serde(rename = "osm")]
    OpenStreetMap,
    Terrain,
    Satellite,
}

impl Basemap {
    pub const ALL: [Basemap; 3] = [Basemap::OpenStreetMap, Basemap::Terrain, Basemap::Satellite];

    /// Query-string spelling, matching the serde name.
    pub fn key(&self) -> &'static str {
        match self {
            Basemap::OpenStreetMap => "osm",
            Basemap::Terrain => "terrain",
            Basemap::Satellite => "satellite",
        }
    }

    pub fn tile_source(&self) -> TileSource {
        match self {
            Basemap::OpenStreetMap => TileSource {
                name: "OpenStreetMap",
                url: "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
                attribution: "Map data &copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors",
                max_zoom: 19,
            },
            Basemap::Terrain => TileSource {
                name: "Stamen Terrain",
                url: "https://tiles.stadiamaps.com/tiles/stamen_terrain/{z}/{x}/{y}.png",
                attribution: "Map tiles &copy; Stamen Design, hosted by Stadia Maps. Map data &copy; OpenStreetMap contributors",
                max_zoom: 18,
            },
            Basemap::Satellite => TileSource {
                name: "Esri Satellite",
                url: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
                attribution: "Tiles &copy; Esri",
                max_zoom: 19,
            },
        }
    }
}

/// What the sidebar controls select. Lives in the request query string, so
/// each browser session carries its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    pub basemap: Basemap,
    #[serde(rename = "parks")]
    pub show_parks: bool,
    #[serde(rename = "trails")]
    pub show_trails: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            basemap: Basemap::OpenStreetMap,
            show_parks: true,
            show_trails: true,
        }
    }
}

impl ViewState {
    pub fn set_basemap(&mut self, basemap: Basemap) {
        self.basemap = basemap;
    }

    pub fn toggle_parks(&mut self) {
        self.show_parks = !self.show_parks;
    }

    pub fn toggle_trails(&mut self) {
        self.show_trails = !self.show_trails;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn query_string(&self) -> String {
        format!(
            "basemap={}&parks={}&trails={}",
            self.basemap.key(),
            self.show_parks,
            self.show_trails
        )
    }

    /// Applies `action` to a copy; used to build the link behind each control.
    pub fn after(&self, action: impl FnOnce(&mut ViewState)) -> ViewState {
        let mut next = *self;
        action(&mut next);
        next
    }
}
