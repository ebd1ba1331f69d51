pub mod geojson;
pub mod maptypes;
pub mod normaliser;
pub mod sanitiser;
#[cfg(test)]
pub(crate) mod mock;
