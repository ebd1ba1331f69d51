pub mod render;
pub mod state;

pub use render::{feature_counts, render};
pub use state::{Basemap, ViewState};
