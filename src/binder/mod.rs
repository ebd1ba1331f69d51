mod core;
pub mod fields;
pub mod popup;
pub mod style;

pub use self::core::bind;
pub use fields::{FieldMapping, LayerFields};
pub use style::StyleSpec;
