mod core;
mod file;
#[cfg(test)]
pub(crate) mod mock;

pub use self::core::FeatureSource;
pub use file::FileSource;
