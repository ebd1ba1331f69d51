mod core;
pub mod templates;

pub use self::core::start_server;
