pub mod base;
pub mod components;
pub mod styles;

pub const APP_TITLE: &str = "Chattanooga Parks & Trails Explorer";
pub const APP_SUMMARY: &str = "Use the controls below to explore parks and trails in Chattanooga.";
