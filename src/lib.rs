pub mod aggregation;
pub mod environment;
pub mod geometry;
pub mod loader;
pub mod logging;
pub mod selection;
pub mod session;
pub mod style;
pub mod types;
pub mod view;

pub const TARGET_DATA_LOAD: &str = "data_load";
pub const TARGET_VIEW: &str = "view_state";
