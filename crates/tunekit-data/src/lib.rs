pub mod loader;
pub mod resolve;
pub mod schema;

pub use loader::DataLoadError;
pub use resolve::{BuildData, LoadWarning, Preset, load_build_data};
