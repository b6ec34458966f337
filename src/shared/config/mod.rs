pub mod model;


pub use model::{LoggingConfig, Settings, SynthesisConfig, load_settings, load_settings_from};
