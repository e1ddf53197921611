// Configuration loading

pub mod settings;

pub use settings::{Settings, ThemePreference, DEFAULT_ENDPOINT};
