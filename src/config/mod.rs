pub mod load;
pub mod save;
pub mod types;

pub use types::{
    CollageSettings, Config, ExtractSettings, MAX_RECENT_PATHS, PathDefaults, TriageSettings,
    UserSettings,
};
