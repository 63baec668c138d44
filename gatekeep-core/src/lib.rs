pub mod logging;
pub mod settings;

pub use logging::init_tracing;
pub use settings::{
    load_dotenv, load_dotenv_from, EnvLookup, FromSettingValue, MapEnv, ProcessEnv, RawSettings,
    SettingValue, SettingsError,
};
