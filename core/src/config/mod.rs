mod load;
mod types;

pub use load::{apply_env_overrides, get_tailer_data_dir, load_default, load_from_path};
pub use types::{validate_dash, AppConfig, LoggingConfig, TailerConfig};
