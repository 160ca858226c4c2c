pub mod app_config;
pub mod config;
pub mod detect;
pub mod history;
pub mod products;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, load_history_path};
pub use detect::{detect_changes, render_message, ChangeEvent, Detection};
pub use history::{History, HistoryLoadError, HistorySaveError, HistoryStore};
pub use products::{PriceState, ProductRecord};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
