mod config_load;
mod error;
mod logging;

pub const API_URL_ENV: &str = "SENTIMENT_API_URL";
pub const API_ROUTE_ENV: &str = "SENTIMENT_API_ROUTE";
pub const ON_FAILURE_ENV: &str = "SENTIMENT_ON_FAILURE";
pub const RUN_ID_ENV_VAR: &str = "SENTIMENT_RUN_ID";

pub mod prelude {
    pub use super::config_load::{ConfigOptions, FoundConfig};
    pub use super::error::ConfigError;
    pub use super::logging::{
        progress_bar_without_pos, LoggingOpts, LoggingProgress, STDERR_WRITER, STDOUT_WRITER,
    };
    pub use super::{API_ROUTE_ENV, API_URL_ENV, ON_FAILURE_ENV, RUN_ID_ENV_VAR};
}
