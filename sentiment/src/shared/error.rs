use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to read env file {path}. {error}")]
    EnvFile {
        path: String,
        #[source]
        error: dotenvy::Error,
    },
    #[error("Value `{value}` is not valid for {name}, expected one of: {expected}")]
    InvalidValue {
        name: String,
        value: String,
        expected: String,
    },
}
