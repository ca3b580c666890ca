use super::error::ConfigError;
use super::{API_ROUTE_ENV, API_URL_ENV, ON_FAILURE_ENV, RUN_ID_ENV_VAR};
use crate::client::prelude::{AnalysisClient, ApiRoute, FailurePolicy, HttpSentimentApi};
use clap::{ArgGroup, Parser, ValueEnum};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Parser, Debug, Default)]
#[clap(group = ArgGroup::new("config"))]
pub struct ConfigOptions {
    /// Base URL of the prediction service, for example `http://localhost:8000`.
    /// When unset every analysis request fails before reaching the network.
    #[arg(long, env = API_URL_ENV, global(true))]
    api_url: Option<String>,

    /// Which route of the prediction service to call. Defaults depend on the sub-command.
    #[arg(long, env = API_ROUTE_ENV, global(true))]
    route: Option<ApiRoute>,

    /// What to do when the prediction service cannot produce a result.
    /// Defaults depend on the sub-command.
    #[arg(long, env = ON_FAILURE_ENV, global(true))]
    on_failure: Option<FailurePolicy>,

    /// Load additional settings from a dotenv style file. Values given on the
    /// command line or in the environment take precedence.
    #[arg(long, env = "SENTIMENT_ENV_FILE", global(true))]
    env_file: Option<PathBuf>,

    /// When outputting logs the run-id is the unique value that will define where they go.
    /// In the case that the run-id is re-used, the old values will be overwritten.
    #[arg(long, global(true), env = RUN_ID_ENV_VAR)]
    run_id: Option<String>,
}

impl ConfigOptions {
    pub fn generate_run_id() -> String {
        let id = nanoid::nanoid!(4, &nanoid::alphabet::SAFE);
        let now = chrono::Local::now();
        let current_time = now.format("%Y%m%d");
        format!("{}-{}", current_time, id)
    }

    pub fn get_run_id(&self) -> String {
        self.run_id.clone().unwrap_or_else(Self::generate_run_id)
    }

    pub async fn load_config(&self) -> Result<FoundConfig, ConfigError> {
        let file_values = match &self.env_file {
            Some(path) => read_env_file(path)?,
            None => BTreeMap::new(),
        };

        let api_url = self
            .api_url
            .clone()
            .or_else(|| file_values.get(API_URL_ENV).cloned())
            .and_then(|url| {
                let trimmed = url.trim();
                if trimmed.is_empty() {
                    warn!(target: "user", "{} is set but empty, ignoring it", API_URL_ENV);
                    None
                } else {
                    Some(trimmed.to_string())
                }
            });

        let route = match self.route {
            Some(route) => Some(route),
            None => parse_file_value::<ApiRoute>(&file_values, API_ROUTE_ENV)?,
        };
        let on_failure = match self.on_failure {
            Some(policy) => Some(policy),
            None => parse_file_value::<FailurePolicy>(&file_values, ON_FAILURE_ENV)?,
        };

        let found_config = FoundConfig {
            api_url,
            route,
            on_failure,
            run_id: self.get_run_id(),
        };

        debug!("Loaded config {:?}", found_config);

        Ok(found_config)
    }
}

fn read_env_file(path: &Path) -> Result<BTreeMap<String, String>, ConfigError> {
    let to_error = |error| ConfigError::EnvFile {
        path: path.display().to_string(),
        error,
    };

    let mut values = BTreeMap::new();
    for item in dotenvy::from_path_iter(path).map_err(to_error)? {
        let (key, value) = item.map_err(to_error)?;
        values.insert(key, value);
    }

    Ok(values)
}

fn parse_file_value<T: ValueEnum>(
    values: &BTreeMap<String, String>,
    name: &str,
) -> Result<Option<T>, ConfigError> {
    let Some(raw) = values.get(name) else {
        return Ok(None);
    };

    T::from_str(raw.trim(), true)
        .map(Some)
        .map_err(|_| ConfigError::InvalidValue {
            name: name.to_string(),
            value: raw.to_string(),
            expected: T::value_variants()
                .iter()
                .filter_map(|v| v.to_possible_value())
                .map(|v| v.get_name().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
}

#[derive(Debug, Clone, Default)]
pub struct FoundConfig {
    pub api_url: Option<String>,
    pub route: Option<ApiRoute>,
    pub on_failure: Option<FailurePolicy>,
    pub run_id: String,
}

impl FoundConfig {
    pub fn empty() -> Self {
        Self {
            run_id: ConfigOptions::generate_run_id(),
            ..Default::default()
        }
    }

    pub fn route_or(&self, default: ApiRoute) -> ApiRoute {
        self.route.unwrap_or(default)
    }

    pub fn policy_or(&self, default: FailurePolicy) -> FailurePolicy {
        self.on_failure.unwrap_or(default)
    }

    pub fn http_api(&self, default_route: ApiRoute) -> HttpSentimentApi {
        HttpSentimentApi::new(self.api_url.clone(), self.route_or(default_route))
    }

    /// Builds a client for a call site. The call site supplies the route and policy it
    /// uses when the user did not pick one.
    pub fn analysis_client(
        &self,
        default_route: ApiRoute,
        default_policy: FailurePolicy,
    ) -> AnalysisClient {
        let api = self.http_api(default_route);
        AnalysisClient::new(Arc::new(api), self.policy_or(default_policy))
    }
}

#[cfg(test)]
impl FoundConfig {
    pub fn with_api_url(api_url: &str) -> Self {
        Self {
            api_url: Some(api_url.to_string()),
            ..Self::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn options_from(args: &[&str]) -> ConfigOptions {
        #[derive(Parser)]
        struct TestCli {
            #[clap(flatten)]
            config: ConfigOptions,
        }

        let mut full_args = vec!["test"];
        full_args.extend_from_slice(args);
        TestCli::parse_from(full_args).config
    }

    #[tokio::test]
    async fn test_cli_flags_are_resolved() {
        let options = options_from(&[
            "--api-url",
            "http://localhost:8000",
            "--route",
            "predict",
            "--on-failure",
            "propagate",
            "--run-id",
            "abc",
        ]);

        let found = options.load_config().await.unwrap();
        assert_eq!(Some("http://localhost:8000".to_string()), found.api_url);
        assert_eq!(ApiRoute::Predict, found.route_or(ApiRoute::Analyze));
        assert_eq!(
            FailurePolicy::Propagate,
            found.policy_or(FailurePolicy::Fallback)
        );
        assert_eq!("abc", found.run_id);
    }

    #[test]
    fn test_call_site_defaults_apply_when_unset() {
        let found = FoundConfig::with_api_url("http://localhost:8000");
        let client = found.analysis_client(ApiRoute::Predict, FailurePolicy::Propagate);
        assert_eq!(FailurePolicy::Propagate, client.policy());

        let found = FoundConfig {
            on_failure: Some(FailurePolicy::Fallback),
            ..found
        };
        let client = found.analysis_client(ApiRoute::Predict, FailurePolicy::Propagate);
        assert_eq!(FailurePolicy::Fallback, client.policy());
    }

    #[tokio::test]
    async fn test_blank_api_url_is_treated_as_unset() {
        let options = options_from(&["--api-url", "   "]);
        let found = options.load_config().await.unwrap();
        assert_eq!(None, found.api_url);
    }

    #[tokio::test]
    async fn test_env_file_fills_missing_values() {
        let dir = tempfile::tempdir().unwrap();
        let env_file = dir.path().join("settings.env");
        fs::write(
            &env_file,
            format!(
                "{}=http://from-file:9000\n{}=predict\n",
                API_URL_ENV, API_ROUTE_ENV
            ),
        )
        .unwrap();

        let path = env_file.display().to_string();
        let options = options_from(&["--env-file", &path, "--on-failure", "propagate"]);
        let found = options.load_config().await.unwrap();

        assert_eq!(Some("http://from-file:9000".to_string()), found.api_url);
        assert_eq!(Some(ApiRoute::Predict), found.route);
        assert_eq!(Some(FailurePolicy::Propagate), found.on_failure);
    }

    #[tokio::test]
    async fn test_cli_value_wins_over_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let env_file = dir.path().join("settings.env");
        fs::write(&env_file, format!("{}=http://from-file:9000\n", API_URL_ENV)).unwrap();

        let path = env_file.display().to_string();
        let options = options_from(&["--env-file", &path, "--api-url", "http://cli:1"]);
        let found = options.load_config().await.unwrap();

        assert_eq!(Some("http://cli:1".to_string()), found.api_url);
    }

    #[tokio::test]
    async fn test_invalid_env_file_value_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let env_file = dir.path().join("settings.env");
        fs::write(&env_file, format!("{}=sometimes\n", ON_FAILURE_ENV)).unwrap();

        let path = env_file.display().to_string();
        let options = options_from(&["--env-file", &path]);
        let err = options.load_config().await.unwrap_err();

        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert!(err.to_string().contains("fallback, propagate"));
    }

    #[tokio::test]
    async fn test_missing_env_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.env").display().to_string();
        let options = options_from(&["--env-file", &path]);
        let err = options.load_config().await.unwrap_err();
        assert!(matches!(err, ConfigError::EnvFile { .. }));
    }
}
