use assert_cmd::assert::Assert;
use assert_cmd::Command;
use assert_fs::TempDir;
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct SentimentTestHelper<'a> {
    pub work_dir: TempDir,
    name: &'a str,
    counter: AtomicUsize,
}

impl<'a> SentimentTestHelper<'a> {
    pub fn new(name: &'a str) -> Self {
        Self {
            work_dir: TempDir::new().unwrap(),
            name,
            counter: AtomicUsize::new(0),
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::cargo_bin("sentiment").unwrap();
        cmd.current_dir(self.work_dir.path())
            .env(
                "SENTIMENT_RUN_ID",
                format!(
                    "{}-{}",
                    self.name,
                    self.counter.fetch_add(1, Ordering::Relaxed)
                ),
            )
            .env("SENTIMENT_OUTPUT_PROGRESS", "plain")
            .env("NO_COLOR", "1")
            .env_remove("SENTIMENT_API_URL")
            .env_remove("SENTIMENT_API_ROUTE")
            .env_remove("SENTIMENT_ON_FAILURE")
            .env_remove("SENTIMENT_ENV_FILE")
            .args(args);
        cmd
    }

    pub fn run_command(&self, args: &[&str]) -> Assert {
        self.command(args).assert()
    }

    pub fn run_with_stdin(&self, args: &[&str], stdin: &str) -> Assert {
        self.command(args).write_stdin(stdin.to_string()).assert()
    }

    /// Execute `analyze` against `api_url` with the given text.
    pub fn analyze(&self, api_url: &str, extra: &[&str]) -> Assert {
        let mut args = vec!["analyze", "--api-url", api_url];
        args.extend_from_slice(extra);
        self.run_command(&args)
    }

    /// Execute `predict` against `api_url` with the given text.
    pub fn predict(&self, api_url: &str, extra: &[&str]) -> Assert {
        let mut args = vec!["predict", "--api-url", api_url];
        args.extend_from_slice(extra);
        self.run_command(&args)
    }

    pub fn clean_work_dir(self) {
        self.work_dir.close().unwrap();
    }
}
