use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use human_panic::setup_panic;
use sentiment_analyzer::prelude::*;
use tracing::{enabled, error, info, Level};

/// sentiment
///
/// Analyze the emotional tone of your text. Text is sent to a
/// prediction service and the predicted label is shown along
/// with how confident the service is.
#[derive(Parser)]
#[clap(author, version = env!("SENTIMENT_VERSION"), about)]
struct Cli {
    #[clap(flatten)]
    logging: LoggingOpts,

    #[clap(flatten)]
    config: ConfigOptions,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
struct VersionArgs {
    #[arg(long, action)]
    pub short: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Analyze text once and show the result.
    #[clap(alias("a"))]
    Analyze(AnalyzeArgs),
    /// Prompt for text repeatedly, showing a result for each entry.
    #[clap(alias("i"))]
    Interactive(InteractiveArgs),
    /// Call the prediction service directly and print its response.
    #[clap(alias("p"))]
    Predict(PredictArgs),
    /// Print version info and exit
    #[clap(alias("v"))]
    Version(VersionArgs),
}

#[tokio::main]
async fn main() {
    setup_panic!();
    dotenvy::dotenv().ok();
    let opts = Cli::parse();

    let (_guard, file_location) = match opts
        .logging
        .configure_logging(&opts.config.get_run_id(), "root")
        .await
    {
        Ok(configured) => configured,
        Err(e) => {
            eprintln!("Unable to configure logging: {:?}", e);
            std::process::exit(2);
        }
    };
    let error_code = run_subcommand(opts).await;

    if error_code != 0 || enabled!(Level::DEBUG) {
        info!(target: "user", "More detailed logs at {}", file_location);
    }

    std::process::exit(error_code);
}

async fn run_subcommand(opts: Cli) -> i32 {
    let loaded_config = match opts.config.load_config().await {
        Err(e) => {
            error!(target: "user", "Failed to load configuration: {}", e);
            return 2;
        }
        Ok(c) => c,
    };

    handle_commands(&loaded_config, &opts.command)
        .await
        .unwrap_or_else(|e| {
            error!(target: "user", "Critical Error. {}", e);
            1
        })
}

async fn handle_commands(found_config: &FoundConfig, command: &Command) -> Result<i32> {
    match command {
        Command::Analyze(args) => analyze_root(found_config, args).await,
        Command::Interactive(args) => interactive_root(found_config, args).await,
        Command::Predict(args) => predict_root(found_config, args).await,
        Command::Version(args) => print_version(args).await,
    }
}

async fn print_version(args: &VersionArgs) -> Result<i32> {
    if args.short {
        println!("sentiment {}", env!("SENTIMENT_VERSION"));
    } else {
        info!(target: "user", "{}: {:60}", "Version".white().bold(), env!("SENTIMENT_VERSION"));
        info!(target: "user", "{}: {:60}", "Build Timestamp".white().bold(), env!("VERGEN_BUILD_TIMESTAMP"));
        info!(target: "user", "{}: {:60}", "Describe".white().bold(), env!("VERGEN_GIT_DESCRIBE"));
        info!(target: "user", "{}: {:60}", "Commit SHA".white().bold(), env!("VERGEN_GIT_SHA"));
        info!(target: "user", "{}: {:60}", "Commit Date".white().bold(), env!("VERGEN_GIT_COMMIT_DATE"));
    }

    Ok(0)
}
