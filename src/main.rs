//! GPXIFY command line client

use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;

use gpxify::boundary::{install_panic_hook, report};
use gpxify::cli::{self, Cli, Context};
use gpxify::config::Config;
use gpxify::logging::{init_logging, log_error, log_startup};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.api_url.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Configuration error: {error:#}");
            return ExitCode::from(78);
        }
    };

    init_logging(&config.log_level, config.log_format);
    let show_details = cli.verbose || cfg!(debug_assertions);
    install_panic_hook(config.support_email.clone(), show_details);
    log_startup();
    config.log_config();

    let ctx = Context::new(config);
    match cli::run(cli.command, &ctx).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log_error(&error.to_string(), error.error_code());
            eprintln!("{}", report(&error, &ctx.config.support_email, show_details));
            ExitCode::from(u8::try_from(error.exit_code()).unwrap_or(1))
        }
    }
}

fn load_config(api_url: Option<&str>) -> anyhow::Result<Config> {
    let mut config = Config::from_env().context("reading GPXIFY_* environment")?;
    if let Some(url) = api_url {
        config = config.with_api_url(url).context("applying --api-url")?;
    }
    config.ensure_data_dir().context("preparing data directory")?;
    Ok(config)
}
