use clap::Parser;

pub mod api;
pub mod cli;
pub mod commands;
pub mod domain;
pub mod services;

pub use api::{ApiError, LibraryClient};
pub use cli::{Cli, Commands, SearchBy, DEFAULT_SERVER_SOURCE};
pub use domain::models::*;
pub use services::output::{print_error, print_one, print_out};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        print_error(cli.json, error_code(&err), &format!("{err:#}"));
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = services::config::load_config()?;
    let source = services::config::resolve_server(cli.server.as_deref(), &config);
    let base = services::endpoint::server_url(&source)?;
    let client = LibraryClient::new(base, services::config::request_timeout(&config))?;
    commands::handle_runtime_commands(cli, &client, &config)
}

fn error_code(err: &anyhow::Error) -> &'static str {
    if let Some(api) = err.downcast_ref::<ApiError>() {
        return match api {
            ApiError::Http(_) => "TRANSPORT",
            ApiError::Status { .. } => "HTTP_STATUS",
            ApiError::Decode(_) => "BAD_RESPONSE",
            ApiError::InvalidUrl(_) => "CONFIG",
        };
    }
    if err.downcast_ref::<std::io::Error>().is_some() {
        return "IO";
    }
    "INTERNAL"
}
