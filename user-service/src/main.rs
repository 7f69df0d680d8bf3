use clap::Parser;
use service_core::observability::init_tracing;
use user_service::config::UserServiceConfig;
use user_service::services::init_metrics;
use user_service::Application;

#[derive(Parser, Debug)]
#[command(name = "user-service", version, about = "User CRUD service backed by MongoDB")]
struct Args {
    /// Listening TCP port
    #[arg(long, default_value = "5000")]
    port: u16,

    /// Fallback log filter when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = UserServiceConfig::load()
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?
        .with_port(args.port);

    let log_level = args
        .log_level
        .as_deref()
        .unwrap_or(&config.common.log_level);
    init_tracing(
        "user-service",
        log_level,
        config.common.otlp_endpoint.as_deref(),
    )?;

    init_metrics()?;

    // No retry: an unreachable database ends the process.
    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    Ok(())
}
