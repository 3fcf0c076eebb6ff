use anyhow::Context;
use clap::{Parser, Subcommand};
use grubdash_kernel::{settings::Settings, InitCtx, ModuleRegistry};

#[derive(Debug, Parser)]
#[command(name = "grubdash", version, about = "GrubDash dishes and orders API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the HTTP API until Ctrl-C (default)
    Serve,
    /// Print the merged OpenAPI document as JSON
    Openapi,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load GrubDash settings")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(settings).await,
        Command::Openapi => print_openapi(&settings),
    }
}

async fn serve(settings: Settings) -> anyhow::Result<()> {
    grubdash_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        seed = ?settings.store.seed_path,
        "grubdash bootstrap starting"
    );

    let mut registry = ModuleRegistry::new();
    grubdash::register_all(&mut registry, &settings)?;

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    tracing::info!("grubdash bootstrap complete");

    let served = grubdash_http::start_server(&registry, &settings, shutdown_signal()).await;

    registry.stop_all().await?;
    served
}

fn print_openapi(settings: &Settings) -> anyhow::Result<()> {
    let mut registry = ModuleRegistry::new();
    grubdash::register_all(&mut registry, settings)?;

    let document = grubdash_http::openapi_document(&registry);
    println!(
        "{}",
        serde_json::to_string_pretty(&document).context("failed to render OpenAPI document")?
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}
