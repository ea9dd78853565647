use mimalloc::MiMalloc;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use warehouse_setup::{Config, Console, WarehouseError, run_setup};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            let err = WarehouseError::from(e);
            eprintln!("❌ {err}");
            return ExitCode::from(err.exit_code());
        }
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(database = ?cfg.database, loglevel = %cfg.loglevel);

    match run_setup(&cfg.database, &Console::stdout()).await {
        Ok(report) => {
            info!(rows = report.row_count, "database setup complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "database setup failed");
            ExitCode::from(e.exit_code())
        }
    }
}
