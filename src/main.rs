use clap::Parser;
use std::sync::Arc;
use validation_reports::domain::ports::ConfigProvider;
use validation_reports::utils::{logger, validation::Validate};
use validation_reports::{api, AppState, CliConfig, FileConfig, HttpStore, LocalArtifacts};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_server_logger(cli.verbose);
    }

    tracing::info!("Starting validation-reports server");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config: Box<dyn ConfigProvider> = match &cli.config {
        Some(path) => {
            let file_config = FileConfig::from_file(path)?;
            check_config(&file_config);
            Box::new(file_config)
        }
        None => {
            check_config(&cli);
            Box::new(cli.clone())
        }
    };

    let store = Arc::new(HttpStore::new(config.store_url(), config.store_timeout())?);
    let artifacts = Arc::new(LocalArtifacts::new(config.reports_dir()));
    let state = Arc::new(AppState::new(store, artifacts));

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("✅ Listening on {}", listener.local_addr()?);
    tracing::info!("📁 Reports directory: {}", config.reports_dir());
    tracing::info!("🗄️ Document store: {}", config.store_url());

    axum::serve(listener, api::router(state)).await?;

    Ok(())
}

fn check_config(config: &dyn Validate) {
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}
