use library_catalog::{
    adapters::file::FileLibraryRepository,
    application::library::{
        ServiceDependencies, library_statistics, list_items, list_members, open_library,
        save_library,
    },
    config::AppConfig,
};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "library_catalog=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    tracing::info!("Data file: {}", config.data_file.display());

    // Initialize adapters
    let repository = Arc::new(FileLibraryRepository::new(config.data_file.clone()));
    let deps = ServiceDependencies { repository };

    // Construct or load the library
    let (library, report) = match open_library(&deps, config.seed_sample_data).await {
        Ok(opened) => opened,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if !report.is_clean() {
        tracing::warn!("{} lines of the data file were skipped", report.skipped_count());
    }

    tracing::info!("{}", list_items(&library));
    tracing::info!("{}", list_members(&library));
    tracing::info!("{}", library_statistics(&library));

    // Flush on shutdown
    match save_library(&deps, &library).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
