use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use photogrid::application::GetPhotosUseCase;
use photogrid::infrastructure::{
    AppConfig, CliArgs, DiskImageCache, ImageLoader, JsonPhotoStore, PexelsClient,
    PhotoRepositoryImpl, StorageManager, TcpNetworkMonitor, ThemePreferenceStore,
};
use photogrid::presentation::{App, CardImages, ImagePipeline, PhotoListViewModel};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

async fn create_app(args: CliArgs, cards: CardImages) -> Result<App> {
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);

    init_logging(&config)?;

    info!(version = photogrid::VERSION, "Starting Photogrid");

    let api = Arc::new(PexelsClient::with_base_url(
        config.api.base_url.clone(),
        config.api.api_key.clone(),
        config.api.timeout(),
    )?);

    let store = Arc::new(JsonPhotoStore::default_location().await?);
    info!(
        path = %store.path().display(),
        saved_at = ?store.saved_at().await.ok().flatten(),
        "Photo cache ready"
    );

    let monitor = Arc::new(TcpNetworkMonitor::new(
        config.connectivity.probe_address.clone(),
        config.connectivity.interval(),
        config.connectivity.connect_timeout(),
    ));

    let repository = Arc::new(PhotoRepositoryImpl::new(api, store, monitor.clone()));
    let use_case = GetPhotosUseCase::new(repository);
    let view_model = PhotoListViewModel::new(use_case, monitor, config.gallery.per_page);

    let disk = Arc::new(DiskImageCache::default_location(config.images.disk_cache_bytes()).await?);
    info!(
        path = %disk.dir().display(),
        size = disk.current_size(),
        "Image cache ready"
    );

    let (image_tx, image_rx) = mpsc::unbounded_channel();
    let loader = ImageLoader::new(&config.images, config.api.timeout(), disk, image_tx)?;
    let images = ImagePipeline {
        loader: Arc::new(loader),
        events: image_rx,
        cards,
    };

    let theme_store = ThemePreferenceStore::new(storage, config.theme.mode);

    Ok(App::new(view_model, theme_store, images, &config))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();
    let args = CliArgs::parse();

    let mut terminal = ratatui::init();

    // The graphics query needs raw mode and must finish before the event stream starts.
    let cards = CardImages::new();

    let result = match create_app(args, cards).await {
        Ok(app) => app.run(&mut terminal).await,
        Err(e) => Err(e),
    };

    ratatui::restore();

    result
}
