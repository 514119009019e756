//! `tubewire serve`: wire every component and run until the process exits.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{error, info};

use tubewire_channels::WhatsAppBridgeProvider;
use tubewire_config::{config_dir, config_file_path, ensure_valid, load_and_prepare};
use tubewire_core::{BotContext, Component, EventBus, MediaSource, MessagingProvider};
use tubewire_dispatcher::{BotLauncher, Dispatcher, DownloadHandler};
use tubewire_gateway::{start_server, GatewayState};
use tubewire_logging::init_logger;
use tubewire_media::YtDlpSource;

pub async fn run(port: Option<u16>, config_path: Option<PathBuf>) -> Result<()> {
    let path = config_path.unwrap_or_else(|| config_file_path(&config_dir()));
    let mut config = load_and_prepare(&path)
        .await
        .with_context(|| format!("failed to load config from {}", path.display()))?;
    if let Some(port) = port {
        config.server.port = port;
    }

    init_logger(config.logging.dir.as_deref(), &config.logging.level);
    ensure_valid(&config)?;

    info!(
        config = %path.display(),
        bridge = %config.whatsapp.bridge_url,
        session = %config.whatsapp.session.session,
        ytdlp = %config.downloader.ytdlp_path,
        "Starting tubewire"
    );

    let ctx = Arc::new(BotContext::new());
    let mut bus = EventBus::new();

    let provider: Arc<dyn MessagingProvider> = Arc::new(WhatsAppBridgeProvider::new(
        &config.whatsapp.bridge_url,
        config.whatsapp.session.clone(),
        config.whatsapp.poll_interval_ms,
    ));
    let source: Arc<dyn MediaSource> = Arc::new(YtDlpSource::new(&config.downloader.ytdlp_path));

    let temp_dir = config
        .downloader
        .temp_dir
        .clone()
        .unwrap_or_else(std::env::temp_dir);
    let downloads = Arc::new(
        DownloadHandler::new(provider.clone(), source, temp_dir)
            .with_quality(config.downloader.quality),
    );

    let dispatcher = Dispatcher::new(ctx.clone(), provider.clone(), downloads);
    let events_rx = bus
        .take_events_rx()
        .context("event receiver already taken")?;
    tokio::spawn(async move {
        if let Err(e) = dispatcher.start(events_rx).await {
            error!(error = %e, "Dispatcher task failed");
        }
    });

    let launcher = Arc::new(BotLauncher::new(
        ctx.clone(),
        provider,
        bus.events_tx.clone(),
        config.whatsapp.session.session.clone(),
    ));

    let addr = format!("{}:{}", config.server.bind_address, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(port = config.server.port, "Server running on port {}", config.server.port);
    info!("Dashboard: http://localhost:{}", config.server.port);

    launcher.start_if_idle().await;

    let state = GatewayState::new(ctx, launcher);
    start_server(listener, state, &config.server.static_dir).await
}
