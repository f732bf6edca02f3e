/// Soul Remote - chat bot for an MPD music library
use clap::{Parser, Subcommand};
use soul_core::PlaybackEngine;
use soul_mpd::MpdClient;
use soul_playback::PlaybackController;
use soul_remote::{
    config::RemoteConfig,
    gateway::{EventSource, MessagingGateway, TelegramGateway},
    jobs, runtime,
    state::{AppState, CommandSettings},
};
use soul_search::{SearchLibrary, SearchRequest};
use soul_selection::SelectionRegistry;
use std::{path::PathBuf, sync::Arc, time::Duration};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "soul-remote")]
#[command(about = "Search and control an MPD music library from a chat", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bot
    Serve {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Index the MPD library and print ranked hits for a query
    Search {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Maximum number of hits to print
        #[arg(short, long)]
        limit: Option<usize>,
        /// Query text
        query: String,
    },
    /// Probe the MPD server once
    Ping {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "soul_remote=info,soul_mpd=info,soul_search=info,soul_selection=info,soul_playback=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(config).await?;
        }
        Commands::Search {
            config,
            limit,
            query,
        } => {
            search(config, limit, &query).await?;
        }
        Commands::Ping { config } => {
            ping(config).await?;
        }
    }

    Ok(())
}

async fn serve(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = RemoteConfig::load(config_path.as_deref())?;
    config.validate_for_serve()?;

    tracing::info!("Starting Soul Remote");
    tracing::info!("MPD: {}", config.mpd_config().address());

    let engine: Arc<dyn PlaybackEngine> = Arc::new(MpdClient::new(config.mpd_config()));
    let playback = PlaybackController::new(Arc::clone(&engine), config.engine_timeout());

    let telegram = Arc::new(TelegramGateway::new(&config.telegram)?);
    if let Err(e) = telegram.set_commands().await {
        tracing::warn!(error = %e, "Failed to register bot commands");
    }

    let library = Arc::new(SearchLibrary::new());
    let selections = Arc::new(SelectionRegistry::new(Duration::from_secs(
        config.selection.ttl_secs,
    )));
    let gateway: Arc<dyn MessagingGateway> = telegram.clone();
    let state = AppState::new(
        Arc::clone(&library),
        Arc::clone(&selections),
        playback.clone(),
        gateway,
        CommandSettings::from(&config),
    );

    let shutdown = CancellationToken::new();
    let handles = vec![
        jobs::library_refresh::spawn(
            engine,
            library,
            config.engine_timeout(),
            Duration::from_secs(config.library.retry_interval_secs),
            Duration::from_secs(config.library.refresh_interval_secs),
            shutdown.clone(),
        ),
        jobs::liveness::spawn(
            playback,
            Duration::from_secs(config.liveness.interval_secs),
            shutdown.clone(),
        ),
        jobs::sweeper::spawn(
            selections,
            Duration::from_secs(config.selection.sweep_interval_secs),
            shutdown.clone(),
        ),
    ];

    let ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown requested");
        }
        ctrl_c.cancel();
    });

    let source: Arc<dyn EventSource> = telegram;
    runtime::run_event_loop(source, state, shutdown).await;

    for handle in handles {
        if let Err(e) = handle.await {
            tracing::error!(error = %e, "Background job failed");
        }
    }

    tracing::info!("Soul Remote stopped");
    Ok(())
}

async fn search(
    config_path: Option<PathBuf>,
    limit: Option<usize>,
    query: &str,
) -> anyhow::Result<()> {
    let config = RemoteConfig::load(config_path.as_deref())?;
    config.validate()?;

    let engine = MpdClient::new(config.mpd_config());
    let library = Arc::new(SearchLibrary::new());
    let report = jobs::library_refresh::refresh(&engine, &library, config.engine_timeout()).await?;
    println!(
        "Indexed {} of {} entries ({} skipped)",
        report.indexed, report.total, report.skipped
    );

    let request = SearchRequest::new(query).with_limit(limit.unwrap_or(config.search.max_results));
    let page = library.search(&request)?;

    if page.hits.is_empty() {
        println!("No music found.");
        return Ok(());
    }

    println!("{} match(es), showing {}", page.total, page.hits.len());
    for hit in &page.hits {
        println!(
            "{:<8} {:>8.3}  {}  ({})",
            hit.track.id.as_str(),
            hit.score,
            hit.track.display_name(),
            hit.track.filename
        );
    }

    Ok(())
}

async fn ping(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = RemoteConfig::load(config_path.as_deref())?;
    config.validate()?;

    let engine: Arc<dyn PlaybackEngine> = Arc::new(MpdClient::new(config.mpd_config()));
    let playback = PlaybackController::new(engine, config.engine_timeout());

    playback.ping().await?;
    let status = playback.status().await?;

    println!("MPD at {} is alive", config.mpd_config().address());
    println!("State: {}", status.state);
    match status.volume {
        Some(volume) => println!("Volume: {volume}"),
        None => println!("Volume: unavailable"),
    }
    println!("Queue length: {}", status.queue_length);

    Ok(())
}
