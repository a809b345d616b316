//! Gradex HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use gradex::config::Config;
use gradex::document::PageRasterizer;
use gradex::embedding::{CrossEncoder, CrossEncoderConfig, EmbedderConfig, SentenceEmbedder};
use gradex::extraction::TextExtractor;
use gradex::gateway::{HandlerState, create_router_with_state};
use gradex::ocr::{OcrOracle, TesseractClient, VisionClient};
use gradex::report::FsReportStore;
use gradex::scoring::TextSimilarityScorer;
use gradex::session::{Evaluator, SessionRegistry};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        storage_path = %config.storage_path.display(),
        "Gradex starting"
    );

    let embedder_config = if let Some(path) = &config.embedder_path {
        EmbedderConfig::new(path.clone())
    } else {
        tracing::warn!("No GRADEX_EMBEDDER_PATH configured, running embedder in stub mode");
        EmbedderConfig::stub()
    };
    let embedder = SentenceEmbedder::load(embedder_config)?;

    let cross_encoder_config = if let Some(path) = &config.cross_encoder_path {
        CrossEncoderConfig::new(path.clone())
    } else {
        tracing::warn!(
            "No GRADEX_CROSS_ENCODER_PATH configured, running cross-encoder in stub mode"
        );
        CrossEncoderConfig::stub()
    };
    let cross_encoder = CrossEncoder::load(cross_encoder_config)?;

    let reference_oracle: Arc<dyn OcrOracle> = Arc::new(TesseractClient::new(&config.ocr_url)?);
    let candidate_oracle: Arc<dyn OcrOracle> = Arc::new(VisionClient::new(&config.vision_model));

    let extractor = TextExtractor::new(reference_oracle, candidate_oracle);
    let scorer = TextSimilarityScorer::new(embedder, cross_encoder);
    let evaluator = Evaluator::new(PageRasterizer::new(), extractor, scorer);

    std::fs::create_dir_all(&config.storage_path)?;
    let store = FsReportStore::new(config.storage_path.clone());

    let state = HandlerState::new(
        Arc::new(SessionRegistry::new()),
        Arc::new(evaluator),
        Arc::new(store),
    );

    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Gradex shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("GRADEX_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(_) => return 1,
    };

    rt.block_on(async {
        let client = match reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
        {
            Ok(client) => client,
            Err(_) => return 1,
        };

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_err() {
            tracing::error!("Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(_) => {
                tracing::error!("Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
