use anyhow::Context;
use call_sentiment::api::handlers::documents::AnalysisResponse;
use call_sentiment::config::AppConfig;
use call_sentiment::api::views::render_text_report;
use call_sentiment::services::intake::accept_upload;
use call_sentiment::{AppState, create_app};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the web app (default)
    Serve {
        /// Port for the HTTP server
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Analyze a local .txt file and print the result
    Analyze {
        /// Call history text file
        path: PathBuf,

        /// Write the word cloud SVG to this file
        #[arg(long)]
        word_cloud: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "call_sentiment=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env();

    match args.command.unwrap_or(Command::Serve { port: 3000 }) {
        Command::Serve { port } => serve(config, port).await,
        Command::Analyze {
            path,
            word_cloud,
            json,
        } => analyze_file(config, &path, word_cloud.as_deref(), json).await,
    }
}

async fn serve(config: AppConfig, port: u16) -> anyhow::Result<()> {
    info!("🚀 Starting Call Sentiment Analysis...");
    info!(
        "⚙️  Config: Max Size={}KB, Word Cloud={}, Temp Dir={}",
        config.max_file_size / 1024,
        config.word_cloud_enabled,
        config.upload_dir().display()
    );

    let host: std::net::IpAddr = config
        .host
        .parse()
        .with_context(|| format!("invalid HOST '{}'", config.host))?;
    let state = AppState::new(config);

    let app = create_app(state);
    let addr = SocketAddr::new(host, port);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("✅ Server listening on: http://{}", addr);
    info!("📖 Swagger UI documentation: http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shut down gracefully.");
    Ok(())
}

async fn analyze_file(
    config: AppConfig,
    path: &Path,
    word_cloud_out: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let document = accept_upload(&filename, bytes.into(), &config)?;
    let state = AppState::new(config);
    let report = tokio::task::spawn_blocking(move || state.analysis.analyze(&document)).await??;

    if let (Some(out), Some(image)) = (word_cloud_out, &report.word_cloud) {
        tokio::fs::write(out, &image.svg)
            .await
            .with_context(|| format!("failed to write {}", out.display()))?;
        info!("🖼️  Word cloud written to {}", out.display());
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&AnalysisResponse::from(report))?
        );
    } else {
        print!("{}", render_text_report(&report, word_cloud_out));
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("⌨️  Ctrl+C received, initiating graceful shutdown...");
        },
        _ = terminate => {
            info!("💤 SIGTERM received, initiating graceful shutdown...");
        },
    }
}
