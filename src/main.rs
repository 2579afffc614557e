use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use canvas::Canvas;
use clap::{Args, Parser, Subcommand};
use framecast::origin::HEALTH_PATH;
use framecast::{ClientError, ConnectOutcome, Origin, Page, Renderer, STATUS_PREFIX, Status};
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::warn;

#[derive(Parser, Debug)]
#[command(name = "framecast", about = "Token-authenticated MJPEG-over-WebSocket viewer")]
struct Cli {
    #[arg(long, env = "FRAMECAST_BASE_URL", default_value = "http://127.0.0.1:8000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Query the backend health endpoint.
    Health,
    /// Request a token and print it.
    Token {
        #[arg(long, env = "FRAMECAST_USER_ID", default_value = "")]
        user_id: String,
    },
    /// Connect to the stream and draw frames until stopped.
    Watch(WatchArgs),
}

#[derive(Args, Debug)]
struct WatchArgs {
    #[arg(long, env = "FRAMECAST_USER_ID", default_value = "")]
    user_id: String,

    #[arg(long, env = "FRAMECAST_TOKEN", help = "Use this token instead of requesting one")]
    token: Option<String>,

    #[arg(long, help = "Stop after this many frames have been drawn (never reached with --headless)")]
    frames: Option<u64>,

    #[arg(long, help = "Stop after this many seconds")]
    duration_secs: Option<u64>,

    #[arg(long, help = "Write the final canvas to this PNG file")]
    snapshot: Option<PathBuf>,

    #[arg(long, default_value_t = false, help = "Receive frames without a canvas")]
    headless: bool,
}

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let origin = Origin::parse(&cli.base_url)?;

    match cli.command {
        Command::Health => run_health(&origin).await,
        Command::Token { user_id } => run_token(origin, user_id).await,
        Command::Watch(args) => run_watch(origin, args).await,
    }
}

async fn run_health(origin: &Origin) -> Result<(), ClientError> {
    let response = reqwest::Client::new().get(origin.http_url(HEALTH_PATH)).send().await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ClientError::ServerError { status: status.as_u16(), body });
    }
    let value = serde_json::from_str::<Value>(&body)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

async fn run_token(origin: Origin, user_id: String) -> Result<(), ClientError> {
    let page = Page::new(origin, Arc::new(Renderer::new(None)));
    page.set_user_id(user_id);
    let token = page.submit_auth().await?;
    println!("{token}");
    Ok(())
}

async fn run_watch(origin: Origin, args: WatchArgs) -> Result<(), ClientError> {
    let surface = (!args.headless).then(Canvas::default);
    let renderer = Arc::new(Renderer::new(surface));
    let page = Page::new(origin, Arc::clone(&renderer));
    page.set_user_id(args.user_id);

    let printer = tokio::spawn(print_status(page.status().subscribe()));

    match args.token {
        Some(token) => page.set_token(token),
        None => {
            page.submit_auth().await?;
        }
    }

    if page.connect().await == ConnectOutcome::Opening {
        let mut status = page.status().watch();
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                if let Err(error) = result {
                    warn!(%error, "ctrl-c handler failed");
                }
            }
            () = wait_for_frames(&renderer, args.frames) => {}
            () = wait_for_duration(args.duration_secs) => {}
            _ = status.wait_for(|current| *current == Some(Status::Disconnected)) => {}
        }
        page.disconnect().await;
    }

    eprintln!("frames drawn: {}", renderer.frames_drawn());
    if let Some(path) = args.snapshot {
        renderer.with_surface(|canvas| canvas.save_png(&path)).ok_or(ClientError::NoSurface)??;
        eprintln!("snapshot written to {}", path.display());
    }

    printer.abort();
    Ok(())
}

async fn print_status(mut events: broadcast::Receiver<Status>) {
    loop {
        match events.recv().await {
            Ok(status) => eprintln!("{STATUS_PREFIX}{status}"),
            Err(broadcast::error::RecvError::Lagged(skipped)) => warn!(skipped, "status output lagged"),
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

async fn wait_for_frames(renderer: &Renderer, limit: Option<u64>) {
    match limit {
        Some(limit) => renderer.wait_for_frames(limit).await,
        None => std::future::pending().await,
    }
}

async fn wait_for_duration(seconds: Option<u64>) {
    match seconds {
        Some(seconds) => tokio::time::sleep(Duration::from_secs(seconds)).await,
        None => std::future::pending().await,
    }
}
