use std::sync::Arc;

use clap::Parser;
use log::info;
use recipe_finder::{web, Settings, SpoonacularClient};
use tokio::{net, signal};

#[derive(Parser)]
#[command(name = "recipe-finder-web")]
#[command(about = "Serve the recipe finder in the browser", long_about = None)]
struct Args {
    /// Address to listen on (defaults to 127.0.0.1:5000)
    #[arg(short, long)]
    bind: Option<String>,
    /// Number of recipes to ask for (defaults to 10)
    #[arg(short, long)]
    number: Option<u32>,
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        log::error!("Failed to install Ctrl+C handler: {}", e);
        return;
    }
    info!("Received Ctrl+C, shutting down");
}

async fn serve() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let settings = Settings::load()?;
    let client = SpoonacularClient::from_settings(&settings)?.with_number(args.number);

    let app = web::router(Arc::new(client));

    let endpoint = args.bind.unwrap_or(settings.bind);
    let listener = net::TcpListener::bind(&endpoint).await?;
    info!("Listening on http://{}", endpoint);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = serve().await {
        log::error!("{}", err);
        eprintln!("recipe-finder-web: error: {}", err);
        std::process::exit(1);
    }
}
