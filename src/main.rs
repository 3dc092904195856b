use std::io;

use clap::Parser;
use log::error;
use recipe_finder::{console, SearchError, Settings, SpoonacularClient};

#[derive(Parser)]
#[command(name = "recipe-finder")]
#[command(about = "Find recipes for the ingredients you have", long_about = None)]
struct Cli {
    /// Number of recipes to ask for (defaults to 5)
    #[arg(short, long)]
    number: Option<u32>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let client = match Settings::load()
        .map_err(SearchError::from)
        .and_then(|settings| SpoonacularClient::from_settings(&settings))
    {
        Ok(client) => client.with_number(cli.number),
        Err(e) => {
            error!("{}", e);
            eprintln!("recipe-finder: error: {}", e);
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    if let Err(e) = console::run(&client, &mut input, &mut output).await {
        eprintln!("recipe-finder: error: {}", e);
        std::process::exit(1);
    }
}
