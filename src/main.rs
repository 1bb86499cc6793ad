use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;

use search_injector::app::{App, AppEvent, FormField};
use search_injector::builder::Engine;
use search_injector::config::{self, Config};
use search_injector::ui;

#[derive(Parser, Debug)]
#[command(
    name = "search-injector",
    about = "Build search links or parameterized links, then copy or open them"
)]
struct Args {
    /// Config file (default: ~/.config/search-injector/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Search engine to preselect (google or bing)
    #[arg(long, value_parser = parse_engine)]
    engine: Option<Engine>,

    /// Pre-fill the search term
    #[arg(long, value_name = "TEXT")]
    term: Option<String>,

    /// Pre-fill the base URL
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
}

fn parse_engine(s: &str) -> Result<Engine, String> {
    Engine::from_str_name(s).ok_or_else(|| format!("unknown engine '{}' (expected google or bing)", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr and stay silent unless RUST_LOG is set
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match args.config.clone().or_else(config::default_path) {
        Some(path) => Config::load(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => {
            tracing::debug!("HOME not set, using default configuration");
            Config::default()
        }
    };

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);
    let mut app = App::new(&config, event_tx);

    if let Some(engine) = args.engine {
        app.request.engine = engine;
    }
    if let Some(term) = &args.term {
        app.insert_text_into(FormField::SearchTerm, term);
    }
    if let Some(base_url) = &args.base_url {
        app.insert_text_into(FormField::BaseUrl, base_url);
    }

    ui::run(&mut app, event_rx).await?;

    if let Some(url) = &app.generated_url {
        println!("{}", url);
    }
    Ok(())
}
