mod app;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pricewatch::application::RunMode;
use pricewatch::shared::config::ConfigLoader;

#[derive(Parser, Debug)]
#[command(version, about = "Product price tracker with threshold e-mail alerts")]
struct Args {
    /// Run the price check only once and exit.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let settings = ConfigLoader::load()?;

    app::run(settings, RunMode::from_flag(args.once)).await
}
