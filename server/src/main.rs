use clap::Parser;
use log::info;
use server::network::Server;
use server::store::HighscoreStore;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server IP address to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Server port to listen on
    #[arg(short, long, default_value = "5000")]
    port: u16,

    /// File holding the persisted leaderboard
    #[arg(short = 'f', long, env = "HIGHSCORES_FILE", default_value = "highscores.json")]
    highscores_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();

    info!("Starting highscore server...");

    let address = format!("{}:{}", args.host, args.port);
    let store = HighscoreStore::new(args.highscores_file);
    let server = Server::new(&address, store).await?;

    server.run().await?;

    Ok(())
}
