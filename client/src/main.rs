use clap::{Parser, Subcommand};
use client::app::GameApp;
use client::network::HighscoreClient;
use client::rendering::render_leaderboard;
use log::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the highscore server
    #[arg(short = 's', long, env = "HIGHSCORE_SERVER", default_value = "http://127.0.0.1:5000")]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play snake and save the final score
    Play {
        /// Window width
        #[arg(short = 'w', long, default_value = "800")]
        width: i32,

        /// Window height (no short flag to avoid conflict with --help)
        #[arg(long, default_value = "600")]
        height: i32,
    },
    /// Print the current top 10
    List,
    /// Submit a new score
    Submit {
        /// Player name
        #[arg(short, long)]
        name: String,

        /// Score to record
        #[arg(short = 'c', long, allow_negative_numbers = true)]
        score: i64,
    },
}

// macroquad needs the main thread for its window, so the runtime is built by
// hand instead of through #[tokio::main]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();
    let client = HighscoreClient::new(&args.server);
    let runtime = tokio::runtime::Runtime::new()?;

    info!("Using server at {}", args.server);

    match args.command {
        Command::Play { width, height } => {
            info!("Controls: arrows/WASD to steer, P to pause, R to restart");
            let app = GameApp::new(client, runtime.handle().clone());
            let conf = macroquad::window::Conf {
                window_title: "Snake".to_string(),
                window_width: width,
                window_height: height,
                ..Default::default()
            };
            macroquad::Window::from_config(conf, app.run());
        }
        Command::List => {
            let scores = runtime.block_on(client.get_highscores())?;
            print!("{}", render_leaderboard(&scores));
        }
        Command::Submit { name, score } => {
            let outcome = runtime.block_on(client.submit_and_rank(score, &name))?;
            let name = name.trim();
            if !outcome.qualified {
                println!("{} is below the current top 10", score);
            }
            match outcome.rank {
                Some(rank) => println!("{} placed #{} with {}", name, rank, score),
                None => println!("{} did not make the top 10", name),
            }
            print!("{}", render_leaderboard(&outcome.board));
        }
    }

    Ok(())
}
