use crate::demo::{run_genres, run_search, run_walkthrough, Output};
use clap::{Parser, Subcommand};
use movieland::catalog::genre_for;
use movieland::config::AppConfig;
use movieland::discovery::Genre;
use movieland::error::AppError;
use movieland::session::{RecommenderSystem, Session, SessionEvent};
use movieland::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "movieland-demo",
    about = "Replay MovieLand discovery sessions from the command line",
    version
)]
struct Cli {
    /// Print the final view model as JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    /// Seed for the random source; overrides MOVIELAND_SEED
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// Recommender system to start with (ninja, pirate, viking, wizard)
    #[arg(long, global = true, value_parser = parse_recommender)]
    recommender: Option<RecommenderSystem>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a scripted session through every onboarding stage (default command)
    Walkthrough,
    /// Search titles, directors, years, cast, and languages
    Search {
        /// Text to match; an empty query shows the full catalog
        query: String,
    },
    /// Filter the catalog by one or more genres
    Genres {
        #[arg(required = true, value_parser = parse_genre)]
        genres: Vec<Genre>,
    },
}

fn parse_genre(value: &str) -> Result<Genre, String> {
    genre_for(value).ok_or_else(|| format!("unknown genre '{value}'"))
}

fn parse_recommender(value: &str) -> Result<RecommenderSystem, String> {
    RecommenderSystem::parse(value).ok_or_else(|| format!("unknown recommender '{value}'"))
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    if cli.seed.is_some() {
        config.catalog.seed = cli.seed;
    }
    telemetry::init(&config.telemetry)?;

    let mut session = Session::from_config(&config)?;
    if let Some(system) = cli.recommender {
        session.handle(SessionEvent::RecommenderSelected(system));
    }
    let output = Output::new(cli.json);

    match cli.command.unwrap_or(Command::Walkthrough) {
        Command::Walkthrough => run_walkthrough(&mut session, output),
        Command::Search { query } => run_search(&mut session, &query, output),
        Command::Genres { genres } => run_genres(&mut session, &genres, output),
    }
}
