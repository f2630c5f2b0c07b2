// src/main.rs
//
// moviereview: maintenance CLI over the review database

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use uuid::Uuid;

use moviereview::application::{seed_catalog, AppState};
use moviereview::commands::browse_movies;
use moviereview::db::{
    create_connection_pool, get_database_stats, initialize_database, verify_database_integrity,
};
use moviereview::dto::BrowseMoviesDto;
use moviereview::Config;

/// MovieReview: movie catalogue, reviews and watchlists
#[derive(Parser, Debug)]
#[command(name = "moviereview")]
#[command(about = "Manage the movie review database", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database file (overrides the configuration)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create or migrate the database schema
    Init,
    /// Insert the sample catalogue into an empty database
    Seed,
    /// Recompute rating aggregates from reviews
    Recompute(RecomputeArgs),
    /// List movies in the catalogue
    Movies(MoviesArgs),
    /// Print row counts and file size
    Stats,
    /// Run SQLite's integrity check
    Check,
}

#[derive(Parser, Debug)]
struct RecomputeArgs {
    /// Only this movie (default: every movie)
    #[arg(long)]
    movie: Option<String>,
}

#[derive(Parser, Debug)]
struct MoviesArgs {
    /// Search title, director and genres
    #[arg(long)]
    search: Option<String>,

    /// Exact genre
    #[arg(long)]
    genre: Option<String>,

    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Sort field: title, release_year, average_rating, created_at
    #[arg(long)]
    sort_by: Option<String>,
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(database) = &cli.database {
        config.database.path = Some(database.clone());
    }
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }

    Ok(config)
}

fn init_logging(config: &Config) -> Result<()> {
    let level: LevelFilter = config.log_level()?;
    TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("Failed to initialize logger")
}

fn run_recompute(state: &AppState, args: RecomputeArgs) -> Result<()> {
    match args.movie {
        Some(raw) => {
            let movie_id = Uuid::parse_str(raw.trim())
                .with_context(|| format!("Invalid movie id '{}'", raw))?;
            let summary = state.rating_service.recompute_rating(movie_id)?;
            println!(
                "{}: {:.1} ({} reviews)",
                movie_id,
                summary.average_rating.as_f64(),
                summary.total_reviews
            );
        }
        None => {
            let report = state.rating_service.recompute_all()?;
            println!("Recomputed {} movies", report.recomputed);
            if !report.failed.is_empty() {
                for id in &report.failed {
                    eprintln!("  failed: {}", id);
                }
                return Err(anyhow!("{} movies could not be recomputed", report.failed.len()));
            }
        }
    }
    Ok(())
}

fn run_movies(state: &AppState, args: MoviesArgs) -> Result<()> {
    let list = browse_movies(
        state,
        BrowseMoviesDto {
            page: Some(args.page),
            genre: args.genre,
            search: args.search,
            sort_by: args.sort_by,
            ..BrowseMoviesDto::default()
        },
    )
    .map_err(|e| anyhow!("{}", e.message))?;

    for movie in &list.movies {
        println!(
            "{}  {} ({})  {:.1} from {} reviews  [{}]",
            movie.id,
            movie.title,
            movie.release_year,
            movie.average_rating,
            movie.total_reviews,
            movie.genres.join(", ")
        );
    }
    println!(
        "Page {} of {} ({} movies)",
        list.pagination.current_page, list.pagination.total_pages, list.pagination.total_items
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(&config)?;

    let pool = Arc::new(
        create_connection_pool(&config.database).context("Failed to open database")?,
    );
    {
        let conn = pool.get()?;
        initialize_database(&conn).context("Failed to migrate database")?;
    }

    match cli.command {
        Commands::Init => {
            println!("Database ready");
        }
        Commands::Seed => {
            let state = AppState::new(pool, &config);
            let created = seed_catalog(&state)?;
            println!("Seeded {} movies", created);
        }
        Commands::Recompute(args) => {
            let state = AppState::new(pool, &config);
            run_recompute(&state, args)?;
        }
        Commands::Movies(args) => {
            let state = AppState::new(pool, &config);
            run_movies(&state, args)?;
        }
        Commands::Stats => {
            let conn = pool.get()?;
            let stats = get_database_stats(&conn)?;
            println!("Size:      {} bytes", stats.size_bytes);
            println!("Users:     {}", stats.user_count);
            println!("Movies:    {}", stats.movie_count);
            println!("Reviews:   {}", stats.review_count);
            println!("Watchlist: {}", stats.watchlist_count);
        }
        Commands::Check => {
            let conn = pool.get()?;
            verify_database_integrity(&conn)?;
            println!("Integrity check passed");
        }
    }

    Ok(())
}
