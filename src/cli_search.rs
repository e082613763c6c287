use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tunescout_server::catalog_search::{
    CatalogClient, CatalogTrack, FavoritesList, DEFAULT_SEARCH_LIMIT, DEFAULT_TIMEOUT_SEC,
    ITUNES_SEARCH_URL,
};

#[derive(Parser, Debug)]
struct CliArgs {
    /// Directory holding the favorites file.
    #[clap(long, default_value = ".")]
    pub favorites_dir: PathBuf,

    /// Maximum number of results per search.
    #[clap(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
    pub limit: u32,

    /// Catalog search endpoint.
    #[clap(long, default_value = ITUNES_SEARCH_URL)]
    pub search_url: String,

    /// Timeout in seconds for catalog requests.
    #[clap(long, default_value_t = DEFAULT_TIMEOUT_SEC)]
    pub timeout_sec: u64,
}

enum Command {
    Search(String),
    Favorite(usize),
    Unfavorite(u64),
    ListFavorites,
    ClearFavorites,
    Quit,
    Invalid(String),
}

fn parse_command(input: &str) -> Command {
    match input {
        ":favs" => Command::ListFavorites,
        ":clear" => Command::ClearFavorites,
        ":quit" | ":q" => Command::Quit,
        _ => {
            if let Some(position) = input.strip_prefix('+') {
                match position.trim().parse::<usize>() {
                    Ok(n) if n > 0 => Command::Favorite(n),
                    _ => Command::Invalid(format!("Not a result number: {}", position)),
                }
            } else if let Some(track_id) = input.strip_prefix('-') {
                match track_id.trim().parse::<u64>() {
                    Ok(id) => Command::Unfavorite(id),
                    Err(_) => Command::Invalid(format!("Not a track id: {}", track_id)),
                }
            } else {
                Command::Search(input.to_string())
            }
        }
    }
}

/// Edge length of the artwork linked under each result.
const ARTWORK_SIZE: u32 = 600;

fn print_track(position: usize, track: &CatalogTrack, favorite: bool) {
    println!(
        "{:>3}. {}{} - {} [{}] ({}){}",
        position,
        if favorite { "* " } else { "" },
        track.artist_name,
        track.track_name,
        track.collection_name.as_deref().unwrap_or("-"),
        track.formatted_duration().unwrap_or_else(|| "?:??".to_string()),
        if track.is_playable() { "" } else { " no preview" },
    );
    println!("     {}", track.artwork_or_placeholder(ARTWORK_SIZE));
}

fn print_favorites(favorites: &FavoritesList) {
    if favorites.is_empty() {
        println!("No favorites yet.");
        return;
    }
    for favorite in favorites.favorites() {
        println!(
            "{:>12}  {} - {} (added {})",
            favorite.track.track_id,
            favorite.track.artist_name,
            favorite.track.track_name,
            favorite.added_at.format("%Y-%m-%d %H:%M"),
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let client = CatalogClient::new(cli_args.search_url.clone(), cli_args.timeout_sec)?;
    let mut favorites = FavoritesList::load(&cli_args.favorites_dir);
    let mut last_results: Vec<CatalogTrack> = Vec::new();

    println!(
        "Search the music catalog. Commands: +N favorite the Nth result, -ID remove a favorite, :favs list favorites, :clear, :quit"
    );

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut user_input = String::new();
        let read = stdin
            .lock()
            .read_line(&mut user_input)
            .context("Failed to read line")?;
        if read == 0 {
            break;
        }
        let user_input = user_input.trim();
        if user_input.is_empty() {
            continue;
        }

        match parse_command(user_input) {
            Command::Search(term) => match client.search(&term, cli_args.limit).await {
                Ok(response) if response.results.is_empty() => {
                    println!("No matches found for \"{}\".", term);
                    last_results.clear();
                }
                Ok(response) => {
                    println!("Found {} matches for \"{}\":", response.result_count, term);
                    for (index, track) in response.results.iter().enumerate() {
                        print_track(index + 1, track, favorites.contains(track.track_id));
                    }
                    last_results = response.results;
                }
                Err(err) => println!("Search failed: {:#}", err),
            },
            Command::Favorite(position) => match last_results.get(position - 1) {
                Some(track) => {
                    if favorites.add(track.clone())? {
                        println!("Added \"{}\" to favorites.", track.track_name);
                    } else {
                        println!("\"{}\" is already a favorite.", track.track_name);
                    }
                }
                None => println!("No result number {}.", position),
            },
            Command::Unfavorite(track_id) => {
                if favorites.remove(track_id)? {
                    println!("Removed {} from favorites.", track_id);
                } else {
                    println!("{} is not a favorite.", track_id);
                }
            }
            Command::ListFavorites => print_favorites(&favorites),
            Command::ClearFavorites => {
                favorites.clear()?;
                println!("Favorites cleared.");
            }
            Command::Quit => break,
            Command::Invalid(message) => println!("{}", message),
        }
    }

    Ok(())
}
