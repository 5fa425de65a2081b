//! `sgfdb`: index and replay SGF game records from the terminal.

use std::path::{Path, PathBuf};

use anyhow::bail;
use clap::{Parser, Subcommand};

use sgfdb::catalog::{Catalog, ListQuery, SearchScope, SortBy, SortOrder};
use sgfdb::config::Config;
use sgfdb::{detail, display, indexer};

#[derive(Parser)]
#[command(name = "sgfdb", version, about = "Index and replay SGF game records")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the indexed directory list
    Dirs {
        #[command(subcommand)]
        action: DirsAction,
    },
    /// Scan configured directories and index every game record found
    Index,
    /// List indexed games
    List {
        /// Filter text; a four-digit query also matches the game year
        #[arg(long)]
        query: Option<String>,
        /// Match player names only
        #[arg(long)]
        players: bool,
        /// Match event and round only
        #[arg(long)]
        games: bool,
        /// Match the game year only (four-digit queries)
        #[arg(long)]
        years: bool,
        /// Sort key: white, black, event or date
        #[arg(long, default_value = "date")]
        sort_by: String,
        /// Sort direction: asc or desc
        #[arg(long, default_value = "desc")]
        order: String,
    },
    /// Print metadata and root properties of one record
    Show { path: PathBuf },
    /// Replay a record and print the resulting board
    Replay {
        path: PathBuf,
        /// Replay only the first K moves
        #[arg(long = "move", value_name = "K")]
        move_index: Option<usize>,
    },
}

#[derive(Subcommand)]
enum DirsAction {
    /// Add a directory to the index set
    Add { path: String },
    /// Remove a directory from the index set
    Remove { path: String },
    /// Print the configured directories
    List,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Dirs { action } => run_dirs(action),
        Commands::Index => run_index(),
        Commands::List {
            query,
            players,
            games,
            years,
            sort_by,
            order,
        } => run_list(query, players, games, years, &sort_by, &order),
        Commands::Show { path } => run_show(&path),
        Commands::Replay { path, move_index } => run_replay(&path, move_index),
    }
}

fn run_dirs(action: DirsAction) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    match action {
        DirsAction::Add { path } => {
            let dir = config.add_directory(&path)?;
            config.save()?;
            println!("Added {dir}");
        }
        DirsAction::Remove { path } => {
            let dir = config.remove_directory(&path)?;
            config.save()?;
            println!("Removed {dir}");
        }
        DirsAction::List => {
            if config.sgf_directories.is_empty() {
                println!("No directories configured. Add one with `sgfdb dirs add <path>`.");
            } else {
                for dir in &config.sgf_directories {
                    println!("{dir}");
                }
            }
        }
    }
    Ok(())
}

fn run_index() -> anyhow::Result<()> {
    let config = Config::load()?;
    let mut catalog = Catalog::new();
    let summary = indexer::index_all(&config, &mut catalog, |_| {});
    println!("{}", display::render_summary(&summary));
    Ok(())
}

fn run_list(
    query: Option<String>,
    players: bool,
    games: bool,
    years: bool,
    sort_by: &str,
    order: &str,
) -> anyhow::Result<()> {
    let sort_by = match sort_by.to_lowercase().as_str() {
        "white" => SortBy::White,
        "black" => SortBy::Black,
        "event" => SortBy::Event,
        "date" => SortBy::Date,
        other => bail!("unknown sort key: {other} (expected white, black, event or date)"),
    };
    let order = match order.to_lowercase().as_str() {
        "asc" => SortOrder::Ascending,
        "desc" => SortOrder::Descending,
        other => bail!("unknown sort order: {other} (expected asc or desc)"),
    };
    // No scope flag means search everything.
    let scope = if players || games || years {
        SearchScope {
            player_name: players,
            game_name: games,
            year: years,
        }
    } else {
        SearchScope::default()
    };

    // The catalog is in-process only, so a listing starts with a pass
    // over the configured directories.
    let config = Config::load()?;
    let mut catalog = Catalog::new();
    indexer::index_all(&config, &mut catalog, |_| {});

    let result = catalog.list(&ListQuery {
        query,
        scope,
        sort_by,
        order,
    });
    print!("{}", display::render_records(&result));
    Ok(())
}

fn run_show(path: &Path) -> anyhow::Result<()> {
    let detail = detail::load(path)?;
    print!("{}", display::render_detail(&detail));
    Ok(())
}

fn run_replay(path: &Path, move_index: Option<usize>) -> anyhow::Result<()> {
    let detail = detail::load(path)?;
    let board = detail.board_at(move_index)?;
    let shown = move_index.unwrap_or(detail.moves.len()).min(detail.moves.len());
    print!("{}", display::render_replay(&detail, &board, shown));
    Ok(())
}
