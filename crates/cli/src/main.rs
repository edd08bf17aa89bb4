mod clipboard;
mod commands;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use gearshelf_core::Shelf;

/// gearshelf — curated audio-gear catalog browser
#[derive(Parser)]
#[command(name = "gearshelf", version, about)]
struct Cli {
    /// Path to the product dataset (category → products JSON)
    #[arg(long, default_value = "data/gear.json")]
    data: PathBuf,

    /// Path to the supplementary per-product dataset
    #[arg(long, default_value = "data/extra.json")]
    extra: PathBuf,

    /// Path to the local state database
    #[arg(long, default_value_t = default_state_path())]
    state: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog, optionally filtered
    Ls {
        /// Case-insensitive substring of the product name
        #[arg(long)]
        search: Option<String>,
        /// Category key or label (see `gearshelf categories`)
        #[arg(long)]
        category: Option<String>,
        /// Price bracket: `all`, `min-max`, or `min+`
        #[arg(long)]
        price: Option<String>,
        /// Only curator picks
        #[arg(long)]
        picks: bool,
        /// Render a shared wishlist link or token read-only
        #[arg(long)]
        from: Option<String>,
    },
    /// List catalog categories
    Categories,
    /// Show supplementary detail for a product
    Info {
        /// Product name
        name: String,
    },
    /// Show dataset and wishlist summary
    Status,
    /// Manage the personal wishlist
    Wish {
        #[command(subcommand)]
        action: WishAction,
    },
    /// Print or copy the share link for the current wishlist
    Share {
        /// Emit a Markdown summary instead of the bare link
        #[arg(long)]
        markdown: bool,
        /// Copy the output to the system clipboard
        #[arg(long)]
        copy: bool,
    },
    /// Manage settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Interactive browsing shell
    Browse {
        /// Open a shared wishlist link or token read-only at startup
        #[arg(long)]
        from: Option<String>,
    },
}

#[derive(Subcommand)]
enum WishAction {
    /// Add a product to the wishlist
    Add { name: String },
    /// Remove a product from the wishlist
    Rm { name: String },
    /// Flip wishlist membership
    Toggle { name: String },
    /// Show the wishlist grouped by category
    Ls,
    /// Remove every wishlist item
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Merge a shared wishlist link or token into your own
    Import {
        token: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the current settings
    Show,
    /// Set the base URL used when building share links
    SetShareUrl { url: String },
}

fn default_state_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home)
        .join(".gearshelf")
        .join("state.db")
        .to_string_lossy()
        .to_string()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut shelf = Shelf::open(&cli.data, Some(&cli.extra), Path::new(&cli.state))?;
    tracing::debug!(
        products = shelf.catalog().all_products().len(),
        categories = shelf.catalog().categories().len(),
        "catalog loaded"
    );

    match cli.command {
        Commands::Ls {
            search,
            category,
            price,
            picks,
            from,
        } => commands::ls::run(&shelf, search, category, price, picks, from)?,
        Commands::Categories => commands::categories::run(&shelf)?,
        Commands::Info { name } => commands::info::run(&shelf, &name)?,
        Commands::Status => commands::status::run(&shelf, &cli.state)?,
        Commands::Wish { action } => match action {
            WishAction::Add { name } => commands::wish::add(&mut shelf, &name)?,
            WishAction::Rm { name } => commands::wish::rm(&mut shelf, &name)?,
            WishAction::Toggle { name } => commands::wish::toggle(&mut shelf, &name)?,
            WishAction::Ls => commands::wish::ls(&shelf)?,
            WishAction::Clear { yes } => commands::wish::clear(&mut shelf, yes)?,
            WishAction::Import { token, yes } => {
                commands::wish::import(&mut shelf, &token, yes)?
            }
        },
        Commands::Share { markdown, copy } => commands::share::run(&shelf, markdown, copy)?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&shelf, &cli.state)?,
            ConfigAction::SetShareUrl { url } => commands::config::set_share_url(&shelf, &url)?,
        },
        Commands::Browse { from } => commands::browse::run(&mut shelf, from)?,
    }

    Ok(())
}
