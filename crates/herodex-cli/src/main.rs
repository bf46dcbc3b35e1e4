//! Herodex CLI — terminal hero catalog browser

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use herodex::app::{QueryState, Session};
use herodex::config::Config;
use herodex::data::{FavoriteChange, Hero};
use herodex::navigation::{Location, PaginationView, QueryParams};

#[derive(Parser)]
#[command(name = "herodex", about = "Browse the hero catalog", version)]
struct Cli {
    /// Catalog server base URL (overrides HERODEX_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Directory for persisted favorites (overrides HERODEX_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List one page of heroes
    List {
        /// Page number; anything that is not a positive integer means 1
        #[arg(long, default_value = "1")]
        page: String,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Show one hero
    Hero { id: String },
    /// Show catalog statistics
    Summary,
    /// Search heroes by name and/or strength
    Search {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        strength: Option<String>,
    },
    /// Manage favorites
    #[command(subcommand)]
    Favorites(FavoritesCommand),
}

#[derive(Subcommand)]
enum FavoritesCommand {
    /// List favorites
    List,
    /// Add or remove a hero by id
    Toggle { id: String },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(url) = cli.api_url {
        config = config.with_api_base_url(url);
    }
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }

    let location = location_for(&cli.command)?;
    let mut session = Session::from_config(&config, location)?;

    match cli.command {
        Command::List { limit, category, .. } => {
            let state = session.current_heroes(limit, category.as_deref());
            let page = unwrap_state(state)?;
            for hero in &page.heroes {
                print_hero_line(hero, session.favorites.is_favorite(hero));
            }
            print_pagination(&session.pagination(page.pages), page.total);
        }
        Command::Hero { id } => {
            let hero = unwrap_state(session.queries.hero_page(&id))?;
            println!("{}", serde_json::to_string_pretty(&hero)?);
        }
        Command::Summary => {
            let summary = unwrap_state(session.queries.hero_summary())?;
            println!("Total heroes:  {}", summary.total_heroes);
            println!("Heroes:        {}", summary.hero_count);
            println!("Villains:      {}", summary.villain_count);
            println!("Strongest:     {}", summary.strongest_hero.name());
            println!("Smartest:      {}", summary.smartest_hero.name());
        }
        Command::Search { .. } => {
            let heroes = unwrap_state(session.search())?;
            if heroes.is_empty() {
                println!("No heroes found");
            }
            for hero in &heroes {
                print_hero_line(hero, session.favorites.is_favorite(hero));
            }
        }
        Command::Favorites(FavoritesCommand::List) => {
            if session.favorites.is_empty() {
                println!("No favorites yet");
            }
            for hero in session.favorites.favorites() {
                print_hero_line(hero, true);
            }
            println!("{} favorite(s)", session.favorites.favorite_count());
        }
        Command::Favorites(FavoritesCommand::Toggle { id }) => {
            // Prefer the stored snapshot so a favorite can be removed offline
            let hero = match session.favorites.get(&id) {
                Some(hero) => hero.clone(),
                None => unwrap_state(session.queries.hero_page(&id))?,
            };
            match session.toggle_favorite(&hero) {
                FavoriteChange::Added => println!("Added {} to favorites", hero.name()),
                FavoriteChange::Removed => println!("Removed {} from favorites", hero.name()),
            }
        }
    }

    Ok(())
}

/// The location a browser would show for `command`
fn location_for(command: &Command) -> herodex::error::Result<Location> {
    let mut location = match command {
        Command::Search { .. } => Location::parse("herodex://app/search")?,
        _ => Location::parse("herodex://app/")?,
    };
    match command {
        Command::List { page, .. } => location.set_param("page", page),
        Command::Search { name, strength } => {
            if let Some(name) = name {
                location.set_param("name", name);
            }
            if let Some(strength) = strength {
                location.set_param("strength", strength);
            }
        }
        _ => {}
    }
    Ok(location)
}

fn unwrap_state<T>(state: QueryState<T>) -> Result<T, Box<dyn std::error::Error>> {
    match state {
        QueryState::Success(data) => Ok(data),
        QueryState::Error(message) => Err(message.into()),
        QueryState::Loading => Err("query did not run".into()),
    }
}

fn print_hero_line(hero: &Hero, favorite: bool) {
    let marker = if favorite { "*" } else { " " };
    let category = hero.category().unwrap_or("-");
    println!("{} {:>4}  {:<28} {}", marker, hero.id(), hero.name(), category);
}

fn print_pagination(view: &PaginationView, total: u32) {
    let buttons: Vec<String> = view
        .buttons
        .iter()
        .map(|b| {
            if b.active {
                format!("[{}]", b.number)
            } else {
                b.number.to_string()
            }
        })
        .collect();
    println!();
    println!(
        "{} {} {}   ({} heroes)",
        if view.previous_disabled { "   " } else { "<< " },
        buttons.join(" "),
        if view.next_disabled { "   " } else { " >>" },
        total
    );
}
