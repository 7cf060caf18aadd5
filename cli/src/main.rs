mod journal;
mod stats;
mod tui;

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Local};
use clap::Parser;
use cragbook_core::config::resolve_data_dir;
use cragbook_core::{
    expand_key, parse_args, parse_climb_date, parse_month, resolve_id, ClimbingDraft, ClimbingGrade,
    ClimbingResult, FileJournalRepository, FilePhotoStorage, JournalService, MoodKind, PlaceKind, Route,
    RouteKind, WeatherKind,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

pub type Service = JournalService<FileJournalRepository, FilePhotoStorage>;

#[derive(Parser)]
#[command(name = "cragbook")]
#[command(about = "A climbing journal for the terminal", long_about = None)]
struct Cli {
    /// Directory holding journal.json and photos/ (default: ~/.cragbook)
    #[arg(long, global = true, env = "CRAGBOOK_DIR")]
    data_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage climbing places
    Place {
        #[command(subcommand)]
        action: PlaceAction,
    },
    /// Manage routes of a place
    Route {
        #[command(subcommand)]
        action: RouteAction,
    },
    /// Log a climb (usage: log route:3fa2 mood:happy res:complete att:3 date:yest "felt strong")
    Log {
        /// Photo file to attach (up to 3)
        #[arg(long = "photo")]
        photos: Vec<PathBuf>,
        /// Note text plus key:value metadata
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List all climbs, newest first
    List,
    /// Show one climb in detail
    Show { id: String },
    /// Delete a climb and its photos
    Rm { id: String },
    /// Print a month with active days marked
    Calendar {
        /// this, next, prev, +N, -N or YYYY-MM
        #[arg(short, long, default_value = "this", allow_hyphen_values = true)]
        month: String,
    },
    /// Print this year's difficulty trend, moods and next-grade tip
    Stats,
    /// Open the Terminal User Interface
    Tui,
}

#[derive(clap::Subcommand)]
enum PlaceAction {
    /// Add a place (usage: place add "Frankenjura" --kind natural)
    Add {
        name: String,
        #[arg(short, long, default_value = "natural")]
        kind: PlaceKind,
        #[arg(short, long, default_value = "")]
        details: String,
    },
    /// List places with route counts
    List,
    /// Delete a place with its routes and climbs
    Rm { id: String },
}

#[derive(clap::Subcommand)]
enum RouteAction {
    /// Add a route (usage: route add 3fa2 "Action Directe" 8a+ --kind sports)
    Add {
        place: String,
        name: String,
        grade: ClimbingGrade,
        #[arg(short, long, default_value = "sports")]
        kind: RouteKind,
        #[arg(short, long, default_value = "")]
        details: String,
    },
    /// List routes, optionally for one place (sorted by grade)
    List { place: Option<String> },
    /// Delete a route with its climbs
    Rm { id: String },
}

const LOG_KEYS: [&str; 6] = ["route", "date", "weather", "result", "attempts", "mood"];

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let data_dir = resolve_data_dir(cli.data_dir)?;
    let repo = FileJournalRepository::new(&data_dir)?;
    let photos = FilePhotoStorage::new(&data_dir)?;
    let service = JournalService::new(repo, photos);

    match cli.command {
        Some(Commands::Place { action }) => handle_place(&service, action),
        Some(Commands::Route { action }) => handle_route(&service, action),
        Some(Commands::Log { photos, args }) => handle_log(&service, &photos, &args),
        Some(Commands::List) => {
            journal::print_climbings(&service.climbings_newest_first()?);
            Ok(())
        }
        Some(Commands::Show { id }) => {
            let id = climbing_id(&service, &id)?;
            let journal = service.journal()?;
            let climbing = service.climbing(&id)?;
            journal::print_climbing_detail(&climbing, &journal, service.photos());
            Ok(())
        }
        Some(Commands::Rm { id }) => {
            let id = climbing_id(&service, &id)?;
            service.delete_climbing(&id)?;
            println!("Climb deleted: {}", id);
            Ok(())
        }
        Some(Commands::Calendar { month }) => {
            let month = parse_month(&month, Local::now().date_naive())?;
            journal::print_calendar(&service, month)
        }
        Some(Commands::Stats) => stats::print_report(&service, Local::now().date_naive()),
        Some(Commands::Tui) | None => tui::run(service),
    }
}

fn handle_place(service: &Service, action: PlaceAction) -> Result<()> {
    match action {
        PlaceAction::Add { name, kind, details } => {
            if name.trim().is_empty() {
                bail!("Place name is required.");
            }
            let place = service.add_place(name, kind, details)?;
            println!("Place added: {} (ID: {})", place.name, place.id);
        }
        PlaceAction::List => journal::print_places(&service.place_summaries()?),
        PlaceAction::Rm { id } => {
            let ids: Vec<_> = service.places()?.iter().map(|p| p.id).collect();
            let id = resolve_id(&id, &ids)?;
            let place = service.place(&id)?;
            service.delete_place(&id)?;
            println!("Place deleted: {}", place.name);
        }
    }
    Ok(())
}

fn handle_route(service: &Service, action: RouteAction) -> Result<()> {
    match action {
        RouteAction::Add { place, name, grade, kind, details } => {
            if name.trim().is_empty() {
                bail!("Route name is required.");
            }
            let place_id = place_id(service, &place)?;
            let route = service.add_route(place_id, name, grade, kind, details)?;
            println!("Route added: {} {} (ID: {})", route.name, route.grade, route.id);
        }
        RouteAction::List { place } => {
            let routes = match place {
                Some(place) => service.routes_for(&place_id(service, &place)?)?,
                None => service.routes()?,
            };
            journal::print_routes(&routes, &service.journal()?);
        }
        RouteAction::Rm { id } => {
            let ids: Vec<_> = service.routes()?.iter().map(|r| r.id).collect();
            let id = resolve_id(&id, &ids)?;
            let route = service.route(&id)?;
            service.delete_route(&id)?;
            println!("Route deleted: {}", route.name);
        }
    }
    Ok(())
}

fn handle_log(service: &Service, photo_paths: &[PathBuf], args: &[String]) -> Result<()> {
    let (draft, route) = build_draft(service, args, Local::now())?;

    let sources: Vec<Vec<u8>> = photo_paths
        .iter()
        .map(|path| {
            std::fs::read(path).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "could not read photo");
                Vec::new()
            })
        })
        .collect();

    let climbing = service.add_climbing(draft, &sources)?;

    println!("Climb logged: {} {} (ID: {})", route.name, route.grade, climbing.id);
    println!("  Date: {}", climbing.date.format("%Y-%m-%d %H:%M"));
    println!("  {} / {} / {} attempt(s)", climbing.result, climbing.mood, climbing.attempts);
    if !climbing.photos.is_empty() {
        println!("  Photos: {}", climbing.photos.len());
    }
    Ok(())
}

/// Turns `log` words into a climb draft. The route is required; `date`
/// falls back to `default_date` and relative dates count from it.
pub fn build_draft(service: &Service, args: &[String], default_date: DateTime<Local>) -> Result<(ClimbingDraft, Route)> {
    let parsed = parse_args(args);

    // Normalize metadata keys
    let mut metadata = HashMap::new();
    for (key, value) in parsed.metadata {
        metadata.insert(expand_key(&key, &LOG_KEYS)?, value);
    }

    let route_input = metadata
        .get("route")
        .ok_or_else(|| anyhow!("A route is required (route:<id>)."))?;
    let route_ids: Vec<_> = service.routes()?.iter().map(|r| r.id).collect();
    let route = service.route(&resolve_id(route_input, &route_ids)?)?;

    let date = match metadata.get("date") {
        Some(d) => parse_climb_date(d, default_date)?,
        None => default_date,
    };
    let attempts = match metadata.get("attempts") {
        Some(a) => a.parse().with_context(|| format!("Invalid attempts '{}'", a))?,
        None => 1,
    };

    let draft = ClimbingDraft {
        date,
        place_id: route.place_id,
        route_id: route.id,
        weather: parse_or(metadata.get("weather"), WeatherKind::Sun)?,
        result: parse_or(metadata.get("result"), ClimbingResult::Complete)?,
        attempts,
        mood: parse_or(metadata.get("mood"), MoodKind::Happy)?,
        note: parsed.text,
    };
    Ok((draft, route))
}

fn parse_or<T>(value: Option<&String>, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(v) => Ok(v.parse()?),
        None => Ok(default),
    }
}

fn place_id(service: &Service, input: &str) -> Result<uuid::Uuid> {
    let ids: Vec<_> = service.places()?.iter().map(|p| p.id).collect();
    resolve_id(input, &ids)
}

fn climbing_id(service: &Service, input: &str) -> Result<uuid::Uuid> {
    let ids: Vec<_> = service.journal()?.climbings.iter().map(|c| c.id).collect();
    resolve_id(input, &ids)
}
