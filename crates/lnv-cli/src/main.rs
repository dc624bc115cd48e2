mod render;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Timelike;
use clap::{Args, Parser, Subcommand};
use lnv_core::{
    BrowseContext, BrowseFilter, ItineraryParams, ItinerarySession, MAX_RESULT_COUNT, MAX_STOPS,
    Rating, SortKey, Venue, VibeArc, VisitedFilter, analyze_area, compute_recommendations,
    decode_share_plan, encode_plan, load_venues, parse_hhmm, sort_venues,
};
use lnv_store::DataDir;
use rand::SeedableRng;
use rand::rngs::SmallRng;

#[derive(Parser)]
#[command(name = "lnv", about = "Late Night Vibes: venue browser, recommender and night planner")]
struct Cli {
    /// Venue CSV (overrides `dataset` in config.toml)
    #[arg(long, global = true, env = "LNV_CSV")]
    data: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Venues similar to one you like
    Recommend {
        /// Venue name (case-insensitive)
        venue: String,

        /// Maximum driving distance in miles; 0 for no cap
        #[arg(long)]
        max_distance: Option<f64>,

        /// Number of results (at most 20)
        #[arg(long)]
        count: Option<usize>,
    },

    /// Build and edit a night itinerary
    Plan {
        #[command(subcommand)]
        action: PlanCommand,
    },

    /// Filter and sort the venue list
    Browse(BrowseArgs),

    /// Save or unsave a venue
    Fav {
        venue: String,
    },

    /// Mark a venue as visited
    Visit {
        venue: String,

        /// up, down or neutral
        #[arg(long)]
        rating: Option<Rating>,
    },

    /// Remove a venue from your crawl history
    Unvisit {
        venue: String,
    },

    /// Rate a venue you already visited
    Rate {
        venue: String,

        /// up, down or neutral
        rating: Rating,
    },

    /// Show crawl history, or move it in and out as JSON
    History {
        #[command(subcommand)]
        action: Option<HistoryCommand>,
    },

    /// Compare neighborhoods side by side
    Compare {
        #[arg(required = true)]
        areas: Vec<String>,

        /// Wall-clock time as HH:MM (defaults to now)
        #[arg(long)]
        at: Option<String>,
    },

    /// Dataset overview: areas, categories and vibes
    Info,
}

#[derive(Subcommand)]
enum PlanCommand {
    /// Generate a new plan (clears locks)
    Build {
        /// Start time, 24-hour HH:MM
        #[arg(long)]
        start: Option<String>,

        /// End time, 24-hour HH:MM; at or before start means after midnight
        #[arg(long)]
        end: Option<String>,

        /// Number of stops
        #[arg(long)]
        stops: Option<usize>,

        /// chill-to-wild, date-night, party, explore or low-key
        #[arg(long)]
        arc: Option<String>,

        /// Only pick venues in this neighborhood
        #[arg(long)]
        area: Option<String>,

        /// Seed for a reproducible plan
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Regenerate unlocked stops
    Shuffle {
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Toggle the lock on a stop (1-based)
    Lock {
        stop: usize,
    },

    /// Swap two stops (1-based); their time slots stay put
    Swap {
        a: usize,
        b: usize,
    },

    /// Print the current plan
    Show,

    /// Print shareable text and a share token
    Share,

    /// Load a plan from a share token
    Open {
        token: String,
    },
}

#[derive(Subcommand)]
enum HistoryCommand {
    /// Write history to a JSON file
    Export { path: PathBuf },

    /// Merge history from a JSON file
    Import { path: PathBuf },
}

#[derive(Args)]
struct BrowseArgs {
    /// Text search over name, address, category, tags and area
    #[arg(long)]
    query: Option<String>,

    #[arg(long)]
    area: Option<String>,

    #[arg(long)]
    category: Option<String>,

    /// Required vibe; repeat for several
    #[arg(long = "vibe")]
    vibes: Vec<String>,

    /// Only venues open right now
    #[arg(long)]
    open_now: bool,

    /// Only saved venues
    #[arg(long)]
    saved: bool,

    /// Only venues you have been to
    #[arg(long, conflicts_with = "new")]
    visited: bool,

    /// Only venues you have not been to
    #[arg(long)]
    new: bool,

    /// name, distance, closing, area or category
    #[arg(long, default_value = "name")]
    sort: SortKey,

    /// Maximum rows to print
    #[arg(long)]
    limit: Option<usize>,

    /// Wall-clock time as HH:MM (defaults to now)
    #[arg(long)]
    at: Option<String>,
}

fn open_data_dir() -> Result<DataDir> {
    DataDir::open(None).context("failed to open data directory")
}

fn load_dataset(cli: &Cli, data: &DataDir) -> Result<Vec<Venue>> {
    let path = cli.data.clone().unwrap_or_else(|| data.dataset_path());
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read venue CSV {}", path.display()))?;
    let venues = load_venues(&text)
        .with_context(|| format!("failed to parse venue CSV {}", path.display()))?;
    tracing::debug!(count = venues.len(), path = %path.display(), "loaded venues");
    Ok(venues)
}

/// Case-insensitive exact name match, else a unique substring match.
fn find_venue<'a>(venues: &'a [Venue], name: &str) -> Result<&'a Venue> {
    let needle = name.trim().to_lowercase();
    if let Some(v) = venues.iter().find(|v| v.name.to_lowercase() == needle) {
        return Ok(v);
    }
    let partial: Vec<&Venue> = venues
        .iter()
        .filter(|v| v.has_name() && v.name.to_lowercase().contains(&needle))
        .collect();
    match partial.as_slice() {
        [one] => Ok(one),
        [] => bail!("no venue named '{name}'"),
        many => {
            let names: Vec<&str> = many.iter().take(5).map(|v| v.name.as_str()).collect();
            bail!("'{name}' is ambiguous: {}", names.join(", "))
        }
    }
}

fn rng_from(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    }
}

fn now_minute(at: Option<&str>) -> Result<u32> {
    match at {
        Some(at) => parse_hhmm(at).with_context(|| format!("invalid time '{at}', expected HH:MM")),
        None => {
            let now = chrono::Local::now();
            Ok(now.hour() * 60 + now.minute())
        }
    }
}

/// UTC visit/favorite stamp, e.g. `2026-02-21T04:00:00Z`.
fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

/// 1-based stop number → slot index.
fn slot_index(stop: usize) -> Result<usize> {
    stop.checked_sub(1).context("stops are numbered from 1")
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Recommend {
            venue,
            max_distance,
            count,
        } => cmd_recommend(&cli, venue, *max_distance, *count),
        Commands::Plan { action } => cmd_plan(&cli, action),
        Commands::Browse(args) => cmd_browse(&cli, args),
        Commands::Fav { venue } => cmd_fav(&cli, venue),
        Commands::Visit { venue, rating } => cmd_visit(&cli, venue, *rating),
        Commands::Unvisit { venue } => cmd_unvisit(venue),
        Commands::Rate { venue, rating } => cmd_rate(venue, *rating),
        Commands::History { action } => cmd_history(action.as_ref()),
        Commands::Compare { areas, at } => cmd_compare(&cli, areas, at.as_deref()),
        Commands::Info => cmd_info(&cli),
    }
}

fn cmd_recommend(
    cli: &Cli,
    name: &str,
    max_distance: Option<f64>,
    count: Option<usize>,
) -> Result<()> {
    let data = open_data_dir()?;
    let venues = load_dataset(cli, &data)?;
    let base = find_venue(&venues, name)?;

    let defaults = &data.settings().recommend;
    let max_distance = match max_distance {
        Some(d) if d > 0.0 => Some(d),
        Some(_) => None,
        None => defaults.max_distance(),
    };
    let count = count
        .unwrap_or(defaults.result_count())
        .min(MAX_RESULT_COUNT);

    let recs = compute_recommendations(&venues, base, max_distance, count);
    print!("{}", render::recommendations(base, &recs));
    Ok(())
}

fn cmd_plan(cli: &Cli, action: &PlanCommand) -> Result<()> {
    let data = open_data_dir()?;
    let store = data.store();
    let mut session = store
        .load_session()
        .context("failed to load planner session")?
        .unwrap_or_default();

    match action {
        PlanCommand::Build {
            start,
            end,
            stops,
            arc,
            area,
            seed,
        } => {
            let venues = load_dataset(cli, &data)?;
            let defaults = &data.settings().planner;
            let start = start.as_deref().unwrap_or(defaults.start.as_str());
            let end = end.as_deref().unwrap_or(defaults.end.as_str());
            let stops = stops.unwrap_or(defaults.stops);
            if stops == 0 {
                bail!("a plan needs at least one stop");
            }
            if stops > MAX_STOPS {
                bail!("a plan holds at most {MAX_STOPS} stops (got {stops})");
            }
            let arc = match arc {
                Some(key) => VibeArc::parse_key(key).unwrap_or_else(|| {
                    tracing::warn!(key = key.as_str(), "unknown vibe arc, using chill-to-wild");
                    VibeArc::default()
                }),
                None => defaults.arc,
            };
            let mut params = ItineraryParams::from_clock(start, end, stops, arc, area.as_deref())
                .with_context(|| format!("invalid start/end '{start}'/'{end}', expected HH:MM"))?;
            params.window = data.settings().night;

            session.build(&venues, params, &mut rng_from(*seed));
        }
        PlanCommand::Shuffle { seed } => {
            let venues = load_dataset(cli, &data)?;
            if session.shuffle(&venues, &mut rng_from(*seed)).is_none() {
                bail!("nothing to shuffle; run `lnv plan build` first");
            }
        }
        PlanCommand::Lock { stop } => {
            let plan = session.plan().context("no plan yet; run `lnv plan build`")?;
            let slot = slot_index(*stop)?;
            if slot >= plan.slots.len() {
                bail!("stop {stop} is out of range (plan has {} slots)", plan.slots.len());
            }
            let locked = session.toggle_lock(slot);
            println!("stop {stop} {}", if locked { "locked" } else { "unlocked" });
        }
        PlanCommand::Swap { a, b } => {
            if session.plan().is_none() {
                bail!("no plan yet; run `lnv plan build`");
            }
            if !session.swap(slot_index(*a)?, slot_index(*b)?) {
                bail!("cannot swap stops {a} and {b}: both must hold a venue");
            }
        }
        PlanCommand::Show => {}
        PlanCommand::Share => {
            let plan = session.plan().context("no plan yet; run `lnv plan build`")?;
            if plan.is_empty() {
                bail!("the current plan has no stops to share");
            }
            println!("{}", plan.share_text());
            println!();
            println!("token: {}", encode_plan(plan));
            return Ok(());
        }
        PlanCommand::Open { token } => {
            let shared = decode_share_plan(token).context("invalid share token")?;
            session.adopt(shared.to_plan());
        }
    }

    if !matches!(action, PlanCommand::Show) {
        store
            .save_session(&session)
            .context("failed to save planner session")?;
    }
    if !matches!(action, PlanCommand::Lock { .. }) {
        print_plan(&session)?;
    }
    Ok(())
}

fn print_plan(session: &ItinerarySession) -> Result<()> {
    let plan = session.plan().context("no plan yet; run `lnv plan build`")?;
    print!("{}", render::plan(plan, session.locked()));
    Ok(())
}

fn cmd_browse(cli: &Cli, args: &BrowseArgs) -> Result<()> {
    let data = open_data_dir()?;
    let venues = load_dataset(cli, &data)?;
    let favorites = data.store().load_favorites().context("failed to load favorites")?;
    let history = data.store().load_history().context("failed to load history")?;
    let now = now_minute(args.at.as_deref())?;

    let filter = BrowseFilter {
        query: args.query.clone().unwrap_or_default(),
        area: args.area.clone().unwrap_or_default(),
        category: args.category.clone().unwrap_or_default(),
        vibes: args.vibes.clone(),
        open_now: args.open_now,
        saved_only: args.saved,
        visited: match (args.visited, args.new) {
            (true, _) => VisitedFilter::Visited,
            (_, true) => VisitedFilter::New,
            _ => VisitedFilter::Any,
        },
    };
    let ctx = BrowseContext {
        favorites: &favorites,
        history: &history,
        now_minute: now,
        window: data.settings().night,
    };

    let mut hits = filter.apply(&venues, &ctx);
    sort_venues(&mut hits, args.sort);
    let total = hits.len();
    if let Some(limit) = args.limit {
        hits.truncate(limit);
    }
    print!("{}", render::browse(&hits, &ctx));
    println!("{total} of {} venues", venues.len());
    Ok(())
}

fn cmd_fav(cli: &Cli, name: &str) -> Result<()> {
    let data = open_data_dir()?;
    let venues = load_dataset(cli, &data)?;
    let venue = find_venue(&venues, name)?;
    let saved = data
        .store()
        .toggle_favorite(&venue.name, &timestamp())
        .context("failed to update favorites")?;
    println!("{} {}", if saved { "saved" } else { "unsaved" }, venue.name);
    Ok(())
}

fn cmd_visit(cli: &Cli, name: &str, rating: Option<Rating>) -> Result<()> {
    let data = open_data_dir()?;
    let venues = load_dataset(cli, &data)?;
    let venue = find_venue(&venues, name)?;
    let store = data.store();

    let mut history = store.load_history().context("failed to load history")?;
    let rating = rating.unwrap_or_else(|| history.rating(&venue.name));
    history.mark_visited(&venue.name, rating, &timestamp());
    store.save_history(&history).context("failed to save history")?;
    println!("visited {} ({})", venue.name, render::rating_label(rating));
    Ok(())
}

fn cmd_unvisit(name: &str) -> Result<()> {
    let data = open_data_dir()?;
    let store = data.store();
    let mut history = store.load_history().context("failed to load history")?;
    let key = history
        .visited_names()
        .find(|n| n.eq_ignore_ascii_case(name.trim()))
        .map(str::to_string)
        .with_context(|| format!("'{name}' is not in your crawl history"))?;
    history.unmark_visited(&key);
    store.save_history(&history).context("failed to save history")?;
    println!("removed {key} from history");
    Ok(())
}

fn cmd_rate(name: &str, rating: Rating) -> Result<()> {
    let data = open_data_dir()?;
    let store = data.store();
    let history = store.load_history().context("failed to load history")?;
    let key = history
        .visited_names()
        .find(|n| n.eq_ignore_ascii_case(name.trim()))
        .unwrap_or(name);
    store
        .set_rating(key, rating)
        .with_context(|| format!("failed to rate {name}"))?;
    println!("rated {key} {}", render::rating_label(rating));
    Ok(())
}

fn cmd_history(action: Option<&HistoryCommand>) -> Result<()> {
    let data = open_data_dir()?;
    let store = data.store();
    match action {
        None => {
            let history = store.load_history().context("failed to load history")?;
            print!("{}", render::history(&history));
        }
        Some(HistoryCommand::Export { path }) => {
            store
                .export_history_json_file(path)
                .context("failed to export history")?;
            println!("exported to {}", path.display());
        }
        Some(HistoryCommand::Import { path }) => {
            let count = import_history(&data, path)?;
            println!("imported {count} visits from {}", path.display());
        }
    }
    Ok(())
}

fn import_history(data: &DataDir, path: &Path) -> Result<usize> {
    data.store()
        .import_history_json_file(path)
        .with_context(|| format!("failed to import {}", path.display()))
}

fn cmd_compare(cli: &Cli, areas: &[String], at: Option<&str>) -> Result<()> {
    let data = open_data_dir()?;
    let venues = load_dataset(cli, &data)?;
    let window = data.settings().night;
    let now = now_minute(at)?;
    for area in areas {
        match analyze_area(&venues, area, &window) {
            Some(profile) => {
                let open = venues
                    .iter()
                    .filter(|v| &v.area == area)
                    .filter(|v| window.is_open(v.closing_minutes, now) == Some(true))
                    .count();
                print!("{}", render::area_profile(&profile, open));
            }
            None => println!("{area}: no venues\n"),
        }
    }
    Ok(())
}

fn cmd_info(cli: &Cli) -> Result<()> {
    let data = open_data_dir()?;
    let venues = load_dataset(cli, &data)?;
    print!("{}", render::info(&venues));
    Ok(())
}
