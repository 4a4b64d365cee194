use clap::{Args as ClapArgs, Parser, Subcommand};
use greed::app::{settings, AppError, CacheSettings, DisplaySettings, Reader};
use greed::net::{FeedbinClient, DEFAULT_BASE_URL};
use greed::ui;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const COMMIT: &str = match option_env!("GREED_COMMIT") {
    Some(commit) => commit,
    None => "none",
};
const BUILD_DATE: &str = match option_env!("GREED_BUILD_DATE") {
    Some(date) => date,
    None => "unknown",
};

#[derive(Parser, Debug)]
#[command(name = "greed")]
#[command(about = "A CLI client for Feedbin")]
struct Args {
    /// Feedbin username
    #[arg(short, long, env = "FEEDBIN_USERNAME", global = true)]
    username: Option<String>,

    /// Feedbin password
    #[arg(short = 'P', long, env = "FEEDBIN_PASSWORD", hide_env_values = true, global = true)]
    password: Option<String>,

    /// Number of entries to fetch
    #[arg(short = 'l', long, env = "GREED_FETCH_LIMIT", default_value_t = 20, global = true)]
    fetch_limit: usize,

    /// Cache directory (default: the user cache directory)
    #[arg(short, long, env = "GREED_CACHE_DIR", global = true)]
    cache_dir: Option<PathBuf>,

    /// Keep the cache in memory only
    #[arg(long, env = "GREED_NO_PERSIST", global = true)]
    no_persist: bool,

    /// How long fetched entries stay fresh, e.g. "5m" or "1h 30m"
    #[arg(
        short = 'e',
        long,
        env = "GREED_CACHE_EXPIRES_AFTER",
        default_value = "5m",
        value_parser = humantime::parse_duration,
        global = true
    )]
    cache_expires_after: Duration,

    /// Show a progress spinner while fetching
    #[arg(short = 'p', long, env = "GREED_SHOW_PROGRESS", global = true)]
    show_progress: bool,

    /// Base URL of the Feedbin API
    #[arg(long, env = "FEEDBIN_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch latest entries and update the cache
    Fetch,
    /// List latest entries
    List(ListArgs),
    /// Print the version information
    Version,
}

#[derive(ClapArgs, Debug)]
struct ListArgs {
    /// Number of entries to display
    #[arg(short, long, env = "GREED_DISPLAY_LIMIT", default_value_t = 5)]
    display_limit: usize,

    /// Ignore the cache and fetch latest entries
    #[arg(short, long, env = "GREED_IGNORE_CACHE")]
    ignore_cache: bool,

    /// Display random entries
    #[arg(short, long, env = "GREED_RANDOM")]
    random: bool,

    /// Browse entries in an interactive list
    #[arg(short = 't', long, env = "GREED_INTERACTIVE")]
    interactive: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    if let Err(err) = run(args) {
        log::debug!("exiting with error: {err:?}");
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), AppError> {
    match &args.command {
        Command::Version => {
            println!("Greed version {VERSION}");
            println!("Commit: {COMMIT}");
            println!("Built: {BUILD_DATE}");
            Ok(())
        }
        Command::Fetch => {
            let reader = build_reader(&args)?;
            let entries = reader.refresh()?;
            log::info!("fetched {} entries", entries.len());
            Ok(())
        }
        Command::List(list) => {
            let display = DisplaySettings {
                display_limit: settings::positive_limit("display-limit", list.display_limit)?,
                randomize: list.random,
                interactive: list.interactive,
            };
            let reader = build_reader(&args)?;
            let entries = reader.latest(list.ignore_cache)?;
            show(entries, &display)
        }
    }
}

fn build_reader(args: &Args) -> Result<Reader<FeedbinClient>, AppError> {
    let credentials = settings::credentials(args.username.clone(), args.password.clone())?;
    let fetch_limit = settings::positive_limit("fetch-limit", args.fetch_limit)?;
    let cache_settings = CacheSettings::resolve(
        args.cache_dir.clone(),
        !args.no_persist,
        args.cache_expires_after,
    )?;
    log::debug!("cache settings: {cache_settings:?}");

    let cache = cache_settings.open()?;
    let client = FeedbinClient::new(credentials)?.with_base_url(args.api_url.as_str());
    Ok(Reader::new(client, cache, fetch_limit).show_progress(args.show_progress))
}

fn show(entries: Vec<greed::Entry>, display: &DisplaySettings) -> Result<(), AppError> {
    let entries = ui::select_entries(
        entries,
        display.display_limit,
        display.randomize,
        &mut rand::thread_rng(),
    );

    if display.interactive {
        ui::run_interactive(&entries)?;
    } else {
        ui::render_entries(&mut io::stdout().lock(), &entries)?;
    }
    Ok(())
}
