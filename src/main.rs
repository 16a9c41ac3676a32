use std::process;

use clap::{command, Parser, Subcommand, ValueHint};
use log::{debug, error, info, LevelFilter};
use serde::Serialize;

use podcatalog::{
    adapter::{Adapter, CollectionRequest, ListenNotesAdapter},
    api_key::ApiKey,
    config::Config,
    error::{ErrorKind, Result},
};

/// Profile to display when not built in release mode.
#[cfg(debug_assertions)]
const BUILD_PROFILE: &str = "debug";
/// Profile to display when not built release mode.
#[cfg(not(debug_assertions))]
const BUILD_PROFILE: &str = "release";

/// Group name for mutually exclusive logging options.
const ARGS_GROUP_LOGGING: &str = "logging";

/// Command line arguments as parsed by `clap`.
#[derive(Clone, Debug, PartialEq, Eq, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Secrets file
    ///
    /// Ensure that this file is kept secure and not shared publicly, as it
    /// contains the API key of your Listen Notes account.
    #[arg(short, long, value_name = "FILE", value_hint = ValueHint::FilePath, default_value_t = String::from("secrets.toml"))]
    secrets_file: String,

    /// Listen Notes API key
    ///
    /// Takes precedence over the secrets file.
    #[arg(long, env = "LISTEN_NOTES_API_KEY", hide_env_values = true)]
    api_key: Option<ApiKey>,

    /// Suppresses all output except warnings and errors.
    #[arg(short, long, default_value_t = false, group = ARGS_GROUP_LOGGING)]
    quiet: bool,

    /// Enable verbose logging
    ///
    /// Specify twice for trace logging.
    #[arg(short, long, action = clap::ArgAction::Count, group = ARGS_GROUP_LOGGING)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, PartialEq, Eq, Subcommand)]
enum Command {
    /// List the browsable genres
    Genres,

    /// List podcasts, optionally by search or genre
    Catalog {
        /// Search query; takes precedence over the genre
        #[arg(long)]
        search: Option<String>,

        /// Genre name, or "Random" for a single random pick
        #[arg(long)]
        genre: Option<String>,

        /// Offset into the listing [default: 50]
        #[arg(long)]
        skip: Option<u32>,
    },

    /// Show a podcast with all of its episodes
    Meta {
        /// Catalog id, like podcasts_listennotes_<id>
        id: String,
    },

    /// Show the streams of an episode
    Streams {
        /// Catalog id, like podcasts_listennotes_<id>
        id: String,
    },
}

/// Initializes the logger facade.
///
/// The logging level is determined as follows, in order of precedence from
/// highest to lowest:
/// 1. Command line arguments
/// 2. `RUST_LOG` environment variable
/// 3. Hard coded default
///
/// # Panics
///
/// Panics when a logger facade is already initialized.
fn init_logger(config: &Args) {
    let mut logger = env_logger::Builder::from_env(
        // Note: if you change the default logging level here, then you should
        // probably also change the verbosity levels below.
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );

    if config.quiet || config.verbose > 0 {
        let level = match config.verbose {
            0 => {
                // Quiet and verbose are mutually exclusive, and `verbose` is 0
                // by default. So this arm means: quiet mode.
                LevelFilter::Warn
            }
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        // Filter log messages of external crates.
        logger.filter_module(module_path!(), level);
    }

    logger.init();
}

/// Takes the API key from the command line or environment, or else from the
/// secrets file.
///
/// # Errors
///
/// Will return `Err` if no key was given and the secrets file cannot be read.
fn load_api_key(args: &Args) -> Result<ApiKey> {
    if let Some(api_key) = &args.api_key {
        return Ok(api_key.clone());
    }

    let api_key = ApiKey::from_file(&args.secrets_file);
    if let Err(ref e) = api_key {
        if e.kind == ErrorKind::NotFound {
            info!(
                "set LISTEN_NOTES_API_KEY or put your api_key in {}",
                args.secrets_file
            );
        }
    }

    api_key
}

fn print<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Runs a single command and prints its result as JSON.
///
/// # Errors
///
/// Will return `Err` if the configuration is invalid or the command fails.
async fn run(args: Args) -> Result<()> {
    let config = Config::with_api_key(load_api_key(&args)?);
    let adapter = ListenNotesAdapter::from_config(&config)?;

    match args.command {
        Command::Genres => print(&adapter.genres().await?),
        Command::Catalog {
            search,
            genre,
            skip,
        } => {
            let request = CollectionRequest {
                search,
                genre,
                skip,
            };
            print(&adapter.summarized_collection(&request).await?)
        }
        Command::Meta { id } => print(&adapter.meta(&id).await?),
        Command::Streams { id } => print(&adapter.streams(&id).await?),
    }
}

/// Main entry point of the application.
///
/// This function initializes the logger facade, parses the command line
/// arguments, and runs the requested command.
#[tokio::main]
async fn main() {
    // `clap` handles our command line arguments and help text.
    let args = Args::parse();
    init_logger(&args);

    // Dump command line arguments before we do anything more.
    // This aids in debugging of whatever comes next.
    debug!("Command {:#?}", args);

    let cmd = command!();
    let name = cmd.get_name().to_string();
    let version = cmd.get_version().unwrap_or("UNKNOWN").to_string();

    info!("starting {name}/{version}; {BUILD_PROFILE}");

    if let Err(e) = run(args).await {
        error!("{e}");
        process::exit(1);
    }
}
