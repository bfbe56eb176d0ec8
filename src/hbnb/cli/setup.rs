use clap::{ArgAction, Parser};
use directories::ProjectDirs;
use hbnb::api::HbnbApi;
use hbnb::config::HbnbConfig;
use hbnb::error::Result;
use hbnb::store::fs_backend::FsBackend;
use hbnb::store::FileStore;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "HBNB_LOG";

#[derive(Parser, Debug)]
#[command(name = "hbnb", bin_name = "hbnb", version)]
#[command(about = "Interactive shell for creating, inspecting and updating stored records", long_about = None)]
pub struct Cli {
    /// Backing file for the object store (overrides the config file)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Directory holding config.json
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Verbose logging on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

pub struct AppContext {
    pub api: HbnbApi<FsBackend>,
    pub config: HbnbConfig,
}

/// Logs go to stderr so stdout carries only command output.
pub fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn config_dir(cli: &Cli) -> Option<PathBuf> {
    cli.config_dir.clone().or_else(|| {
        ProjectDirs::from("com", "hbnb", "hbnb").map(|dirs| dirs.config_dir().to_path_buf())
    })
}

pub fn init_context(cli: &Cli) -> Result<AppContext> {
    let config = match config_dir(cli) {
        Some(dir) => HbnbConfig::load(&dir).unwrap_or_else(|e| {
            warn!(error = %e, "ignoring unreadable config");
            HbnbConfig::default()
        }),
        None => HbnbConfig::default(),
    };

    let path = config.resolve_file_path(cli.file.as_deref());
    let mut store = FileStore::new(path);
    store.restore()?;

    Ok(AppContext {
        api: HbnbApi::new(store),
        config,
    })
}
