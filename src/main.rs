use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use codemaster_server::config::{AppConfig, CliConfig, FileConfig, StoreBackend};
use codemaster_server::server::state::{GuardedCommentStore, GuardedCourseStore, GuardedUserStore};
use codemaster_server::{
    run_server, seed, FileCourseStore, MemoryCommentStore, MemoryCourseStore, MemoryUserStore,
    RequestsLoggingLevel,
};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    if path_buf.is_absolute() {
        return Ok(path_buf);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(path_buf))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Optional TOML config file; its values override the flags below.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Where course data is kept.
    #[clap(long, default_value = "memory")]
    pub store: StoreBackend,

    /// Directory holding one JSON file per course (file store only).
    #[clap(long, value_parser = parse_path)]
    pub data_dir: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 8080)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Start without the demo courses, users and comments.
    #[clap(long)]
    pub no_seed: bool,

    /// Origin allowed by CORS. Repeat for several; defaults to the local dev front-ends.
    #[clap(long = "allowed-origin")]
    pub allowed_origins: Vec<String>,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            store: self.store,
            data_dir: self.data_dir.clone(),
            port: self.port,
            logging_level: self.logging_level.clone(),
            seed: !self.no_seed,
            allowed_origins: self.allowed_origins.clone(),
        }
    }
}

fn open_course_store(config: &AppConfig) -> Result<GuardedCourseStore> {
    match (config.store, &config.data_dir) {
        (StoreBackend::File, Some(dir)) => {
            let store = FileCourseStore::open(dir)
                .with_context(|| format!("Failed to open course directory {:?}", dir))?;
            if config.seed && store.seed_if_empty(seed::courses())? {
                info!("Seeded empty course directory with demo courses");
            }
            Ok(Arc::new(store))
        }
        _ => {
            let courses = if config.seed {
                seed::courses()
            } else {
                Vec::new()
            };
            Ok(Arc::new(MemoryCourseStore::new(courses)))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;

    info!("Using {:?} course store", config.store);
    let course_store = open_course_store(&config)?;

    let (comments, users) = if config.seed {
        (seed::comments(), seed::users())
    } else {
        (Vec::new(), Vec::new())
    };
    let comment_store: GuardedCommentStore = Arc::new(MemoryCommentStore::new(comments));
    let user_store: GuardedUserStore = Arc::new(MemoryUserStore::new(users));

    info!("Ready to serve at port {}!", config.port);
    run_server(config.server_config(), course_store, comment_store, user_store).await
}
