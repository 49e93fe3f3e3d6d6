//! Core application

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::api::ApiServer;
use crate::core::banner;
use crate::core::cli::{self, CliConfig, Commands, SystemCommands};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::core::shutdown::ShutdownService;
use crate::core::storage::AppStorage;
use crate::data::SqliteService;

pub struct CoreApp {
    pub shutdown: ShutdownService,
    pub config: AppConfig,
    pub storage: AppStorage,
    pub db_path: PathBuf,
    pub database: Arc<SqliteService>,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();

        let (cli_config, command) = cli::parse();
        Self::init_logging(cli_config.debug);

        tracing::debug!("Application starting");
        tracing::trace!(command = ?command, "Parsed command");

        match command {
            Some(Commands::System {
                command: system_cmd,
            }) => {
                return Self::handle_system_command(system_cmd);
            }
            Some(Commands::Start) | None => {}
        }

        let app = Self::init(&cli_config).await?;
        Self::start_server(app).await
    }

    async fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;
        let storage = AppStorage::init(&config).await?;
        let db_path = storage.database_path(&config);

        let database = Arc::new(
            SqliteService::init(&db_path)
                .await
                .with_context(|| format!("Failed to open database: {}", db_path.display()))?,
        );
        let shutdown = ShutdownService::new(database.clone());

        Ok(Self {
            shutdown,
            config,
            storage,
            db_path,
            database,
        })
    }

    fn handle_system_command(cmd: SystemCommands) -> Result<()> {
        match cmd {
            SystemCommands::Prune { yes } => Self::prune_data(yes),
        }
    }

    /// Remove the data directory (planets database included)
    fn prune_data(skip_confirm: bool) -> Result<()> {
        let data_dir = AppStorage::resolve_data_dir();
        if !data_dir.is_dir() {
            println!("No data directory at {}", data_dir.display());
            return Ok(());
        }
        let data_dir = data_dir.canonicalize().unwrap_or(data_dir);

        println!("Pruning {} removes every stored planet.", data_dir.display());
        println!("Stop any running server first; deleting a live database corrupts it.");

        if !skip_confirm && !confirm("Delete it?")? {
            println!("Nothing removed.");
            return Ok(());
        }

        std::fs::remove_dir_all(&data_dir)
            .with_context(|| format!("Failed to remove {}", data_dir.display()))?;
        tracing::debug!(path = %data_dir.display(), "Data directory pruned");
        println!("Removed {}", data_dir.display());
        Ok(())
    }

    fn init_logging(debug: bool) {
        let default_filter = if debug {
            format!("info,{}=debug", APP_NAME_LOWER)
        } else {
            format!("info,{}=info", APP_NAME_LOWER)
        };

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    async fn start_server(app: Self) -> Result<()> {
        // Install signal handlers before anything can block
        app.shutdown.install_signal_handlers();

        app.start_background_tasks().await;

        tracing::debug!(data_dir = %app.storage.data_dir().display(), "Using data directory");
        banner::print_banner(
            &app.config.server.host,
            app.config.server.port,
            &app.db_path,
        );

        let server = ApiServer::new(app);
        let app = server.start().await?;
        app.shutdown.shutdown().await;

        Ok(())
    }

    pub async fn start_background_tasks(&self) {
        self.shutdown
            .register(
                self.database
                    .start_checkpoint_task(self.shutdown.subscribe()),
            )
            .await;

        tracing::debug!("Background tasks started");
    }
}

/// Ask a yes/no question on stdin; anything but `y`/`yes` is a no
fn confirm(question: &str) -> Result<bool> {
    use std::io::Write;

    let mut stdout = std::io::stdout();
    write!(stdout, "{} [y/N] ", question)?;
    stdout.flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
