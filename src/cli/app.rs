// ABOUTME: Main application orchestration for scriptdesk CLI
// ABOUTME: Coordinates between CLI arguments, configuration, and command execution

use anyhow::Result;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use super::commands;
use super::{Args, Commands, Config};
use crate::reference::ReferenceLists;
use crate::template::{CatalogSet, TemplateEngine};

pub struct App {
    config: Config,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Initialize logging based on configuration
    pub fn init_logging(&self, verbose: bool, no_color: bool) -> Result<()> {
        let log_level = if verbose {
            "debug"
        } else {
            &self.config.logging.level
        };

        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

        // stdout is reserved for rendered text
        match self.config.logging.format.as_str() {
            "compact" => {
                tracing_subscriber::fmt()
                    .compact()
                    .with_env_filter(env_filter)
                    .with_ansi(!no_color)
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .init();
            }
            _ => {
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .with_ansi(!no_color)
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .init();
            }
        }

        debug!("Logging initialized with level: {}", log_level);
        Ok(())
    }

    /// Build the renderer from the configured catalogs and policy
    pub async fn build_engine(&self) -> Result<TemplateEngine> {
        let catalogs = CatalogSet::load(
            self.config.catalog.logistics.as_deref(),
            self.config.catalog.service.as_deref(),
        )
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load template catalogs: {}", e))?;

        Ok(TemplateEngine::new(catalogs, self.config.policy.clone()))
    }

    pub async fn load_reference(&self) -> Result<ReferenceLists> {
        let lists = match &self.config.catalog.reference {
            Some(path) => ReferenceLists::from_file(path).await,
            None => ReferenceLists::builtin(),
        };
        lists.map_err(|e| anyhow::anyhow!("Failed to load reference lists: {}", e))
    }

    /// Run the application with parsed arguments
    pub async fn run(&mut self, args: Args) -> Result<()> {
        // Initialize logging
        self.init_logging(args.verbose, args.no_color)?;

        info!("Starting scriptdesk v{}", env!("CARGO_PKG_VERSION"));
        debug!("Configuration loaded from: {:?}", args.config);

        let engine = self.build_engine().await?;

        // Execute the appropriate command
        match args.command {
            Commands::Templates { sector } => commands::list_templates(&engine, sector),

            Commands::Show { key, sector } => commands::show_template(&engine, sector, &key),

            Commands::Render(render) => {
                let reference = self.load_reference().await?;
                commands::render_template(&engine, &reference, &render)
            }

            Commands::Register {
                render,
                invoice,
                crm_reason,
            } => {
                let reference = self.load_reference().await?;
                commands::register_interaction(
                    &engine,
                    &reference,
                    &render,
                    invoice,
                    crm_reason,
                    &self.config,
                )
                .await
            }

            Commands::Lists { list, sector } => {
                let reference = self.load_reference().await?;
                commands::print_list(&reference, list, sector)
            }

            Commands::Report {
                from,
                to,
                sector,
                format,
                export,
            } => {
                commands::generate_report(from, to, sector, format, export, &self.config).await
            }

            Commands::Import { source, force } => {
                commands::import_backup(source, force, &self.config).await
            }

            Commands::Check => commands::check_catalogs(&engine),
        }
    }

    /// Create application from command line arguments
    pub async fn from_args() -> Result<Self> {
        let args = Args::parse_args();
        let config = Config::load(args.config.clone())?;
        Ok(Self::new(config))
    }
}
