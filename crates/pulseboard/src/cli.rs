//! Command line launcher.

use crate::app::Pulseboard;
use crate::error::{AppError, AppResult};
use clap::{Parser, Subcommand};
use pulseboard_common::{Result, SessionId};
use pulseboard_config::{Config, ConfigLoader};
use pulseboard_dashboards::DashboardDocument;
use std::path::{Path, PathBuf};
use tracing::info;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Locale of titles and labels, e.g. `de-DE`
    #[arg(short, long)]
    pub locale: Option<String>,

    /// Log level, overriding the configuration
    #[arg(long)]
    pub log_level: Option<String>,

    /// Dashboard to build
    #[command(subcommand)]
    pub command: Command,
}

/// Dashboards the launcher can build.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Build the sales report from a CSV export
    Sales {
        /// Sales CSV file
        file: PathBuf,
        /// Product category to show in the by-product chart; repeatable
        #[arg(long = "category")]
        categories: Vec<String>,
        /// Region to show in the by-region chart; repeatable
        #[arg(long = "region")]
        regions: Vec<String>,
    },
    /// Build listening insights from a streaming history JSON export
    Listening {
        /// Streaming history JSON file
        file: PathBuf,
    },
}

impl Cli {
    /// Loads the configuration file and applies the command line overrides.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => ConfigLoader::load_config(path)?,
            None => ConfigLoader::load()?,
        };

        if let Some(locale) = &self.locale {
            config.locale.clone_from(locale);
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Runs one command in a fresh session and returns the dashboard document.
///
/// Category and region flags narrow their chart; a dimension without flags
/// keeps every value of the upload.
pub fn run(app: &Pulseboard, command: &Command) -> AppResult<DashboardDocument> {
    let session = app.open_session();
    let result = build(app, session, command);
    app.close_session(session);
    result
}

fn build(app: &Pulseboard, session: SessionId, command: &Command) -> AppResult<DashboardDocument> {
    match command {
        Command::Sales {
            file,
            categories,
            regions,
        } => {
            let bytes = read_upload(file)?;
            info!(file = %file.display(), "Building sales report");
            let document = app.upload_sales(session, &bytes)?;

            if categories.is_empty() && regions.is_empty() {
                Ok(document)
            } else {
                let mut filters = app.sales_filters(session)?;
                if !categories.is_empty() {
                    filters.categories = categories.iter().cloned().collect();
                }
                if !regions.is_empty() {
                    filters.regions = regions.iter().cloned().collect();
                }
                Ok(app.set_sales_filters(session, filters)?.unwrap_or(document))
            }
        }
        Command::Listening { file } => {
            let bytes = read_upload(file)?;
            info!(file = %file.display(), "Building listening insights");
            Ok(app.upload_listening(session, &bytes)?)
        }
    }
}

/// Pretty-printed JSON of a dashboard document, as written to stdout.
pub fn render_json(document: &DashboardDocument) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

fn read_upload(path: &Path) -> AppResult<Vec<u8>> {
    std::fs::read(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })
}
