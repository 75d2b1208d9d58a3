//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::cli::output::Console;
use crate::config::LoaderConfig;
use crate::error::{Error, Result};
use crate::loader::{LoadSummary, Loader};
use crate::table::{DynamoTable, MemoryTable, TableHandle};
use crate::types::TableStatus;
use std::fs;
use std::sync::Arc;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
    console: Console,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        let console = Console::new(cli.format);
        Self { cli, console }
    }

    /// The subcommand to run; `load` when none was given
    pub fn command(&self) -> Commands {
        self.cli.command.clone().unwrap_or_default()
    }

    /// Whether writes go to an in-memory table
    pub fn is_dry_run(&self) -> bool {
        matches!(self.command(), Commands::Load { dry_run: true, .. })
    }

    /// Run the CLI command against DynamoDB (or the in-memory table for a
    /// dry run)
    pub async fn run(&self) -> Result<()> {
        let config = self.build_config()?;

        let table: Arc<dyn TableHandle> = if self.is_dry_run() {
            info!("Dry run: using in-memory table {}", config.table_name);
            Arc::new(MemoryTable::new(config.table_name.clone()))
        } else {
            Arc::new(DynamoTable::connect(&config).await)
        };

        self.run_with_table(config, table).await.map(|_| ())
    }

    /// Run the CLI command against a given table handle.
    ///
    /// Returns the load summary for `load`, `None` for `check`.
    pub async fn run_with_table(
        &self,
        config: LoaderConfig,
        table: Arc<dyn TableHandle>,
    ) -> Result<Option<LoadSummary>> {
        let loader = Loader::new(config, table);
        match self.command() {
            Commands::Check => self.check(&loader).await.map(|_| None),
            Commands::Load { .. } => self.load(&loader).await.map(Some),
        }
    }

    /// Build the run configuration: defaults, then the config file, then
    /// flags and environment variables
    pub fn build_config(&self) -> Result<LoaderConfig> {
        let mut config = match &self.cli.config {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .map_err(|e| Error::config(format!("Failed to read config file: {e}")))?;
                serde_json::from_str(&content)
                    .map_err(|e| Error::config(format!("Invalid config JSON: {e}")))?
            }
            None => LoaderConfig::default(),
        };

        if let Some(table) = &self.cli.table {
            config.table_name.clone_from(table);
        }
        if let Some(region) = &self.cli.region {
            config.region.clone_from(region);
        }
        if let Some(path) = &self.cli.data_file {
            config.data_file.clone_from(path);
        }
        if let Some(endpoint) = &self.cli.endpoint_url {
            config.endpoint_url = Some(endpoint.clone());
        }

        if let Commands::Load {
            batch_size,
            overwrite_by_keys,
            key_field,
            ..
        } = self.command()
        {
            if let Some(size) = batch_size {
                config.batch_size = size;
            }
            if let Some(keys) = overwrite_by_keys {
                config.overwrite_by_keys = keys;
            }
            if let Some(field) = key_field {
                config.key_field = field;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Connect message plus existence check
    async fn check(&self, loader: &Loader) -> Result<TableStatus> {
        let config = loader.config();
        self.console.log(&format!(
            "Connecting to DynamoDB table '{}' in region '{}' ...",
            config.table_name, config.region
        ));

        let status = loader.check().await?;
        self.console.table_status(&config.table_name, &status);
        Ok(status)
    }

    /// Read the dataset, check the table, then load every record
    async fn load(&self, loader: &Loader) -> Result<LoadSummary> {
        let records = loader.read_dataset()?;

        self.check(loader).await?;

        self.console
            .log(&format!("Loading {} records ...", records.len()));

        let key_field = loader.config().key_field.clone();
        let summary = loader
            .load(&records, |index, key| {
                self.console.record_loaded(index, &key_field, key);
            })
            .await?;

        self.console.summary(&summary, self.is_dry_run());
        Ok(summary)
    }
}
