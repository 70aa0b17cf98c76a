// CLI command definitions

use super::cluster::{CreateCommand, DeleteCommand, ListCommand, PresetsCommand};
use crate::domain::config::{default_config_root, LayerLoader, Settings};
use crate::infrastructure::constants::{ENV_CONFIG_ROOT, ENV_SETTINGS_FILE};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "k3d-stack",
    version,
    about = "Layered k3d configs for local Kubernetes clusters",
    long_about = "Assembles a k3d config from a base document, a preset, per-category fragments and \
                  a user config file, then creates the cluster with k3d"
)]
pub struct CliArgs {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Resolve the layered config and create a cluster
    Create(CreateCommand),

    /// Delete a cluster
    Delete(DeleteCommand),

    /// List k3d clusters
    List(ListCommand),

    /// Show the known presets and their layers
    Presets(PresetsCommand),
}

#[derive(clap::Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Directory holding base.yaml, settings.toml and the fragment directories
    /// (defaults to <user config dir>/k3d-stack)
    #[arg(long, global = true, env = ENV_CONFIG_ROOT, value_name = "PATH")]
    pub config_root: Option<PathBuf>,

    /// Settings file (defaults to <config-root>/settings.toml when present)
    #[arg(long, global = true, env = ENV_SETTINGS_FILE, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Settings and loader shared by the commands of one invocation
pub struct AppContext {
    pub settings: Settings,
    pub loader: LayerLoader,
}

impl GlobalArgs {
    pub fn config_root(&self) -> PathBuf {
        self.config_root.clone().unwrap_or_else(default_config_root)
    }

    pub fn load_context(&self) -> anyhow::Result<AppContext> {
        let root = self.config_root();
        tracing::debug!("Using config root {}", root.display());

        let settings = Settings::load(self.settings.as_deref(), &root)
            .map_err(|e| anyhow::anyhow!("Failed to load settings: {}", e))?;
        let loader = LayerLoader::from_current_dir(root)?;

        Ok(AppContext { settings, loader })
    }
}
