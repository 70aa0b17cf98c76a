//! Cluster commands

use super::commands::GlobalArgs;
use super::display::{TableRenderer, YamlRenderer};
use crate::domain::cluster::{ensure_dependencies, ClusterDescriptor, DeployOptions};
use crate::domain::config::{OptionCategory, PresetRegistry, Settings};
use crate::domain::resolver::{ResolveRequest, ResolvedConfig, Resolver};
use crate::shared::error::StackError;
use clap::Parser;
use dialoguer::Confirm;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
pub struct CreateCommand {
    /// User config file merged on top of preset and options
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Preset name (see `k3d-stack presets`)
    #[arg(long, short = 'p')]
    pub preset: Option<String>,

    /// Cluster name override
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Fragment from agents/<VARIANT>.yaml
    #[arg(long, value_name = "VARIANT")]
    pub agents: Option<String>,

    /// Fragment from env/<VARIANT>.yaml
    #[arg(long, value_name = "VARIANT")]
    pub env: Option<String>,

    /// Fragment from image/<VARIANT>.yaml
    #[arg(long, value_name = "VARIANT")]
    pub image: Option<String>,

    /// Fragment from kubeapi/<VARIANT>.yaml
    #[arg(long, value_name = "VARIANT")]
    pub kubeapi: Option<String>,

    /// Fragment from labels/<VARIANT>.yaml
    #[arg(long, value_name = "VARIANT")]
    pub labels: Option<String>,

    /// Fragment from options/<VARIANT>.yaml
    #[arg(long, value_name = "VARIANT")]
    pub options: Option<String>,

    /// Fragment from ports/<VARIANT>.yaml
    #[arg(long, value_name = "VARIANT")]
    pub ports: Option<String>,

    /// Fragment from network/<VARIANT>.yaml
    #[arg(long, value_name = "VARIANT")]
    pub network: Option<String>,

    /// Fragment from registries/<VARIANT>.yaml
    #[arg(long, value_name = "VARIANT")]
    pub registries: Option<String>,

    /// Fragment from servers/<VARIANT>.yaml
    #[arg(long, value_name = "VARIANT")]
    pub servers: Option<String>,

    /// Fragment from token/<VARIANT>.yaml
    #[arg(long, value_name = "VARIANT")]
    pub token: Option<String>,

    /// Fragment from volumes/<VARIANT>.yaml
    #[arg(long, value_name = "VARIANT")]
    pub volumes: Option<String>,

    /// Print the resolved config without creating the cluster
    #[arg(long)]
    pub dry_run: bool,

    /// Recreate an existing cluster without asking
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Do not wait for the cluster to appear after creation
    #[arg(long)]
    pub no_wait: bool,

    /// Print the applied layers before the config
    #[arg(long)]
    pub show_layers: bool,
}

impl CreateCommand {
    fn selections(&self) -> [(OptionCategory, &Option<String>); 12] {
        [
            (OptionCategory::Servers, &self.servers),
            (OptionCategory::Agents, &self.agents),
            (OptionCategory::Image, &self.image),
            (OptionCategory::Token, &self.token),
            (OptionCategory::KubeApi, &self.kubeapi),
            (OptionCategory::Network, &self.network),
            (OptionCategory::Ports, &self.ports),
            (OptionCategory::Volumes, &self.volumes),
            (OptionCategory::Environment, &self.env),
            (OptionCategory::Labels, &self.labels),
            (OptionCategory::Registries, &self.registries),
            (OptionCategory::Options, &self.options),
        ]
    }

    pub fn to_request(&self) -> ResolveRequest {
        let mut request = ResolveRequest::new();
        if let Some(ref preset) = self.preset {
            request = request.preset(preset.clone());
        }
        for (category, variant) in self.selections() {
            if let Some(variant) = variant {
                request = request.option(category, variant.clone());
            }
        }
        if let Some(ref path) = self.config {
            request = request.config_file(path.clone());
        }
        if let Some(ref name) = self.name {
            request = request.name(name.clone());
        }
        request
    }

    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let ctx = global.load_context()?;

        if !self.dry_run {
            check_dependencies(&ctx.settings)?;
        }

        let resolved = Resolver::new(&ctx.loader, ctx.settings.default_cluster_name.clone())
            .resolve(self.to_request())
            .map_err(|e| anyhow::anyhow!("Failed to resolve cluster config: {}", e))?;

        self.print_resolved(&resolved)?;

        if self.dry_run {
            return Ok(());
        }

        let descriptor = ClusterDescriptor::new(ctx.settings);
        let exists = descriptor.cluster_exists(&resolved.name).await?;
        if exists && !self.yes {
            let prompt = format!("Cluster '{}' already exists. Delete and recreate it?", resolved.name);
            if !confirm(&prompt)? {
                return Err(StackError::UserAborted.into());
            }
        }

        let options = DeployOptions {
            replace_existing: exists,
            wait: !self.no_wait,
        };
        descriptor
            .deploy_cluster(&resolved, options)
            .await
            .map_err(|e| anyhow::anyhow!("Cluster creation failed: {}", e))?;

        println!("Cluster {} created successfully!", resolved.name);
        Ok(())
    }

    fn print_resolved(&self, resolved: &ResolvedConfig) -> anyhow::Result<()> {
        if self.show_layers {
            println!("{}", TableRenderer::new().render_layers(&resolved.layers));
        }
        print!("{}", YamlRenderer::new().render(&resolved.to_yaml()?));
        Ok(())
    }
}

#[derive(Parser, Debug, Clone, Default)]
pub struct DeleteCommand {
    /// Cluster name (defaults to the configured default name)
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Delete without asking
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl DeleteCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let ctx = global.load_context()?;
        check_dependencies(&ctx.settings)?;

        let name = self
            .name
            .clone()
            .unwrap_or_else(|| ctx.settings.default_cluster_name.clone());
        let descriptor = ClusterDescriptor::new(ctx.settings);

        if !descriptor.cluster_exists(&name).await? {
            println!("No cluster named '{}' found", name);
            return Ok(());
        }

        if !self.yes && !confirm(&format!("Delete cluster '{}'?", name))? {
            return Err(StackError::UserAborted.into());
        }

        descriptor
            .delete_cluster(&name)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to delete cluster: {}", e))?;

        println!("Cluster {} deleted successfully!", name);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Parser, Debug, Clone, Default)]
pub struct ListCommand {
    /// Output format
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

impl ListCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let ctx = global.load_context()?;
        check_dependencies(&ctx.settings)?;

        let clusters = ClusterDescriptor::new(ctx.settings)
            .list_clusters()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to list clusters: {}", e))?;

        match self.output {
            OutputFormat::Table => println!("{}", TableRenderer::new().render_clusters_list(&clusters)),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&clusters)?),
        }
        Ok(())
    }
}

#[derive(Parser, Debug, Clone, Default)]
pub struct PresetsCommand {}

impl PresetsCommand {
    pub async fn execute(&self, _global: &GlobalArgs) -> anyhow::Result<()> {
        println!("{}", TableRenderer::new().render_presets(PresetRegistry::all()));
        Ok(())
    }
}

fn check_dependencies(settings: &Settings) -> anyhow::Result<()> {
    ensure_dependencies(&[settings.container_runtime.as_str(), settings.cluster_manager.as_str()])?;
    Ok(())
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    let answer = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(StackError::from)?;
    Ok(answer)
}
