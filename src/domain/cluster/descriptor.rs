// Copyright 2025 k3d-stack Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::cluster::validator::validate_cluster_name;
use crate::domain::config::Settings;
use crate::domain::resolver::ResolvedConfig;
use crate::infrastructure::k3d::{ClusterManager, ClusterSummary, K3dClient};
use crate::shared::error::{Result, StackError};
use backon::{ConstantBuilder, Retryable};
use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployOptions {
    /// Delete an existing cluster of the same name first
    pub replace_existing: bool,
    /// Poll until the cluster is visible to the cluster manager
    pub wait: bool,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            replace_existing: false,
            wait: true,
        }
    }
}

pub struct ClusterDescriptor {
    client: Box<dyn ClusterManager>,
    settings: Settings,
}

impl ClusterDescriptor {
    pub fn new(settings: Settings) -> Self {
        let client = K3dClient::new(settings.cluster_manager.clone());
        Self::with_client(Box::new(client), settings)
    }

    pub fn with_client(client: Box<dyn ClusterManager>, settings: Settings) -> Self {
        Self { client, settings }
    }

    pub async fn cluster_exists(&self, name: &str) -> Result<bool> {
        self.client.cluster_exists(name).await
    }

    /// Create the cluster, aborting with `UserAborted` on Ctrl-C
    pub async fn deploy_cluster(
        &self,
        resolved: &ResolvedConfig,
        options: DeployOptions,
    ) -> Result<()> {
        self.deploy_cluster_until(resolved, options, ctrl_c()).await
    }

    /// Like `deploy_cluster`, but `interrupt` completing cancels the create
    /// call. The persisted config is removed either way.
    pub async fn deploy_cluster_until<F>(
        &self,
        resolved: &ResolvedConfig,
        options: DeployOptions,
        interrupt: F,
    ) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let name = resolved.name.as_str();

        if self.client.cluster_exists(name).await? {
            if !options.replace_existing {
                return Err(StackError::ValidationError(format!(
                    "\n Cluster already exists\n\
                    \n  Name: '{}'\n\
                    \n To recreate it, confirm the prompt or pass --yes:\n\
                    k3d-stack create --name {} --yes",
                    name, name
                )));
            }
            println!("Deleting existing cluster '{}'...", name);
            self.client.delete_cluster(name).await?;
        }

        let config_file = resolved.persist()?;
        println!("Creating cluster '{}'...", name);
        let created = tokio::select! {
            result = self.client.create_cluster(config_file.path()) => result,
            _ = interrupt => {
                tracing::warn!("Interrupted while creating cluster '{}'", name);
                Err(StackError::UserAborted)
            }
        };
        // Dropping the handle deletes the file before any early return
        drop(config_file);
        created?;

        if options.wait {
            self.wait_for_cluster(name).await?;
            println!("✓ Cluster '{}' is ready", name);
        }
        Ok(())
    }

    pub async fn delete_cluster(&self, name: &str) -> Result<()> {
        validate_cluster_name(name)?;
        self.client.delete_cluster(name).await
    }

    pub async fn list_clusters(&self) -> Result<Vec<ClusterSummary>> {
        let mut clusters = self.client.list_clusters().await?;
        clusters.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(clusters)
    }

    async fn wait_for_cluster(&self, name: &str) -> Result<()> {
        let backoff = ConstantBuilder::default()
            .with_delay(self.settings.wait_interval())
            // The first check is not a retry
            .with_max_times(self.settings.wait_attempts.saturating_sub(1));

        let check = || async move {
            if self.client.cluster_exists(name).await? {
                Ok(())
            } else {
                Err(StackError::Timeout(format!(
                    "cluster '{}' did not appear after {} checks",
                    name, self.settings.wait_attempts
                )))
            }
        };

        check
            .retry(backoff)
            .when(|e| matches!(e, StackError::Timeout(_)))
            .notify(|_, dur| {
                tracing::debug!("Cluster '{}' not visible yet, retrying in {:?}", name, dur)
            })
            .await
    }
}

/// Resolves on Ctrl-C. If no handler can be installed it never resolves, so
/// the create call simply runs to completion.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Unable to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
