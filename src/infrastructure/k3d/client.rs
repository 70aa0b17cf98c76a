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

use crate::shared::error::{Result, StackError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// One entry of `k3d cluster list -o json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSummary {
    pub name: String,
    #[serde(default)]
    pub servers_count: u32,
    #[serde(default)]
    pub servers_running: u32,
    #[serde(default)]
    pub agents_count: u32,
    #[serde(default)]
    pub agents_running: u32,
    #[serde(default)]
    pub has_loadbalancer: bool,
}

pub fn parse_cluster_list(json: &str) -> Result<Vec<ClusterSummary>> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(json)?)
}

#[async_trait::async_trait]
pub trait ClusterManager: Send + Sync {
    async fn cluster_exists(&self, name: &str) -> Result<bool>;

    async fn create_cluster(&self, config_path: &Path) -> Result<()>;

    async fn delete_cluster(&self, name: &str) -> Result<()>;

    async fn list_clusters(&self) -> Result<Vec<ClusterSummary>>;
}

/// `ClusterManager` backed by the k3d binary
pub struct K3dClient {
    program: String,
}

impl K3dClient {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        tracing::info!("Running {} {}", self.program, args.join(" "));
        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        cmd
    }

    fn spawn_error(&self, err: std::io::Error) -> StackError {
        if err.kind() == std::io::ErrorKind::NotFound {
            StackError::missing_dependency(&self.program)
        } else {
            StackError::Io(err)
        }
    }

    /// Run with captured output, failing on non-zero exit
    async fn run_captured(&self, args: &[&str]) -> Result<String> {
        let output = self
            .command(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        } else {
            Err(StackError::command_failed(
                &self.program,
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim(),
            ))
        }
    }

    /// Run with output streamed to the terminal
    async fn run_inherited(&self, args: &[&str]) -> Result<()> {
        let status = self
            .command(args)
            .status()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if status.success() {
            Ok(())
        } else {
            Err(StackError::command_failed(
                &self.program,
                status.code(),
                "see output above",
            ))
        }
    }
}

#[async_trait::async_trait]
impl ClusterManager for K3dClient {
    async fn cluster_exists(&self, name: &str) -> Result<bool> {
        let status = self
            .command(&["cluster", "get", name])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| self.spawn_error(e))?;
        Ok(status.success())
    }

    async fn create_cluster(&self, config_path: &Path) -> Result<()> {
        let path = config_path.to_string_lossy();
        self.run_inherited(&["cluster", "create", "--config", path.as_ref()])
            .await
    }

    async fn delete_cluster(&self, name: &str) -> Result<()> {
        self.run_inherited(&["cluster", "delete", name]).await
    }

    async fn list_clusters(&self) -> Result<Vec<ClusterSummary>> {
        let json = self.run_captured(&["cluster", "list", "-o", "json"]).await?;
        parse_cluster_list(&json)
    }
}
