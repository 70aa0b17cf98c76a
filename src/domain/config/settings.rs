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

use crate::infrastructure::constants::{
    APP_DIR_NAME, DEFAULT_CLUSTER_MANAGER, DEFAULT_CLUSTER_NAME, DEFAULT_CONTAINER_RUNTIME,
    DEFAULT_WAIT_ATTEMPTS, DEFAULT_WAIT_INTERVAL_MS, SETTINGS_FILE_NAME, SYSTEM_CONFIG_ROOT,
};
use crate::shared::error::{Result, StackError};
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Tool settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub cluster_manager: String,
    pub container_runtime: String,
    pub default_cluster_name: String,
    pub wait_attempts: usize,
    pub wait_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cluster_manager: DEFAULT_CLUSTER_MANAGER.to_string(),
            container_runtime: DEFAULT_CONTAINER_RUNTIME.to_string(),
            default_cluster_name: DEFAULT_CLUSTER_NAME.to_string(),
            wait_attempts: DEFAULT_WAIT_ATTEMPTS,
            wait_interval_ms: DEFAULT_WAIT_INTERVAL_MS,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StackError::not_found("settings file", vec![path.to_path_buf()])
            } else {
                StackError::Io(e)
            }
        })?;
        toml::from_str(&content).map_err(|e| StackError::parse_error(path, e.to_string()))
    }

    /// Explicit path wins; otherwise `<config_root>/settings.toml` if it
    /// exists; otherwise defaults.
    pub fn load(explicit: Option<&Path>, config_root: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let candidate = config_root.join(SETTINGS_FILE_NAME);
        if candidate.is_file() {
            tracing::debug!("Loading settings from {}", candidate.display());
            Self::from_file(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    pub fn wait_interval(&self) -> Duration {
        Duration::from_millis(self.wait_interval_ms)
    }
}

/// Root directory holding base.yaml, settings.toml and the category
/// subdirectories: `<user config dir>/k3d-stack` when it exists, else the
/// packaged tree under /usr/share, else the user path.
pub fn default_config_root() -> PathBuf {
    select_config_root(
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME)),
        Path::new(SYSTEM_CONFIG_ROOT),
    )
}

fn select_config_root(user_root: Option<PathBuf>, system_root: &Path) -> PathBuf {
    if let Some(ref dir) = user_root {
        if dir.is_dir() {
            return dir.clone();
        }
    }
    if system_root.is_dir() {
        tracing::debug!("Using packaged config root {}", system_root.display());
        return system_root.to_path_buf();
    }
    user_root.unwrap_or_else(|| {
        tracing::warn!("No user config directory available, using ./{}", APP_DIR_NAME);
        PathBuf::from(APP_DIR_NAME)
    })
}
