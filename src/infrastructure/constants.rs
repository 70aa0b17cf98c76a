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

/// Application paths
pub const APP_DIR_NAME: &str = "k3d-stack";
pub const SETTINGS_FILE_NAME: &str = "settings.toml";
pub const BASE_FILE_NAME: &str = "base.yaml";

/// Fragment tree installed by the Debian package
pub const SYSTEM_CONFIG_ROOT: &str = "/usr/share/k3d-stack/config";

/// Environment variables
pub const ENV_CONFIG_ROOT: &str = "K3D_STACK_ROOT";
pub const ENV_SETTINGS_FILE: &str = "K3D_STACK_SETTINGS";

/// Fragment file extensions, in lookup order
pub const FRAGMENT_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Base document used when the config root carries no base.yaml
pub const BUILTIN_BASE: &str = "apiVersion: k3d.io/v1alpha3\nkind: Simple\n";

/// External tools
pub const DEFAULT_CLUSTER_MANAGER: &str = "k3d";
pub const DEFAULT_CONTAINER_RUNTIME: &str = "docker";

/// Cluster naming
pub const DEFAULT_CLUSTER_NAME: &str = "k3s-default";
pub const CLUSTER_NAME_MAX_LEN: usize = 32;
pub const CLUSTER_NAME_PATTERN: &str = r"^[a-z]([-a-z0-9]*[a-z0-9])?$";

/// Post-create existence polling
pub const DEFAULT_WAIT_ATTEMPTS: usize = 30;
pub const DEFAULT_WAIT_INTERVAL_MS: u64 = 1000;

/// Temporary config file naming
pub const TEMP_CONFIG_PREFIX: &str = "k3d-stack-";
pub const TEMP_CONFIG_SUFFIX: &str = ".yaml";
