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

use crate::infrastructure::constants::{CLUSTER_NAME_MAX_LEN, CLUSTER_NAME_PATTERN};
use crate::shared::error::{Result, StackError};
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

static CLUSTER_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(CLUSTER_NAME_PATTERN).expect("cluster name pattern is a valid regex")
});

/// k3d prefixes container and network names with the cluster name, so it has
/// to be a DNS label that leaves room for those prefixes.
pub fn validate_cluster_name(name: &str) -> Result<()> {
    if name.len() > CLUSTER_NAME_MAX_LEN {
        return Err(StackError::ValidationError(format!(
            "cluster name too long (max {} chars): {}",
            CLUSTER_NAME_MAX_LEN, name
        )));
    }

    if !CLUSTER_NAME_RE.is_match(name) {
        return Err(StackError::ValidationError(format!(
            "\n Invalid cluster name: '{}'\n\
            \n  Cluster names must start with a lowercase letter and contain only\n\
            lowercase letters, digits and '-' (not at the end).\n",
            name
        )));
    }

    Ok(())
}

/// Find an executable on PATH
pub fn find_executable(binary: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    let exts = if cfg!(windows) {
        vec![".exe", ".cmd", ".bat", ""]
    } else {
        vec![""]
    };

    for dir in std::env::split_paths(&path_var) {
        for ext in &exts {
            let candidate = dir.join(format!("{}{}", binary, ext));
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Fail with `MissingDependency` for the first tool not on PATH
pub fn ensure_dependencies(tools: &[&str]) -> Result<()> {
    for tool in tools {
        match find_executable(tool) {
            Some(path) => tracing::debug!("Found {} at {}", tool, path.display()),
            None => return Err(StackError::missing_dependency(*tool)),
        }
    }
    Ok(())
}
