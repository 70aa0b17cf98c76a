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

use super::category::OptionCategory;
use super::document::Document;
use crate::infrastructure::constants::{BASE_FILE_NAME, BUILTIN_BASE, FRAGMENT_EXTENSIONS};
use crate::shared::error::{Result, StackError};
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

/// Locates and parses configuration documents.
///
/// Fragments are looked up in the working directory first, then under the
/// config root: `<dir>/<category>/<variant>.yaml` (or `.yml`).
#[derive(Debug, Clone)]
pub struct LayerLoader {
    working_dir: PathBuf,
    config_root: PathBuf,
}

impl LayerLoader {
    pub fn new(working_dir: impl Into<PathBuf>, config_root: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            config_root: config_root.into(),
        }
    }

    /// Loader rooted at the process working directory
    pub fn from_current_dir(config_root: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self::new(std::env::current_dir()?, config_root))
    }

    pub fn config_root(&self) -> &Path {
        &self.config_root
    }

    /// Candidate paths for a fragment, in lookup order
    pub fn fragment_candidates(&self, category: OptionCategory, variant: &str) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        for dir in [&self.working_dir, &self.config_root] {
            for ext in FRAGMENT_EXTENSIONS {
                candidates.push(
                    dir.join(category.dir_name())
                        .join(format!("{}.{}", variant, ext)),
                );
            }
        }
        candidates
    }

    pub fn load_fragment(&self, category: OptionCategory, variant: &str) -> Result<LoadedLayer> {
        if variant.is_empty() || variant.contains(['/', '\\']) || variant == ".." {
            return Err(StackError::ValidationError(format!(
                "Invalid variant '{}' for category '{}'",
                variant, category
            )));
        }

        let candidates = self.fragment_candidates(category, variant);
        let path = first_existing(&candidates).ok_or_else(|| {
            StackError::not_found(format!("fragment {}/{}", category, variant), candidates.clone())
        })?;

        tracing::debug!("Loading fragment {}/{} from {}", category, variant, path.display());
        load_document(path)
    }

    /// Base document: `<config_root>/base.yaml`, or the built-in base
    pub fn load_base(&self) -> Result<LoadedLayer> {
        let path = self.config_root.join(BASE_FILE_NAME);
        if path.is_file() {
            load_document(&path)
        } else {
            tracing::debug!("No {} found, using built-in base", path.display());
            let document = Document::parse(BUILTIN_BASE, Path::new("<builtin base>"))?;
            Ok(LoadedLayer {
                document,
                source: "<builtin base>".to_string(),
            })
        }
    }

    /// User config file: as given (absolute or relative to the working
    /// directory), then relative to the config root.
    pub fn load_user_config(&self, path: &Path) -> Result<LoadedLayer> {
        let candidates = if path.is_absolute() {
            vec![path.to_path_buf()]
        } else {
            vec![self.working_dir.join(path), self.config_root.join(path)]
        };

        let found = first_existing(&candidates).ok_or_else(|| {
            StackError::not_found(
                format!("config file {}", path.display()),
                candidates.clone(),
            )
        })?;
        load_document(found)
    }
}

/// A parsed document together with where it came from
#[derive(Debug, Clone)]
pub struct LoadedLayer {
    pub document: Document,
    pub source: String,
}

fn first_existing(candidates: &[PathBuf]) -> Option<&PathBuf> {
    candidates.iter().find(|p| p.is_file())
}

fn load_document(path: &Path) -> Result<LoadedLayer> {
    let content = read_to_string(path)?;
    let document = Document::parse(&content, path)?;
    Ok(LoadedLayer {
        document,
        source: path.display().to_string(),
    })
}
