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

//! Per-run resolution state

use crate::domain::cluster::validator::validate_cluster_name;
use crate::domain::config::document::NAME_KEY;
use crate::domain::config::{Document, LoadedLayer, OptionCategory};
use crate::infrastructure::constants::{TEMP_CONFIG_PREFIX, TEMP_CONFIG_SUFFIX};
use crate::shared::error::{Result, StackError};
use serde_yaml::Value;
use std::fmt;
use std::io::Write;
use tempfile::NamedTempFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionState {
    Init,
    BaseLoaded,
    PresetApplied,
    OptionsApplied,
    UserConfigApplied,
    NameResolved,
    Finalized,
}

impl ResolutionState {
    pub fn can_advance_to(self, next: ResolutionState) -> bool {
        use ResolutionState::*;

        matches!(
            (self, next),
            (Init, BaseLoaded)
                | (BaseLoaded, PresetApplied | OptionsApplied | UserConfigApplied | NameResolved)
                | (PresetApplied, OptionsApplied | UserConfigApplied | NameResolved)
                | (OptionsApplied, OptionsApplied | UserConfigApplied | NameResolved)
                | (UserConfigApplied, NameResolved)
                | (NameResolved, Finalized)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerKind {
    Base,
    Preset(String),
    Option(OptionCategory),
    UserConfig,
}

impl LayerKind {
    fn target_state(&self) -> ResolutionState {
        match self {
            Self::Base => ResolutionState::BaseLoaded,
            Self::Preset(_) => ResolutionState::PresetApplied,
            Self::Option(_) => ResolutionState::OptionsApplied,
            Self::UserConfig => ResolutionState::UserConfigApplied,
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => f.write_str("base"),
            Self::Preset(name) => write!(f, "preset {}", name),
            Self::Option(category) => write!(f, "option {}", category),
            Self::UserConfig => f.write_str("user config"),
        }
    }
}

/// One applied layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerRecord {
    pub kind: LayerKind,
    pub source: String,
}

/// Accumulated state of a single resolution
#[derive(Debug)]
pub struct ResolutionContext {
    state: ResolutionState,
    document: Document,
    layers: Vec<LayerRecord>,
    name: Option<String>,
}

impl Default for ResolutionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionContext {
    pub fn new() -> Self {
        Self {
            state: ResolutionState::Init,
            document: Document::new(),
            layers: Vec::new(),
            name: None,
        }
    }

    pub fn state(&self) -> ResolutionState {
        self.state
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn layers(&self) -> &[LayerRecord] {
        &self.layers
    }

    fn advance(&mut self, next: ResolutionState) -> Result<()> {
        if !self.state.can_advance_to(next) {
            return Err(StackError::InvalidState(format!(
                "cannot move from {:?} to {:?}",
                self.state, next
            )));
        }
        tracing::trace!("Resolution state {:?} -> {:?}", self.state, next);
        self.state = next;
        Ok(())
    }

    /// Merge one layer on top of the accumulated document
    pub fn apply(&mut self, kind: LayerKind, layer: LoadedLayer) -> Result<()> {
        self.advance(kind.target_state())?;

        tracing::debug!("Applying {} layer from {}", kind, layer.source);
        let current = std::mem::take(&mut self.document);
        self.document = current.merge(layer.document);
        self.layers.push(LayerRecord {
            kind,
            source: layer.source,
        });
        Ok(())
    }

    /// Override wins and is written into the document; otherwise the
    /// document's own `name`; otherwise `default_name`. A `name` that is
    /// neither a string nor null is rejected, since k3d would not apply it.
    pub fn resolve_name(&mut self, name_override: Option<&str>, default_name: &str) -> Result<()> {
        self.advance(ResolutionState::NameResolved)?;

        let name = match name_override {
            Some(name) => {
                validate_cluster_name(name)?;
                self.document.set_name(name);
                name.to_string()
            }
            None => match self.document.get(NAME_KEY) {
                Some(Value::String(name)) => name.clone(),
                None | Some(Value::Null) => default_name.to_string(),
                Some(other) => {
                    return Err(StackError::ValidationError(format!(
                        "cluster name must be a string, found {}",
                        serde_yaml::to_string(other)
                            .map(|v| v.trim_end().to_string())
                            .unwrap_or_else(|_| "a non-string value".to_string())
                    )));
                }
            },
        };

        validate_cluster_name(&name)?;
        tracing::debug!("Resolved cluster name: {}", name);
        self.name = Some(name);
        Ok(())
    }

    pub fn finalize(mut self) -> Result<ResolvedConfig> {
        self.advance(ResolutionState::Finalized)?;

        let name = self
            .name
            .take()
            .ok_or_else(|| StackError::InvalidState("cluster name was not resolved".to_string()))?;

        Ok(ResolvedConfig {
            document: self.document,
            layers: self.layers,
            name,
        })
    }
}

/// The final merged configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub document: Document,
    pub layers: Vec<LayerRecord>,
    pub name: String,
}

impl ResolvedConfig {
    pub fn to_yaml(&self) -> Result<String> {
        self.document.to_yaml()
    }

    /// Write the document to a temporary file for the cluster manager. The
    /// resolved name is pinned in the written copy so the created cluster
    /// matches `self.name`. The file is removed when the returned handle is
    /// dropped.
    pub fn persist(&self) -> Result<NamedTempFile> {
        let mut document = self.document.clone();
        if document.name().is_none() {
            document.set_name(&self.name);
        }

        let mut file = tempfile::Builder::new()
            .prefix(TEMP_CONFIG_PREFIX)
            .suffix(TEMP_CONFIG_SUFFIX)
            .tempfile()?;
        file.write_all(document.to_yaml()?.as_bytes())?;
        file.flush()?;
        tracing::debug!("Wrote resolved config to {}", file.path().display());
        Ok(file)
    }
}
