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

use super::context::{LayerKind, ResolutionContext, ResolvedConfig};
use crate::domain::config::{
    merge_all, Document, LayerLoader, LoadedLayer, OptionCategory, PresetLayer, PresetRegistry,
};
use crate::shared::error::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Inputs of one resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveRequest {
    pub preset: Option<String>,
    /// Keyed by category, so iteration follows the application order
    pub options: BTreeMap<OptionCategory, String>,
    pub config_file: Option<PathBuf>,
    pub name: Option<String>,
}

impl ResolveRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preset(mut self, preset: impl Into<String>) -> Self {
        self.preset = Some(preset.into());
        self
    }

    pub fn option(mut self, category: OptionCategory, variant: impl Into<String>) -> Self {
        self.options.insert(category, variant.into());
        self
    }

    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Drives a resolution through base -> preset -> options -> user config ->
/// name.
pub struct Resolver<'a> {
    loader: &'a LayerLoader,
    default_name: String,
}

impl<'a> Resolver<'a> {
    pub fn new(loader: &'a LayerLoader, default_name: impl Into<String>) -> Self {
        Self {
            loader,
            default_name: default_name.into(),
        }
    }

    pub fn resolve(&self, request: ResolveRequest) -> Result<ResolvedConfig> {
        // Reject unknown presets before touching the filesystem
        let preset_layers = match request.preset.as_deref() {
            Some(name) => Some((name, PresetRegistry::resolve(name)?)),
            None => None,
        };

        let mut ctx = ResolutionContext::new();
        ctx.apply(LayerKind::Base, self.loader.load_base()?)?;

        if let Some((name, layers)) = preset_layers {
            let preset = self.load_preset(name, &layers)?;
            ctx.apply(LayerKind::Preset(name.to_string()), preset)?;
        }

        for (category, variant) in &request.options {
            let fragment = self.loader.load_fragment(*category, variant)?;
            ctx.apply(LayerKind::Option(*category), fragment)?;
        }

        if let Some(ref path) = request.config_file {
            ctx.apply(LayerKind::UserConfig, self.loader.load_user_config(path)?)?;
        }

        ctx.resolve_name(request.name.as_deref(), &self.default_name)?;
        ctx.finalize()
    }

    /// Fold a preset's layers into one document
    fn load_preset(&self, name: &str, layers: &[PresetLayer]) -> Result<LoadedLayer> {
        let mut documents = Vec::with_capacity(layers.len());
        for layer in layers {
            let document = match *layer {
                PresetLayer::Fragment { category, variant } => {
                    self.loader.load_fragment(category, variant)?.document
                }
                PresetLayer::Literal { label, yaml } => {
                    Document::parse(yaml, Path::new(&format!("<preset {} {}>", name, label)))?
                }
            };
            documents.push(document);
        }

        let parts: Vec<String> = layers.iter().map(ToString::to_string).collect();
        Ok(LoadedLayer {
            document: merge_all(documents),
            source: format!("preset {} ({})", name, parts.join(", ")),
        })
    }
}
