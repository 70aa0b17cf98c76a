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

//! Static preset registry

use super::category::OptionCategory;
use crate::shared::error::{Result, StackError};
use std::fmt;

/// One layer of a preset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetLayer {
    /// Fragment loaded through the layer loader
    Fragment {
        category: OptionCategory,
        variant: &'static str,
    },
    /// Inline YAML document
    Literal {
        label: &'static str,
        yaml: &'static str,
    },
}

impl fmt::Display for PresetLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fragment { category, variant } => write!(f, "{}/{}", category, variant),
            Self::Literal { label, .. } => write!(f, "<{}>", label),
        }
    }
}

const fn fragment(category: OptionCategory, variant: &'static str) -> PresetLayer {
    PresetLayer::Fragment { category, variant }
}

/// Shared sub-preset included by the dev presets
const DEV_LAYERS: &[PresetLayer] = &[
    fragment(OptionCategory::Ports, "dev"),
    fragment(OptionCategory::Options, "dev"),
];

const DISABLE_TRAEFIK: &str = r#"options:
  k3s:
    extraArgs:
      - arg: --disable=traefik
        nodeFilters:
          - server:*
"#;

#[derive(Debug, Clone, Copy)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    own: &'static [PresetLayer],
    shared: &'static [PresetLayer],
}

impl Preset {
    /// Ordered layers: the preset's own layers, then any shared sub-preset
    pub fn layers(&self) -> Vec<PresetLayer> {
        self.own.iter().chain(self.shared.iter()).copied().collect()
    }
}

const PRESETS: &[Preset] = &[
    Preset {
        name: "minimal",
        description: "Single server, no agents, traefik disabled",
        own: &[
            fragment(OptionCategory::Servers, "1"),
            fragment(OptionCategory::Agents, "0"),
            PresetLayer::Literal {
                label: "disable-traefik",
                yaml: DISABLE_TRAEFIK,
            },
        ],
        shared: &[],
    },
    Preset {
        name: "dev",
        description: "Single server with dev port mappings",
        own: &[
            fragment(OptionCategory::Servers, "1"),
            fragment(OptionCategory::Agents, "0"),
        ],
        shared: DEV_LAYERS,
    },
    Preset {
        name: "two-node-dev",
        description: "One server, two agents, dev port mappings",
        own: &[
            fragment(OptionCategory::Servers, "1"),
            fragment(OptionCategory::Agents, "2"),
        ],
        shared: DEV_LAYERS,
    },
    Preset {
        name: "ha",
        description: "Three servers with embedded etcd, three agents",
        own: &[
            fragment(OptionCategory::Servers, "3"),
            fragment(OptionCategory::Agents, "3"),
            fragment(OptionCategory::Options, "ha"),
        ],
        shared: &[],
    },
];

/// Static registry of known presets
pub struct PresetRegistry;

impl PresetRegistry {
    pub fn all() -> &'static [Preset] {
        PRESETS
    }

    pub fn names() -> Vec<String> {
        PRESETS.iter().map(|p| p.name.to_string()).collect()
    }

    pub fn get(name: &str) -> Result<&'static Preset> {
        PRESETS
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| StackError::UnknownPreset {
                name: name.to_string(),
                known: Self::names(),
            })
    }

    pub fn resolve(name: &str) -> Result<Vec<PresetLayer>> {
        Self::get(name).map(Preset::layers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_node_dev_layers() {
        let layers = PresetRegistry::resolve("two-node-dev").unwrap();
        let rendered: Vec<String> = layers.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec!["servers/1", "agents/2", "ports/dev", "options/dev"]
        );
    }

    #[test]
    fn test_dev_presets_share_sub_preset() {
        let dev = PresetRegistry::resolve("dev").unwrap();
        let two = PresetRegistry::resolve("two-node-dev").unwrap();
        assert_eq!(dev[dev.len() - 2..], two[two.len() - 2..]);
    }

    #[test]
    fn test_unknown_preset() {
        let err = PresetRegistry::resolve("three-node-prod").unwrap_err();
        match err {
            StackError::UnknownPreset { name, known } => {
                assert_eq!(name, "three-node-prod");
                assert!(known.contains(&"two-node-dev".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_preset_names_are_unique() {
        let mut names = PresetRegistry::names();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), PresetRegistry::all().len());
    }

    #[test]
    fn test_literal_layers_parse() {
        use crate::domain::config::Document;
        use std::path::Path;

        for preset in PresetRegistry::all() {
            for layer in preset.layers() {
                if let PresetLayer::Literal { yaml, .. } = layer {
                    assert!(Document::parse(yaml, Path::new(preset.name)).is_ok());
                }
            }
        }
    }
}
