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

use std::fmt;
use std::str::FromStr;

/// Recognized option categories. Declaration order is the order in which
/// option layers are applied during a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionCategory {
    Servers,
    Agents,
    Image,
    Token,
    KubeApi,
    Network,
    Ports,
    Volumes,
    Environment,
    Labels,
    Registries,
    Options,
}

impl OptionCategory {
    pub const ALL: [OptionCategory; 12] = [
        Self::Servers,
        Self::Agents,
        Self::Image,
        Self::Token,
        Self::KubeApi,
        Self::Network,
        Self::Ports,
        Self::Volumes,
        Self::Environment,
        Self::Labels,
        Self::Registries,
        Self::Options,
    ];

    /// Subdirectory of the config root holding this category's fragments
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Servers => "servers",
            Self::Agents => "agents",
            Self::Image => "image",
            Self::Token => "token",
            Self::KubeApi => "kubeapi",
            Self::Network => "network",
            Self::Ports => "ports",
            Self::Volumes => "volumes",
            Self::Environment => "env",
            Self::Labels => "labels",
            Self::Registries => "registries",
            Self::Options => "options",
        }
    }
}

impl fmt::Display for OptionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for OptionCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "servers" => Ok(Self::Servers),
            "agents" => Ok(Self::Agents),
            "image" => Ok(Self::Image),
            "token" => Ok(Self::Token),
            "kubeapi" | "kube-api" => Ok(Self::KubeApi),
            "network" => Ok(Self::Network),
            "ports" => Ok(Self::Ports),
            "volumes" => Ok(Self::Volumes),
            "env" | "environment" => Ok(Self::Environment),
            "labels" => Ok(Self::Labels),
            "registries" => Ok(Self::Registries),
            "options" => Ok(Self::Options),
            _ => Err(format!("Unknown option category: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_sorted_in_application_order() {
        let mut sorted = OptionCategory::ALL;
        sorted.sort();
        assert_eq!(sorted, OptionCategory::ALL);
    }

    #[test]
    fn test_dir_names_round_trip_through_from_str() {
        for category in OptionCategory::ALL {
            assert_eq!(category.dir_name().parse::<OptionCategory>(), Ok(category));
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!("kube-api".parse(), Ok(OptionCategory::KubeApi));
        assert_eq!("Environment".parse(), Ok(OptionCategory::Environment));
        assert!("nodes".parse::<OptionCategory>().is_err());
    }
}
