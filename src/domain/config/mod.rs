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

//! Configuration domain

pub mod category;
pub mod document;
pub mod loader;
pub mod preset;
pub mod settings;

pub use self::category::OptionCategory;
pub use self::document::{merge_all, merge_values, Document};
pub use self::loader::{LayerLoader, LoadedLayer};
pub use self::preset::{Preset, PresetLayer, PresetRegistry};
pub use self::settings::{default_config_root, Settings};
