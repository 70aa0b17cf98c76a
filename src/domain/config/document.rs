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

//! Configuration documents and the deep-merge engine
//!
//! Merge semantics follow `yq '. * overlay'`:
//! - Mappings: deep-merge by key, base key order preserved
//! - Sequences: REPLACE (overlay wins entirely)
//! - Scalars and type mismatches: overlay wins

use crate::shared::error::{Result, StackError};
use serde_yaml::{Mapping, Value};
use std::fmt;
use std::path::Path;

/// Key holding the cluster name in a k3d `Simple` config
pub const NAME_KEY: &str = "name";

/// A YAML configuration document whose top level is always a mapping
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    root: Mapping,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document from YAML text. `origin` is only used in error messages.
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        let value: Value = serde_yaml::from_str(content)
            .map_err(|e| StackError::parse_error(origin, e.to_string()))?;

        match value {
            // An empty file is an empty layer
            Value::Null => Ok(Self::new()),
            Value::Mapping(root) => Ok(Self { root }),
            other => Err(StackError::parse_error(
                origin,
                format!(
                    "top-level value must be a mapping, found {}",
                    value_kind(&other)
                ),
            )),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    pub fn name(&self) -> Option<&str> {
        self.get(NAME_KEY).and_then(Value::as_str)
    }

    /// Overwrite the cluster name. This is the one field-level mutation a
    /// resolution performs, and only as its final step.
    pub(crate) fn set_name(&mut self, name: &str) {
        self.root
            .insert(Value::from(NAME_KEY), Value::from(name.to_string()));
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.root
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.root)?)
    }

    /// Deep-merge `overlay` on top of `self`; overlay wins on conflicts.
    pub fn merge(self, overlay: Document) -> Document {
        match merge_values(Value::Mapping(self.root), Value::Mapping(overlay.root)) {
            Value::Mapping(root) => Document { root },
            // mapping ⨯ mapping always yields a mapping
            _ => unreachable!("merging two mappings produced a non-mapping"),
        }
    }
}

impl From<Mapping> for Document {
    fn from(root: Mapping) -> Self {
        Self { root }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_yaml::to_string(&self.root) {
            Ok(yaml) => f.write_str(&yaml),
            Err(_) => Err(fmt::Error),
        }
    }
}

/// Deep merge two YAML values.
pub fn merge_values(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(mut base_map), Value::Mapping(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(slot) => {
                        let base_value = std::mem::replace(slot, Value::Null);
                        *slot = merge_values(base_value, overlay_value);
                    }
                    None => {
                        base_map.insert(key, overlay_value);
                    }
                }
            }
            Value::Mapping(base_map)
        }

        // Sequences: REPLACE (no element-wise merge)
        (Value::Sequence(_), overlay @ Value::Sequence(_)) => overlay,

        (_, overlay) => overlay,
    }
}

/// Fold documents left-to-right; the last document has highest precedence.
pub fn merge_all<I>(layers: I) -> Document
where
    I: IntoIterator<Item = Document>,
{
    layers.into_iter().fold(Document::new(), Document::merge)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
