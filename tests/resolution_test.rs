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

//! End-to-end resolution against the bundled config tree

use k3d_stack::domain::config::{LayerLoader, OptionCategory};
use k3d_stack::domain::resolver::{ResolveRequest, Resolver};
use k3d_stack::StackError;
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use tempfile::TempDir;

fn config_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config")
}

/// Loader whose working directory is an empty temp dir, so only the
/// bundled tree is consulted unless a test writes local fragments.
fn loader(cwd: &TempDir) -> LayerLoader {
    LayerLoader::new(cwd.path(), config_root())
}

fn as_u64(resolved: &k3d_stack::ResolvedConfig, key: &str) -> Option<u64> {
    resolved.document.get(key).and_then(|v| v.as_u64())
}

#[test]
fn test_two_node_dev_preset() {
    let cwd = TempDir::new().unwrap();
    let loader = loader(&cwd);
    let resolved = Resolver::new(&loader, "k3s-default")
        .resolve(ResolveRequest::new().preset("two-node-dev"))
        .unwrap();

    assert_eq!(resolved.name, "k3s-default");
    assert_eq!(as_u64(&resolved, "servers"), Some(1));
    assert_eq!(as_u64(&resolved, "agents"), Some(2));
    assert_eq!(
        resolved.document.get("apiVersion").and_then(|v| v.as_str()),
        Some("k3d.io/v1alpha3")
    );

    let yaml = resolved.to_yaml().unwrap();
    assert!(yaml.contains("8080:80"));
    assert!(yaml.contains("loadbalancer"));
    assert!(yaml.contains("switchCurrentContext: true"));
}

#[test]
fn test_minimal_preset_disables_traefik() {
    let cwd = TempDir::new().unwrap();
    let loader = loader(&cwd);
    let resolved = Resolver::new(&loader, "k3s-default")
        .resolve(ResolveRequest::new().preset("minimal"))
        .unwrap();

    assert_eq!(as_u64(&resolved, "agents"), Some(0));
    assert!(resolved.to_yaml().unwrap().contains("--disable=traefik"));
}

#[test]
fn test_ha_preset_with_user_config() {
    let cwd = TempDir::new().unwrap();
    std::fs::write(
        cwd.path().join("cluster.yaml"),
        "name: ha-lab\nagents: 1\noptions:\n  k3d:\n    timeout: 300s\n",
    )
    .unwrap();
    let loader = loader(&cwd);
    let resolved = Resolver::new(&loader, "k3s-default")
        .resolve(ResolveRequest::new().preset("ha").config_file("cluster.yaml"))
        .unwrap();

    assert_eq!(resolved.name, "ha-lab");
    assert_eq!(as_u64(&resolved, "servers"), Some(3));
    assert_eq!(as_u64(&resolved, "agents"), Some(1));

    let yaml = resolved.to_yaml().unwrap();
    assert!(yaml.contains("timeout: 300s"));
    // Sibling keys from the preset survive the nested override
    assert!(yaml.contains("wait: true"));
    assert!(yaml.contains("--cluster-init"));
}

#[test]
fn test_local_fragment_shadows_config_root() {
    let cwd = TempDir::new().unwrap();
    std::fs::create_dir_all(cwd.path().join("agents")).unwrap();
    std::fs::write(cwd.path().join("agents/2.yaml"), "agents: 5\n").unwrap();
    let loader = loader(&cwd);

    let resolved = Resolver::new(&loader, "k3s-default")
        .resolve(ResolveRequest::new().preset("two-node-dev"))
        .unwrap();
    assert_eq!(as_u64(&resolved, "agents"), Some(5));
}

#[test]
fn test_every_category_resolves() {
    let cwd = TempDir::new().unwrap();
    let loader = loader(&cwd);
    let request = ResolveRequest::new()
        .option(OptionCategory::Servers, "1")
        .option(OptionCategory::Agents, "2")
        .option(OptionCategory::Image, "v1.30")
        .option(OptionCategory::Token, "dev")
        .option(OptionCategory::KubeApi, "6443")
        .option(OptionCategory::Network, "shared")
        .option(OptionCategory::Ports, "web")
        .option(OptionCategory::Volumes, "workspace")
        .option(OptionCategory::Environment, "debug")
        .option(OptionCategory::Labels, "team")
        .option(OptionCategory::Registries, "local")
        .option(OptionCategory::Options, "dev");

    let resolved = Resolver::new(&loader, "k3s-default").resolve(request).unwrap();
    assert_eq!(resolved.layers.len(), 13);

    let yaml = resolved.to_yaml().unwrap();
    for needle in [
        "rancher/k3s:v1.30.4-k3s1",
        "k3d-stack-dev-token",
        "hostIP: 127.0.0.1",
        "k3d-stack-net",
        "8443:443",
        "/tmp/k3d-stack:/var/lib/k3d-stack",
        "K3S_DEBUG=true",
        "team=platform",
        "registry.localhost",
        "updateDefaultKubeconfig: true",
    ] {
        assert!(yaml.contains(needle), "missing {} in\n{}", needle, yaml);
    }
}

#[test]
fn test_resolution_is_deterministic() {
    let cwd = TempDir::new().unwrap();
    let loader = loader(&cwd);
    let resolver = Resolver::new(&loader, "k3s-default");
    let request = ResolveRequest::new()
        .preset("dev")
        .option(OptionCategory::Labels, "team")
        .option(OptionCategory::Image, "latest");

    let first = resolver.resolve(request.clone()).unwrap().to_yaml().unwrap();
    let second = resolver.resolve(request).unwrap().to_yaml().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_unknown_preset_is_rejected() {
    let cwd = TempDir::new().unwrap();
    let loader = loader(&cwd);
    let err = Resolver::new(&loader, "k3s-default")
        .resolve(ResolveRequest::new().preset("huge"))
        .unwrap_err();

    match err {
        StackError::UnknownPreset { name, known } => {
            assert_eq!(name, "huge");
            assert!(known.contains(&"two-node-dev".to_string()));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_missing_fragment_lists_searched_paths() {
    let cwd = TempDir::new().unwrap();
    let loader = loader(&cwd);
    let err = Resolver::new(&loader, "k3s-default")
        .resolve(ResolveRequest::new().option(OptionCategory::Agents, "7"))
        .unwrap_err();

    match err {
        StackError::ConfigNotFound { searched, .. } => {
            assert_eq!(searched.len(), 4);
            assert!(searched[0].starts_with(cwd.path()));
            assert!(searched[3].ends_with("agents/7.yml"));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_persisted_config_matches_yaml() {
    let cwd = TempDir::new().unwrap();
    let loader = loader(&cwd);
    let resolved = Resolver::new(&loader, "k3s-default")
        .resolve(ResolveRequest::new().preset("dev").name("persist-check"))
        .unwrap();

    let file = resolved.persist().unwrap();
    let path = file.path().to_path_buf();
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        resolved.to_yaml().unwrap()
    );
    drop(file);
    assert!(!path.exists());
}
