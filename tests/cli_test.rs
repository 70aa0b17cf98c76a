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

//! Tests that drive the compiled binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::tempdir;

fn k3d_stack_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("k3d-stack"));
    cmd.env_remove("K3D_STACK_ROOT")
        .env_remove("K3D_STACK_SETTINGS")
        .env_remove("RUST_LOG");
    cmd
}

fn config_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config")
}

#[test]
fn test_help_output() {
    k3d_stack_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("presets"));
}

#[test]
fn test_presets_lists_registry() {
    k3d_stack_cmd()
        .args(["--no-color", "presets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("minimal"))
        .stdout(predicate::str::contains("two-node-dev"))
        .stdout(predicate::str::contains("options/ha"));
}

#[test]
fn test_create_dry_run_prints_resolved_config() {
    let cwd = tempdir().unwrap();
    k3d_stack_cmd()
        .current_dir(cwd.path())
        .arg("--no-color")
        .arg("--config-root")
        .arg(config_root())
        .args(["create", "--dry-run", "--preset", "two-node-dev"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kind: Simple"))
        .stdout(predicate::str::contains("servers: 1"))
        .stdout(predicate::str::contains("agents: 2"))
        .stdout(predicate::str::contains("8080:80"));
}

#[test]
fn test_create_dry_run_with_name_and_option() {
    let cwd = tempdir().unwrap();
    k3d_stack_cmd()
        .current_dir(cwd.path())
        .env("K3D_STACK_ROOT", config_root())
        .args([
            "create",
            "--dry-run",
            "--no-color",
            "--preset",
            "dev",
            "--agents",
            "3",
            "--name",
            "sandbox",
            "--show-layers",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("agents: 3"))
        .stdout(predicate::str::contains("name: sandbox"))
        .stdout(predicate::str::contains("option agents"));
}

#[test]
fn test_create_unknown_preset_fails() {
    let cwd = tempdir().unwrap();
    k3d_stack_cmd()
        .current_dir(cwd.path())
        .arg("--config-root")
        .arg(config_root())
        .args(["create", "--dry-run", "--preset", "huge"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown preset"));
}

#[test]
fn test_create_missing_fragment_fails() {
    let cwd = tempdir().unwrap();
    k3d_stack_cmd()
        .current_dir(cwd.path())
        .arg("--config-root")
        .arg(config_root())
        .args(["create", "--dry-run", "--servers", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("servers/9"));
}

#[test]
fn test_create_rejects_invalid_name() {
    let cwd = tempdir().unwrap();
    k3d_stack_cmd()
        .current_dir(cwd.path())
        .arg("--config-root")
        .arg(config_root())
        .args(["create", "--dry-run", "--name", "Not_Valid"])
        .assert()
        .failure();
}

#[test]
fn test_bad_settings_file_fails() {
    let cwd = tempdir().unwrap();
    let settings = cwd.path().join("settings.toml");
    std::fs::write(&settings, "wait_attempts = \"many\"\n").unwrap();

    k3d_stack_cmd()
        .current_dir(cwd.path())
        .arg("--config-root")
        .arg(config_root())
        .arg("--settings")
        .arg(&settings)
        .args(["create", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load settings"));
}

#[test]
fn test_create_rejects_numeric_name() {
    let cwd = tempdir().unwrap();
    std::fs::write(cwd.path().join("num.yaml"), "name: 123\n").unwrap();
    k3d_stack_cmd()
        .current_dir(cwd.path())
        .arg("--config-root")
        .arg(config_root())
        .args(["create", "--dry-run", "-c", "num.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a string"));
}

/// Fake `k3d` and `docker` that log their arguments. `k3d cluster get`
/// reports a missing cluster; `k3d cluster create --config F` copies F.
#[cfg(unix)]
fn fake_tools(dir: &std::path::Path) -> (PathBuf, PathBuf, PathBuf) {
    use std::os::unix::fs::PermissionsExt;

    let bin = dir.join("bin");
    std::fs::create_dir_all(&bin).unwrap();
    let calls = dir.join("k3d-calls.log");
    let copy = dir.join("k3d-config.yaml");

    let k3d = format!(
        "#!/bin/sh\n\
         echo \"$*\" >> '{calls}'\n\
         case \"$1 $2\" in\n\
         \"cluster get\") exit 1 ;;\n\
         \"cluster create\") cat \"$4\" > '{copy}' ;;\n\
         esac\n\
         exit 0\n",
        calls = calls.display(),
        copy = copy.display()
    );
    for (name, script) in [("k3d", k3d.as_str()), ("docker", "#!/bin/sh\nexit 0\n")] {
        let path = bin.join(name);
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
    (bin, calls, copy)
}

#[cfg(unix)]
fn path_with(bin: &std::path::Path) -> std::ffi::OsString {
    let mut paths = vec![bin.to_path_buf()];
    paths.extend(std::env::split_paths(&std::env::var_os("PATH").unwrap_or_default()));
    std::env::join_paths(paths).unwrap()
}

#[cfg(unix)]
#[test]
fn test_missing_fragment_never_reaches_k3d() {
    let cwd = tempdir().unwrap();
    let (bin, calls, _) = fake_tools(cwd.path());

    k3d_stack_cmd()
        .current_dir(cwd.path())
        .env("PATH", path_with(&bin))
        .arg("--config-root")
        .arg(config_root())
        .args(["create", "--yes", "--no-wait", "--servers", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("servers/9"));

    assert!(!calls.exists(), "k3d was invoked");
}

#[cfg(unix)]
#[test]
fn test_create_hands_resolved_config_to_k3d() {
    let cwd = tempdir().unwrap();
    let (bin, calls, copy) = fake_tools(cwd.path());
    let tmp = tempdir().unwrap();

    k3d_stack_cmd()
        .current_dir(cwd.path())
        .env("PATH", path_with(&bin))
        .env("TMPDIR", tmp.path())
        .arg("--no-color")
        .arg("--config-root")
        .arg(config_root())
        .args(["create", "--yes", "--no-wait", "--preset", "two-node-dev"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cluster k3s-default created successfully!"));

    let log = std::fs::read_to_string(&calls).unwrap();
    assert!(log.contains("cluster get k3s-default"));
    assert!(log.contains("cluster create --config"));

    let handed = std::fs::read_to_string(&copy).unwrap();
    assert!(handed.contains("agents: 2"));
    assert!(handed.contains("name: k3s-default"));

    // The temporary config is gone once the command returns
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}
