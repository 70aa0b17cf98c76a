//! Development tasks for k3d-stack
//!
//! Usage: cargo xtask <command>

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use xshell::{cmd, Shell};

/// Presets registered in the binary; `smoke` resolves each of them
const PRESETS: [&str; 4] = ["minimal", "dev", "two-node-dev", "ha"];

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tasks for k3d-stack")]
struct Cli {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Run the test suite
    Test,
    /// Format, clippy, tests and the preset smoke run
    Ci,
    /// Resolve every preset with --dry-run against ./config
    Smoke {
        /// Only this preset
        #[arg(long)]
        preset: Option<String>,
    },
    /// Release tarball with the binary and the config tree, named the way
    /// cargo-binstall expects
    Dist {
        /// Target triple (defaults to the host)
        #[arg(long)]
        target: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let sh = Shell::new()?;
    sh.change_dir(project_root()?);

    match cli.command {
        Task::Test => test(&sh),
        Task::Ci => ci(&sh),
        Task::Smoke { preset } => smoke(&sh, preset.as_deref()),
        Task::Dist { target } => dist(&sh, target),
    }
}

fn test(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo test --workspace").run()?;
    Ok(())
}

fn ci(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo fmt --all -- --check").run()?;
    cmd!(sh, "cargo clippy --all-targets -- -D warnings").run()?;
    test(sh)?;
    smoke(sh, None)?;
    println!("✅ CI checks passed");
    Ok(())
}

fn smoke(sh: &Shell, only: Option<&str>) -> Result<()> {
    let presets: Vec<&str> = match only {
        Some(name) if PRESETS.contains(&name) => vec![name],
        Some(name) => bail!("'{}' is not a registered preset", name),
        None => PRESETS.to_vec(),
    };

    cmd!(sh, "cargo build --quiet").run()?;
    let binary = project_root()?.join("target/debug/k3d-stack");
    let config_root = project_root()?.join("config");

    // Resolve from an empty directory so local fragments cannot shadow ./config
    let scratch = sh.create_temp_dir()?;
    let _cwd = sh.push_dir(scratch.path());

    for preset in presets {
        let yaml = cmd!(
            sh,
            "{binary} --no-color --config-root {config_root} create --dry-run --preset {preset}"
        )
        .quiet()
        .read()
        .with_context(|| format!("preset '{}' failed to resolve", preset))?;

        if !yaml.contains("kind: Simple") {
            bail!("preset '{}' produced no k3d Simple config", preset);
        }
        println!("  ✓ {}", preset);
    }
    Ok(())
}

fn dist(sh: &Shell, target: Option<String>) -> Result<()> {
    let target = match target {
        Some(target) => target,
        None => host_triple(sh)?,
    };
    cmd!(sh, "cargo build --release --target {target}").run()?;

    let root = project_root()?;
    let stage = root.join("dist").join(format!("k3d-stack-{}", target));
    if stage.exists() {
        sh.remove_path(&stage)?;
    }
    sh.create_dir(&stage)?;
    sh.copy_file(
        root.join(format!("target/{}/release/k3d-stack", target)),
        &stage,
    )?;
    let config_dst = stage.join("config");
    cmd!(sh, "cp -R config {config_dst}").run()?;

    let archive = root
        .join("dist")
        .join(format!("k3d-stack-{}.tar.gz", target));
    let stage_name = format!("k3d-stack-{}", target);
    cmd!(sh, "tar -czf {archive} -C dist {stage_name}")
        .run()
        .context("failed to create tarball")?;

    println!("📦 {}", archive.display());
    Ok(())
}

fn host_triple(sh: &Shell) -> Result<String> {
    let info = cmd!(sh, "rustc -vV").read()?;
    info.lines()
        .find_map(|line| line.strip_prefix("host: "))
        .map(str::to_string)
        .context("rustc -vV did not report a host triple")
}

fn project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask must live one level below the project root")
}
