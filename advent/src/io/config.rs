//! Solver configuration stored in `advent.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Solver configuration (TOML).
///
/// Every field is optional in the file; missing fields take the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AdventConfig {
    /// Directory holding `dayNN/input.txt`, relative to the working directory.
    pub inputs_dir: PathBuf,

    pub maze: MazeConfig,

    pub wasteland: WastelandConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MazeConfig {
    /// Most loop cells to visit before giving up. `0` means the grid's cell count.
    pub step_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WastelandConfig {
    /// Most steps any walk may take.
    pub max_steps: usize,

    /// Start and end nodes for a single walk.
    pub start_node: String,
    pub end_node: String,

    /// Name suffixes selecting start and end nodes for multi-walker strategies.
    pub start_suffix: String,
    pub end_suffix: String,
}

impl Default for WastelandConfig {
    fn default() -> Self {
        Self {
            max_steps: 100_000_000,
            start_node: "AAA".to_string(),
            end_node: "ZZZ".to_string(),
            start_suffix: "A".to_string(),
            end_suffix: "Z".to_string(),
        }
    }
}

impl Default for AdventConfig {
    fn default() -> Self {
        Self {
            inputs_dir: PathBuf::from("inputs"),
            maze: MazeConfig::default(),
            wasteland: WastelandConfig::default(),
        }
    }
}

impl AdventConfig {
    pub fn validate(&self) -> Result<()> {
        if self.inputs_dir.as_os_str().is_empty() {
            return Err(anyhow!("inputs_dir must be non-empty"));
        }
        let wasteland = &self.wasteland;
        if wasteland.max_steps == 0 {
            return Err(anyhow!("wasteland.max_steps must be > 0"));
        }
        if wasteland.start_node.trim().is_empty() || wasteland.end_node.trim().is_empty() {
            return Err(anyhow!(
                "wasteland.start_node and end_node must be non-empty"
            ));
        }
        if wasteland.start_suffix.is_empty() || wasteland.end_suffix.is_empty() {
            return Err(anyhow!(
                "wasteland.start_suffix and end_suffix must be non-empty"
            ));
        }
        Ok(())
    }

    /// Render as pretty TOML with a trailing newline.
    pub fn to_toml(&self) -> Result<String> {
        let mut buf = toml::to_string_pretty(self).context("serialize config toml")?;
        if !buf.ends_with('\n') {
            buf.push('\n');
        }
        Ok(buf)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `AdventConfig::default()`.
pub fn load_config(path: &Path) -> Result<AdventConfig> {
    if !path.exists() {
        let cfg = AdventConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: AdventConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &AdventConfig) -> Result<()> {
    cfg.validate()?;
    write_atomic(path, &cfg.to_toml()?)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, AdventConfig::default());
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("advent.toml");
        let mut cfg = AdventConfig::default();
        cfg.maze.step_limit = 64;
        cfg.wasteland.start_suffix = "AA".to_string();
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("advent.toml");
        fs::write(
            &path,
            "inputs_dir = \"puzzles\"\n[wasteland]\nmax_steps = 10\n",
        )
        .expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.inputs_dir, PathBuf::from("puzzles"));
        assert_eq!(cfg.wasteland.max_steps, 10);
        assert_eq!(cfg.wasteland.end_suffix, "Z");
        assert_eq!(cfg.maze, MazeConfig::default());
    }

    #[test]
    fn rejects_zero_max_steps() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("advent.toml");
        fs::write(&path, "[wasteland]\nmax_steps = 0\n").expect("write");
        let err = load_config(&path).expect_err("invalid config");
        assert!(format!("{:#}", err).contains("max_steps"));
    }
}
