//! Patch configuration stored in `itpatch.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::types::PatchMode;

pub const DEFAULT_CONFIG_PATH: &str = "itpatch.toml";

/// Patch configuration (TOML).
///
/// Every field is optional; missing fields fall back to the CubeMX + FreeRTOS
/// layout the tool was written for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PatchConfig {
    /// Directory holding one subdirectory per board.
    pub root: PathBuf,

    pub mode: PatchMode,

    /// Prepended to each line in comment mode.
    pub comment_prefix: String,

    /// Substrings that mark the first line of a handler block.
    pub markers: Vec<String>,

    pub targets: Vec<TargetConfig>,
}

/// One file to patch inside every board directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetConfig {
    /// Directory relative to the board directory.
    pub dir: PathBuf,
    /// File name suffix used to locate the file.
    pub suffix: String,
    /// Lines per block, counting the marker line.
    pub block_len: usize,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("MainMCU"),
            mode: PatchMode::Comment,
            comment_prefix: "//".to_string(),
            markers: vec![
                "PendSV_Handler".to_string(),
                "SysTick_Handler".to_string(),
                "SVC_Handler".to_string(),
            ],
            targets: vec![
                TargetConfig {
                    dir: PathBuf::from("Core/Src"),
                    suffix: "xx_it.c".to_string(),
                    block_len: 10,
                },
                TargetConfig {
                    dir: PathBuf::from("Core/Inc"),
                    suffix: "xx_it.h".to_string(),
                    block_len: 1,
                },
            ],
        }
    }
}

impl PatchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.markers.is_empty() {
            return Err(anyhow!("markers must be a non-empty array"));
        }
        if self.markers.iter().any(String::is_empty) {
            return Err(anyhow!("markers must not contain empty strings"));
        }
        if self.comment_prefix.is_empty() {
            return Err(anyhow!("comment_prefix must be non-empty"));
        }
        if self.targets.is_empty() {
            return Err(anyhow!("targets must be a non-empty array"));
        }
        for (index, target) in self.targets.iter().enumerate() {
            if target.suffix.is_empty() {
                return Err(anyhow!("targets[{index}].suffix must be non-empty"));
            }
            if target.block_len == 0 {
                return Err(anyhow!("targets[{index}].block_len must be > 0"));
            }
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `PatchConfig::default()`.
pub fn load_config(path: &Path) -> Result<PatchConfig> {
    if !path.exists() {
        let cfg = PatchConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: PatchConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &PatchConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
